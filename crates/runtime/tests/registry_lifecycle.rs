use std::fs;
use std::sync::Arc;
use std::thread;

use augment_content::LoadOptions;
use augment_core::{
    AttackModifier, CombatOrigin, CreatureKind, DamageContext, DamageKind, Factor, Race,
};
use augment_runtime::{
    AugmentBindings, AugmentRegistry, EngineConfig, EntityAugments, InitialModifiers, RegistryError,
    StaticSource,
};

const VAMPIRIC: &str = r#"(
    augments: [
        (
            name: "vampiric",
            description: "Heals the wielder",
            modifiers: [
                (mod: "lifesteal", value: 10, factor: "percent", chance: 100),
            ],
        ),
        (
            name: "stoneskin",
            modifiers: [
                (mod: "absorb", value: 8, factor: "flat", damage: "physical"),
            ],
        ),
    ],
)"#;

fn write_catalog(dir: &tempfile::TempDir, content: &str) -> EngineConfig {
    fs::write(dir.path().join("augments.ron"), content).expect("catalog should be writable");
    EngineConfig::new(dir.path(), "augments.ron")
}

/// Vampiric Attachment Scenario
///
/// 1. A catalog file defines `vampiric` with one lifesteal modifier
/// 2. The registry loads it from disk
/// 3. An entity attaches a clone
/// 4. The clone exposes exactly one lifesteal record of 10 percent
#[test]
fn vampiric_scenario_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_catalog(&dir, VAMPIRIC);

    let registry = AugmentRegistry::from_config(&config);
    let summary = registry.load_all().expect("catalog should load");
    assert_eq!(summary.total, 2);
    assert!(summary.issues.is_empty());

    let mut entity = EntityAugments::new();
    let vampiric = entity
        .attach(&registry, "vampiric")
        .expect("vampiric should be registered");

    let lifesteal = vampiric.attack_modifiers_of(AttackModifier::Lifesteal);
    assert_eq!(lifesteal.len(), 1);
    assert_eq!(lifesteal[0].value(), 10);
    assert_eq!(lifesteal[0].factor(), Factor::Percent);
    assert_eq!(lifesteal[0].chance(), 100);

    let hit = DamageContext::new(DamageKind::Physical, CombatOrigin::Melee).against(
        CreatureKind::Monster,
        Race::Blood,
        "rotworm",
    );
    let totals = entity.attack_totals(AttackModifier::Lifesteal, &hit);
    assert_eq!(totals.percent_total, 10);
    assert_eq!(totals.flat_total, 0);
}

/// Reload after clear restores the same names from an unchanged source.
#[test]
fn reload_after_clear_restores_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = AugmentRegistry::from_config(&write_catalog(&dir, VAMPIRIC));

    registry.load_all().expect("initial load");
    let initial = registry.names().expect("names");

    registry.clear_all().expect("clear");
    assert!(registry.is_empty().expect("is_empty"));

    registry.reload().expect("reload");
    assert_eq!(registry.names().expect("names"), initial);
}

/// Reload picks up an edited catalog and drops templates it no longer defines.
#[test]
fn reload_follows_catalog_edits() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_catalog(&dir, VAMPIRIC);
    let registry = AugmentRegistry::from_config(&config);
    registry.load_all().expect("initial load");

    fs::write(
        config.catalog_path(),
        r#"(augments: [(name: "vampiric", modifiers: [(mod: "lifesteal", value: 25)])])"#,
    )
    .expect("rewrite catalog");
    registry.reload().expect("reload");

    assert_eq!(registry.names().expect("names"), vec!["vampiric"]);
    let vampiric = registry.make_augment("vampiric").expect("vampiric");
    assert_eq!(vampiric.attack_modifiers()[0].value(), 25);
}

/// A broken document fails the reload and leaves the registry empty.
#[test]
fn failed_reload_leaves_registry_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_catalog(&dir, VAMPIRIC);
    let registry = AugmentRegistry::from_config(&config);
    registry.load_all().expect("initial load");

    fs::write(config.catalog_path(), "(augments: [").expect("corrupt catalog");

    let err = registry.reload().expect_err("reload should fail");
    assert!(matches!(err, RegistryError::Source { .. }));
    assert!(registry.is_empty().expect("is_empty"));
}

/// Missing catalog file is reported as a source failure, not a panic.
#[test]
fn missing_catalog_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = AugmentRegistry::from_config(&EngineConfig::new(dir.path(), "absent.ron"));

    assert!(matches!(registry.load_all(), Err(RegistryError::Source { .. })));
    assert!(registry.is_empty().expect("is_empty"));
}

/// Registering a second augment under a taken name keeps the first one.
#[test]
fn duplicate_registration_keeps_first() {
    let source = StaticSource::from_ron("inline", VAMPIRIC, LoadOptions::default())
        .expect("catalog should parse");
    let registry = Arc::new(AugmentRegistry::new(Arc::new(source)));
    registry.load_all().expect("load");
    let bindings = AugmentBindings::new(Arc::clone(&registry));

    let impostor = bindings.create_with("vampiric", "impostor", InitialModifiers::None);
    assert!(!bindings.register(&impostor).expect("register"));

    let template = registry
        .get_augment("vampiric")
        .expect("lookup")
        .expect("vampiric should be registered");
    assert_eq!(bindings.description(&template).expect("description"), "Heals the wielder");
}

/// Readers running alongside reloads only ever see a complete catalog.
#[test]
fn concurrent_readers_never_see_partial_reload() {
    let source = StaticSource::from_ron("inline", VAMPIRIC, LoadOptions::default())
        .expect("catalog should parse");
    let registry = Arc::new(AugmentRegistry::new(Arc::new(source)));
    registry.load_all().expect("load");

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..200 {
                    let len = registry.len().expect("len");
                    assert!(len == 0 || len == 2, "observed partial map of {len}");
                    if let Ok(augment) = registry.make_augment("stoneskin") {
                        assert_eq!(augment.defense_modifiers().len(), 1);
                    }
                }
            })
        })
        .collect();

    for _ in 0..50 {
        registry.reload().expect("reload");
    }

    for reader in readers {
        reader.join().expect("reader thread panicked");
    }
    assert_eq!(registry.len().expect("len"), 2);
}

//! Process-scoped store of canonical augment templates.
//!
//! The registry moves between two states:
//!
//! ```text
//! Empty --load_all--> Populated --reload--> Populated --clear_all--> Empty
//! ```
//!
//! Two retrieval paths are kept apart on purpose:
//! - [`AugmentRegistry::make_augment`] returns an independent deep copy and is
//!   the only path gameplay attachment should use
//! - [`AugmentRegistry::get_augment`] returns the live template handle for
//!   administrative code; edits made through it change the canonical definition

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use augment_content::{LoadIssue, LoadReport};
use augment_core::{Augment, EngineError};
use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::error::{RegistryError, Result};
use crate::source::{AugmentSource, FileSource};

/// Live handle to a registered template (or to a script-owned augment).
pub type SharedAugment = Arc<RwLock<Augment>>;

type AugmentMap = HashMap<String, SharedAugment>;

/// Outcome of one bulk load.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    /// Templates inserted by this load.
    pub inserted: usize,
    /// Templates held after this load.
    pub total: usize,
    /// Names rejected because a template already held them.
    pub collisions: Vec<String>,
    /// Per-entry problems reported by the source.
    pub issues: Vec<LoadIssue>,
}

/// Name-keyed catalogue of augment templates.
///
/// Each batch (load or reload) is published under a single write-lock
/// acquisition, so readers never observe a half-built map.
pub struct AugmentRegistry {
    augments: RwLock<AugmentMap>,
    source: Arc<dyn AugmentSource>,
}

impl AugmentRegistry {
    /// Creates an empty registry fed by `source`.
    pub fn new(source: Arc<dyn AugmentSource>) -> Self {
        Self {
            augments: RwLock::new(HashMap::new()),
            source,
        }
    }

    /// Creates an empty registry fed by the catalog file `config` names.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(Arc::new(FileSource::from_config(config)))
    }

    pub fn source(&self) -> &dyn AugmentSource {
        self.source.as_ref()
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Reads the source and adds every augment whose name is still free.
    ///
    /// Existing templates win over loaded ones with the same name.
    pub fn load_all(&self) -> Result<LoadSummary> {
        let report = self.read_source()?;
        let mut augments = self.write()?;
        let summary = publish(&mut augments, report);
        drop(augments);

        info!(
            source = %self.source.describe(),
            inserted = summary.inserted,
            total = summary.total,
            "loaded augments"
        );
        Ok(summary)
    }

    /// Drops every template.
    pub fn clear_all(&self) -> Result<()> {
        let mut augments = self.write()?;
        let dropped = augments.len();
        augments.clear();
        debug!(dropped, "cleared augment registry");
        Ok(())
    }

    /// Clears the registry and loads the source again.
    ///
    /// The new map replaces the old one in a single step. If the source fails
    /// the registry is left empty, as after [`Self::clear_all`].
    pub fn reload(&self) -> Result<LoadSummary> {
        let report = match self.read_source() {
            Ok(report) => report,
            Err(err) => {
                self.clear_all()?;
                return Err(err);
            }
        };

        let mut augments = self.write()?;
        augments.clear();
        let summary = publish(&mut augments, report);
        drop(augments);

        info!(
            source = %self.source.describe(),
            total = summary.total,
            "reloaded augments"
        );
        Ok(summary)
    }

    // ------------------------------------------------------------------------
    // Single-entry mutation
    // ------------------------------------------------------------------------

    /// Inserts `augment` unless its name is taken.
    ///
    /// A collision keeps the existing template, logs a warning and returns
    /// `Ok(false)`.
    pub fn add_augment(&self, augment: Augment) -> Result<bool> {
        self.add_shared(Arc::new(RwLock::new(augment)))
    }

    /// Inserts an existing handle unless its name is taken. See [`Self::add_augment`].
    pub fn add_shared(&self, augment: SharedAugment) -> Result<bool> {
        match self.register(augment) {
            Ok(()) => Ok(true),
            Err(RegistryError::NameTaken(name)) => {
                warn!(augment = %name, "augment already exists, keeping the registered one");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Inserts an existing handle, failing with [`RegistryError::NameTaken`]
    /// if its name is taken.
    pub fn register(&self, augment: SharedAugment) -> Result<()> {
        let name = read_augment(&augment)?.name().to_owned();
        let mut augments = self.write()?;
        match augments.entry(name) {
            Entry::Occupied(entry) => Err(RegistryError::NameTaken(entry.key().clone())),
            Entry::Vacant(entry) => {
                debug!(augment = %entry.key(), "registered augment");
                entry.insert(augment);
                Ok(())
            }
        }
    }

    /// Removes the template registered under `name`. A miss is not an error.
    pub fn remove_augment(&self, name: &str) -> Result<Option<SharedAugment>> {
        let removed = self.write()?.remove(name);
        if removed.is_some() {
            debug!(augment = %name, "removed augment");
        }
        Ok(removed)
    }

    /// Removes the template registered under the handle's current name.
    pub fn remove_shared(&self, augment: &SharedAugment) -> Result<Option<SharedAugment>> {
        let name = read_augment(augment)?.name().to_owned();
        self.remove_augment(&name)
    }

    // ------------------------------------------------------------------------
    // Retrieval
    // ------------------------------------------------------------------------

    /// Returns the live template registered under `name`.
    ///
    /// The handle is shared with the registry: mutating it changes the
    /// canonical definition for every later [`Self::make_augment`]. Use it for
    /// administrative edits only.
    pub fn get_augment(&self, name: &str) -> Result<Option<SharedAugment>> {
        Ok(self.read()?.get(name).cloned())
    }

    /// Returns an independent deep copy of the template registered under `name`.
    pub fn make_augment(&self, name: &str) -> Result<Augment> {
        let Some(template) = self.get_augment(name)? else {
            warn!(augment = %name, "failed to find augment");
            return Err(RegistryError::UnknownAugment(name.to_owned()));
        };

        let augment = read_augment(&template)?.clone();
        debug!(augment = %name, modifiers = augment.modifier_count(), "cloned augment template");
        Ok(augment)
    }

    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(name))
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Registered names in ascending order.
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.read()?.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn read_source(&self) -> Result<LoadReport> {
        let report = self.source.load().map_err(|err| {
            let origin = self.source.describe();
            error!(source = %origin, error = %format!("{err:#}"), "failed to load augments");
            RegistryError::Source {
                origin,
                message: format!("{err:#}"),
            }
        })?;

        for issue in &report.issues {
            warn!(code = issue.error_code(), "{issue}");
        }
        Ok(report)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, AugmentMap>> {
        self.augments.read().map_err(|_| RegistryError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, AugmentMap>> {
        self.augments.write().map_err(|_| RegistryError::LockPoisoned)
    }
}

/// Read access to a template or script-owned augment.
pub(crate) fn read_augment(augment: &SharedAugment) -> Result<RwLockReadGuard<'_, Augment>> {
    augment.read().map_err(|_| RegistryError::LockPoisoned)
}

/// Write access to a template or script-owned augment.
pub(crate) fn write_augment(augment: &SharedAugment) -> Result<RwLockWriteGuard<'_, Augment>> {
    augment.write().map_err(|_| RegistryError::LockPoisoned)
}

fn publish(augments: &mut AugmentMap, report: LoadReport) -> LoadSummary {
    let mut summary = LoadSummary {
        issues: report.issues,
        ..LoadSummary::default()
    };

    for augment in report.augments {
        match augments.entry(augment.name().to_owned()) {
            Entry::Occupied(entry) => {
                warn!(augment = %entry.key(), "augment already exists, keeping the first definition");
                summary.collisions.push(entry.key().clone());
            }
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(RwLock::new(augment)));
                summary.inserted += 1;
            }
        }
    }

    summary.total = augments.len();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use augment_content::LoadOptions;
    use augment_core::{AttackModifier, DamageModifier, Factor};

    use crate::source::StaticSource;

    const CATALOG: &str = r#"(augments: [
        (name: "vampiric", modifiers: [(mod: "lifesteal", value: 10)]),
        (name: "frenzy", modifiers: [(mod: "critical", value: 20, chance: 30)]),
        (name: "vampiric", description: "shadowed", modifiers: []),
        (description: "nameless"),
    ])"#;

    fn registry() -> AugmentRegistry {
        let source = StaticSource::from_ron("test catalog", CATALOG, LoadOptions::default()).unwrap();
        AugmentRegistry::new(Arc::new(source))
    }

    #[test]
    fn load_all_keeps_first_of_duplicate_names() {
        let registry = registry();
        let summary = registry.load_all().unwrap();

        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.collisions, vec!["vampiric".to_owned()]);
        assert_eq!(summary.issues.len(), 1);

        let vampiric = registry.make_augment("vampiric").unwrap();
        assert_eq!(vampiric.description(), "");
        assert_eq!(vampiric.attack_modifiers().len(), 1);
    }

    #[test]
    fn second_load_does_not_replace_templates() {
        let registry = registry();
        registry.load_all().unwrap();
        let template = registry.get_augment("frenzy").unwrap().unwrap();
        write_augment(&template).unwrap().set_description("edited");

        let summary = registry.load_all().unwrap();
        assert_eq!(summary.inserted, 0);
        assert_eq!(registry.make_augment("frenzy").unwrap().description(), "edited");
    }

    #[test]
    fn reload_replaces_edited_templates() {
        let registry = registry();
        registry.load_all().unwrap();
        let template = registry.get_augment("frenzy").unwrap().unwrap();
        write_augment(&template).unwrap().set_description("edited");

        registry.reload().unwrap();
        assert_eq!(registry.make_augment("frenzy").unwrap().description(), "");
        assert_eq!(registry.names().unwrap(), vec!["frenzy", "vampiric"]);
    }

    #[test]
    fn make_augment_returns_independent_copy() {
        let registry = registry();
        registry.load_all().unwrap();

        let mut copy = registry.make_augment("frenzy").unwrap();
        copy.attack_modifiers_mut()[0].set_value(999);
        copy.add_modifier(DamageModifier::new(AttackModifier::Lifesteal, 1, Factor::Flat, 100));

        let again = registry.make_augment("frenzy").unwrap();
        assert_eq!(again.attack_modifiers().len(), 1);
        assert_eq!(again.attack_modifiers()[0].value(), 20);
    }

    #[test]
    fn get_augment_aliases_the_template() {
        let registry = registry();
        registry.load_all().unwrap();

        let first = registry.get_augment("vampiric").unwrap().unwrap();
        let second = registry.get_augment("vampiric").unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.get_augment("missing").unwrap().is_none());
    }

    #[test]
    fn unknown_name_is_a_lookup_error() {
        let registry = registry();

        let err = registry.make_augment("vampiric").unwrap_err();
        assert_eq!(err, RegistryError::UnknownAugment("vampiric".to_owned()));
        assert_eq!(err.severity(), augment_core::ErrorSeverity::Lookup);
    }

    #[test]
    fn add_collision_keeps_existing() {
        let registry = registry();
        assert!(registry.add_augment(Augment::new("ward").with_description("first")).unwrap());
        assert!(!registry.add_augment(Augment::new("ward").with_description("second")).unwrap());

        assert_eq!(registry.make_augment("ward").unwrap().description(), "first");
        assert_eq!(
            registry.register(Arc::new(RwLock::new(Augment::new("ward")))),
            Err(RegistryError::NameTaken("ward".to_owned()))
        );
    }

    #[test]
    fn removal_by_name_and_handle() {
        let registry = registry();
        registry.load_all().unwrap();

        assert!(registry.remove_augment("vampiric").unwrap().is_some());
        assert!(registry.remove_augment("vampiric").unwrap().is_none());

        let frenzy = registry.get_augment("frenzy").unwrap().unwrap();
        assert!(registry.remove_shared(&frenzy).unwrap().is_some());
        assert!(registry.is_empty().unwrap());
    }

    #[test]
    fn clear_all_empties() {
        let registry = registry();
        registry.load_all().unwrap();
        registry.clear_all().unwrap();

        assert_eq!(registry.len().unwrap(), 0);
        assert!(!registry.contains("frenzy").unwrap());
    }
}

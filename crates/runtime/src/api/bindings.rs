//! Scripting-facing operations on augments.
//!
//! Scripts hold [`AugmentHandle`]s. A handle may be a fresh augment owned by
//! the script, a clone taken from the registry, or (once registered) a live
//! template. Every operation reports failure through [`Result`] instead of
//! panicking, so a bad call never takes the host down.

use std::sync::{Arc, RwLock};

use augment_core::{AttackModifier, Augment, DamageModifier, DefenseModifier};
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::registry::{AugmentRegistry, SharedAugment, read_augment, write_augment};

/// Script-held reference to an augment.
pub type AugmentHandle = SharedAugment;

/// Modifiers a newly created augment starts with.
#[derive(Debug, Clone, Default)]
pub enum InitialModifiers {
    #[default]
    None,
    One(DamageModifier),
    Many(Vec<DamageModifier>),
}

impl InitialModifiers {
    fn into_vec(self) -> Vec<DamageModifier> {
        match self {
            Self::None => Vec::new(),
            Self::One(modifier) => vec![modifier],
            Self::Many(modifiers) => modifiers,
        }
    }
}

impl From<DamageModifier> for InitialModifiers {
    fn from(modifier: DamageModifier) -> Self {
        Self::One(modifier)
    }
}

impl From<Vec<DamageModifier>> for InitialModifiers {
    fn from(modifiers: Vec<DamageModifier>) -> Self {
        Self::Many(modifiers)
    }
}

/// Binding surface over one registry.
#[derive(Clone)]
pub struct AugmentBindings {
    registry: Arc<AugmentRegistry>,
}

impl AugmentBindings {
    pub fn new(registry: Arc<AugmentRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &AugmentRegistry {
        &self.registry
    }

    // ------------------------------------------------------------------------
    // Construction and registration
    // ------------------------------------------------------------------------

    /// Clones the template registered under `name` into a script-owned handle.
    pub fn create(&self, name: &str) -> Result<AugmentHandle> {
        let augment = self.registry.make_augment(name)?;
        Ok(Arc::new(RwLock::new(augment)))
    }

    /// Builds a new script-owned augment. Unassigned-stance modifiers are dropped.
    pub fn create_with(
        &self,
        name: &str,
        description: &str,
        initial: impl Into<InitialModifiers>,
    ) -> AugmentHandle {
        let mut augment = Augment::new(name).with_description(description);
        for modifier in initial.into().into_vec() {
            augment.add_modifier(modifier);
        }
        Arc::new(RwLock::new(augment))
    }

    /// Publishes `handle` as the template for its name.
    ///
    /// Returns `Ok(false)` if the name is already registered. After success
    /// the handle is the live template.
    pub fn register(&self, handle: &AugmentHandle) -> Result<bool> {
        match self.registry.register(Arc::clone(handle)) {
            Ok(()) => Ok(true),
            Err(RegistryError::NameTaken(name)) => {
                debug!(augment = %name, "register refused, name taken");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Removes the template registered under the handle's name.
    ///
    /// Returns whether a template was removed.
    pub fn unregister(&self, handle: &AugmentHandle) -> Result<bool> {
        Ok(self.registry.remove_shared(handle)?.is_some())
    }

    // ------------------------------------------------------------------------
    // Fields
    // ------------------------------------------------------------------------

    pub fn name(&self, handle: &AugmentHandle) -> Result<String> {
        Ok(read_augment(handle)?.name().to_owned())
    }

    /// Renames the augment. A registered template keeps its old registry key.
    pub fn set_name(&self, handle: &AugmentHandle, name: &str) -> Result<()> {
        write_augment(handle)?.set_name(name);
        Ok(())
    }

    pub fn description(&self, handle: &AugmentHandle) -> Result<String> {
        Ok(read_augment(handle)?.description().to_owned())
    }

    pub fn set_description(&self, handle: &AugmentHandle, description: &str) -> Result<()> {
        write_augment(handle)?.set_description(description);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Modifiers
    // ------------------------------------------------------------------------

    pub fn add_modifier(&self, handle: &AugmentHandle, modifier: DamageModifier) -> Result<()> {
        write_augment(handle)?.add_modifier(modifier);
        Ok(())
    }

    /// Removes every record equal to `modifier`, returning how many went.
    pub fn remove_modifier(&self, handle: &AugmentHandle, modifier: &DamageModifier) -> Result<usize> {
        Ok(write_augment(handle)?.remove_modifier(modifier))
    }

    pub fn attack_modifiers(&self, handle: &AugmentHandle) -> Result<Vec<DamageModifier>> {
        Ok(read_augment(handle)?.attack_modifiers().to_vec())
    }

    pub fn defense_modifiers(&self, handle: &AugmentHandle) -> Result<Vec<DamageModifier>> {
        Ok(read_augment(handle)?.defense_modifiers().to_vec())
    }

    pub fn attack_modifiers_of(
        &self,
        handle: &AugmentHandle,
        kind: AttackModifier,
    ) -> Result<Vec<DamageModifier>> {
        Ok(read_augment(handle)?
            .attack_modifiers_of(kind)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn defense_modifiers_of(
        &self,
        handle: &AugmentHandle,
        kind: DefenseModifier,
    ) -> Result<Vec<DamageModifier>> {
        Ok(read_augment(handle)?
            .defense_modifiers_of(kind)
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use augment_content::LoadOptions;
    use augment_core::{Factor, Stance};

    use crate::source::StaticSource;

    fn bindings() -> AugmentBindings {
        let source = StaticSource::from_ron(
            "bindings catalog",
            r#"(augments: [(name: "vampiric", description: "drinks", modifiers: [
                (mod: "lifesteal", value: 10),
            ])])"#,
            LoadOptions::default(),
        )
        .unwrap();
        let registry = Arc::new(AugmentRegistry::new(Arc::new(source)));
        registry.load_all().unwrap();
        AugmentBindings::new(registry)
    }

    fn reflect() -> DamageModifier {
        DamageModifier::new(DefenseModifier::Reflect, 15, Factor::Percent, 60)
    }

    #[test]
    fn create_by_name_clones_template() {
        let bindings = bindings();
        let handle = bindings.create("vampiric").unwrap();

        bindings.set_description(&handle, "changed").unwrap();
        let template = bindings.registry().get_augment("vampiric").unwrap().unwrap();

        assert!(!Arc::ptr_eq(&handle, &template));
        assert_eq!(bindings.description(&template).unwrap(), "drinks");
        assert!(matches!(
            bindings.create("missing"),
            Err(RegistryError::UnknownAugment(_))
        ));
    }

    #[test]
    fn create_with_accepts_every_initial_shape() {
        let bindings = bindings();

        let bare = bindings.create_with("bare", "", InitialModifiers::None);
        let single = bindings.create_with("single", "", reflect());
        let many = bindings.create_with(
            "many",
            "",
            vec![
                reflect(),
                DamageModifier::default(),
                DamageModifier::new(AttackModifier::Critical, 5, Factor::Flat, 100),
            ],
        );

        assert!(bindings.defense_modifiers(&bare).unwrap().is_empty());
        assert_eq!(bindings.defense_modifiers(&single).unwrap(), vec![reflect()]);
        assert_eq!(bindings.defense_modifiers(&many).unwrap().len(), 1);
        assert_eq!(bindings.attack_modifiers(&many).unwrap().len(), 1);
    }

    #[test]
    fn register_refuses_taken_name() {
        let bindings = bindings();

        let duplicate = bindings.create_with("vampiric", "impostor", InitialModifiers::None);
        assert!(!bindings.register(&duplicate).unwrap());

        let fresh = bindings.create_with("warding", "", reflect());
        assert!(bindings.register(&fresh).unwrap());

        let live = bindings.registry().get_augment("warding").unwrap().unwrap();
        assert!(Arc::ptr_eq(&fresh, &live));
    }

    #[test]
    fn unregister_by_handle_name() {
        let bindings = bindings();
        let handle = bindings.create("vampiric").unwrap();

        assert!(bindings.unregister(&handle).unwrap());
        assert!(!bindings.unregister(&handle).unwrap());
        assert!(!bindings.registry().contains("vampiric").unwrap());
    }

    #[test]
    fn modifier_edits_and_filtered_lists() {
        let bindings = bindings();
        let handle = bindings.create("vampiric").unwrap();

        bindings.add_modifier(&handle, reflect()).unwrap();
        bindings.add_modifier(&handle, DamageModifier::default()).unwrap();
        assert_eq!(
            bindings
                .defense_modifiers_of(&handle, DefenseModifier::Reflect)
                .unwrap()
                .len(),
            1
        );
        assert!(
            bindings
                .attack_modifiers_of(&handle, AttackModifier::Lifesteal)
                .unwrap()
                .iter()
                .all(|modifier| modifier.stance() == Stance::Attack)
        );

        assert_eq!(bindings.remove_modifier(&handle, &reflect()).unwrap(), 1);
        assert!(bindings.defense_modifiers(&handle).unwrap().is_empty());
    }

    #[test]
    fn rename_keeps_registry_key() {
        let bindings = bindings();
        let template = bindings.registry().get_augment("vampiric").unwrap().unwrap();

        bindings.set_name(&template, "sanguine").unwrap();

        assert_eq!(bindings.name(&template).unwrap(), "sanguine");
        assert!(bindings.registry().contains("vampiric").unwrap());
    }
}

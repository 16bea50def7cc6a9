//! The initial-composition capability trait and its registry.

use indexmap::IndexMap;
use orogen_core::{
    CompositionError, FieldIndex, ParameterDeclarations, ParameterError, ParameterSection, Point,
    RegistryError,
};

/// Capability every compositional initial-condition plugin implements.
///
/// # Contract
///
/// - `parse_parameters()` is called exactly once, before the first
///   `initial_composition()` call; calling out of order is a
///   precondition violation answered with
///   [`CompositionError::NotConfigured`], never a garbage value.
/// - `initial_composition()` is a pure function of its inputs plus the
///   plugin's immutable configuration. It is called independently per
///   spatial point, per process, with no shared mutable state, so it
///   takes `&self` and implementations must be `Sync`.
///
/// # Object safety
///
/// Object-safe; the registry hands plugins out as
/// `Box<dyn InitialComposition>`.
pub trait InitialComposition: Send + Sync {
    /// Plugin name, as used for registry lookup and reporting.
    fn name(&self) -> &str;

    /// The parameter keys this plugin recognizes.
    fn declared_parameters(&self) -> ParameterDeclarations {
        ParameterDeclarations::new()
    }

    /// Read configuration from a validated parameter section.
    fn parse_parameters(&mut self, section: &ParameterSection) -> Result<(), ParameterError> {
        let _ = section;
        Ok(())
    }

    /// Initial value of compositional field `field` at `position`.
    fn initial_composition(
        &self,
        position: &Point,
        field: FieldIndex,
    ) -> Result<f64, CompositionError>;
}

/// Factory producing an unconfigured initial-condition plugin.
pub type InitialConditionFactory = Box<dyn Fn() -> Box<dyn InitialComposition> + Send + Sync>;

/// Name-keyed registry of initial-condition plugin factories.
#[derive(Default)]
pub struct InitialConditionRegistry {
    factories: IndexMap<String, InitialConditionFactory>,
}

impl InitialConditionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under a unique name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: InitialConditionFactory,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(RegistryError::DuplicateName { name });
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Instantiate and configure the named plugin.
    ///
    /// Validates the section against the plugin's declarations (the
    /// configuration loader's reject-unknown-keys pass) before
    /// `parse_parameters`. A failure aborts this plugin's setup.
    pub fn create(
        &self,
        name: &str,
        section: &ParameterSection,
    ) -> Result<Box<dyn InitialComposition>, RegistryError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| RegistryError::UnknownPlugin {
                name: name.to_string(),
            })?;
        let mut plugin = factory();
        plugin.declared_parameters().validate_section(section)?;
        plugin.parse_parameters(section)?;
        Ok(plugin)
    }
}

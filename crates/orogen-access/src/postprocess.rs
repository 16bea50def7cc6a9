//! The postprocessor capability trait and name-keyed registry.
//!
//! Postprocessors are analysis plugins run after solver steps. Each one
//! holds its own [`SimulatorAccess`] (injected at construction via the
//! registry factory) and reaches simulator state only through it.

use crate::access::SimulatorAccess;
use indexmap::IndexMap;
use orogen_core::{ParameterDeclarations, ParameterError, ParameterSection, PostprocessError, RegistryError};

/// Capability every postprocessing plugin implements.
///
/// # Contract
///
/// - `declared_parameters()` is side-effect-free and describes the keys
///   the plugin recognizes; the default declares none.
/// - `parse_parameters()` is called exactly once, before the first
///   `execute()`, with a section already validated against the
///   declarations.
/// - `execute()` pulls state through the plugin's accessor on demand.
///   References from one access window must not be retained across a
///   step boundary.
///
/// # Object safety
///
/// Object-safe; the registry hands plugins out as `Box<dyn Postprocess>`.
pub trait Postprocess: Send {
    /// Plugin name, as used for registry lookup and reporting.
    fn name(&self) -> &str;

    /// The parameter keys this plugin recognizes.
    ///
    /// Plugins without runtime parameters keep the default.
    fn declared_parameters(&self) -> ParameterDeclarations {
        ParameterDeclarations::new()
    }

    /// Read configuration from a validated parameter section.
    fn parse_parameters(&mut self, section: &ParameterSection) -> Result<(), ParameterError> {
        let _ = section;
        Ok(())
    }

    /// Run the analysis, returning `(label, formatted value)` pairs for
    /// the simulator's output table.
    fn execute(&mut self) -> Result<Vec<(String, String)>, PostprocessError>;
}

/// Factory producing a postprocessor bound to one accessor.
pub type PostprocessFactory = Box<dyn Fn(SimulatorAccess) -> Box<dyn Postprocess> + Send + Sync>;

/// Name-keyed registry of postprocessor factories.
///
/// Selection by configuration text: the parameter file names the plugins
/// to run, the registry instantiates and configures them. Creation
/// failures abort that plugin's initialization and are never retried.
#[derive(Default)]
pub struct PostprocessRegistry {
    factories: IndexMap<String, PostprocessFactory>,
}

impl PostprocessRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under a unique name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: PostprocessFactory,
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
    /// The section is validated against the plugin's declarations before
    /// `parse_parameters` runs, mirroring the configuration loader's
    /// reject-unknown-keys pass.
    pub fn create(
        &self,
        name: &str,
        access: SimulatorAccess,
        section: &ParameterSection,
    ) -> Result<Box<dyn Postprocess>, RegistryError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| RegistryError::UnknownPlugin {
                name: name.to_string(),
            })?;
        let mut plugin = factory(access);
        plugin.declared_parameters().validate_section(section)?;
        plugin.parse_parameters(section)?;
        Ok(plugin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::StateCell;
    use crate::frame::StateFrame;
    use orogen_core::DofMap;

    struct StepEcho {
        access: SimulatorAccess,
    }

    impl Postprocess for StepEcho {
        fn name(&self) -> &str {
            "step echo"
        }

        fn execute(&mut self) -> Result<Vec<(String, String)>, PostprocessError> {
            let step = self.access.timestep_number();
            Ok(vec![("Step".to_string(), step.to_string())])
        }
    }

    fn test_access() -> SimulatorAccess {
        let cell = StateCell::new(StateFrame::initial(DofMap::serial(4), DofMap::serial(2)));
        SimulatorAccess::new(cell)
    }

    fn registry() -> PostprocessRegistry {
        let mut reg = PostprocessRegistry::new();
        reg.register(
            "step echo",
            Box::new(|access| Box::new(StepEcho { access })),
        )
        .unwrap();
        reg
    }

    #[test]
    fn create_builds_and_runs_a_plugin() {
        let reg = registry();
        let mut plugin = reg
            .create("step echo", test_access(), &ParameterSection::new())
            .unwrap();
        let rows = plugin.execute().unwrap();
        assert_eq!(rows, vec![("Step".to_string(), "0".to_string())]);
    }

    #[test]
    fn create_rejects_unknown_plugin_name() {
        let reg = registry();
        let err = reg
            .create("heat flux", test_access(), &ParameterSection::new())
            .err()
            .expect("lookup must fail");
        match err {
            RegistryError::UnknownPlugin { name } => assert_eq!(name, "heat flux"),
            other => panic!("expected UnknownPlugin, got {other:?}"),
        }
    }

    #[test]
    fn create_rejects_undeclared_parameter_keys() {
        let reg = registry();
        let section = ParameterSection::new().with("Output interval", "10");
        let err = reg
            .create("step echo", test_access(), &section)
            .err()
            .expect("validation must fail");
        match err {
            RegistryError::Parameter(ParameterError::UnknownKey { key }) => {
                assert_eq!(key, "Output interval")
            }
            other => panic!("expected UnknownKey, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut reg = registry();
        let err = reg
            .register(
                "step echo",
                Box::new(|access| Box::new(StepEcho { access })),
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName { .. }));
    }
}

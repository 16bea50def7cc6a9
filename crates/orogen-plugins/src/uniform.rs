//! Constant-valued initial composition.

use crate::initial::InitialComposition;
use orogen_core::{
    CompositionError, FieldIndex, ParameterDeclarations, ParameterError, ParameterSection, Point,
};

/// Parameter key holding the per-field constant values.
const VALUES_KEY: &str = "Values";

/// Initial-condition plugin assigning one constant per compositional field.
///
/// The simplest registry entrant; also the usual baseline when debugging
/// a parsed-function setup.
pub struct UniformComposition {
    n_fields: usize,
    values: Option<Vec<f64>>,
}

impl UniformComposition {
    /// Name under which this plugin registers.
    pub const NAME: &'static str = "uniform";

    /// Create an unconfigured plugin for `n_fields` compositional fields.
    pub fn new(n_fields: usize) -> Self {
        Self {
            n_fields,
            values: None,
        }
    }
}

impl InitialComposition for UniformComposition {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn declared_parameters(&self) -> ParameterDeclarations {
        let mut decls = ParameterDeclarations::new();
        decls.declare(
            VALUES_KEY,
            "0",
            "Comma-separated constant value per compositional field",
        );
        decls
    }

    fn parse_parameters(&mut self, section: &ParameterSection) -> Result<(), ParameterError> {
        let text = section.require(VALUES_KEY)?;
        let values: Vec<f64> = text
            .split(',')
            .map(|v| {
                v.trim().parse().map_err(|_| ParameterError::InvalidValue {
                    key: VALUES_KEY.to_string(),
                    reason: format!("'{}' is not a number", v.trim()),
                })
            })
            .collect::<Result<_, _>>()?;
        if values.len() != self.n_fields {
            return Err(ParameterError::ComponentCountMismatch {
                declared: values.len(),
                expected: self.n_fields,
            });
        }
        self.values = Some(values);
        Ok(())
    }

    fn initial_composition(
        &self,
        _position: &Point,
        field: FieldIndex,
    ) -> Result<f64, CompositionError> {
        let values = self.values.as_ref().ok_or(CompositionError::NotConfigured)?;
        values
            .get(field.0 as usize)
            .copied()
            .ok_or(CompositionError::FieldIndexOutOfRange {
                index: field,
                components: values.len(),
            })
    }
}

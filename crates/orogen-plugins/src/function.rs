//! Initial composition from a user-authored analytic expression.

use crate::expression::{CompiledExpressionSet, ExpressionCompiler};
use crate::initial::InitialComposition;
use indexmap::IndexMap;
use orogen_core::{
    CompositionError, FieldIndex, ParameterDeclarations, ParameterError, ParameterSection, Point,
};
use smallvec::smallvec;
use std::sync::Arc;

/// Parameter key holding the per-field expression components.
pub const EXPRESSION_KEY: &str = "Function expression";
/// Parameter key holding named constants.
pub const CONSTANTS_KEY: &str = "Function constants";

/// Initial-condition plugin evaluating a configured analytic expression.
///
/// The parameter file supplies one expression component per compositional
/// field, separated by semicolons, plus optional named constants:
///
/// ```text
/// Function constants  = ampl=0.5, depth=1.2
/// Function expression = ampl * x; y - depth
/// ```
///
/// Compilation happens once, in `parse_parameters`, through the injected
/// [`ExpressionCompiler`]; the compiled set is owned exclusively by this
/// plugin and never reassigned. Every component is probe-evaluated at the
/// origin during setup so malformed math surfaces as a configuration
/// error instead of failing per point later.
pub struct FunctionInitialComposition {
    n_fields: usize,
    compiler: Arc<dyn ExpressionCompiler>,
    compiled: Option<Box<dyn CompiledExpressionSet>>,
}

impl FunctionInitialComposition {
    /// Name under which this plugin registers.
    pub const NAME: &'static str = "function";

    /// Create an unconfigured plugin for a simulation with `n_fields`
    /// compositional fields, using `compiler` as the expression
    /// collaborator.
    pub fn new(n_fields: usize, compiler: Arc<dyn ExpressionCompiler>) -> Self {
        Self {
            n_fields,
            compiler,
            compiled: None,
        }
    }

    fn parse_constants(text: &str) -> Result<IndexMap<String, f64>, ParameterError> {
        let mut constants = IndexMap::new();
        for pair in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                ParameterError::InvalidValue {
                    key: CONSTANTS_KEY.to_string(),
                    reason: format!("expected name=value, got '{pair}'"),
                }
            })?;
            let parsed: f64 =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ParameterError::InvalidValue {
                        key: CONSTANTS_KEY.to_string(),
                        reason: format!("'{}' is not a number", value.trim()),
                    })?;
            constants.insert(name.trim().to_string(), parsed);
        }
        Ok(constants)
    }
}

impl InitialComposition for FunctionInitialComposition {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn declared_parameters(&self) -> ParameterDeclarations {
        let mut decls = ParameterDeclarations::new();
        decls.declare(
            EXPRESSION_KEY,
            "0",
            "Semicolon-separated analytic expression, one component per compositional field",
        );
        decls.declare(
            CONSTANTS_KEY,
            "",
            "Comma-separated name=value constants the expression may reference",
        );
        decls
    }

    fn parse_parameters(&mut self, section: &ParameterSection) -> Result<(), ParameterError> {
        let text = section.require(EXPRESSION_KEY)?;
        let components: Vec<String> = text.split(';').map(|c| c.trim().to_string()).collect();
        if components.len() != self.n_fields {
            return Err(ParameterError::ComponentCountMismatch {
                declared: components.len(),
                expected: self.n_fields,
            });
        }

        let constants = Self::parse_constants(section.get(CONSTANTS_KEY).unwrap_or(""))?;
        let compiled = self.compiler.compile(&components, &constants)?;

        // Probe every component once so evaluation failures count as
        // configuration errors, not per-point surprises.
        let origin: Point = smallvec![0.0, 0.0, 0.0];
        for component in 0..compiled.component_count() {
            compiled.evaluate(component, &origin)?;
        }

        self.compiled = Some(compiled);
        Ok(())
    }

    fn initial_composition(
        &self,
        position: &Point,
        field: FieldIndex,
    ) -> Result<f64, CompositionError> {
        let compiled = self.compiled.as_ref().ok_or(CompositionError::NotConfigured)?;
        let index = field.0 as usize;
        if index >= compiled.component_count() {
            return Err(CompositionError::FieldIndexOutOfRange {
                index: field,
                components: compiled.component_count(),
            });
        }
        Ok(compiled.evaluate(index, position)?)
    }
}

// This module's tests live in `tests/function.rs`. They need
// `orogen_test_utils::CalcCompiler`, and test-utils depends on this
// crate's lib, so exercising them from a `#[cfg(test)]` module here
// would pit two builds of `orogen-plugins` (and two incompatible
// `ExpressionCompiler` traits) against each other. Integration tests
// share the single lib build with test-utils.

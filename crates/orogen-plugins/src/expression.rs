//! The seam to the external expression compiler/evaluator.
//!
//! Orogen treats textual math expressions as opaque: a collaborator
//! compiles the configured text into something evaluable per spatial
//! point, and this layer only passes coordinates in and scalars out.
//! The traits keep the [`FunctionInitialComposition`](crate::function)
//! plugin independent of any particular evaluator; tests inject a small
//! arithmetic evaluator from `orogen-test-utils`.

use indexmap::IndexMap;
use orogen_core::{ExpressionError, Point};

/// A compiled, immutable set of expression components.
///
/// One component per compositional field. Evaluation is a pure function
/// of `(component, position)` and must be safe to call concurrently for
/// distinct points from `&self`.
pub trait CompiledExpressionSet: Send + Sync {
    /// Number of components the expression set declares.
    fn component_count(&self) -> usize;

    /// Evaluate one component at a spatial point.
    ///
    /// Missing trailing coordinates are treated as zero by convention.
    fn evaluate(&self, component: usize, position: &Point) -> Result<f64, ExpressionError>;
}

/// Compiles expression text into a [`CompiledExpressionSet`].
///
/// `components` holds one expression string per compositional field;
/// `constants` the named values the expressions may reference. Malformed
/// text fails here, at setup time, never during per-point evaluation.
pub trait ExpressionCompiler: Send + Sync {
    /// Compile one expression string per component.
    fn compile(
        &self,
        components: &[String],
        constants: &IndexMap<String, f64>,
    ) -> Result<Box<dyn CompiledExpressionSet>, ExpressionError>;
}

//! Concrete plugins for the Orogen plugin layer.
//!
//! Initial-condition plugins supply per-point, per-field starting values
//! for the compositional fields; postprocessors report statistics over
//! the published solutions. Both families are selected and configured by
//! name through parameter-file text.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod expression;
pub mod function;
pub mod initial;
pub mod statistics;
pub mod uniform;

pub use expression::{CompiledExpressionSet, ExpressionCompiler};
pub use function::FunctionInitialComposition;
pub use initial::{InitialComposition, InitialConditionFactory, InitialConditionRegistry};
pub use statistics::{register_statistics_postprocessors, TemperatureStatistics, VelocityStatistics};
pub use uniform::UniformComposition;

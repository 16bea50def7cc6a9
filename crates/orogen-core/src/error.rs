//! Error types for the Orogen plugin layer.
//!
//! Organized by subsystem: state access (frame construction, publication,
//! stale-view detection), parameter handling, expression evaluation, and
//! plugin execution. Setup-time errors abort the affected plugin's
//! initialization; nothing is retried automatically.

use crate::id::{FieldIndex, StateGeneration};
use std::error::Error;
use std::fmt;

/// Errors from degree-of-freedom map construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DofMapError {
    /// The locally-owned range extends past the global size.
    OwnedOutOfBounds {
        /// End of the owned range (exclusive).
        owned_end: usize,
        /// Global number of degrees of freedom.
        n_global: usize,
    },
    /// A ghost index is at or past the global size.
    GhostOutOfBounds {
        /// The offending global index.
        index: usize,
        /// Global number of degrees of freedom.
        n_global: usize,
    },
    /// Ghost indices are not strictly increasing.
    GhostNotSorted,
    /// A ghost index falls inside the locally-owned range.
    GhostOverlapsOwned {
        /// The offending global index.
        index: usize,
    },
}

impl fmt::Display for DofMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OwnedOutOfBounds { owned_end, n_global } => {
                write!(f, "owned range ends at {owned_end} but map has {n_global} global dofs")
            }
            Self::GhostOutOfBounds { index, n_global } => {
                write!(f, "ghost index {index} out of bounds for {n_global} global dofs")
            }
            Self::GhostNotSorted => write!(f, "ghost indices must be strictly increasing"),
            Self::GhostOverlapsOwned { index } => {
                write!(f, "ghost index {index} falls inside the locally-owned range")
            }
        }
    }
}

impl Error for DofMapError {}

/// Errors from state-frame construction.
///
/// A frame is rejected when a solution vector does not conform to the
/// degree-of-freedom map it is paired with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// A current solution vector does not match its map's local size.
    VectorMapMismatch {
        /// Which field system ("stokes" or "temperature").
        system: &'static str,
        /// Locally-relevant length of the vector.
        vector_len: usize,
        /// Locally-relevant length expected by the map.
        map_len: usize,
    },
    /// A previous-step solution vector does not match its map's local size.
    OldVectorMapMismatch {
        /// Which field system ("stokes" or "temperature").
        system: &'static str,
        /// Locally-relevant length of the vector.
        vector_len: usize,
        /// Locally-relevant length expected by the map.
        map_len: usize,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VectorMapMismatch { system, vector_len, map_len } => write!(
                f,
                "{system} solution has {vector_len} locally-relevant entries, map expects {map_len}"
            ),
            Self::OldVectorMapMismatch { system, vector_len, map_len } => write!(
                f,
                "previous {system} solution has {vector_len} locally-relevant entries, \
                 map expects {map_len}"
            ),
        }
    }
}

impl Error for FrameError {}

/// Errors from publishing a frame into a state cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublishError {
    /// The offered frame's generation does not advance the cell's.
    NonMonotonic {
        /// Generation currently held by the cell.
        held: StateGeneration,
        /// Generation of the rejected frame.
        offered: StateGeneration,
    },
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonMonotonic { held, offered } => write!(
                f,
                "published generation must increase: cell holds {held}, frame offers {offered}"
            ),
        }
    }
}

impl Error for PublishError {}

/// Errors from generation-checked state access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// A state view was used after the simulator published a newer frame.
    ///
    /// Views must be re-fetched each step; the underlying vectors are
    /// replaced wholesale by the owning simulator.
    StaleView {
        /// Generation the view was taken at.
        held: StateGeneration,
        /// Generation currently published.
        current: StateGeneration,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleView { held, current } => write!(
                f,
                "state view taken at generation {held} is stale, current generation is {current}"
            ),
        }
    }
}

impl Error for AccessError {}

/// Setup-time configuration errors from parameter handling.
///
/// All variants are detected before a plugin evaluates anything: a plugin
/// whose parameters fail to parse never reaches its evaluation phase.
#[derive(Clone, Debug, PartialEq)]
pub enum ParameterError {
    /// A required key is absent from the parameter section.
    MissingKey {
        /// The missing key.
        key: String,
    },
    /// The section carries a key the plugin did not declare.
    UnknownKey {
        /// The undeclared key.
        key: String,
    },
    /// A value failed to parse for its declared key.
    InvalidValue {
        /// The key whose value was rejected.
        key: String,
        /// Description of the problem.
        reason: String,
    },
    /// The expression declares a different number of components than the
    /// simulation has compositional fields.
    ComponentCountMismatch {
        /// Components declared by the configuration.
        declared: usize,
        /// Compositional fields expected by the simulation.
        expected: usize,
    },
    /// The expression collaborator rejected the configured expression.
    Expression(ExpressionError),
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { key } => write!(f, "missing required parameter '{key}'"),
            Self::UnknownKey { key } => write!(f, "unrecognized parameter '{key}'"),
            Self::InvalidValue { key, reason } => {
                write!(f, "invalid value for parameter '{key}': {reason}")
            }
            Self::ComponentCountMismatch { declared, expected } => write!(
                f,
                "expression declares {declared} components but the simulation has \
                 {expected} compositional fields"
            ),
            Self::Expression(e) => write!(f, "expression: {e}"),
        }
    }
}

impl Error for ParameterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Expression(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ExpressionError> for ParameterError {
    fn from(e: ExpressionError) -> Self {
        Self::Expression(e)
    }
}

/// Errors from the external expression compiler/evaluator collaborator.
#[derive(Clone, Debug, PartialEq)]
pub enum ExpressionError {
    /// The expression text failed to compile.
    Parse {
        /// Description from the compiler.
        reason: String,
    },
    /// Evaluation of a compiled expression failed.
    Eval {
        /// Description from the evaluator.
        reason: String,
    },
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { reason } => write!(f, "parse error: {reason}"),
            Self::Eval { reason } => write!(f, "evaluation error: {reason}"),
        }
    }
}

impl Error for ExpressionError {}

/// Precondition violations from initial-composition evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum CompositionError {
    /// `initial_composition` was called before `parse_parameters` completed.
    NotConfigured,
    /// The requested field index is outside the declared component range.
    FieldIndexOutOfRange {
        /// The requested index.
        index: FieldIndex,
        /// Number of declared components.
        components: usize,
    },
    /// The compiled expression failed at this point.
    Evaluation(ExpressionError),
}

impl fmt::Display for CompositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => {
                write!(f, "initial_composition called before parse_parameters")
            }
            Self::FieldIndexOutOfRange { index, components } => write!(
                f,
                "field index {index} out of range for {components} declared components"
            ),
            Self::Evaluation(e) => write!(f, "evaluation: {e}"),
        }
    }
}

impl Error for CompositionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Evaluation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ExpressionError> for CompositionError {
    fn from(e: ExpressionError) -> Self {
        Self::Evaluation(e)
    }
}

/// Errors from postprocessor execution.
#[derive(Clone, Debug, PartialEq)]
pub enum PostprocessError {
    /// The postprocessor's evaluation failed.
    ExecutionFailed {
        /// Description of the failure.
        reason: String,
    },
    /// The postprocessor used a stale state view.
    StaleState(AccessError),
}

impl fmt::Display for PostprocessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::StaleState(e) => write!(f, "stale state: {e}"),
        }
    }
}

impl Error for PostprocessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StaleState(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AccessError> for PostprocessError {
    fn from(e: AccessError) -> Self {
        Self::StaleState(e)
    }
}

/// Errors from name-keyed plugin registries.
#[derive(Clone, Debug, PartialEq)]
pub enum RegistryError {
    /// No plugin is registered under the requested name.
    UnknownPlugin {
        /// The requested name.
        name: String,
    },
    /// A plugin is already registered under this name.
    DuplicateName {
        /// The contested name.
        name: String,
    },
    /// The plugin's parameter declaration or parsing failed.
    Parameter(ParameterError),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPlugin { name } => write!(f, "no plugin registered as '{name}'"),
            Self::DuplicateName { name } => {
                write!(f, "a plugin is already registered as '{name}'")
            }
            Self::Parameter(e) => write!(f, "parameter: {e}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parameter(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParameterError> for RegistryError {
    fn from(e: ParameterError) -> Self {
        Self::Parameter(e)
    }
}

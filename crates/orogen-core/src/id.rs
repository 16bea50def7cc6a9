//! Strongly-typed identifiers and the [`Point`] type alias.

use smallvec::SmallVec;
use std::fmt;

/// Ordinal of the current simulation step.
///
/// Counts published solver steps, starting at 0 for the initial
/// (pre-first-solve) state. Stored as an integer: a step ordinal is a
/// count, never a fractional quantity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepNumber(pub u64);

impl StepNumber {
    /// The step ordinal that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for StepNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepNumber {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Index of a compositional field.
///
/// Compositional fields are the advected scalar quantities of the
/// simulation; plugins address them by this index. `FieldIndex(n)`
/// corresponds to the n-th declared field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldIndex(pub u32);

impl fmt::Display for FieldIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FieldIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Generation stamp of a published state frame.
///
/// Incremented each time the simulator publishes a new frame, enabling
/// stale-view detection in generation-counted state handles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateGeneration(pub u64);

impl StateGeneration {
    /// The generation that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for StateGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StateGeneration {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A spatial point in the simulation domain.
///
/// Uses `SmallVec<[f64; 3]>` to avoid heap allocation for 1D, 2D, and 3D
/// domains, which covers every supported geometry. Evaluators treat
/// missing trailing coordinates as zero.
pub type Point = SmallVec<[f64; 3]>;

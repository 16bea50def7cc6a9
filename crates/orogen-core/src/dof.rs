//! Degree-of-freedom maps and ghosted solution vectors.
//!
//! A [`DofMap`] describes how one process's slice of a distributed solution
//! relates to the global unknown numbering: a contiguous locally-owned
//! range plus a sorted list of ghost indices (read-only copies of
//! neighbor-owned entries). A [`GhostedVector`] holds the values for
//! exactly the locally-relevant (owned + ghost) entries of one map.

use crate::error::DofMapError;
use std::ops::Range;

/// Maps mesh-local unknowns to positions in a distributed solution vector.
///
/// Local numbering convention: owned entries come first, in global order,
/// followed by ghost entries in increasing global order. This matches the
/// storage layout of [`GhostedVector`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DofMap {
    n_global: usize,
    owned: Range<usize>,
    ghost: Vec<usize>,
}

impl DofMap {
    /// Construct a map from the global size, the locally-owned contiguous
    /// range, and the sorted ghost indices.
    ///
    /// Ghost indices must be strictly increasing, lie outside `owned`, and
    /// be below `n_global`.
    pub fn new(
        n_global: usize,
        owned: Range<usize>,
        ghost: Vec<usize>,
    ) -> Result<Self, DofMapError> {
        if owned.end > n_global {
            return Err(DofMapError::OwnedOutOfBounds {
                owned_end: owned.end,
                n_global,
            });
        }
        for pair in ghost.windows(2) {
            if pair[0] >= pair[1] {
                return Err(DofMapError::GhostNotSorted);
            }
        }
        for &g in &ghost {
            if g >= n_global {
                return Err(DofMapError::GhostOutOfBounds { index: g, n_global });
            }
            if owned.contains(&g) {
                return Err(DofMapError::GhostOverlapsOwned { index: g });
            }
        }
        Ok(Self {
            n_global,
            owned,
            ghost,
        })
    }

    /// A serial map: every degree of freedom is locally owned, no ghosts.
    pub fn serial(n_global: usize) -> Self {
        Self {
            n_global,
            owned: 0..n_global,
            ghost: Vec::new(),
        }
    }

    /// Global number of degrees of freedom.
    pub fn n_global(&self) -> usize {
        self.n_global
    }

    /// Number of locally-owned entries.
    pub fn n_owned(&self) -> usize {
        self.owned.len()
    }

    /// Number of ghost entries.
    pub fn n_ghost(&self) -> usize {
        self.ghost.len()
    }

    /// Number of locally-relevant entries (owned plus ghost).
    pub fn n_locally_relevant(&self) -> usize {
        self.n_owned() + self.n_ghost()
    }

    /// The contiguous globally-numbered range owned by this process.
    pub fn owned_range(&self) -> Range<usize> {
        self.owned.clone()
    }

    /// Whether a global index is owned by this process.
    pub fn is_locally_owned(&self, global: usize) -> bool {
        self.owned.contains(&global)
    }

    /// Whether a global index is locally relevant (owned or ghost).
    pub fn is_locally_relevant(&self, global: usize) -> bool {
        self.is_locally_owned(global) || self.ghost.binary_search(&global).is_ok()
    }

    /// Local position of a global index, or `None` if not locally relevant.
    ///
    /// Owned entries map to `[0, n_owned)`, ghosts to
    /// `[n_owned, n_locally_relevant)`.
    pub fn local_index(&self, global: usize) -> Option<usize> {
        if self.is_locally_owned(global) {
            return Some(global - self.owned.start);
        }
        self.ghost
            .binary_search(&global)
            .ok()
            .map(|pos| self.n_owned() + pos)
    }

    /// Global index of a local position, or `None` if out of range.
    pub fn global_index(&self, local: usize) -> Option<usize> {
        if local < self.n_owned() {
            Some(self.owned.start + local)
        } else {
            self.ghost.get(local - self.n_owned()).copied()
        }
    }
}

/// One process's values of a distributed solution vector, including
/// read-only ghost copies of neighbor-owned entries.
///
/// Storage follows the local numbering of the [`DofMap`] the vector was
/// built against: owned values first, ghost values after. A vector and
/// the map it conforms to are always paired inside one state frame, so
/// plugins reading through the accessor never see a mismatched pair.
#[derive(Clone, Debug, PartialEq)]
pub struct GhostedVector {
    owned: Vec<f64>,
    ghost: Vec<f64>,
}

impl GhostedVector {
    /// A zero-filled vector conforming to `map`.
    pub fn zeros(map: &DofMap) -> Self {
        Self {
            owned: vec![0.0; map.n_owned()],
            ghost: vec![0.0; map.n_ghost()],
        }
    }

    /// Build a vector from explicit owned and ghost value blocks.
    ///
    /// Used by the simulator (and test fixtures) when assembling a frame;
    /// conformance with the paired map is checked at frame construction.
    pub fn from_parts(owned: Vec<f64>, ghost: Vec<f64>) -> Self {
        Self { owned, ghost }
    }

    /// Whether this vector's layout matches `map`.
    pub fn conforms_to(&self, map: &DofMap) -> bool {
        self.owned.len() == map.n_owned() && self.ghost.len() == map.n_ghost()
    }

    /// Total number of locally-relevant entries.
    pub fn len(&self) -> usize {
        self.owned.len() + self.ghost.len()
    }

    /// Whether the vector holds no locally-relevant entries.
    pub fn is_empty(&self) -> bool {
        self.owned.is_empty() && self.ghost.is_empty()
    }

    /// The locally-owned values, in global order.
    pub fn owned(&self) -> &[f64] {
        &self.owned
    }

    /// The ghost values, in increasing global order of their indices.
    pub fn ghost(&self) -> &[f64] {
        &self.ghost
    }

    /// Mutable access to the owned block, for vector assembly.
    pub fn owned_mut(&mut self) -> &mut [f64] {
        &mut self.owned
    }

    /// Mutable access to the ghost block, for ghost-exchange updates.
    pub fn ghost_mut(&mut self) -> &mut [f64] {
        &mut self.ghost
    }

    /// Value at a local position, or `None` if out of range.
    pub fn get_local(&self, local: usize) -> Option<f64> {
        if local < self.owned.len() {
            self.owned.get(local).copied()
        } else {
            self.ghost.get(local - self.owned.len()).copied()
        }
    }

    /// Value at a global index under `map`, or `None` if the index is not
    /// locally relevant.
    pub fn get_global(&self, map: &DofMap, global: usize) -> Option<f64> {
        map.local_index(global).and_then(|l| self.get_local(l))
    }
}

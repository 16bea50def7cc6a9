//! The shared publication point between simulator and plugins.
//!
//! [`StateCell`] holds the latest published [`StateFrame`] behind an
//! `Arc`. Single producer (the owning simulator) publishes; any number of
//! readers fetch. Only the latest frame matters to this layer, so the
//! cell retains exactly one frame; the previous one is dropped once the
//! last outstanding view releases it.

use crate::frame::StateFrame;
use crate::view::StateView;
use orogen_core::{PublishError, StateGeneration};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

struct CellShared {
    frame: Mutex<Arc<StateFrame>>,
    /// Duplicates the held frame's generation for lock-free staleness
    /// checks. Written with Release after the frame swap so a reader
    /// observing a generation can always fetch a frame at least that new.
    generation: AtomicU64,
}

/// Shared handle to the latest published state frame.
///
/// Cloning is cheap and shares the underlying cell; one clone lives in
/// each plugin's [`SimulatorAccess`](crate::SimulatorAccess).
#[derive(Clone)]
pub struct StateCell {
    shared: Arc<CellShared>,
}

// Compile-time assertion: StateCell must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<StateCell>();
};

impl StateCell {
    /// Create a cell holding `initial` as its first frame.
    pub fn new(initial: StateFrame) -> Self {
        let generation = initial.generation().0;
        Self {
            shared: Arc::new(CellShared {
                frame: Mutex::new(Arc::new(initial)),
                generation: AtomicU64::new(generation),
            }),
        }
    }

    /// Publish a new frame. Single-producer only.
    ///
    /// The frame's generation must strictly advance the cell's; a
    /// non-monotonic publish indicates a simulator bookkeeping bug and is
    /// rejected rather than silently reordering state.
    pub fn publish(&self, frame: StateFrame) -> Result<(), PublishError> {
        let offered = frame.generation();
        let mut slot = self.shared.frame.lock().unwrap();
        let held = slot.generation();
        if offered <= held {
            return Err(PublishError::NonMonotonic { held, offered });
        }
        *slot = Arc::new(frame);
        // Release pairs with Acquire in current_generation(): the frame
        // swap is visible before the new generation is.
        self.shared.generation.store(offered.0, Ordering::Release);
        Ok(())
    }

    /// Fetch the latest frame as a generation-checked view.
    pub fn fetch(&self) -> StateView {
        let frame = Arc::clone(&self.shared.frame.lock().unwrap());
        StateView::new(frame, self.clone())
    }

    /// Generation of the latest published frame, without locking.
    pub fn current_generation(&self) -> StateGeneration {
        StateGeneration(self.shared.generation.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orogen_core::{DofMap, StepNumber};

    fn initial() -> StateFrame {
        StateFrame::initial(DofMap::serial(6), DofMap::serial(3))
    }

    fn advance(cell: &StateCell, generation: u64) -> StateFrame {
        use crate::frame::SystemInput;
        use orogen_core::GhostedVector;
        let s = DofMap::serial(6);
        let t = DofMap::serial(3);
        StateFrame::new(
            0.1 * generation as f64,
            StepNumber(generation),
            StateGeneration(generation),
            SystemInput {
                solution: GhostedVector::zeros(&s),
                old_solution: cell.fetch().stokes_solution().clone(),
                dof_map: s,
            },
            SystemInput {
                solution: GhostedVector::zeros(&t),
                old_solution: GhostedVector::zeros(&t),
                dof_map: t,
            },
        )
        .unwrap()
    }

    #[test]
    fn publish_advances_generation() {
        let cell = StateCell::new(initial());
        assert_eq!(cell.current_generation(), StateGeneration(0));
        let next = advance(&cell, 1);
        cell.publish(next).unwrap();
        assert_eq!(cell.current_generation(), StateGeneration(1));
        assert_eq!(cell.fetch().timestep_number(), StepNumber(1));
    }

    #[test]
    fn publish_rejects_non_monotonic_generation() {
        let cell = StateCell::new(initial());
        let frame = advance(&cell, 2);
        cell.publish(frame).unwrap();
        let replay = advance(&cell, 2);
        match cell.publish(replay) {
            Err(PublishError::NonMonotonic { held, offered }) => {
                assert_eq!(held, StateGeneration(2));
                assert_eq!(offered, StateGeneration(2));
            }
            other => panic!("expected NonMonotonic, got {other:?}"),
        }
    }

    #[test]
    fn clones_share_the_same_cell() {
        let cell = StateCell::new(initial());
        let other = cell.clone();
        cell.publish(advance(&cell, 1)).unwrap();
        assert_eq!(other.current_generation(), StateGeneration(1));
    }
}

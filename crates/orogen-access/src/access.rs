//! The per-plugin read surface over simulator state.

use crate::cell::StateCell;
use crate::view::StateView;
use orogen_core::StepNumber;

/// Read-only accessor bound to one simulator's [`StateCell`].
///
/// Constructed once per plugin instance and handed to the plugin at
/// construction — explicit dependency injection, no global simulator
/// lookup. The accessor exposes exactly the getters plugins are allowed
/// to use; everything else about the simulator stays invisible.
///
/// Scalar getters answer from the latest frame on every call. Vector and
/// map getters live on [`StateView`]: call [`fetch`](Self::fetch) to open
/// an access window, read what you need, and drop the view before the
/// next step.
#[derive(Clone)]
pub struct SimulatorAccess {
    cell: StateCell,
}

impl SimulatorAccess {
    /// Bind an accessor to a simulator's publication cell.
    pub fn new(cell: StateCell) -> Self {
        Self { cell }
    }

    /// Open an access window onto the latest published frame.
    pub fn fetch(&self) -> StateView {
        self.cell.fetch()
    }

    /// Current simulated time, from the latest frame.
    pub fn time(&self) -> f64 {
        self.cell.fetch().time()
    }

    /// Ordinal of the current step, from the latest frame.
    pub fn timestep_number(&self) -> StepNumber {
        self.cell.fetch().timestep_number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::StateFrame;
    use orogen_core::DofMap;

    #[test]
    fn accessor_reads_the_initial_frame() {
        let cell = StateCell::new(StateFrame::initial(DofMap::serial(8), DofMap::serial(4)));
        let access = SimulatorAccess::new(cell);
        assert_eq!(access.time(), 0.0);
        assert_eq!(access.timestep_number(), StepNumber(0));
        let view = access.fetch();
        assert_eq!(view.stokes_solution().len(), 8);
        assert_eq!(view.temperature_dof_map().n_global(), 4);
    }

    #[test]
    fn view_getters_are_mutually_consistent() {
        let cell = StateCell::new(StateFrame::initial(DofMap::serial(8), DofMap::serial(4)));
        let access = SimulatorAccess::new(cell);
        let view = access.fetch();
        assert!(view.stokes_solution().conforms_to(view.stokes_dof_map()));
        assert!(view
            .old_temperature_solution()
            .conforms_to(view.temperature_dof_map()));
    }
}

//! Generation-checked views over one published frame.

use crate::cell::StateCell;
use crate::frame::StateFrame;
use orogen_core::{AccessError, DofMap, GhostedVector, StateGeneration, StepNumber};
use std::sync::Arc;

/// A read-only window onto one published [`StateFrame`].
///
/// All getters on one view answer from the same frame, so a vector and
/// the handler it pairs with are always mutually consistent. The view
/// remembers the generation it was taken at; [`ensure_current`] fails
/// fast once the simulator has published past it. Re-fetch a fresh view
/// from [`SimulatorAccess`](crate::SimulatorAccess) each step instead of
/// retaining one.
///
/// [`ensure_current`]: StateView::ensure_current
pub struct StateView {
    frame: Arc<StateFrame>,
    cell: StateCell,
}

impl StateView {
    pub(crate) fn new(frame: Arc<StateFrame>, cell: StateCell) -> Self {
        Self { frame, cell }
    }

    /// Generation this view was taken at.
    pub fn generation(&self) -> StateGeneration {
        self.frame.generation()
    }

    /// Whether the view still reflects the latest published frame.
    pub fn is_current(&self) -> bool {
        self.frame.generation() == self.cell.current_generation()
    }

    /// Fail fast if the simulator has published past this view.
    ///
    /// Callers that hold a view across work of unknown duration should
    /// check this before trusting the data for another access window.
    pub fn ensure_current(&self) -> Result<(), AccessError> {
        let current = self.cell.current_generation();
        let held = self.frame.generation();
        if held == current {
            Ok(())
        } else {
            Err(AccessError::StaleView { held, current })
        }
    }

    /// Current simulated time.
    pub fn time(&self) -> f64 {
        self.frame.time()
    }

    /// Ordinal of the current step.
    pub fn timestep_number(&self) -> StepNumber {
        self.frame.timestep_number()
    }

    /// Current Stokes (velocity and pressure) solution, ghosted for all
    /// locally-relevant degrees of freedom.
    pub fn stokes_solution(&self) -> &GhostedVector {
        self.frame.stokes().solution()
    }

    /// Previous-step Stokes solution.
    pub fn old_stokes_solution(&self) -> &GhostedVector {
        self.frame.stokes().old_solution()
    }

    /// Map interpreting entries of both Stokes vectors above.
    pub fn stokes_dof_map(&self) -> &DofMap {
        self.frame.stokes().dof_map()
    }

    /// Current temperature solution, ghosted for all locally-relevant
    /// degrees of freedom.
    pub fn temperature_solution(&self) -> &GhostedVector {
        self.frame.temperature().solution()
    }

    /// Previous-step temperature solution.
    pub fn old_temperature_solution(&self) -> &GhostedVector {
        self.frame.temperature().old_solution()
    }

    /// Map interpreting entries of both temperature vectors above.
    pub fn temperature_dof_map(&self) -> &DofMap {
        self.frame.temperature().dof_map()
    }
}

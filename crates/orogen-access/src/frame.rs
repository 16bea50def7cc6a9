//! Immutable per-step state frames.
//!
//! A [`StateFrame`] is one step's worth of simulator state as seen by
//! plugins: time, step ordinal, generation stamp, and the current and
//! previous solutions of the Stokes and temperature systems together with
//! their degree-of-freedom maps. Frames are validated at construction and
//! never mutated afterward; the simulator replaces the whole frame each
//! step.

use orogen_core::{DofMap, FrameError, GhostedVector, StateGeneration, StepNumber};

/// One field system's slice of a frame: current solution, previous-step
/// solution, and the map both are interpreted through.
///
/// Vector/map consistency is an invariant checked by
/// [`StateFrame::new`]; a vector and handler obtained from the same frame
/// are always mutually conformant.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemState {
    solution: GhostedVector,
    old_solution: GhostedVector,
    dof_map: DofMap,
}

impl SystemState {
    fn validated(
        system: &'static str,
        solution: GhostedVector,
        old_solution: GhostedVector,
        dof_map: DofMap,
    ) -> Result<Self, FrameError> {
        if !solution.conforms_to(&dof_map) {
            return Err(FrameError::VectorMapMismatch {
                system,
                vector_len: solution.len(),
                map_len: dof_map.n_locally_relevant(),
            });
        }
        if !old_solution.conforms_to(&dof_map) {
            return Err(FrameError::OldVectorMapMismatch {
                system,
                vector_len: old_solution.len(),
                map_len: dof_map.n_locally_relevant(),
            });
        }
        Ok(Self {
            solution,
            old_solution,
            dof_map,
        })
    }

    fn zeroed(dof_map: DofMap) -> Self {
        Self {
            solution: GhostedVector::zeros(&dof_map),
            old_solution: GhostedVector::zeros(&dof_map),
            dof_map,
        }
    }

    /// Current solution vector.
    pub fn solution(&self) -> &GhostedVector {
        &self.solution
    }

    /// Previous-step solution vector.
    pub fn old_solution(&self) -> &GhostedVector {
        &self.old_solution
    }

    /// The map interpreting both vectors.
    pub fn dof_map(&self) -> &DofMap {
        &self.dof_map
    }
}

/// Builder input for [`StateFrame::new`]: one field system's vectors and map.
#[derive(Clone, Debug)]
pub struct SystemInput {
    /// Current solution.
    pub solution: GhostedVector,
    /// Previous-step solution.
    pub old_solution: GhostedVector,
    /// Degree-of-freedom map for both.
    pub dof_map: DofMap,
}

/// Immutable snapshot of simulator state for one step.
#[derive(Clone, Debug, PartialEq)]
pub struct StateFrame {
    time: f64,
    step: StepNumber,
    generation: StateGeneration,
    stokes: SystemState,
    temperature: SystemState,
}

impl StateFrame {
    /// Assemble a frame, checking that each solution vector conforms to
    /// its paired degree-of-freedom map.
    pub fn new(
        time: f64,
        step: StepNumber,
        generation: StateGeneration,
        stokes: SystemInput,
        temperature: SystemInput,
    ) -> Result<Self, FrameError> {
        Ok(Self {
            time,
            step,
            generation,
            stokes: SystemState::validated(
                "stokes",
                stokes.solution,
                stokes.old_solution,
                stokes.dof_map,
            )?,
            temperature: SystemState::validated(
                "temperature",
                temperature.solution,
                temperature.old_solution,
                temperature.dof_map,
            )?,
        })
    }

    /// The pre-first-solve frame: time 0, step 0, generation 0, zero-filled
    /// vectors conforming to the given maps.
    ///
    /// The accessor does not validate solver readiness; before the first
    /// solve, plugins simply observe this zero state.
    pub fn initial(stokes_map: DofMap, temperature_map: DofMap) -> Self {
        Self {
            time: 0.0,
            step: StepNumber(0),
            generation: StateGeneration(0),
            stokes: SystemState::zeroed(stokes_map),
            temperature: SystemState::zeroed(temperature_map),
        }
    }

    /// Current simulated time. Monotonically non-decreasing across a run.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Ordinal of the current step.
    pub fn timestep_number(&self) -> StepNumber {
        self.step
    }

    /// Generation stamp assigned at publication.
    pub fn generation(&self) -> StateGeneration {
        self.generation
    }

    /// The Stokes (velocity and pressure) system.
    pub fn stokes(&self) -> &SystemState {
        &self.stokes
    }

    /// The temperature system.
    pub fn temperature(&self) -> &SystemState {
        &self.temperature
    }
}

//! A scripted stand-in for the owning simulator.

use orogen_access::{SimulatorAccess, StateCell, StateFrame, SystemInput};
use orogen_core::{DofMap, GhostedVector, StateGeneration, StepNumber};

/// Publishes deterministic frames into a [`StateCell`], playing the
/// simulator's role in tests.
///
/// Each [`advance`](Self::advance) publishes a frame whose owned solution
/// entries are `step * 100 + local_index` for the Stokes system and
/// `1000 + step * 100 + local_index` for temperature, with the previous
/// frame's current solutions carried over as the old solutions. Ghost
/// entries are filled with the negated global index so partition tests
/// can tell the blocks apart.
pub struct ScriptedSimulator {
    cell: StateCell,
    stokes_map: DofMap,
    temperature_map: DofMap,
    step: u64,
    dt: f64,
}

impl ScriptedSimulator {
    /// Start at the zero-filled initial frame (step 0, time 0).
    pub fn new(stokes_map: DofMap, temperature_map: DofMap, dt: f64) -> Self {
        let cell = StateCell::new(StateFrame::initial(
            stokes_map.clone(),
            temperature_map.clone(),
        ));
        Self {
            cell,
            stokes_map,
            temperature_map,
            step: 0,
            dt,
        }
    }

    /// Serial maps of the given sizes; the common case.
    pub fn serial(n_stokes: usize, n_temperature: usize, dt: f64) -> Self {
        Self::new(DofMap::serial(n_stokes), DofMap::serial(n_temperature), dt)
    }

    /// A fresh accessor bound to this simulator, as handed to a plugin
    /// at construction.
    pub fn access(&self) -> SimulatorAccess {
        SimulatorAccess::new(self.cell.clone())
    }

    /// The underlying publication cell.
    pub fn cell(&self) -> &StateCell {
        &self.cell
    }

    /// Current step ordinal.
    pub fn step(&self) -> StepNumber {
        StepNumber(self.step)
    }

    fn solved(map: &DofMap, step: u64, offset: f64) -> GhostedVector {
        let mut vec = GhostedVector::zeros(map);
        for (i, v) in vec.owned_mut().iter_mut().enumerate() {
            *v = offset + step as f64 * 100.0 + i as f64;
        }
        for (i, v) in vec.ghost_mut().iter_mut().enumerate() {
            let global = map.global_index(map.n_owned() + i).unwrap();
            *v = -(global as f64);
        }
        vec
    }

    /// Publish the next step's frame.
    pub fn advance(&mut self) {
        let view = self.cell.fetch();
        let old_stokes = view.stokes_solution().clone();
        let old_temperature = view.temperature_solution().clone();
        drop(view);

        self.step += 1;
        let frame = StateFrame::new(
            self.step as f64 * self.dt,
            StepNumber(self.step),
            StateGeneration(self.step),
            SystemInput {
                solution: Self::solved(&self.stokes_map, self.step, 0.0),
                old_solution: old_stokes,
                dof_map: self.stokes_map.clone(),
            },
            SystemInput {
                solution: Self::solved(&self.temperature_map, self.step, 1000.0),
                old_solution: old_temperature,
                dof_map: self.temperature_map.clone(),
            },
        )
        .expect("scripted frame conforms by construction");
        self.cell
            .publish(frame)
            .expect("scripted generations are monotonic");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_counts_steps_and_time() {
        let mut sim = ScriptedSimulator::serial(6, 3, 0.5);
        sim.advance();
        sim.advance();
        let access = sim.access();
        assert_eq!(access.timestep_number(), StepNumber(2));
        assert_eq!(access.time(), 1.0);
    }

    #[test]
    fn old_solution_is_the_previous_current() {
        let mut sim = ScriptedSimulator::serial(4, 2, 0.1);
        sim.advance();
        sim.advance();
        let view = sim.access().fetch();
        assert_eq!(view.old_stokes_solution().owned()[0], 100.0);
        assert_eq!(view.stokes_solution().owned()[0], 200.0);
        assert_eq!(view.old_temperature_solution().owned()[1], 1101.0);
    }

    #[test]
    fn ghost_entries_carry_negated_global_indices() {
        let map = DofMap::new(20, 5..10, vec![4, 10]).unwrap();
        let mut sim = ScriptedSimulator::new(map, DofMap::serial(2), 0.1);
        sim.advance();
        let view = sim.access().fetch();
        let stokes = view.stokes_solution();
        let map = view.stokes_dof_map();
        assert_eq!(stokes.get_global(map, 4), Some(-4.0));
        assert_eq!(stokes.get_global(map, 10), Some(-10.0));
    }
}

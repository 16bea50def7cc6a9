//! Solution-statistics postprocessors.
//!
//! Report min/max/RMS over the locally-owned entries of the current
//! Stokes or temperature solution. These are the reference consumers of
//! the accessor contract: each opens one access window per execution and
//! retains nothing across steps.

use orogen_access::{Postprocess, SimulatorAccess, StateView};
use orogen_core::{GhostedVector, PostprocessError, RegistryError};

fn owned_stats(
    label: &str,
    vector: &GhostedVector,
) -> Result<Vec<(String, String)>, PostprocessError> {
    let owned = vector.owned();
    if owned.is_empty() {
        return Err(PostprocessError::ExecutionFailed {
            reason: format!("{label}: no locally-owned entries to reduce"),
        });
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum_sq = 0.0;
    for &v in owned {
        min = min.min(v);
        max = max.max(v);
        sum_sq += v * v;
    }
    let rms = (sum_sq / owned.len() as f64).sqrt();
    Ok(vec![
        (format!("Min {label}"), format!("{min:.6e}")),
        (format!("Max {label}"), format!("{max:.6e}")),
        (format!("RMS {label}"), format!("{rms:.6e}")),
    ])
}

/// Min/max/RMS of the current Stokes (velocity and pressure) solution.
pub struct VelocityStatistics {
    access: SimulatorAccess,
}

impl VelocityStatistics {
    /// Name under which this plugin registers.
    pub const NAME: &'static str = "velocity statistics";

    /// Bind the plugin to its accessor.
    pub fn new(access: SimulatorAccess) -> Self {
        Self { access }
    }
}

impl Postprocess for VelocityStatistics {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn execute(&mut self) -> Result<Vec<(String, String)>, PostprocessError> {
        let view: StateView = self.access.fetch();
        owned_stats("velocity", view.stokes_solution())
    }
}

/// Min/max/RMS of the current temperature solution.
pub struct TemperatureStatistics {
    access: SimulatorAccess,
}

impl TemperatureStatistics {
    /// Name under which this plugin registers.
    pub const NAME: &'static str = "temperature statistics";

    /// Bind the plugin to its accessor.
    pub fn new(access: SimulatorAccess) -> Self {
        Self { access }
    }
}

impl Postprocess for TemperatureStatistics {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn execute(&mut self) -> Result<Vec<(String, String)>, PostprocessError> {
        let view = self.access.fetch();
        owned_stats("temperature", view.temperature_solution())
    }
}

/// Register both statistics postprocessors in `registry`.
pub fn register_statistics_postprocessors(
    registry: &mut orogen_access::PostprocessRegistry,
) -> Result<(), RegistryError> {
    registry.register(
        VelocityStatistics::NAME,
        Box::new(|access| Box::new(VelocityStatistics::new(access))),
    )?;
    registry.register(
        TemperatureStatistics::NAME,
        Box::new(|access| Box::new(TemperatureStatistics::new(access))),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orogen_access::{PostprocessRegistry, StateCell, StateFrame, SystemInput};
    use orogen_core::{DofMap, GhostedVector, ParameterSection, StateGeneration, StepNumber};

    fn cell_with_solutions(stokes: Vec<f64>, temperature: Vec<f64>) -> StateCell {
        let s_map = DofMap::serial(stokes.len());
        let t_map = DofMap::serial(temperature.len());
        let cell = StateCell::new(StateFrame::initial(s_map.clone(), t_map.clone()));
        let frame = StateFrame::new(
            0.5,
            StepNumber(1),
            StateGeneration(1),
            SystemInput {
                solution: GhostedVector::from_parts(stokes, vec![]),
                old_solution: GhostedVector::zeros(&s_map),
                dof_map: s_map,
            },
            SystemInput {
                solution: GhostedVector::from_parts(temperature, vec![]),
                old_solution: GhostedVector::zeros(&t_map),
                dof_map: t_map,
            },
        )
        .unwrap();
        cell.publish(frame).unwrap();
        cell
    }

    #[test]
    fn velocity_statistics_reduce_owned_entries() {
        let cell = cell_with_solutions(vec![3.0, -4.0, 0.0], vec![1.0]);
        let mut plugin = VelocityStatistics::new(SimulatorAccess::new(cell));
        let rows = plugin.execute().unwrap();
        assert_eq!(rows[0], ("Min velocity".to_string(), format!("{:.6e}", -4.0)));
        assert_eq!(rows[1], ("Max velocity".to_string(), format!("{:.6e}", 3.0)));
        // RMS of {3, -4, 0} is sqrt(25/3).
        let rms: f64 = (25.0f64 / 3.0).sqrt();
        assert_eq!(rows[2], ("RMS velocity".to_string(), format!("{rms:.6e}")));
    }

    #[test]
    fn temperature_statistics_use_the_temperature_system() {
        let cell = cell_with_solutions(vec![0.0], vec![250.0, 1600.0]);
        let mut plugin = TemperatureStatistics::new(SimulatorAccess::new(cell));
        let rows = plugin.execute().unwrap();
        assert_eq!(
            rows[1],
            ("Max temperature".to_string(), format!("{:.6e}", 1600.0))
        );
    }

    #[test]
    fn builtin_registration_exposes_both_names() {
        let mut registry = PostprocessRegistry::new();
        register_statistics_postprocessors(&mut registry).unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(
            names,
            vec![VelocityStatistics::NAME, TemperatureStatistics::NAME]
        );
        let cell = cell_with_solutions(vec![1.0, 2.0], vec![3.0]);
        let mut plugin = registry
            .create(
                "velocity statistics",
                SimulatorAccess::new(cell),
                &ParameterSection::new(),
            )
            .unwrap();
        assert!(plugin.execute().is_ok());
    }
}

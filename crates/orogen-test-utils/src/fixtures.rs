//! Reusable postprocessor fixtures.
//!
//! - [`ConstantPostprocess`] — reports a fixed row; for registry wiring
//!   tests.
//! - [`FailingPostprocess`] — fails deterministically; for error-path
//!   tests.

use orogen_access::{Postprocess, SimulatorAccess};
use orogen_core::PostprocessError;

/// Reports one fixed `(label, value)` row on every execution.
pub struct ConstantPostprocess {
    pub label: String,
    pub value: String,
    // Held to mirror real plugins' construction shape; unused by execute.
    pub access: SimulatorAccess,
}

impl ConstantPostprocess {
    pub fn new(
        label: impl Into<String>,
        value: impl Into<String>,
        access: SimulatorAccess,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            access,
        }
    }
}

impl Postprocess for ConstantPostprocess {
    fn name(&self) -> &str {
        "constant"
    }

    fn execute(&mut self) -> Result<Vec<(String, String)>, PostprocessError> {
        Ok(vec![(self.label.clone(), self.value.clone())])
    }
}

/// Always fails with a fixed reason.
pub struct FailingPostprocess {
    pub reason: String,
}

impl FailingPostprocess {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Postprocess for FailingPostprocess {
    fn name(&self) -> &str {
        "failing"
    }

    fn execute(&mut self) -> Result<Vec<(String, String)>, PostprocessError> {
        Err(PostprocessError::ExecutionFailed {
            reason: self.reason.clone(),
        })
    }
}

//! Orogen: the plugin accessor layer of a parallel finite-element
//! geodynamics simulator.
//!
//! This is the top-level facade crate re-exporting the public API from
//! the Orogen sub-crates. Plugins read simulator state (solution vectors,
//! degree-of-freedom maps, timestep metadata) exclusively through the
//! accessor surface defined here; the simulator's internals stay
//! invisible past that boundary.
//!
//! # Quick start
//!
//! ```rust
//! use orogen::prelude::*;
//!
//! // A postprocessor that reports the current step and time.
//! struct StepReport {
//!     access: SimulatorAccess,
//! }
//!
//! impl Postprocess for StepReport {
//!     fn name(&self) -> &str { "step report" }
//!     fn execute(&mut self) -> Result<Vec<(String, String)>, PostprocessError> {
//!         let view = self.access.fetch();
//!         Ok(vec![
//!             ("Step".to_string(), view.timestep_number().to_string()),
//!             ("Time".to_string(), format!("{}", view.time())),
//!         ])
//!     }
//! }
//!
//! // The simulator publishes an initial frame and hands each plugin an
//! // accessor bound to its publication cell.
//! let cell = StateCell::new(StateFrame::initial(
//!     DofMap::serial(8),
//!     DofMap::serial(4),
//! ));
//! let mut plugin = StepReport { access: SimulatorAccess::new(cell) };
//! let rows = plugin.execute().unwrap();
//! assert_eq!(rows[0], ("Step".to_string(), "0".to_string()));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `orogen-core` | IDs, DoF maps, ghosted vectors, parameters, errors |
//! | [`access`] | `orogen-access` | State frames, cell, views, accessor, postprocess base |
//! | [`plugins`] | `orogen-plugins` | Initial-condition and statistics plugins |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types: IDs, maps, vectors, parameters, and errors (`orogen-core`).
pub mod types {
    pub use orogen_core::*;
}

/// The accessor and postprocessor plugin base (`orogen-access`).
pub mod access {
    pub use orogen_access::*;
}

/// Concrete plugins and their registries (`orogen-plugins`).
pub mod plugins {
    pub use orogen_plugins::*;
}

/// Commonly-used items for plugin authors.
pub mod prelude {
    pub use orogen_access::{
        Postprocess, PostprocessRegistry, SimulatorAccess, StateCell, StateFrame, StateView,
    };
    pub use orogen_core::{
        AccessError, CompositionError, DofMap, FieldIndex, GhostedVector, ParameterDeclarations,
        ParameterError, ParameterSection, Point, PostprocessError, StateGeneration, StepNumber,
    };
    pub use orogen_plugins::{
        FunctionInitialComposition, InitialComposition, InitialConditionRegistry,
        UniformComposition,
    };
}

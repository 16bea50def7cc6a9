//! Simulator state accessor and postprocessor plugin base.
//!
//! This crate is the decoupling boundary between the simulator and
//! independently-developed plugins. The simulator publishes immutable
//! [`StateFrame`]s into a [`StateCell`] once per step; plugins read them
//! through a [`SimulatorAccess`] bound to that cell. Nothing past this
//! surface (mesh, assembly matrices, solvers) is visible to plugin code,
//! so simulator-internal refactors cannot break plugins.
//!
//! Access is pull-based: plugins call getters on demand, the simulator
//! never calls back into plugins through this layer. References obtained
//! from a [`StateView`] are valid for one access window; the view's
//! generation check turns retention across a step boundary into an
//! explicit [`AccessError::StaleView`](orogen_core::AccessError) instead
//! of a silent read of replaced storage.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod access;
pub mod cell;
pub mod frame;
pub mod postprocess;
pub mod view;

pub use access::SimulatorAccess;
pub use cell::StateCell;
pub use frame::{StateFrame, SystemInput, SystemState};
pub use postprocess::{Postprocess, PostprocessFactory, PostprocessRegistry};
pub use view::StateView;

//! Test utilities and fixtures for Orogen development.
//!
//! Provides a scripted stand-in for the simulator ([`ScriptedSimulator`]),
//! a small arithmetic expression compiler ([`CalcCompiler`]) implementing
//! the evaluator seam, and reusable plugin fixtures.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod calc;
mod fixtures;
mod simulator;

pub use calc::CalcCompiler;
pub use fixtures::{ConstantPostprocess, FailingPostprocess};
pub use simulator::ScriptedSimulator;

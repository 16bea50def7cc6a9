//! Core types for the Orogen plugin layer.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary shared by the accessor and plugin crates:
//! strongly-typed IDs, the degree-of-freedom map and ghosted vector types,
//! parameter-file section/declaration types, and all error enums.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dof;
pub mod error;
pub mod id;
pub mod params;

pub use dof::{DofMap, GhostedVector};
pub use error::{
    AccessError, CompositionError, DofMapError, ExpressionError, FrameError, ParameterError,
    PostprocessError, PublishError, RegistryError,
};
pub use id::{FieldIndex, Point, StateGeneration, StepNumber};
pub use params::{ParameterDecl, ParameterDeclarations, ParameterSection};

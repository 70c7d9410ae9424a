//! # neatgen
//!
//! Generates reflection registrations for the exported classes and structs of
//! a C++ module, from the module's decoded interface graph.
//!
//! The graph is a set of flat tables addressed by tagged `(sort, index)`
//! references ([`graph`]). The [`renderer`] walks it from the global scope,
//! spells types and qualified names, decides which members the generated code
//! may see and emits one `add_type` registration per exported type.

pub mod convert;
pub mod graph;
pub mod renderer;

#[cfg(test)]
mod tests;

// Items only: both trees have a `types` module
pub use convert::*;
pub use graph::{builder::*, module::*, types::*};
pub use renderer::{
    components::*, renderer::*, renders::*, template::*, traits::*, types::*, visibility::*,
};

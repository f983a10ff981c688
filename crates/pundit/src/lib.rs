//! Top-level facade crate for pundit.
//!
//! Re-exports core types and the engine so users can depend on a single crate.

pub mod core {
    pub use pundit_core::*;
}

pub mod engine {
    pub use pundit_engine::*;
}

pub use pundit_core::{Entity, Model, PunditError, Scope, TypeDescriptor, MATCH_NOTHING};
pub use pundit_engine::{Policy, Registry};

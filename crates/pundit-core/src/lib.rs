//! pundit core: type tags, the filter outcome type, and the shared error surface.
//!
//! This crate defines the contracts shared by the policy engine, policy
//! authors, and the application code that consumes filter payloads. It carries
//! no runtime dependencies so domain crates can depend on it without pulling
//! in the engine.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `PunditError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod scope;

/// Shared result type.
pub use error::{ErrorCode, PunditError, Result};
pub use model::{Entity, Model, TypeDescriptor};
pub use scope::{MatchNothing, Scope, MATCH_NOTHING};

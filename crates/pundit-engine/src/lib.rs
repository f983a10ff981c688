//! pundit engine library entry.
//!
//! This crate holds the policy contract, the registry and its first-match
//! resolver, and the dispatcher that routes `authorize`, `filter`, and
//! `filter_for` calls to the governing policy. It also carries the wiring
//! config and an example blog domain used by the demo binary and the
//! integration tests.

pub mod blog;
pub mod config;
pub mod dispatch;
pub mod policy;
pub mod registry;
pub mod resolver;
pub mod wiring;

pub use policy::{Context, Policy, PolicyError};
pub use registry::Registry;
pub use resolver::{resolve_by_instance, resolve_by_type, Resolved};

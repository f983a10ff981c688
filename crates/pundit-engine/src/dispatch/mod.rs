//! Dispatcher module.
//!
//! `authorize`, `filter`, and `filter_for` are inherent methods on
//! [`Registry`](crate::registry::Registry); this module holds their
//! implementation.

pub mod dispatcher;

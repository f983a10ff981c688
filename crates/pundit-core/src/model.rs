//! Explicit type tags for domain values.
//!
//! Policies match on tags rather than on runtime type checks: every entity
//! declares its tag once through [`Entity`], and every entity value is a
//! [`Model`] through the blanket impl below.

use std::any::Any;
use std::fmt;

/// Type descriptor of an entity, usable when no instance exists yet
/// (e.g. when building a listing filter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDescriptor(&'static str);

impl TypeDescriptor {
    pub const fn new(tag: &'static str) -> Self {
        Self(tag)
    }

    /// Descriptor of an entity type.
    pub fn of<M: Entity>() -> Self {
        M::TYPE
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A domain type governed by exactly one policy.
pub trait Entity: Send + Sync + 'static {
    const TYPE: TypeDescriptor;
}

/// Object-safe view of an entity instance.
pub trait Model: Send + Sync {
    fn descriptor(&self) -> TypeDescriptor;
    fn as_any(&self) -> &dyn Any;
}

impl<T: Entity> Model for T {
    fn descriptor(&self) -> TypeDescriptor {
        T::TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

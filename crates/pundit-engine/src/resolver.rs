//! First-match policy lookup.
//!
//! Both lookups are a linear scan in registration order and a pure function
//! of (registry, query). Nothing is cached.

use std::sync::Arc;

use pundit_core::{Model, PunditError, TypeDescriptor};

use crate::policy::erased::ErasedPolicy;
use crate::policy::{Context, PolicyError};
use crate::registry::Registry;

/// The policy a query resolved to.
pub struct Resolved<'r, C, E> {
    index: usize,
    pub(crate) policy: &'r Arc<dyn ErasedPolicy<C, E>>,
}

impl<C, E> Resolved<'_, C, E> {
    /// Position in registration order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &'static str {
        self.policy.name()
    }

    /// Type tag of the policy's own model.
    pub fn model_type(&self) -> TypeDescriptor {
        self.policy.model_type()
    }
}

/// First policy whose `handles_model` accepts `object`.
pub fn resolve_by_instance<'r, C: Context, E: PolicyError>(
    registry: &'r Registry<C, E>,
    object: &dyn Model,
) -> Result<Resolved<'r, C, E>, PunditError> {
    registry
        .policies()
        .iter()
        .enumerate()
        .find(|(_, p)| p.handles_model(object))
        .map(|(index, policy)| Resolved { index, policy })
        .ok_or(PunditError::PolicyNotFound {
            model: object.descriptor(),
        })
}

/// First policy whose `handles_model_type` accepts `ty`.
pub fn resolve_by_type<C: Context, E: PolicyError>(
    registry: &Registry<C, E>,
    ty: TypeDescriptor,
) -> Result<Resolved<'_, C, E>, PunditError> {
    registry
        .policies()
        .iter()
        .enumerate()
        .find(|(_, p)| p.handles_model_type(ty))
        .map(|(index, policy)| Resolved { index, policy })
        .ok_or(PunditError::PolicyNotFound { model: ty })
}

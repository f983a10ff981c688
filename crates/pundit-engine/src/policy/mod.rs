//! Policy contract.
//!
//! A policy is the authorization and filtering authority for one entity
//! type. Implement [`Policy`] once per entity and register it on a
//! [`Registry`](crate::registry::Registry); the registry stores it
//! type-erased behind the adapter in [`erased`].

pub(crate) mod erased;

use std::any::type_name;
use std::fmt::Debug;

use async_trait::async_trait;

use pundit_core::{Entity, Model, PunditError, Scope, TypeDescriptor};

/// Caller-defined request context, threaded unchanged through every call.
pub trait Context: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Context for T {}

/// Failure type shared by the policies of one registry.
///
/// Engine failures enter it through `From<PunditError>`; failures raised by a
/// policy body come back to the caller as the same value.
pub trait PolicyError: From<PunditError> + Send + 'static {}

impl<T: From<PunditError> + Send + 'static> PolicyError for T {}

/// Authorization and filtering logic for one entity type.
#[async_trait]
pub trait Policy<C: Context, E: PolicyError = PunditError>: Send + Sync + 'static {
    /// Governed entity.
    type Model: Entity;
    /// Actions this policy decides on. Match it exhaustively in `authorize`.
    type Action: Debug + Send + 'static;
    /// Payload returned by `filter`.
    type Filter: Send + 'static;
    /// Payload returned by `filter_for`.
    type FilterFor: Send + 'static;

    /// Name used in errors and logs.
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }

    async fn authorize(&self, ctx: &C, object: &Self::Model, action: Self::Action)
        -> Result<bool, E>;

    /// Generic filter, usable for listings and single-row lookups alike.
    async fn filter(&self, ctx: &C) -> Result<Scope<Self::Filter>, E>;

    /// Action-specific filter. Opt-in: without an override every call fails
    /// with `NotImplemented` instead of falling back to `filter`.
    async fn filter_for(
        &self,
        _ctx: &C,
        _action: Self::Action,
    ) -> Result<Scope<Self::FilterFor>, E> {
        Err(PunditError::NotImplemented {
            policy: self.name(),
            operation: "filter_for",
        }
        .into())
    }

    /// Does this policy govern `object`?
    ///
    /// Must agree with `handles_model_type` for the object's descriptor; the
    /// engine does not check this.
    fn handles_model(&self, object: &dyn Model) -> bool {
        object.descriptor() == <Self::Model as Entity>::TYPE
    }

    /// Does this policy govern the type `ty`?
    fn handles_model_type(&self, ty: TypeDescriptor) -> bool {
        ty == <Self::Model as Entity>::TYPE
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

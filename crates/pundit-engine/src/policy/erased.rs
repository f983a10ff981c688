//! Object-safe view of a [`Policy`], so one registry can hold policies with
//! different models, actions, and payload types.

use std::any::{type_name, Any, TypeId};

use async_trait::async_trait;

use pundit_core::{Model, PunditError, Scope, TypeDescriptor};

use super::{Context, Policy, PolicyError};

pub(crate) type BoxAny = Box<dyn Any + Send>;

/// An action with its static type erased.
pub(crate) struct ErasedAction {
    value: BoxAny,
    type_id: TypeId,
    type_name: &'static str,
}

impl ErasedAction {
    pub(crate) fn new<A: Send + 'static>(action: A) -> Self {
        Self {
            value: Box::new(action),
            type_id: TypeId::of::<A>(),
            type_name: type_name::<A>(),
        }
    }

    pub(crate) fn action_type_id(&self) -> TypeId {
        self.type_id
    }

    pub(crate) fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn downcast<A: 'static>(self, policy: &'static str) -> Result<A, PunditError> {
        let type_name = self.type_name;
        self.value
            .downcast::<A>()
            .map(|a| *a)
            .map_err(|_| PunditError::ActionNotHandled {
                policy,
                action: type_name,
            })
    }
}

#[async_trait]
pub(crate) trait ErasedPolicy<C, E>: Send + Sync {
    fn name(&self) -> &'static str;
    fn model_type(&self) -> TypeDescriptor;
    fn action_type(&self) -> TypeId;
    fn filter_type(&self) -> TypeId;
    fn filter_for_type(&self) -> TypeId;
    fn handles_model(&self, object: &dyn Model) -> bool;
    fn handles_model_type(&self, ty: TypeDescriptor) -> bool;

    async fn authorize(&self, ctx: &C, object: &dyn Model, action: ErasedAction)
        -> Result<bool, E>;
    async fn filter(&self, ctx: &C) -> Result<Scope<BoxAny>, E>;
    async fn filter_for(&self, ctx: &C, action: ErasedAction) -> Result<Scope<BoxAny>, E>;
}

/// Wraps a typed policy for storage in a registry.
pub(crate) struct Adapter<P>(pub(crate) P);

#[async_trait]
impl<C, E, P> ErasedPolicy<C, E> for Adapter<P>
where
    C: Context,
    E: PolicyError,
    P: Policy<C, E>,
{
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn model_type(&self) -> TypeDescriptor {
        <P::Model as pundit_core::Entity>::TYPE
    }

    fn action_type(&self) -> TypeId {
        TypeId::of::<P::Action>()
    }

    fn filter_type(&self) -> TypeId {
        TypeId::of::<P::Filter>()
    }

    fn filter_for_type(&self) -> TypeId {
        TypeId::of::<P::FilterFor>()
    }

    fn handles_model(&self, object: &dyn Model) -> bool {
        self.0.handles_model(object)
    }

    fn handles_model_type(&self, ty: TypeDescriptor) -> bool {
        self.0.handles_model_type(ty)
    }

    async fn authorize(
        &self,
        ctx: &C,
        object: &dyn Model,
        action: ErasedAction,
    ) -> Result<bool, E> {
        let model = object
            .as_any()
            .downcast_ref::<P::Model>()
            .ok_or(PunditError::ModelMismatch {
                policy: self.0.name(),
                model: object.descriptor(),
            })?;
        let action = action.downcast::<P::Action>(self.0.name())?;
        self.0.authorize(ctx, model, action).await
    }

    async fn filter(&self, ctx: &C) -> Result<Scope<BoxAny>, E> {
        let scope = self.0.filter(ctx).await?;
        Ok(scope.map(|f| Box::new(f) as BoxAny))
    }

    async fn filter_for(&self, ctx: &C, action: ErasedAction) -> Result<Scope<BoxAny>, E> {
        let action = action.downcast::<P::Action>(self.0.name())?;
        let scope = self.0.filter_for(ctx, action).await?;
        Ok(scope.map(|f| Box::new(f) as BoxAny))
    }
}

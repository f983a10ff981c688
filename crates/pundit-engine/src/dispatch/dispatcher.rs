use std::any::{type_name, TypeId};

use pundit_core::{Model, PunditError, Scope, TypeDescriptor};

use crate::policy::erased::{BoxAny, ErasedAction};
use crate::policy::{Context, PolicyError};
use crate::registry::Registry;
use crate::resolver::{resolve_by_instance, resolve_by_type, Resolved};

impl<C: Context, E: PolicyError> Registry<C, E> {
    /// Decide whether `ctx` may perform `action` on `object`.
    ///
    /// The resolved policy's answer is returned as-is. Failures raised by the
    /// policy propagate unchanged.
    pub async fn authorize<A: Send + 'static>(
        &self,
        ctx: &C,
        object: &dyn Model,
        action: A,
    ) -> Result<bool, E> {
        let resolved = resolve_by_instance(self, object).map_err(not_found)?;
        let action = ErasedAction::new(action);
        check_action(&resolved, &action)?;
        tracing::debug!(
            policy = resolved.name(),
            model = %object.descriptor(),
            action = action.type_name(),
            "authorize"
        );
        resolved.policy.authorize(ctx, object, action).await
    }

    /// Build the general filter for entities of type `ty`.
    ///
    /// `F` names the payload type the caller expects; it must be the
    /// resolved policy's `Filter` type.
    pub async fn filter<F: Send + 'static>(
        &self,
        ctx: &C,
        ty: TypeDescriptor,
    ) -> Result<Scope<F>, E> {
        let resolved = resolve_by_type(self, ty).map_err(not_found)?;
        check_payload::<F, C, E>(&resolved, resolved.policy.filter_type())?;
        tracing::debug!(policy = resolved.name(), model = %ty, "filter");
        let scope = resolved.policy.filter(ctx).await?;
        Ok(downcast_scope(resolved.name(), scope)?)
    }

    /// Build the filter specific to `action` for entities of type `ty`.
    ///
    /// Fails with `NotImplemented` when the policy has no `filter_for`.
    pub async fn filter_for<F: Send + 'static, A: Send + 'static>(
        &self,
        ctx: &C,
        ty: TypeDescriptor,
        action: A,
    ) -> Result<Scope<F>, E> {
        let resolved = resolve_by_type(self, ty).map_err(not_found)?;
        let action = ErasedAction::new(action);
        check_action(&resolved, &action)?;
        check_payload::<F, C, E>(&resolved, resolved.policy.filter_for_type())?;
        tracing::debug!(
            policy = resolved.name(),
            model = %ty,
            action = action.type_name(),
            "filter_for"
        );
        let scope = resolved.policy.filter_for(ctx, action).await?;
        Ok(downcast_scope(resolved.name(), scope)?)
    }
}

fn not_found(err: PunditError) -> PunditError {
    tracing::warn!(error = %err, "policy resolution failed");
    err
}

fn check_action<C, E>(
    resolved: &Resolved<'_, C, E>,
    action: &ErasedAction,
) -> Result<(), PunditError> {
    if resolved.policy.action_type() != action.action_type_id() {
        return Err(PunditError::ActionNotHandled {
            policy: resolved.name(),
            action: action.type_name(),
        });
    }
    Ok(())
}

fn check_payload<F: 'static, C, E>(
    resolved: &Resolved<'_, C, E>,
    produced: TypeId,
) -> Result<(), PunditError> {
    if produced != TypeId::of::<F>() {
        return Err(PunditError::PayloadMismatch {
            policy: resolved.name(),
            expected: type_name::<F>(),
        });
    }
    Ok(())
}

fn downcast_scope<F: 'static>(
    policy: &'static str,
    scope: Scope<BoxAny>,
) -> Result<Scope<F>, PunditError> {
    match scope {
        Scope::MatchNothing => Ok(Scope::MatchNothing),
        Scope::Rows(payload) => payload
            .downcast::<F>()
            .map(|f| Scope::Rows(*f))
            .map_err(|_| PunditError::PayloadMismatch {
                policy,
                expected: type_name::<F>(),
            }),
    }
}

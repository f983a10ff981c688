use async_trait::async_trait;

use pundit_core::error::Result;
use pundit_core::{Scope, MATCH_NOTHING};

use crate::policy::Policy;

use super::models::User;
use super::query::UserQuery;
use super::PolicyContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Create,
    Update,
}

/// Anyone may sign up; users may update themselves, admins anyone.
/// No action-specific filter.
#[derive(Default)]
pub struct UserPolicy;

#[async_trait]
impl Policy<PolicyContext> for UserPolicy {
    type Model = User;
    type Action = UserAction;
    type Filter = UserQuery;
    type FilterFor = UserQuery;

    fn name(&self) -> &'static str {
        "UserPolicy"
    }

    async fn authorize(
        &self,
        ctx: &PolicyContext,
        user: &User,
        action: UserAction,
    ) -> Result<bool> {
        match action {
            UserAction::Create => Ok(true),
            UserAction::Update => Ok(ctx.is_admin() || ctx.actor_id() == Some(user.id)),
        }
    }

    async fn filter(&self, ctx: &PolicyContext) -> Result<Scope<UserQuery>> {
        let Some(actor) = &ctx.actor else {
            return Ok(MATCH_NOTHING.into());
        };
        if actor.admin {
            return Ok(Scope::Rows(UserQuery::All));
        }
        Ok(Scope::Rows(UserQuery::Only(actor.id)))
    }
}

use async_trait::async_trait;

use pundit_core::error::Result;
use pundit_core::{Scope, MATCH_NOTHING};

use crate::policy::Policy;

use super::models::Post;
use super::query::PostQuery;
use super::PolicyContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    Create,
    Update,
    Publish,
    Unpublish,
}

/// Admins may do anything. Authors may create posts in their own name and
/// manage posts the store says they wrote.
#[derive(Default)]
pub struct PostPolicy;

impl PostPolicy {
    /// Ownership comes from the store, not from the (caller-supplied) instance.
    async fn is_admin_or_author(&self, ctx: &PolicyContext, post: &Post) -> Result<bool> {
        let Some(actor) = &ctx.actor else {
            return Ok(false);
        };
        if actor.admin {
            return Ok(true);
        }
        let author = ctx.store.post_author(post.id).await?;
        Ok(author == actor.id)
    }
}

#[async_trait]
impl Policy<PolicyContext> for PostPolicy {
    type Model = Post;
    type Action = PostAction;
    type Filter = PostQuery;
    type FilterFor = PostQuery;

    fn name(&self) -> &'static str {
        "PostPolicy"
    }

    async fn authorize(
        &self,
        ctx: &PolicyContext,
        post: &Post,
        action: PostAction,
    ) -> Result<bool> {
        match action {
            PostAction::Create => Ok(ctx.is_admin() || ctx.actor_id() == Some(post.author_id)),
            PostAction::Update | PostAction::Publish | PostAction::Unpublish => {
                self.is_admin_or_author(ctx, post).await
            }
        }
    }

    async fn filter(&self, ctx: &PolicyContext) -> Result<Scope<PostQuery>> {
        let Some(actor) = &ctx.actor else {
            return Ok(MATCH_NOTHING.into());
        };
        if actor.admin {
            return Ok(Scope::Rows(PostQuery::all()));
        }
        Ok(Scope::Rows(PostQuery::visible_to(actor.id)))
    }

    async fn filter_for(
        &self,
        ctx: &PolicyContext,
        action: PostAction,
    ) -> Result<Scope<PostQuery>> {
        let Some(actor) = &ctx.actor else {
            return Ok(MATCH_NOTHING.into());
        };
        match action {
            // Creating never targets existing rows.
            PostAction::Create => Ok(MATCH_NOTHING.into()),
            PostAction::Update | PostAction::Publish | PostAction::Unpublish => {
                if actor.admin {
                    Ok(Scope::Rows(PostQuery::all()))
                } else {
                    Ok(Scope::Rows(PostQuery::by_author(actor.id)))
                }
            }
        }
    }
}

//! Blog domain used by the demo binary and the integration tests.
//!
//! Two entities (`User`, `Post`), an in-memory store standing in for the
//! persistence layer, and one policy per entity. The engine only sees these
//! through the `Policy` contract.

pub mod models;
pub mod post_policy;
pub mod query;
pub mod store;
pub mod user_policy;

use std::sync::Arc;

use pundit_core::{Entity, TypeDescriptor};

pub use models::{Post, User};
pub use post_policy::{PostAction, PostPolicy};
pub use query::{PostQuery, UserQuery};
pub use store::BlogStore;
pub use user_policy::{UserAction, UserPolicy};

/// Request context handed to every blog policy.
#[derive(Clone)]
pub struct PolicyContext {
    pub actor: Option<User>,
    pub store: Arc<BlogStore>,
}

impl PolicyContext {
    pub fn new(store: Arc<BlogStore>, actor: Option<User>) -> Self {
        Self { actor, store }
    }

    pub fn anonymous(store: Arc<BlogStore>) -> Self {
        Self { actor: None, store }
    }

    pub fn is_admin(&self) -> bool {
        self.actor.as_ref().is_some_and(|a| a.admin)
    }

    pub fn actor_id(&self) -> Option<u64> {
        self.actor.as_ref().map(|a| a.id)
    }
}

/// Every entity type the blog defines.
pub fn catalog() -> [TypeDescriptor; 2] {
    [User::TYPE, Post::TYPE]
}

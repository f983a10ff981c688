//! Filter payloads understood by [`BlogStore`](super::BlogStore).
//!
//! The engine passes these through untouched.

use serde::Serialize;

use super::models::{Post, User};

/// Post selection. The default value selects every post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostQuery {
    /// Restrict to posts by this author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<u64>,
    /// With `author_id` set, also admit published posts by anyone.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub or_published: bool,
}

impl PostQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_author(author_id: u64) -> Self {
        Self {
            author_id: Some(author_id),
            or_published: false,
        }
    }

    pub fn visible_to(author_id: u64) -> Self {
        Self {
            author_id: Some(author_id),
            or_published: true,
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        match self.author_id {
            None => true,
            Some(a) => post.author_id == a || (self.or_published && post.published),
        }
    }
}

/// User selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserQuery {
    All,
    Only(u64),
}

impl UserQuery {
    pub fn matches(&self, user: &User) -> bool {
        match self {
            UserQuery::All => true,
            UserQuery::Only(id) => user.id == *id,
        }
    }
}

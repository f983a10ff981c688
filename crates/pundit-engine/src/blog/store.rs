//! In-memory persistence for the blog domain.

use dashmap::DashMap;

use pundit_core::error::{PunditError, Result};

use super::models::{Post, User};
use super::query::{PostQuery, UserQuery};

#[derive(Default)]
pub struct BlogStore {
    users: DashMap<u64, User>,
    posts: DashMap<u64, Post>,
}

impl BlogStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            posts: DashMap::new(),
        }
    }

    pub fn insert_user(&self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn insert_post(&self, post: Post) {
        self.posts.insert(post.id, post);
    }

    pub fn user(&self, id: u64) -> Option<User> {
        self.users.get(&id).map(|r| r.value().clone())
    }

    pub fn post(&self, id: u64) -> Option<Post> {
        self.posts.get(&id).map(|r| r.value().clone())
    }

    /// Stored author of a post. Yields once, like a real round trip would.
    pub async fn post_author(&self, post_id: u64) -> Result<u64> {
        tokio::task::yield_now().await;
        self.posts
            .get(&post_id)
            .map(|r| r.value().author_id)
            .ok_or_else(|| PunditError::Policy(format!("post {post_id} not found")))
    }

    /// Posts selected by `query`, ordered by id.
    pub async fn find_posts(&self, query: &PostQuery) -> Vec<Post> {
        tokio::task::yield_now().await;
        let mut out: Vec<Post> = self
            .posts
            .iter()
            .filter(|r| query.matches(r.value()))
            .map(|r| r.value().clone())
            .collect();
        out.sort_by_key(|p| p.id);
        out
    }

    /// Users selected by `query`, ordered by id.
    pub async fn find_users(&self, query: &UserQuery) -> Vec<User> {
        tokio::task::yield_now().await;
        let mut out: Vec<User> = self
            .users
            .iter()
            .filter(|r| query.matches(r.value()))
            .map(|r| r.value().clone())
            .collect();
        out.sort_by_key(|u| u.id);
        out
    }
}

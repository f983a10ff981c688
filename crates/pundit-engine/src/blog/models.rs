use std::fmt;

use serde::Serialize;

use pundit_core::{Entity, TypeDescriptor};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub admin: bool,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>, admin: bool) -> Self {
        Self {
            id,
            name: name.into(),
            admin,
        }
    }
}

impl Entity for User {
    const TYPE: TypeDescriptor = TypeDescriptor::new("user");
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User({}, admin: {})", self.name, self.admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: u64,
    pub author_id: u64,
    pub title: String,
    pub published: bool,
}

impl Post {
    pub fn new(id: u64, author_id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            author_id,
            title: title.into(),
            published: false,
        }
    }

    pub fn published(mut self) -> Self {
        self.published = true;
        self
    }
}

impl Entity for Post {
    const TYPE: TypeDescriptor = TypeDescriptor::new("post");
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Post(title: {:?}, author: {})", self.title, self.author_id)
    }
}

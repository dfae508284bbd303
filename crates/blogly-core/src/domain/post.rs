use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a blog post written by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_id: i32,
}

/// A post that has not been persisted yet. `created_at` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: i32,
}

impl NewPost {
    pub fn new(author_id: i32, title: String, content: String) -> Self {
        Self {
            title,
            content,
            author_id,
        }
    }
}

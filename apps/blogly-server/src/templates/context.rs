//! View models handed to templates.

use blogly_core::domain::{Post, Tag, User};
use serde::Serialize;

/// A user as templates see it, including the derived full name.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
    pub full_name: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            image_url: user.image_url.clone(),
            full_name: user.full_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub created_at: String,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            author_id: post.author_id,
            created_at: post.created_at.format("%a %b %-d %Y, %-I:%M %p").to_string(),
        }
    }
}

/// A checkbox in the post forms' tag picker.
#[derive(Debug, Clone, Serialize)]
pub struct TagOption {
    pub id: i32,
    pub name: String,
    pub selected: bool,
}

impl TagOption {
    pub fn list(all: &[Tag], selected: &[Tag]) -> Vec<Self> {
        all.iter()
            .map(|tag| Self {
                id: tag.id,
                name: tag.name.clone(),
                selected: selected.iter().any(|s| s.id == tag.id),
            })
            .collect()
    }
}

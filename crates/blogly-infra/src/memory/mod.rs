//! In-memory store - used as fallback when PostgreSQL is unavailable, and in tests.
//!
//! Emulates the relational constraints the SQL schema enforces: unique tag names,
//! unique `(post_id, tag_id)` pairs, foreign keys, and `ON DELETE CASCADE`.
//! Note: Data is lost on process restart.

mod repository;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tokio::sync::RwLock;

use blogly_core::domain::{Post, PostTag, Tag, User};
use blogly_core::error::RepoError;

pub use repository::{InMemoryPostRepository, InMemoryTagRepository, InMemoryUserRepository};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    posts: BTreeMap<i32, Post>,
    tags: BTreeMap<i32, Tag>,
    posts_tags: BTreeSet<PostTag>,
    last_user_id: i32,
    last_post_id: i32,
    last_tag_id: i32,
}

fn next_id(last: &mut i32) -> i32 {
    *last += 1;
    *last
}

impl Tables {
    fn ensure_tag_name_free(&self, name: &str, except: Option<i32>) -> Result<(), RepoError> {
        let taken = self
            .tags
            .values()
            .any(|tag| tag.name == name && Some(tag.id) != except);

        if taken {
            return Err(RepoError::Constraint(format!(
                "Entity already exists: tag name '{name}'"
            )));
        }
        Ok(())
    }

    fn ensure_links_insertable(&self, post_id: i32, tag_ids: &[i32]) -> Result<(), RepoError> {
        let mut pending = BTreeSet::new();
        for &tag_id in tag_ids {
            if !self.tags.contains_key(&tag_id) {
                return Err(RepoError::Constraint(format!(
                    "Foreign key violation: tag {tag_id} does not exist"
                )));
            }
            let link = PostTag { post_id, tag_id };
            if self.posts_tags.contains(&link) || !pending.insert(link) {
                return Err(RepoError::Constraint(format!(
                    "Entity already exists: post {post_id} already tagged with {tag_id}"
                )));
            }
        }
        Ok(())
    }

    fn link(&mut self, post_id: i32, tag_ids: &[i32]) {
        self.posts_tags
            .extend(tag_ids.iter().map(|&tag_id| PostTag { post_id, tag_id }));
    }

    fn remove_post(&mut self, post_id: i32) -> bool {
        let removed = self.posts.remove(&post_id).is_some();
        self.posts_tags.retain(|link| link.post_id != post_id);
        removed
    }

    fn remove_user(&mut self, user_id: i32) -> bool {
        if self.users.remove(&user_id).is_none() {
            return false;
        }

        let authored: Vec<i32> = self
            .posts
            .values()
            .filter(|post| post.author_id == user_id)
            .map(|post| post.id)
            .collect();
        for post_id in authored {
            self.remove_post(post_id);
        }
        true
    }

    fn remove_tag(&mut self, tag_id: i32) -> bool {
        let removed = self.tags.remove(&tag_id).is_some();
        self.posts_tags.retain(|link| link.tag_id != tag_id);
        removed
    }
}

/// Shared in-memory database handing out one repository per entity.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository::new(self.tables.clone())
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository::new(self.tables.clone())
    }

    pub fn tags(&self) -> InMemoryTagRepository {
        InMemoryTagRepository::new(self.tables.clone())
    }

    /// Number of rows in `posts_tags`.
    pub async fn association_count(&self) -> usize {
        self.tables.read().await.posts_tags.len()
    }
}

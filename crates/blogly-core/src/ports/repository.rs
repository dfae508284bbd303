use async_trait::async_trait;

use crate::domain::{NewPost, NewTag, NewUser, Post, Tag, User};
use crate::error::RepoError;

/// Generic repository trait shared by every entity.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Fetch every row of the entity.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Delete an entity by its ID. Returns `RepoError::NotFound` when no row matched.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
///
/// Deleting a user cascades to the posts they authored.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Overwrite names and image URL of an existing user.
    async fn update(&self, user: User) -> Result<User, RepoError>;

    /// All users ordered by `(last_name, first_name)` ascending.
    async fn list_by_name(&self) -> Result<Vec<User>, RepoError>;
}

/// Post repository. Tag associations live in the `posts_tags` table.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// Insert the post and its tag associations in a single transaction.
    async fn create(&self, post: NewPost, tag_ids: &[i32]) -> Result<Post, RepoError>;

    /// Overwrite title and content. Tag associations are left alone.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Post>, RepoError>;

    async fn find_by_tag(&self, tag_id: i32) -> Result<Vec<Post>, RepoError>;

    /// Replace the post's tag set with `tag_ids`.
    ///
    /// Runs as two commits: every existing association is removed first, then the
    /// new ones are inserted. A failure between the two leaves the post untagged.
    async fn replace_tags(&self, post_id: i32, tag_ids: &[i32]) -> Result<(), RepoError>;
}

/// Tag repository. Deleting a tag removes its post associations.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, i32> {
    /// Fails with `RepoError::Constraint` when the name is taken.
    async fn create(&self, tag: NewTag) -> Result<Tag, RepoError>;

    async fn update(&self, tag: Tag) -> Result<Tag, RepoError>;

    /// Exact, case-sensitive name lookup.
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError>;

    /// Tags attached to a post, ordered by name.
    async fn find_by_post(&self, post_id: i32) -> Result<Vec<Tag>, RepoError>;
}

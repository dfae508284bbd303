use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blogly_core::domain::{NewPost, NewTag, NewUser, Post, Tag, User};
use blogly_core::error::RepoError;
use blogly_core::ports::{BaseRepository, PostRepository, TagRepository, UserRepository};

use super::{Tables, next_id};

/// In-memory user repository.
pub struct InMemoryUserRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryUserRepository {
    pub(super) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl BaseRepository<User, i32> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        if !self.tables.write().await.remove_user(id) {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        let user = User {
            id: next_id(&mut tables.last_user_id),
            first_name: user.first_name,
            last_name: user.last_name,
            image_url: user.image_url,
        };
        tables.users.insert(user.id, user.clone());

        tracing::debug!(user_id = user.id, "User created (in-memory)");
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        let stored = tables.users.get_mut(&user.id).ok_or(RepoError::NotFound)?;
        *stored = user.clone();
        Ok(user)
    }

    async fn list_by_name(&self) -> Result<Vec<User>, RepoError> {
        let mut users = self.find_all().await?;
        users.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(users)
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryPostRepository {
    pub(super) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    posts
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.tables.read().await.posts.values().cloned().collect())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        if !self.tables.write().await.remove_post(id) {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost, tag_ids: &[i32]) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&post.author_id) {
            return Err(RepoError::Constraint(format!(
                "Foreign key violation: user {} does not exist",
                post.author_id
            )));
        }

        let id = tables.last_post_id + 1;
        tables.ensure_links_insertable(id, tag_ids)?;

        let post = Post {
            id: next_id(&mut tables.last_post_id),
            title: post.title,
            content: post.content,
            created_at: Utc::now(),
            author_id: post.author_id,
        };
        tables.posts.insert(post.id, post.clone());
        tables.link(post.id, tag_ids);

        tracing::debug!(post_id = post.id, tags = tag_ids.len(), "Post created (in-memory)");
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let stored = tables.posts.get_mut(&post.id).ok_or(RepoError::NotFound)?;
        stored.title = post.title;
        stored.content = post.content;
        Ok(stored.clone())
    }

    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let posts = tables
            .posts
            .values()
            .filter(|post| post.author_id == author_id)
            .cloned()
            .collect();
        Ok(newest_first(posts))
    }

    async fn find_by_tag(&self, tag_id: i32) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let posts = tables
            .posts_tags
            .iter()
            .filter(|link| link.tag_id == tag_id)
            .filter_map(|link| tables.posts.get(&link.post_id).cloned())
            .collect();
        Ok(newest_first(posts))
    }

    async fn replace_tags(&self, post_id: i32, tag_ids: &[i32]) -> Result<(), RepoError> {
        {
            let mut tables = self.tables.write().await;
            tables.posts_tags.retain(|link| link.post_id != post_id);
        }

        if tag_ids.is_empty() {
            return Ok(());
        }

        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&post_id) {
            return Err(RepoError::Constraint(format!(
                "Foreign key violation: post {post_id} does not exist"
            )));
        }
        tables.ensure_links_insertable(post_id, tag_ids)?;
        tables.link(post_id, tag_ids);
        Ok(())
    }
}

/// In-memory tag repository.
pub struct InMemoryTagRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryTagRepository {
    pub(super) fn new(tables: Arc<RwLock<Tables>>) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl BaseRepository<Tag, i32> for InMemoryTagRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, RepoError> {
        Ok(self.tables.read().await.tags.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Tag>, RepoError> {
        Ok(self.tables.read().await.tags.values().cloned().collect())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        if !self.tables.write().await.remove_tag(id) {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn create(&self, tag: NewTag) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        tables.ensure_tag_name_free(&tag.name, None)?;

        let tag = Tag {
            id: next_id(&mut tables.last_tag_id),
            name: tag.name,
        };
        tables.tags.insert(tag.id, tag.clone());

        tracing::debug!(tag_id = tag.id, tag_name = %tag.name, "Tag created (in-memory)");
        Ok(tag)
    }

    async fn update(&self, tag: Tag) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.tags.contains_key(&tag.id) {
            return Err(RepoError::NotFound);
        }
        tables.ensure_tag_name_free(&tag.name, Some(tag.id))?;
        tables.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.tags.values().find(|tag| tag.name == name).cloned())
    }

    async fn find_by_post(&self, post_id: i32) -> Result<Vec<Tag>, RepoError> {
        let tables = self.tables.read().await;
        let mut tags: Vec<Tag> = tables
            .posts_tags
            .iter()
            .filter(|link| link.post_id == post_id)
            .filter_map(|link| tables.tags.get(&link.tag_id).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;

    async fn seed_author(store: &InMemoryStore) -> User {
        store
            .users()
            .create(NewUser::new("Ada".into(), "Lovelace".into(), String::new()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_users_listed_by_last_then_first_name() {
        let store = InMemoryStore::new();
        let users = store.users();
        for (first, last) in [("Zed", "Adams"), ("Grace", "Hopper"), ("Abe", "Adams")] {
            users
                .create(NewUser::new(first.into(), last.into(), String::new()))
                .await
                .unwrap();
        }

        let names: Vec<String> = users
            .list_by_name()
            .await
            .unwrap()
            .iter()
            .map(User::full_name)
            .collect();

        assert_eq!(names, vec!["Abe Adams", "Zed Adams", "Grace Hopper"]);
    }

    #[tokio::test]
    async fn test_duplicate_tag_name_is_constraint_violation() {
        let store = InMemoryStore::new();
        let tags = store.tags();
        tags.create(NewTag::new("funny".into())).await.unwrap();

        let result = tags.create(NewTag::new("funny".into())).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_renaming_tag_onto_existing_name_fails() {
        let store = InMemoryStore::new();
        let tags = store.tags();
        tags.create(NewTag::new("funny".into())).await.unwrap();
        let sad = tags.create(NewTag::new("sad".into())).await.unwrap();

        let result = tags
            .update(Tag {
                id: sad.id,
                name: "funny".into(),
            })
            .await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));

        let renamed = tags.update(sad.clone()).await.unwrap();
        assert_eq!(renamed.name, "sad");
    }

    #[tokio::test]
    async fn test_deleting_tag_removes_associations() {
        let store = InMemoryStore::new();
        let author = seed_author(&store).await;
        let funny = store.tags().create(NewTag::new("funny".into())).await.unwrap();
        let news = store.tags().create(NewTag::new("news".into())).await.unwrap();

        let post = store
            .posts()
            .create(
                NewPost::new(author.id, "Hi".into(), "World".into()),
                &[funny.id, news.id],
            )
            .await
            .unwrap();

        store.tags().delete(funny.id).await.unwrap();

        let remaining = store.tags().find_by_post(post.id).await.unwrap();
        assert_eq!(remaining, vec![news]);
        assert!(store.posts().find_by_tag(funny.id).await.unwrap().is_empty());
        assert_eq!(store.association_count().await, 1);
    }

    #[tokio::test]
    async fn test_deleting_user_cascades_to_posts() {
        let store = InMemoryStore::new();
        let author = seed_author(&store).await;
        let funny = store.tags().create(NewTag::new("funny".into())).await.unwrap();
        let post = store
            .posts()
            .create(NewPost::new(author.id, "Hi".into(), "World".into()), &[funny.id])
            .await
            .unwrap();

        store.users().delete(author.id).await.unwrap();

        assert!(store.posts().find_by_id(post.id).await.unwrap().is_none());
        assert_eq!(store.association_count().await, 0);
        assert!(store.tags().find_by_id(funny.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_replace_tags_swaps_whole_set() {
        let store = InMemoryStore::new();
        let author = seed_author(&store).await;
        let a = store.tags().create(NewTag::new("a".into())).await.unwrap();
        let b = store.tags().create(NewTag::new("b".into())).await.unwrap();
        let c = store.tags().create(NewTag::new("c".into())).await.unwrap();
        let post = store
            .posts()
            .create(NewPost::new(author.id, "Hi".into(), "World".into()), &[a.id, b.id])
            .await
            .unwrap();

        store.posts().replace_tags(post.id, &[b.id, c.id]).await.unwrap();

        let tags = store.tags().find_by_post(post.id).await.unwrap();
        assert_eq!(tags, vec![b, c]);
    }

    #[tokio::test]
    async fn test_failed_second_phase_leaves_post_untagged() {
        let store = InMemoryStore::new();
        let author = seed_author(&store).await;
        let a = store.tags().create(NewTag::new("a".into())).await.unwrap();
        let post = store
            .posts()
            .create(NewPost::new(author.id, "Hi".into(), "World".into()), &[a.id])
            .await
            .unwrap();

        let result = store.posts().replace_tags(post.id, &[999]).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert!(store.tags().find_by_post(post.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_requires_existing_author() {
        let store = InMemoryStore::new();

        let result = store
            .posts()
            .create(NewPost::new(41, "Hi".into(), "World".into()), &[])
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert!(store.posts().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let store = InMemoryStore::new();

        let result = store
            .users()
            .update(User {
                id: 5,
                first_name: "No".into(),
                last_name: "Body".into(),
                image_url: String::new(),
            })
            .await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }
}

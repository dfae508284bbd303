//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use blogly_core::domain::{NewPost, NewTag, NewUser, Post, Tag, User};
use blogly_core::error::RepoError;
use blogly_core::ports::{PostRepository, TagRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel {
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            image_url: Set(user.image_url),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        tracing::debug!(user_id = model.id, "User created");
        Ok(model.into())
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let model = user::ActiveModel {
            id: Unchanged(user.id),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            image_url: Set(user.image_url),
        }
        .update(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn list_by_name(&self) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .order_by_asc(user::Column::LastName)
            .order_by_asc(user::Column::FirstName)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost, tag_ids: &[i32]) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = post::ActiveModel {
            title: Set(post.title),
            content: Set(post.content),
            author_id: Set(post.author_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        if !tag_ids.is_empty() {
            PostTagEntity::insert_many(post_tag::rows_for(model.id, tag_ids))
                .exec_without_returning(&txn)
                .await
                .map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, tags = tag_ids.len(), "Post created");
        Ok(model.into())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            id: Unchanged(post.id),
            title: Set(post.title),
            content: Set(post.content),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_tag(&self, tag_id: i32) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .inner_join(PostTagEntity)
            .filter(post_tag::Column::TagId.eq(tag_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn replace_tags(&self, post_id: i32, tag_ids: &[i32]) -> Result<(), RepoError> {
        // Phase one commits on its own; see the trait docs for the window this opens.
        let removed = PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        tracing::debug!(post_id, removed = removed.rows_affected, "Cleared post tags");

        if tag_ids.is_empty() {
            return Ok(());
        }

        PostTagEntity::insert_many(post_tag::rows_for(post_id, tag_ids))
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(post_id, "Post left without tags after failed re-tag: {}", e);
                map_db_err(e)
            })?;

        Ok(())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn create(&self, tag: NewTag) -> Result<Tag, RepoError> {
        let model = tag::ActiveModel {
            name: Set(tag.name),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        tracing::debug!(tag_id = model.id, tag_name = %model.name, "Tag created");
        Ok(model.into())
    }

    async fn update(&self, tag: Tag) -> Result<Tag, RepoError> {
        let model = tag::ActiveModel {
            id: Unchanged(tag.id),
            name: Set(tag.name),
        }
        .update(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_post(&self, post_id: i32) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .inner_join(PostTagEntity)
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::database::entity::{post, tag, user};
    use crate::database::postgres_repo::{
        PostgresPostRepository, PostgresTagRepository, PostgresUserRepository,
    };
    use crate::database::postgres_base::map_db_err;
    use blogly_core::domain::{NewPost, NewTag, Post, Tag, User};
    use blogly_core::error::RepoError;
    use blogly_core::ports::{BaseRepository, PostRepository, TagRepository, UserRepository};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

    fn statements(txn: &sea_orm::Transaction) -> Vec<&str> {
        txn.statements().iter().map(|s| s.sql.as_str()).collect()
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: 7,
                title: "Test Post".to_owned(),
                content: "Content".to_owned(),
                created_at: now.into(),
                author_id: 3,
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(7).await.unwrap();

        let post = result.expect("post should be found");
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, 7);
        assert_eq!(post.author_id, 3);
        assert_eq!(post.created_at.timestamp(), now.timestamp());
    }

    #[tokio::test]
    async fn test_list_users_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                user::Model {
                    id: 2,
                    first_name: "Ada".to_owned(),
                    last_name: "Lovelace".to_owned(),
                    image_url: "http://example.com/ada.png".to_owned(),
                },
                user::Model {
                    id: 1,
                    first_name: "Alan".to_owned(),
                    last_name: "Turing".to_owned(),
                    image_url: "http://example.com/alan.png".to_owned(),
                },
            ]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let users: Vec<User> = repo.list_by_name().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].full_name(), "Ada Lovelace");
        assert_eq!(users[1].id, 1);
    }

    #[tokio::test]
    async fn test_create_tag_returns_inserted_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![tag::Model {
                id: 1,
                name: "funny".to_owned(),
            }]])
            .into_connection();

        let repo = PostgresTagRepository::new(db);

        let tag = repo.create(NewTag::new("funny".to_owned())).await.unwrap();

        assert_eq!(
            tag,
            Tag {
                id: 1,
                name: "funny".to_owned()
            }
        );
    }

    #[tokio::test]
    async fn test_find_tag_by_unknown_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<tag::Model>::new()])
            .into_connection();

        let repo = PostgresTagRepository::new(db);

        assert!(repo.find_by_name("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_tag_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresTagRepository::new(db);

        let result = BaseRepository::<Tag, i32>::delete(&repo, 42).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_post_writes_tags_in_same_transaction() {
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: 5,
                title: "Hi".to_owned(),
                content: "World".to_owned(),
                created_at: now.into(),
                author_id: 1,
            }]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let post = repo
            .create(NewPost::new(1, "Hi".to_owned(), "World".to_owned()), &[1, 2])
            .await
            .unwrap();
        assert_eq!(post.id, 5);

        let log = repo.db.into_transaction_log();
        assert_eq!(log.len(), 1);

        let stmts = statements(&log[0]);
        assert_eq!(stmts.len(), 4);
        assert_eq!(stmts[0], "BEGIN");
        assert!(stmts[1].starts_with(r#"INSERT INTO "posts""#));
        assert!(stmts[2].starts_with(r#"INSERT INTO "posts_tags""#));
        assert_eq!(stmts[3], "COMMIT");
    }

    #[tokio::test]
    async fn test_create_post_without_tags_skips_association_insert() {
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: 6,
                title: "Untagged".to_owned(),
                content: "".to_owned(),
                created_at: now.into(),
                author_id: 1,
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        repo.create(NewPost::new(1, "Untagged".to_owned(), String::new()), &[])
            .await
            .unwrap();

        let log = repo.db.into_transaction_log();
        let stmts = statements(&log[0]);
        assert!(stmts.iter().all(|sql| !sql.contains("posts_tags")));
    }

    #[tokio::test]
    async fn test_replace_tags_commits_delete_and_insert_separately() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
            ])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        repo.replace_tags(5, &[1, 2]).await.unwrap();

        let log = repo.db.into_transaction_log();
        assert_eq!(log.len(), 2);

        let delete = statements(&log[0]);
        assert_eq!(delete.len(), 1);
        assert!(delete[0].starts_with(r#"DELETE FROM "posts_tags""#));

        let insert = statements(&log[1]);
        assert_eq!(insert.len(), 1);
        assert!(insert[0].starts_with(r#"INSERT INTO "posts_tags""#));
    }

    #[tokio::test]
    async fn test_replace_tags_with_empty_selection_only_deletes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        repo.replace_tags(5, &[]).await.unwrap();

        let log = repo.db.into_transaction_log();
        assert_eq!(log.len(), 1);
        assert!(statements(&log[0])[0].starts_with(r#"DELETE FROM "posts_tags""#));
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::RecordNotUpdated])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo
            .update(Post {
                id: 99,
                title: "Gone".to_owned(),
                content: String::new(),
                created_at: chrono::Utc::now(),
                author_id: 1,
            })
            .await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[test]
    fn test_map_db_err_classifies_errors() {
        assert!(matches!(
            map_db_err(DbErr::RecordNotFound("users".to_owned())),
            RepoError::NotFound
        ));
        assert!(matches!(
            map_db_err(DbErr::Conn(RuntimeErr::Internal("refused".to_owned()))),
            RepoError::Connection(msg) if msg.contains("refused")
        ));
        assert!(matches!(
            map_db_err(DbErr::Custom("bad column".to_owned())),
            RepoError::Query(_)
        ));
    }
}

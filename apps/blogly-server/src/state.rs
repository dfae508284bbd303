//! Application state - shared across all handlers.

use std::sync::Arc;

use blogly_core::ports::{PostRepository, TagRepository, UserRepository};
use blogly_infra::{DatabaseConfig, InMemoryStore};

use crate::templates::{MiniJinjaEngine, TemplateEngine};

/// Shared application state.
///
/// The data-access objects are injected here and handed to every handler,
/// there is no process-wide store handle.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub templates: Arc<dyn TemplateEngine>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>, auto_migrate: bool) -> Self {
        let state = match db_config {
            Some(config) => Self::from_database(config, auto_migrate).await,
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                None
            }
        };

        let state = state.unwrap_or_else(Self::in_memory);
        tracing::info!("Application state initialized");
        state
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            users: Arc::new(store.users()),
            posts: Arc::new(store.posts()),
            tags: Arc::new(store.tags()),
            templates: Arc::new(MiniJinjaEngine::new()),
        }
    }

    #[cfg(feature = "postgres")]
    async fn from_database(config: &DatabaseConfig, auto_migrate: bool) -> Option<Self> {
        match Self::connect_postgres(config, auto_migrate).await {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::error!(
                    "Failed to initialize database: {}. Using in-memory fallback.",
                    e
                );
                None
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn from_database(_config: &DatabaseConfig, _auto_migrate: bool) -> Option<Self> {
        tracing::info!("Running without postgres feature - using in-memory store");
        None
    }

    #[cfg(feature = "postgres")]
    async fn connect_postgres(config: &DatabaseConfig, auto_migrate: bool) -> anyhow::Result<Self> {
        use blogly_infra::database::{
            PostgresPostRepository, PostgresTagRepository, PostgresUserRepository, connect,
        };
        use migration::{Migrator, MigratorTrait};

        let conn = connect(config).await?;

        if auto_migrate {
            Migrator::up(&conn, None).await?;
            tracing::info!("Database migrations applied");
        }

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(conn.clone())),
            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
            tags: Arc::new(PostgresTagRepository::new(conn)),
            templates: Arc::new(MiniJinjaEngine::new()),
        })
    }
}

//! Application state - shared across all handlers.

use std::sync::Arc;

use pena_core::PostService;
use pena_core::ports::PostRepository;
use pena_infra::InMemoryPostRepository;

#[cfg(feature = "postgres")]
use pena_infra::{PostgresPostRepository, connect};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub admin_token: Option<Arc<str>>,
    /// Postgres store, kept for health checks.
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<PostgresPostRepository>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        if config.admin_token.is_none() {
            tracing::warn!("ADMIN_TOKEN not set. The admin API is open to anyone.");
        }
        let admin_token = config.admin_token.as_deref().map(Arc::from);

        #[cfg(feature = "postgres")]
        let (db, repo): (Option<Arc<PostgresPostRepository>>, Arc<dyn PostRepository>) = {
            if let Some(db_config) = &config.database {
                match connect(db_config).await {
                    Ok(db) => {
                        let pg = Arc::new(PostgresPostRepository::new(db));
                        let repo: Arc<dyn PostRepository> = pg.clone();
                        (Some(pg), repo)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (None, Arc::new(InMemoryPostRepository::new()))
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Arc::new(InMemoryPostRepository::new()))
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repo: Arc<dyn PostRepository> = {
            tracing::info!("Running without postgres feature - using in-memory repository");
            Arc::new(InMemoryPostRepository::new())
        };

        tracing::info!("Application state initialized");

        Self {
            posts: PostService::new(repo),
            admin_token,
            #[cfg(feature = "postgres")]
            db,
        }
    }

    /// State over a fresh in-memory store.
    #[cfg(test)]
    pub fn in_memory(admin_token: Option<&str>) -> Self {
        Self {
            posts: PostService::new(Arc::new(InMemoryPostRepository::new())),
            admin_token: admin_token.map(Arc::from),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }
}

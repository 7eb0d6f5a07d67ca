//! Seed CLI: loads the sample posts through the lifecycle service.
//!
//! Needs `DATABASE_URL`; posts whose slug already exists are skipped.

use std::sync::Arc;

use anyhow::Context;
use pena_core::ports::PostRepository;
use pena_infra::{DatabaseConfig, PostgresPostRepository, connect, seed_sample_posts};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("info,pena_infra=debug")
        .init();

    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set to seed")?;
    let config = DatabaseConfig {
        max_connections: 5,
        min_connections: 1,
        ..DatabaseConfig::new(url)
    };

    let db = connect(&config).await.context("connecting to the database")?;
    let repo: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(db));

    let summary = seed_sample_posts(repo).await.context("seeding sample posts")?;

    tracing::info!(
        created = summary.created,
        skipped = summary.skipped,
        "Seed completed"
    );
    Ok(())
}

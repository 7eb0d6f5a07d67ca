//! # Pena Infrastructure
//!
//! Concrete implementations of the ports defined in `pena-core`:
//! the PostgreSQL and in-memory post stores, connection management and
//! sample-content seeding.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM

pub mod database;
pub mod seed;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryPostRepository};
pub use seed::{SeedSummary, seed_sample_posts};

// Re-exports - PostgreSQL
#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, connect};

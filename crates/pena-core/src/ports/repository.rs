use async_trait::async_trait;

use crate::domain::{Post, PostChanges, PostDraft, PostId, PostQuery};
use crate::error::RepoError;

/// Generic repository trait defining standard lookups and removal.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Returns `RepoError::NotFound` when no
    /// row was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository - the record store behind the lifecycle service.
///
/// Implementations must enforce slug uniqueness on write and report a
/// violation as `RepoError::Constraint`.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// Find a post by slug, whatever its publish state.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Insert a new post; the store assigns id and timestamps.
    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError>;

    /// Write the supplied columns and bump `updated_at`.
    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Post, RepoError>;

    /// Filtered, ordered listing honouring the query's cursor and limit.
    async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError>;

    /// Number of posts passing the query's filters.
    async fn count(&self, query: &PostQuery) -> Result<u64, RepoError>;

    /// Tags of every published post, flattened. May contain repeats.
    async fn published_tags(&self) -> Result<Vec<String>, RepoError>;

    /// Non-null categories of published posts. May contain repeats.
    async fn published_categories(&self) -> Result<Vec<String>, RepoError>;
}

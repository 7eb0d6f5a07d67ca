//! In-memory post store - used when no database is configured, and in tests.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use pena_core::domain::{Post, PostChanges, PostDraft, PostId, PostQuery};
use pena_core::error::RepoError;
use pena_core::ports::{BaseRepository, PostRepository};

#[derive(Default)]
struct Table {
    last_id: PostId,
    rows: BTreeMap<PostId, Post>,
}

impl Table {
    fn slug_owner(&self, slug: &str) -> Option<PostId> {
        self.rows.values().find(|p| p.slug == slug).map(|p| p.id)
    }
}

fn duplicate_slug(slug: &str) -> RepoError {
    RepoError::Constraint(format!(
        "duplicate key value violates unique constraint \"posts_slug_key\": {slug}"
    ))
}

/// Post store backed by a `BTreeMap` behind an async `RwLock`.
///
/// Enforces the same unique slug rule as the database.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    table: RwLock<Table>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::default()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        match self.table.write().await.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|p| p.slug == slug).cloned())
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        if table.slug_owner(&draft.slug).is_some() {
            return Err(duplicate_slug(&draft.slug));
        }

        table.last_id += 1;
        let now = Utc::now();
        let post = Post {
            id: table.last_id,
            slug: draft.slug,
            title: draft.title,
            excerpt: draft.excerpt,
            content: draft.content,
            published: draft.published,
            published_at: draft.published_at,
            created_at: now,
            updated_at: now,
            category: draft.category,
            tags: draft.tags,
            reading_time: draft.reading_time,
            meta_title: draft.meta_title,
            meta_description: draft.meta_description,
            featured_image: draft.featured_image,
        };

        table.rows.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;

        if let Some(slug) = &changes.slug {
            if table.slug_owner(slug).is_some_and(|owner| owner != id) {
                return Err(duplicate_slug(slug));
            }
        }

        let post = table.rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        changes.apply_to(post);
        post.updated_at = Utc::now().max(post.updated_at);

        Ok(post.clone())
    }

    async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;

        let anchor = match query.cursor {
            Some(cursor) => match table.rows.get(&cursor) {
                Some(anchor) => Some(anchor),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let mut posts: Vec<Post> = table
            .rows
            .values()
            .filter(|p| query.matches(p))
            .filter(|p| anchor.is_none_or(|a| query.order.compare(a, p) != Ordering::Greater))
            .cloned()
            .collect();

        posts.sort_by(|a, b| query.order.compare(a, b));

        if let Some(limit) = query.limit {
            posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        Ok(posts)
    }

    async fn count(&self, query: &PostQuery) -> Result<u64, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.values().filter(|p| query.matches(p)).count() as u64)
    }

    async fn published_tags(&self) -> Result<Vec<String>, RepoError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|p| p.published)
            .flat_map(|p| p.tags.iter().cloned())
            .collect())
    }

    async fn published_categories(&self) -> Result<Vec<String>, RepoError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|p| p.published)
            .filter_map(|p| p.category.clone())
            .collect())
    }
}

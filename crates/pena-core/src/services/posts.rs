//! Post lifecycle: creation, edits, publishing, removal and the read-only
//! listings used by the public site and the admin panel.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    DEFAULT_EDITORS_PICKS_LIMIT, DEFAULT_FEATURED_LIMIT, DEFAULT_PAGE_SIZE, MAX_FEATURED_LIMIT,
    MAX_PAGE_SIZE, NewPost, Page, PageRequest, Post, PostChanges, PostDraft, PostId, PostPatch,
    PostQuery, PostStats, PublishedAtChange, base_slug, bounded_limit, disambiguate,
    estimate_reading_time,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{BaseRepository, PostRepository};

/// Writes are attempted at most this many times when the store rejects the
/// slug as a duplicate.
pub const MAX_WRITE_ATTEMPTS: u32 = 3;

/// The post lifecycle manager. Owns every rule about slugs, reading time
/// and `published_at`; the repository only stores what it is given.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Create a post. A slug collision never fails the call: the slug gets
    /// a suffix, and a duplicate reported at write time is retried with a
    /// fresh one.
    pub async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        input.validate()?;
        let input = input.normalized();

        let base = base_slug(input.slug.as_deref().unwrap_or(&input.title));
        let now = Utc::now();

        let mut draft = PostDraft {
            slug: self.available_slug(&base, None).await?,
            reading_time: estimate_reading_time(&input.content),
            published_at: input.published.then_some(now),
            title: input.title,
            excerpt: input.excerpt,
            content: input.content,
            published: input.published,
            category: input.category,
            tags: input.tags,
            meta_title: input.meta_title,
            meta_description: input.meta_description,
            featured_image: input.featured_image,
        };

        let mut attempt = 1;
        loop {
            match self.repo.insert(draft.clone()).await {
                Ok(post) => return Ok(post),
                Err(RepoError::Constraint(_)) if attempt < MAX_WRITE_ATTEMPTS => {
                    draft.slug = disambiguate(&base, Utc::now().timestamp_millis(), attempt);
                    attempt += 1;
                }
                Err(RepoError::Constraint(reason)) => {
                    return Err(DomainError::Conflict(format!(
                        "slug '{}' is still taken after {attempt} attempts: {reason}",
                        draft.slug
                    )));
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Apply a partial update.
    pub async fn update(&self, id: PostId, patch: PostPatch) -> Result<Post, DomainError> {
        patch.validate()?;
        let patch = patch.normalized();

        let current = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        let now = Utc::now();
        let mut changes = PostChanges {
            published_at: PublishedAtChange::for_transition(current.published, patch.published, now)
                .into_column(),
            reading_time: patch.content.as_deref().map(estimate_reading_time),
            title: patch.title,
            excerpt: patch.excerpt,
            content: patch.content,
            published: patch.published,
            category: patch.category,
            tags: patch.tags,
            meta_title: patch.meta_title,
            meta_description: patch.meta_description,
            featured_image: patch.featured_image,
            slug: None,
        };

        // A new title means a new slug, unless it normalizes to the one we have.
        let base = changes
            .title
            .as_deref()
            .filter(|title| *title != current.title)
            .map(base_slug)
            .filter(|base| *base != current.slug);

        if let Some(base) = &base {
            changes.slug = Some(self.available_slug(base, Some(id)).await?);
        }

        let mut attempt = 1;
        loop {
            match self.repo.update(id, changes.clone()).await {
                Ok(post) => return Ok(post),
                Err(RepoError::NotFound) => return Err(DomainError::post_not_found(id)),
                Err(RepoError::Constraint(_)) if attempt < MAX_WRITE_ATTEMPTS && base.is_some() => {
                    if let Some(base) = &base {
                        changes.slug =
                            Some(disambiguate(base, Utc::now().timestamp_millis(), attempt));
                    }
                    attempt += 1;
                }
                Err(RepoError::Constraint(reason)) => return Err(DomainError::Conflict(reason)),
                Err(err) => return Err(err.into()),
            }
        }
    }

    pub async fn publish(&self, id: PostId) -> Result<Post, DomainError> {
        self.update(id, PostPatch::publish(true)).await
    }

    pub async fn unpublish(&self, id: PostId) -> Result<Post, DomainError> {
        self.update(id, PostPatch::publish(false)).await
    }

    /// Hard delete. `Ok(false)` when there was nothing to delete.
    pub async fn delete(&self, id: PostId) -> Result<bool, DomainError> {
        match self.repo.delete(id).await {
            Ok(()) => Ok(true),
            Err(RepoError::NotFound) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// A live post by slug. Drafts are invisible here.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        let post = self.repo.find_by_slug(slug).await?;
        Ok(post.filter(|p| p.published))
    }

    /// Any post by id, for the admin panel.
    pub async fn get_by_id(&self, id: PostId) -> Result<Option<Post>, DomainError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    pub async fn list_published(
        &self,
        page: PageRequest,
        category: Option<String>,
    ) -> Result<Page<Post>, DomainError> {
        let mut query = PostQuery::published();
        if let Some(category) = non_blank(category) {
            query = query.in_category(category);
        }
        self.paginate(query, page).await
    }

    pub async fn list_admin(&self, page: PageRequest) -> Result<Page<Post>, DomainError> {
        self.paginate(PostQuery::all(), page).await
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Post>, DomainError> {
        Ok(self
            .repo
            .list(&PostQuery::published().in_category(category))
            .await?)
    }

    pub async fn list_by_tag(&self, tag: &str) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.list(&PostQuery::published().tagged(tag)).await?)
    }

    /// Live posts that carry a featured image.
    pub async fn list_featured(&self, limit: Option<u64>) -> Result<Vec<Post>, DomainError> {
        let limit = bounded_limit(limit, DEFAULT_FEATURED_LIMIT, MAX_FEATURED_LIMIT)?;
        let query = PostQuery::published().with_featured_image().limit(limit);
        Ok(self.repo.list(&query).await?)
    }

    /// Live posts filed under the editor's pick category.
    pub async fn list_editors_picks(&self, limit: Option<u64>) -> Result<Vec<Post>, DomainError> {
        let limit = bounded_limit(limit, DEFAULT_EDITORS_PICKS_LIMIT, MAX_FEATURED_LIMIT)?;
        let query = PostQuery::published().editors_picks().limit(limit);
        Ok(self.repo.list(&query).await?)
    }

    /// Case-insensitive search over title, excerpt and content of live posts.
    pub async fn search(&self, query: &str) -> Result<Vec<Post>, DomainError> {
        let needle = query.trim();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.repo.list(&PostQuery::published().matching(needle)).await?)
    }

    /// Distinct tags of live posts, sorted.
    pub async fn list_all_tags(&self) -> Result<Vec<String>, DomainError> {
        let tags: BTreeSet<String> = self.repo.published_tags().await?.into_iter().collect();
        Ok(tags.into_iter().collect())
    }

    /// Distinct categories of live posts, sorted.
    pub async fn list_all_categories(&self) -> Result<Vec<String>, DomainError> {
        let categories: BTreeSet<String> =
            self.repo.published_categories().await?.into_iter().collect();
        Ok(categories.into_iter().collect())
    }

    pub async fn stats(&self) -> Result<PostStats, DomainError> {
        let total = self.repo.count(&PostQuery::all()).await?;
        let published = self.repo.count(&PostQuery::published()).await?;
        Ok(PostStats {
            total,
            published,
            drafts: total.saturating_sub(published),
        })
    }

    async fn paginate(&self, query: PostQuery, page: PageRequest) -> Result<Page<Post>, DomainError> {
        let limit = bounded_limit(page.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)?;
        let query = query.starting_at(page.cursor).limit(limit + 1);
        let posts = self.repo.list(&query).await?;
        Ok(Page::from_overfetch(posts, limit))
    }

    /// `base` if no other post holds it, otherwise a suffixed variant.
    async fn available_slug(&self, base: &str, owner: Option<PostId>) -> Result<String, DomainError> {
        match self.repo.find_by_slug(base).await? {
            Some(existing) if Some(existing.id) != owner => {
                Ok(disambiguate(base, Utc::now().timestamp_millis(), 0))
            }
            _ => Ok(base.to_string()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

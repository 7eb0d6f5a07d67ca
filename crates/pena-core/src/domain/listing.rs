//! Listing, filtering and pagination of posts.

use std::cmp::Ordering;

use serde::Serialize;

use super::post::{EDITORS_PICK_CATEGORY, Post, PostId};
use crate::error::ValidationError;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 50;
pub const DEFAULT_FEATURED_LIMIT: u64 = 3;
pub const DEFAULT_EDITORS_PICKS_LIMIT: u64 = 6;
pub const MAX_FEATURED_LIMIT: u64 = 10;

/// Check a caller-supplied limit against `[1, max]`, defaulting when absent.
pub fn bounded_limit(requested: Option<u64>, default: u64, max: u64) -> Result<u64, ValidationError> {
    match requested {
        None => Ok(default),
        Some(limit) if (1..=max).contains(&limit) => Ok(limit),
        Some(got) => Err(ValidationError::LimitOutOfRange { min: 1, max, got }),
    }
}

/// Cursor pagination request. `cursor` is the id of the first post of the
/// requested page, as returned in [`Page::next_cursor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: Option<u64>,
    pub cursor: Option<PostId>,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<PostId>,
}

impl Page<Post> {
    /// Build a page from a query that fetched `limit + 1` rows: the extra
    /// row, if present, is dropped and becomes the next cursor.
    pub fn from_overfetch(mut posts: Vec<Post>, limit: u64) -> Self {
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let next_cursor = if posts.len() > limit {
            posts.truncate(limit + 1);
            posts.pop().map(|p| p.id)
        } else {
            None
        };

        Self {
            items: posts,
            next_cursor,
        }
    }
}

/// Which posts a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Public callers: live posts only.
    Published,
    /// Administrative callers: drafts included.
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOrder {
    /// Newest publication first, ties broken by id descending.
    PublishedDesc,
    /// Newest creation first, ties broken by id descending.
    CreatedDesc,
}

impl PostOrder {
    pub fn compare(self, a: &Post, b: &Post) -> Ordering {
        let primary = match self {
            PostOrder::PublishedDesc => b.published_at.cmp(&a.published_at),
            PostOrder::CreatedDesc => b.created_at.cmp(&a.created_at),
        };
        primary.then_with(|| b.id.cmp(&a.id))
    }
}

/// A post listing as understood by every store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub visibility: Visibility,
    pub order: PostOrder,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub with_featured_image: bool,
    pub cursor: Option<PostId>,
    pub limit: Option<u64>,
}

impl PostQuery {
    /// Live posts, newest publication first.
    pub fn published() -> Self {
        Self {
            visibility: Visibility::Published,
            order: PostOrder::PublishedDesc,
            category: None,
            tag: None,
            search: None,
            with_featured_image: false,
            cursor: None,
            limit: None,
        }
    }

    /// Every post, newest first.
    pub fn all() -> Self {
        Self {
            visibility: Visibility::Any,
            order: PostOrder::CreatedDesc,
            ..Self::published()
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn editors_picks(self) -> Self {
        self.in_category(EDITORS_PICK_CATEGORY)
    }

    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Case-insensitive substring search over title, excerpt and content.
    pub fn matching(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }

    pub fn with_featured_image(mut self) -> Self {
        self.with_featured_image = true;
        self
    }

    pub fn starting_at(mut self, cursor: Option<PostId>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `post` passes every filter. Ordering, cursor and limit are
    /// applied separately.
    pub fn matches(&self, post: &Post) -> bool {
        if self.visibility == Visibility::Published && !post.published {
            return false;
        }
        if let Some(category) = &self.category {
            if post.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !post.has_tag(tag) {
                return false;
            }
        }
        if self.with_featured_image && post.featured_image.is_none() {
            return false;
        }
        if let Some(needle) = &self.search {
            let needle = needle.to_lowercase();
            let hit = |text: &str| text.to_lowercase().contains(&needle);
            if !(hit(post.title.as_str())
                || post.excerpt.as_deref().is_some_and(hit)
                || hit(post.content.as_str()))
            {
                return false;
            }
        }
        true
    }
}

/// Post counts for the administrative dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PostStats {
    pub total: u64,
    pub published: u64,
    pub drafts: u64,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned post identifier.
pub type PostId = i32;

/// Category value that marks a post as an editor's pick.
pub const EDITORS_PICK_CATEGORY: &str = "featured";

/// Post entity - a blog article, draft or live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub reading_time: i32,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub featured_image: Option<String>,
}

impl Post {
    pub fn is_editors_pick(&self) -> bool {
        self.category.as_deref() == Some(EDITORS_PICK_CATEGORY)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A post ready to be inserted: every column except the store-managed
/// `id`, `created_at` and `updated_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub reading_time: i32,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub featured_image: Option<String>,
}

/// A partial write to an existing post. `None` leaves a column untouched;
/// for nullable columns `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<Option<String>>,
    pub content: Option<String>,
    pub reading_time: Option<i32>,
    pub published: Option<bool>,
    pub published_at: Option<Option<DateTime<Utc>>>,
    pub category: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub meta_title: Option<Option<String>>,
    pub meta_description: Option<Option<String>>,
    pub featured_image: Option<Option<String>>,
}

impl PostChanges {
    /// Write the supplied columns onto an in-memory record.
    pub fn apply_to(self, post: &mut Post) {
        if let Some(slug) = self.slug {
            post.slug = slug;
        }
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(excerpt) = self.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(reading_time) = self.reading_time {
            post.reading_time = reading_time;
        }
        if let Some(published) = self.published {
            post.published = published;
        }
        if let Some(published_at) = self.published_at {
            post.published_at = published_at;
        }
        if let Some(category) = self.category {
            post.category = category;
        }
        if let Some(tags) = self.tags {
            post.tags = tags;
        }
        if let Some(meta_title) = self.meta_title {
            post.meta_title = meta_title;
        }
        if let Some(meta_description) = self.meta_description {
            post.meta_description = meta_description;
        }
        if let Some(featured_image) = self.featured_image {
            post.featured_image = featured_image;
        }
    }
}

/// What happens to `published_at` on a write.
///
/// ```text
/// DRAFT --publish-->   LIVE   published_at := now
/// LIVE  --unpublish--> DRAFT  published_at := null
/// LIVE  --publish-->   LIVE   unchanged
/// DRAFT --unpublish--> DRAFT  null (already)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishedAtChange {
    Keep,
    Set(DateTime<Utc>),
    Clear,
}

impl PublishedAtChange {
    /// Decide the timestamp change for a write that requests `requested`
    /// on a record whose stored state is `was_published`.
    pub fn for_transition(was_published: bool, requested: Option<bool>, now: DateTime<Utc>) -> Self {
        match requested {
            Some(true) if !was_published => Self::Set(now),
            Some(false) => Self::Clear,
            _ => Self::Keep,
        }
    }

    /// The column value for [`PostChanges::published_at`].
    pub fn into_column(self) -> Option<Option<DateTime<Utc>>> {
        match self {
            Self::Keep => None,
            Self::Set(at) => Some(Some(at)),
            Self::Clear => Some(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> Post {
        let now = Utc::now();
        Post {
            id: 1,
            slug: "saude-mental".to_string(),
            title: "Saúde Mental".to_string(),
            excerpt: None,
            content: "conteúdo".to_string(),
            published: false,
            published_at: None,
            created_at: now,
            updated_at: now,
            category: Some("featured".to_string()),
            tags: vec!["sus".to_string()],
            reading_time: 1,
            meta_title: None,
            meta_description: None,
            featured_image: None,
        }
    }

    #[test]
    fn test_draft_to_live_sets_timestamp() {
        let now = Utc::now();
        assert_eq!(
            PublishedAtChange::for_transition(false, Some(true), now),
            PublishedAtChange::Set(now)
        );
    }

    #[test]
    fn test_live_to_live_keeps_timestamp() {
        assert_eq!(
            PublishedAtChange::for_transition(true, Some(true), Utc::now()),
            PublishedAtChange::Keep
        );
    }

    #[test]
    fn test_unpublish_always_clears() {
        let now = Utc::now();
        assert_eq!(
            PublishedAtChange::for_transition(true, Some(false), now),
            PublishedAtChange::Clear
        );
        assert_eq!(
            PublishedAtChange::for_transition(false, Some(false), now),
            PublishedAtChange::Clear
        );
    }

    #[test]
    fn test_absent_flag_keeps_timestamp() {
        assert_eq!(
            PublishedAtChange::for_transition(false, None, Utc::now()),
            PublishedAtChange::Keep
        );
        assert_eq!(PublishedAtChange::Keep.into_column(), None);
        assert_eq!(PublishedAtChange::Clear.into_column(), Some(None));
    }

    #[test]
    fn test_apply_changes_touches_only_supplied_columns() {
        let mut post = sample();
        let at = Utc::now() - Duration::minutes(5);

        PostChanges {
            title: Some("Novo título".to_string()),
            published: Some(true),
            published_at: Some(Some(at)),
            category: Some(None),
            ..Default::default()
        }
        .apply_to(&mut post);

        assert_eq!(post.title, "Novo título");
        assert!(post.published);
        assert_eq!(post.published_at, Some(at));
        assert_eq!(post.category, None);
        assert_eq!(post.slug, "saude-mental");
        assert_eq!(post.tags, vec!["sus".to_string()]);
    }

    #[test]
    fn test_editors_pick_and_tags() {
        let post = sample();
        assert!(post.is_editors_pick());
        assert!(post.has_tag("sus"));
        assert!(!post.has_tag("SUS"));
    }
}

//! Domain entities - the core business objects.

mod input;
mod listing;
mod post;
mod reading_time;
mod slug;

pub use input::{NewPost, PostPatch, normalize_tags};
pub use listing::{
    DEFAULT_EDITORS_PICKS_LIMIT, DEFAULT_FEATURED_LIMIT, DEFAULT_PAGE_SIZE, MAX_FEATURED_LIMIT,
    MAX_PAGE_SIZE, Page, PageRequest, PostOrder, PostQuery, PostStats, Visibility, bounded_limit,
};
pub use post::{EDITORS_PICK_CATEGORY, Post, PostChanges, PostDraft, PostId, PublishedAtChange};
pub use reading_time::{WORDS_PER_MINUTE, estimate_reading_time};
pub use slug::{FALLBACK_SLUG, base_slug, disambiguate, is_valid_slug, slugify};

//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Request to create a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
}

/// Partial update. A nullable field sent as `null` clears it; an omitted
/// field is left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub excerpt: Option<Option<String>>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Option<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present")]
    pub featured_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub meta_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub meta_description: Option<Option<String>>,
}

/// Any value that made it into the payload, `null` included, is `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A post as exposed over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i32,
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

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPageResponse {
    pub posts: Vec<PostResponse>,
    pub next_cursor: Option<i32>,
}

/// `?limit&cursor&category`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<u64>,
    pub cursor: Option<i32>,
    pub category: Option<String>,
}

/// `?limit`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<u64>,
}

/// `?q=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total: u64,
    pub published: u64,
    pub drafts: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_distinguishes_null_from_missing() {
        let req: UpdatePostRequest =
            serde_json::from_str(r#"{"excerpt": null, "featuredImage": "capa.png"}"#).unwrap();

        assert_eq!(req.excerpt, Some(None));
        assert_eq!(req.featured_image, Some(Some("capa.png".to_string())));
        assert_eq!(req.category, None);
        assert_eq!(req.title, None);
    }

    #[test]
    fn test_create_defaults() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"title": "Olá", "content": "Texto", "metaTitle": "SEO"}"#)
                .unwrap();

        assert!(!req.published);
        assert!(req.tags.is_empty());
        assert_eq!(req.meta_title.as_deref(), Some("SEO"));
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = PostPageResponse {
            posts: vec![],
            next_cursor: Some(4),
        };
        let json = serde_json::to_value(page).unwrap();
        assert_eq!(json["nextCursor"], 4);
    }
}

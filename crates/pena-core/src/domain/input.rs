//! Payloads accepted by the lifecycle operations.

use crate::error::ValidationError;

/// Data for a new post. `slug` is derived from the title when absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub slug: Option<String>,
    pub content: String,
    pub excerpt: Option<String>,
    pub published: bool,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, ValidationError::EmptyTitle)?;
        require_text(&self.content, ValidationError::EmptyContent)
    }

    /// Trim the free-text fields, turning blank optionals into `None`.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            slug: blank_to_none(self.slug),
            content: self.content,
            excerpt: blank_to_none(self.excerpt),
            published: self.published,
            category: blank_to_none(self.category),
            tags: normalize_tags(self.tags),
            featured_image: blank_to_none(self.featured_image),
            meta_title: blank_to_none(self.meta_title),
            meta_description: blank_to_none(self.meta_description),
        }
    }
}

/// Optional-field update. For nullable columns the outer `Option` says
/// whether the field was supplied and the inner one carries the new value,
/// so `Some(None)` clears the column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<Option<String>>,
    pub published: Option<bool>,
    pub category: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub featured_image: Option<Option<String>>,
    pub meta_title: Option<Option<String>>,
    pub meta_description: Option<Option<String>>,
}

impl PostPatch {
    /// A patch that only flips the publish flag.
    pub fn publish(published: bool) -> Self {
        Self {
            published: Some(published),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            require_text(title, ValidationError::EmptyTitle)?;
        }
        if let Some(content) = &self.content {
            require_text(content, ValidationError::EmptyContent)?;
        }
        Ok(())
    }

    pub fn normalized(self) -> Self {
        Self {
            title: self.title.map(|t| t.trim().to_string()),
            content: self.content,
            excerpt: self.excerpt.map(blank_to_none),
            published: self.published,
            category: self.category.map(blank_to_none),
            tags: self.tags.map(normalize_tags),
            featured_image: self.featured_image.map(blank_to_none),
            meta_title: self.meta_title.map(blank_to_none),
            meta_description: self.meta_description.map(blank_to_none),
        }
    }
}

fn require_text(value: &str, err: ValidationError) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(err)
    } else {
        Ok(())
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim tags, drop blanks and repeated tags, keeping first-seen order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_requires_title_and_content() {
        assert_eq!(
            NewPost::new("  ", "texto").validate(),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            NewPost::new("Título", "\n").validate(),
            Err(ValidationError::EmptyContent)
        );
        assert!(NewPost::new("Título", "texto").validate().is_ok());
    }

    #[test]
    fn test_patch_validates_only_supplied_fields() {
        assert!(PostPatch::default().validate().is_ok());
        assert!(PostPatch::publish(true).validate().is_ok());

        let patch = PostPatch {
            content: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::EmptyContent));
    }

    #[test]
    fn test_normalize_tags() {
        let tags = vec![
            " sus ".to_string(),
            "".to_string(),
            "saúde".to_string(),
            "sus".to_string(),
            "  ".to_string(),
        ];
        assert_eq!(normalize_tags(tags), vec!["sus", "saúde"]);
    }

    #[test]
    fn test_blank_optionals_become_none() {
        let post = NewPost {
            excerpt: Some("   ".to_string()),
            category: Some(" educacao ".to_string()),
            ..NewPost::new(" Título ", "texto")
        }
        .normalized();

        assert_eq!(post.title, "Título");
        assert_eq!(post.excerpt, None);
        assert_eq!(post.category.as_deref(), Some("educacao"));

        let patch = PostPatch {
            excerpt: Some(Some(" ".to_string())),
            ..Default::default()
        }
        .normalized();
        assert_eq!(patch.excerpt, Some(None));
        assert_eq!(patch.category, None);
    }
}

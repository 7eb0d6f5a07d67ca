//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use pena_core::domain::PostDraft;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub published: bool,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub reading_time: i32,
    pub meta_title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub meta_description: Option<String>,
    pub featured_image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for pena_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            slug: model.slug,
            title: model.title,
            excerpt: model.excerpt,
            content: model.content,
            published: model.published,
            published_at: model.published_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            category: model.category,
            tags: model.tags,
            reading_time: model.reading_time,
            meta_title: model.meta_title,
            meta_description: model.meta_description,
            featured_image: model.featured_image,
        }
    }
}

impl ActiveModel {
    /// Insert model for a draft. The id is left to the sequence; both
    /// timestamps are stamped with `now`.
    pub fn from_draft(draft: PostDraft, now: DateTimeWithTimeZone) -> Self {
        Self {
            slug: Set(draft.slug),
            title: Set(draft.title),
            excerpt: Set(draft.excerpt),
            content: Set(draft.content),
            published: Set(draft.published),
            published_at: Set(draft.published_at.map(Into::into)),
            created_at: Set(now),
            updated_at: Set(now),
            category: Set(draft.category),
            tags: Set(draft.tags),
            reading_time: Set(draft.reading_time),
            meta_title: Set(draft.meta_title),
            meta_description: Set(draft.meta_description),
            featured_image: Set(draft.featured_image),
            ..Default::default()
        }
    }
}

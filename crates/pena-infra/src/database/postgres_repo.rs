//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, Unchanged,
};

use pena_core::domain::{Post, PostChanges, PostDraft, PostId, PostOrder, PostQuery, Visibility};
use pena_core::error::RepoError;
use pena_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, read_err, write_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// WHERE clause for everything in the query except cursor and limit.
fn filters(query: &PostQuery) -> Condition {
    let mut cond = Condition::all();

    if query.visibility == Visibility::Published {
        cond = cond.add(post::Column::Published.eq(true));
    }
    if let Some(category) = &query.category {
        cond = cond.add(post::Column::Category.eq(category.as_str()));
    }
    if let Some(tag) = &query.tag {
        cond = cond.add(Expr::cust_with_values(
            r#"$1 = ANY("posts"."tags")"#,
            [tag.clone()],
        ));
    }
    if query.with_featured_image {
        cond = cond.add(post::Column::FeaturedImage.is_not_null());
    }
    if let Some(needle) = &query.search {
        let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
        let contains = |column: post::Column| {
            Expr::expr(Func::lower(Expr::col((PostEntity, column))))
                .like(LikeExpr::new(pattern.clone()).escape('\\'))
        };
        cond = cond.add(
            Condition::any()
                .add(contains(post::Column::Title))
                .add(contains(post::Column::Excerpt))
                .add(contains(post::Column::Content)),
        );
    }

    cond
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl PostgresPostRepository {
    /// Keyset condition selecting the cursor row and everything after it in
    /// `order`. `None` when the cursor does not point at a usable row.
    async fn after_cursor(&self, order: PostOrder, cursor: PostId) -> Result<Option<Condition>, RepoError> {
        let Some(anchor) = PostEntity::find_by_id(cursor)
            .one(&self.db)
            .await
            .map_err(read_err)?
        else {
            return Ok(None);
        };

        let (column, key) = match order {
            PostOrder::PublishedDesc => match anchor.published_at {
                Some(at) => (post::Column::PublishedAt, at),
                None => return Ok(None),
            },
            PostOrder::CreatedDesc => (post::Column::CreatedAt, anchor.created_at),
        };

        Ok(Some(
            Condition::any().add(column.lt(key)).add(
                Condition::all()
                    .add(column.eq(key))
                    .add(post::Column::Id.lte(anchor.id)),
            ),
        ))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug, "Finding post by slug");

        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(read_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let slug = draft.slug.clone();
        let model = post::ActiveModel::from_draft(draft, Utc::now().into())
            .insert(&self.db)
            .await
            .map_err(|e| {
                let err = write_err(e);
                if matches!(err, RepoError::Constraint(_)) {
                    tracing::warn!(%slug, "Slug already taken at insert");
                }
                err
            })?;

        tracing::info!(post_id = model.id, slug = %model.slug, "Post inserted");
        Ok(model.into())
    }

    async fn update(&self, id: PostId, changes: PostChanges) -> Result<Post, RepoError> {
        let mut active = post::ActiveModel {
            id: Unchanged(id),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        if let Some(slug) = changes.slug {
            active.slug = Set(slug);
        }
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(excerpt) = changes.excerpt {
            active.excerpt = Set(excerpt);
        }
        if let Some(content) = changes.content {
            active.content = Set(content);
        }
        if let Some(reading_time) = changes.reading_time {
            active.reading_time = Set(reading_time);
        }
        if let Some(published) = changes.published {
            active.published = Set(published);
        }
        if let Some(published_at) = changes.published_at {
            active.published_at = Set(published_at.map(Into::into));
        }
        if let Some(category) = changes.category {
            active.category = Set(category);
        }
        if let Some(tags) = changes.tags {
            active.tags = Set(tags);
        }
        if let Some(meta_title) = changes.meta_title {
            active.meta_title = Set(meta_title);
        }
        if let Some(meta_description) = changes.meta_description {
            active.meta_description = Set(meta_description);
        }
        if let Some(featured_image) = changes.featured_image {
            active.featured_image = Set(featured_image);
        }

        let model = active.update(&self.db).await.map_err(write_err)?;

        tracing::info!(post_id = model.id, published = model.published, "Post updated");
        Ok(model.into())
    }

    async fn list(&self, query: &PostQuery) -> Result<Vec<Post>, RepoError> {
        let mut select = PostEntity::find().filter(filters(query));

        if let Some(cursor) = query.cursor {
            match self.after_cursor(query.order, cursor).await? {
                Some(cond) => select = select.filter(cond),
                None => return Ok(Vec::new()),
            }
        }

        select = match query.order {
            PostOrder::PublishedDesc => select.order_by_desc(post::Column::PublishedAt),
            PostOrder::CreatedDesc => select.order_by_desc(post::Column::CreatedAt),
        }
        .order_by_desc(post::Column::Id);

        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        let rows = select.all(&self.db).await.map_err(read_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, query: &PostQuery) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(filters(query))
            .count(&self.db)
            .await
            .map_err(read_err)
    }

    async fn published_tags(&self) -> Result<Vec<String>, RepoError> {
        let rows: Vec<Vec<String>> = PostEntity::find()
            .select_only()
            .column(post::Column::Tags)
            .filter(post::Column::Published.eq(true))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(read_err)?;

        Ok(rows.into_iter().flatten().collect())
    }

    async fn published_categories(&self) -> Result<Vec<String>, RepoError> {
        PostEntity::find()
            .select_only()
            .column(post::Column::Category)
            .filter(post::Column::Published.eq(true))
            .filter(post::Column::Category.is_not_null())
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(read_err)
    }
}

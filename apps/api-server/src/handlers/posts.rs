//! Public, read-only post endpoints. Drafts never leave through here.

use actix_web::{HttpResponse, web};

use pena_core::domain::PageRequest;
use pena_shared::dto::{LimitParams, PageParams, SearchParams};

use super::mapping::{page_response, post_response, posts_response};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts?limit&cursor&category
pub async fn list(state: web::Data<AppState>, params: web::Query<PageParams>) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let page = state
        .posts
        .list_published(
            PageRequest {
                limit: params.limit,
                cursor: params.cursor,
            },
            params.category,
        )
        .await?;

    Ok(HttpResponse::Ok().json(page_response(page)))
}

/// GET /api/posts/featured?limit
pub async fn featured(state: web::Data<AppState>, params: web::Query<LimitParams>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_featured(params.limit).await?;
    Ok(HttpResponse::Ok().json(posts_response(posts)))
}

/// GET /api/posts/picks?limit
pub async fn editors_picks(
    state: web::Data<AppState>,
    params: web::Query<LimitParams>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_editors_picks(params.limit).await?;
    Ok(HttpResponse::Ok().json(posts_response(posts)))
}

/// GET /api/posts/search?q=
pub async fn search(state: web::Data<AppState>, params: web::Query<SearchParams>) -> AppResult<HttpResponse> {
    let posts = state.posts.search(&params.q).await?;
    Ok(HttpResponse::Ok().json(posts_response(posts)))
}

/// GET /api/posts/category/{category}
pub async fn by_category(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_by_category(&path).await?;
    Ok(HttpResponse::Ok().json(posts_response(posts)))
}

/// GET /api/posts/tag/{tag}
pub async fn by_tag(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_by_tag(&path).await?;
    Ok(HttpResponse::Ok().json(posts_response(posts)))
}

/// GET /api/posts/{slug}
pub async fn by_slug(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .get_by_slug(&path)
        .await?
        .ok_or_else(AppError::post_not_found)?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// GET /api/tags
pub async fn tags(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.posts.list_all_tags().await?))
}

/// GET /api/categories
pub async fn categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.posts.list_all_categories().await?))
}

//! Admin endpoints: full CRUD over posts, drafts included.

use actix_web::{HttpResponse, web};

use pena_core::domain::{PageRequest, PostId};
use pena_shared::MessageResponse;
use pena_shared::dto::{CreatePostRequest, PageParams, UpdatePostRequest};

use super::mapping::{new_post, page_response, post_patch, post_response, stats_response};
use crate::middleware::admin::AdminGuard;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/admin/posts?limit&cursor
pub async fn list(
    _admin: AdminGuard,
    state: web::Data<AppState>,
    params: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let page = state
        .posts
        .list_admin(PageRequest {
            limit: params.limit,
            cursor: params.cursor,
        })
        .await?;

    Ok(HttpResponse::Ok().json(page_response(page)))
}

/// POST /api/admin/posts
pub async fn create(
    _admin: AdminGuard,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(new_post(body.into_inner())).await?;

    tracing::info!(post_id = post.id, slug = %post.slug, "Post created");
    Ok(HttpResponse::Created().json(post_response(post)))
}

/// GET /api/admin/posts/{id}
pub async fn get(
    _admin: AdminGuard,
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .get_by_id(path.into_inner())
        .await?
        .ok_or_else(AppError::post_not_found)?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// PUT /api/admin/posts/{id}
pub async fn update(
    _admin: AdminGuard,
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(path.into_inner(), post_patch(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/admin/posts/{id}
pub async fn delete(
    _admin: AdminGuard,
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if !state.posts.delete(id).await? {
        return Err(AppError::post_not_found());
    }

    tracing::info!(post_id = id, "Post deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Post excluído com sucesso")))
}

/// POST /api/admin/posts/{id}/publish
pub async fn publish(
    _admin: AdminGuard,
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = state.posts.publish(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// POST /api/admin/posts/{id}/unpublish
pub async fn unpublish(
    _admin: AdminGuard,
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = state.posts.unpublish(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// GET /api/admin/stats
pub async fn stats(_admin: AdminGuard, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let stats = state.posts.stats().await?;
    Ok(HttpResponse::Ok().json(stats_response(stats)))
}

//! Post handlers - HTTP endpoints for post operations
use super::AppState;
use crate::error::{ErrorResponse, Result};
use crate::models::{ListFilter, Post, PostCollection, PostDraft, DEFAULT_ORDER_BY};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Body of the like and dislike endpoints
#[derive(Debug, Deserialize, ToSchema)]
pub struct PostRequest {
    pub post_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// One of content, title, category, created_at, updated_at
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
}

impl ListQuery {
    fn filter(&self, page: i64, limit: i64) -> ListFilter {
        let order_by = self
            .order_by
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_ORDER_BY);
        ListFilter::new(page, limit).order_by(order_by)
    }
}

/// Create a post. Any `id` in the body is ignored; the server assigns one.
#[utoipa::path(
    post,
    path = "/v1/post/create",
    tag = "posts",
    request_body = PostDraft,
    responses(
        (status = 200, description = "Post created", body = Post),
        (status = 400, description = "Invalid post", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_post(
    state: web::Data<AppState>,
    payload: web::Json<PostDraft>,
) -> Result<HttpResponse> {
    let mut draft = payload.into_inner();
    draft.id = None;

    let post = state.posts.create_post(&state.context(), &draft).await?;
    tracing::info!(post_id = %post.id, user_id = %post.user_id, "post created");
    Ok(HttpResponse::Ok().json(post))
}

/// Overwrite every field of a post
#[utoipa::path(
    put,
    path = "/v1/post/update/{id}",
    tag = "posts",
    params(("id" = String, Path, description = "Post id")),
    request_body = PostDraft,
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 400, description = "Invalid post", body = ErrorResponse),
        (status = 404, description = "No such post", body = ErrorResponse)
    )
)]
pub async fn update_post(
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<PostDraft>,
) -> Result<HttpResponse> {
    // The path is the key; an id in the body is ignored
    let mut draft = payload.into_inner();
    draft.id = None;

    let post = state
        .posts
        .update_post(&state.context(), &id, &draft)
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    get,
    path = "/v1/post/{id}",
    tag = "posts",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post found", body = Post),
        (status = 404, description = "No such post", body = ErrorResponse)
    )
)]
pub async fn get_post(state: web::Data<AppState>, id: web::Path<String>) -> Result<HttpResponse> {
    let post = state.posts.get_post(&state.context(), &id).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    put,
    path = "/v1/post/like",
    tag = "posts",
    request_body = PostRequest,
    responses(
        (status = 200, description = "Likes incremented", body = Post),
        (status = 404, description = "No such post", body = ErrorResponse)
    )
)]
pub async fn like_post(
    state: web::Data<AppState>,
    payload: web::Json<PostRequest>,
) -> Result<HttpResponse> {
    let post = state
        .posts
        .like_post(&state.context(), &payload.post_id)
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    put,
    path = "/v1/post/dislike",
    tag = "posts",
    request_body = PostRequest,
    responses(
        (status = 200, description = "Dislikes incremented", body = Post),
        (status = 404, description = "No such post", body = ErrorResponse)
    )
)]
pub async fn dislike_post(
    state: web::Data<AppState>,
    payload: web::Json<PostRequest>,
) -> Result<HttpResponse> {
    let post = state
        .posts
        .dislike_post(&state.context(), &payload.post_id)
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post. Deleting an id that does not exist also succeeds.
#[utoipa::path(
    delete,
    path = "/v1/post/delete/{id}",
    tag = "posts",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_post(state: web::Data<AppState>, id: web::Path<String>) -> Result<HttpResponse> {
    state.posts.delete_post(&state.context(), &id).await?;
    tracing::info!(post_id = %id, "post deleted");

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "post was successfully deleted".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/v1/posts/{page}/{limit}",
    tag = "posts",
    params(
        ("page" = i64, Path, description = "1-based page number"),
        ("limit" = i64, Path, description = "Page size"),
        ListQuery
    ),
    responses(
        (status = 200, description = "One page of posts", body = PostCollection),
        (status = 400, description = "Bad pagination or orderBy", body = ErrorResponse)
    )
)]
pub async fn list_posts(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64)>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let (page, limit) = path.into_inner();
    let filter = query.filter(page, limit);

    let collection = state.posts.list_posts(&state.context(), &filter).await?;
    Ok(HttpResponse::Ok().json(collection))
}

#[utoipa::path(
    get,
    path = "/v1/posts/{page}/{limit}/{user_id}",
    tag = "posts",
    params(
        ("page" = i64, Path, description = "1-based page number"),
        ("limit" = i64, Path, description = "Page size"),
        ("user_id" = String, Path, description = "Owner to filter by"),
        ListQuery
    ),
    responses(
        (status = 200, description = "One page of the user's posts", body = PostCollection),
        (status = 400, description = "Bad pagination or orderBy", body = ErrorResponse)
    )
)]
pub async fn list_user_posts(
    state: web::Data<AppState>,
    path: web::Path<(i64, i64, String)>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let (page, limit, user_id) = path.into_inner();
    let filter = query.filter(page, limit).owned_by(user_id);

    let collection = state.posts.list_posts(&state.context(), &filter).await?;
    Ok(HttpResponse::Ok().json(collection))
}

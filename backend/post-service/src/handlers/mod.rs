//! HTTP handlers for post-service
//!
//! - `posts`: the `/v1` post API
//! - `health`: liveness and readiness probes
pub mod health;
pub mod posts;

use crate::context::OpContext;
use crate::error::{PostError, ServiceError};
use crate::services::PostService;
use actix_web::web;
use std::time::Duration;

pub use health::HealthState;

/// Shared state for the post API
pub struct AppState {
    pub posts: PostService,
    /// Deadline applied to every store operation a request triggers
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(posts: PostService, request_timeout: Duration) -> Self {
        Self {
            posts,
            request_timeout,
        }
    }

    /// A fresh context for one request
    pub fn context(&self) -> OpContext {
        OpContext::with_timeout(self.request_timeout)
    }
}

fn bad_request(op: &'static str, err: impl std::fmt::Display) -> actix_web::Error {
    ServiceError::new(op, PostError::invalid(err.to_string())).into()
}

/// Register the `/v1` routes and the extractor configs that turn malformed
/// paths, queries and bodies into 400 responses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::PathConfig::default().error_handler(|err, _| bad_request("PostHandler - path", err)),
    )
    .app_data(
        web::QueryConfig::default().error_handler(|err, _| bad_request("PostHandler - query", err)),
    )
    .app_data(
        web::JsonConfig::default().error_handler(|err, _| bad_request("PostHandler - body", err)),
    )
    .service(
        web::scope("/v1")
            .route("/post/create", web::post().to(posts::create_post))
            .route("/post/update/{id}", web::put().to(posts::update_post))
            .route("/post/like", web::put().to(posts::like_post))
            .route("/post/dislike", web::put().to(posts::dislike_post))
            .route("/post/delete/{id}", web::delete().to(posts::delete_post))
            .route("/post/{id}", web::get().to(posts::get_post))
            .route("/posts/{page}/{limit}", web::get().to(posts::list_posts))
            .route(
                "/posts/{page}/{limit}/{user_id}",
                web::get().to(posts::list_user_posts),
            ),
    );
}

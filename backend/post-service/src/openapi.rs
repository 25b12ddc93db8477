//! OpenAPI documentation for Post Service
use crate::error::ErrorResponse;
use crate::handlers::health::{ComponentCheck, ComponentStatus, ReadinessResponse};
use crate::handlers::posts::{MessageResponse, PostRequest};
use crate::models::{Post, PostCollection, PostDraft};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Post Service API",
        version = "1.0.0",
        description = "CRUD and paginated listing for posts, with like and dislike counters. Lists are ordered by an allow-listed column and can be scoped to one owner.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    paths(
        crate::handlers::posts::create_post,
        crate::handlers::posts::update_post,
        crate::handlers::posts::get_post,
        crate::handlers::posts::like_post,
        crate::handlers::posts::dislike_post,
        crate::handlers::posts::delete_post,
        crate::handlers::posts::list_posts,
        crate::handlers::posts::list_user_posts,
        crate::handlers::health::liveness,
        crate::handlers::health::readiness,
    ),
    components(schemas(
        Post,
        PostDraft,
        PostCollection,
        PostRequest,
        MessageResponse,
        ErrorResponse,
        ReadinessResponse,
        ComponentCheck,
        ComponentStatus,
    )),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "posts", description = "Post creation, retrieval, updates, reactions and deletion"),
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/v1/openapi.json"
    }

    /// Swagger UI under `/swagger/`, serving this document at
    /// [`ApiDoc::openapi_json_path`].
    pub fn swagger_ui() -> SwaggerUi {
        SwaggerUi::new("/swagger/{_:.*}").url(Self::openapi_json_path(), Self::openapi())
    }
}

//! Prometheus collectors for post-service and the `/metrics` handler.
//!
//! Store collectors live in [`posts`]; pool collectors are registered by
//! `db_pool`. Both land in the default registry rendered here.

use actix_web::HttpResponse;
use prometheus::{Encoder, TextEncoder};

pub mod posts;

pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let mut body = Vec::new();

    match encoder.encode(&prometheus::gather(), &mut body) {
        Ok(()) => HttpResponse::Ok()
            .content_type(encoder.format_type())
            .body(body),
        Err(err) => {
            tracing::error!(error = %err, "failed to encode metrics");
            HttpResponse::InternalServerError().body(err.to_string())
        }
    }
}

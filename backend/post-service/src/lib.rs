//! Post Service Library
//!
//! CRUD and paginated listing for posts backed by PostgreSQL. The core is the
//! query construction and row mapping in `db`; everything else is plumbing
//! around it.
//!
//! # Modules
//!
//! - `models`: `Post`, `PostDraft`, `ListFilter`, `PostCollection`
//! - `db`: statement building and the `PostRepo` store gateway
//! - `services`: `PostService`, orchestration over a `PostRepo`
//! - `handlers`: HTTP endpoints and health probes
//! - `context`: per-operation cancellation and deadline
//! - `clock`: substitutable time source
//! - `error`: error kinds and HTTP mapping
//! - `config`: configuration from the environment
//! - `metrics`: Prometheus collectors
pub mod clock;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod openapi;
pub mod services;

pub use config::Config;
pub use context::OpContext;
pub use error::{ErrorKind, PostError, Result, ServiceError};

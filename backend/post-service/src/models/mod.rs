//! Data models for post-service
//!
//! - `Post`: a stored post as returned to callers
//! - `PostDraft`: caller-supplied column values for create and update
//! - `ListFilter` / `SortColumn`: pagination, ordering and owner scoping
//! - `PostCollection`: one page of posts
pub mod filter;
pub mod post;

pub use filter::{ListFilter, PageWindow, SortColumn, DEFAULT_ORDER_BY};
pub use post::{Post, PostCollection, PostDraft};

//! Database access layer
//!
//! - `statement`: parameterized SQL text plus bound values
//! - `query_builder`: builds statements for each post operation
//! - `post_repo`: the `PostRepo` gateway and its PostgreSQL implementation
pub mod post_repo;
pub mod query_builder;
pub mod statement;

pub use post_repo::{PgPostRepo, PostRepo, PostRow};
pub use statement::{SqlArg, Statement};

use crate::error::PostError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Sort column used when the caller does not ask for one
pub const DEFAULT_ORDER_BY: &str = "created_at";

/// Columns a listing may be ordered by. This enum is the only path from a
/// caller-supplied string to an `ORDER BY` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Content,
    Title,
    Category,
    CreatedAt,
    UpdatedAt,
}

impl SortColumn {
    pub const ALL: [SortColumn; 5] = [
        SortColumn::Content,
        SortColumn::Title,
        SortColumn::Category,
        SortColumn::CreatedAt,
        SortColumn::UpdatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Content => "content",
            SortColumn::Title => "title",
            SortColumn::Category => "category",
            SortColumn::CreatedAt => "created_at",
            SortColumn::UpdatedAt => "updated_at",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = PostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortColumn::ALL
            .into_iter()
            .find(|column| column.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                PostError::InvalidArgument(format!(
                    "order_by must be one of content, title, category, created_at, updated_at (got {:?})",
                    s
                ))
            })
    }
}

/// OFFSET/LIMIT pair derived from a validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

/// Pagination, ordering and optional owner scoping for a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListFilter {
    /// 1-based page number
    pub page: i64,
    /// Page size
    pub limit: i64,
    #[serde(default = "default_order_by")]
    pub order_by: String,
    /// Only posts owned by exactly this user; empty means no filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

fn default_order_by() -> String {
    DEFAULT_ORDER_BY.to_string()
}

impl ListFilter {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit,
            order_by: default_order_by(),
            user_id: None,
        }
    }

    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order_by = column.into();
        self
    }

    pub fn owned_by(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Resolve `order_by` against the allow-list.
    pub fn sort_column(&self) -> Result<SortColumn, PostError> {
        self.order_by.parse()
    }

    /// The owner filter, compared verbatim. Only an empty value means no filter.
    pub fn owner(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.is_empty())
    }

    /// `offset = (page - 1) * limit`, `limit = limit`.
    ///
    /// Page or limit below 1 are rejected rather than clamped, and so is an
    /// offset that would overflow.
    pub fn page_window(&self) -> Result<PageWindow, PostError> {
        if self.page < 1 {
            return Err(PostError::InvalidArgument(format!(
                "page must be at least 1 (got {})",
                self.page
            )));
        }
        if self.limit < 1 {
            return Err(PostError::InvalidArgument(format!(
                "limit must be at least 1 (got {})",
                self.limit
            )));
        }

        let offset = (self.page - 1)
            .checked_mul(self.limit)
            .ok_or_else(|| PostError::invalid("page * limit is out of range"))?;

        Ok(PageWindow {
            offset,
            limit: self.limit,
        })
    }
}

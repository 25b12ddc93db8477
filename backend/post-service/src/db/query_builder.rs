//! Statement construction for the `posts` table.
//!
//! Column and table names come from constants or from [`SortColumn`](crate::models::SortColumn); every
//! caller-supplied value goes through [`Statement::bind`].

use super::statement::Statement;
use crate::error::PostError;
use crate::models::{ListFilter, PostDraft};
use chrono::{DateTime, Utc};

const TABLE: &str = "posts";

/// Columns returned by every statement that yields rows
pub const RETURNING_COLUMNS: &str =
    "id, user_id, content, title, likes, dislikes, views, category, created_at, updated_at";

const INSERT_COLUMNS: [&str; 9] = [
    "id",
    "user_id",
    "content",
    "title",
    "likes",
    "dislikes",
    "views",
    "category",
    "created_at",
];

fn require_id(id: &str) -> Result<(), PostError> {
    if id.trim().is_empty() {
        return Err(PostError::invalid("id is required"));
    }
    Ok(())
}

/// `INSERT` of a new row. `now` becomes `created_at`; `updated_at` stays NULL.
pub fn insert_post(
    id: &str,
    draft: &PostDraft,
    now: DateTime<Utc>,
) -> Result<Statement, PostError> {
    require_id(id)?;
    draft.validate_fields()?;

    let mut stmt = Statement::default();
    let placeholders = [
        stmt.bind(id),
        stmt.bind(draft.user_id.as_str()),
        stmt.bind(draft.content.as_str()),
        stmt.bind(draft.title.as_str()),
        stmt.bind(draft.likes),
        stmt.bind(draft.dislikes),
        stmt.bind(draft.views),
        stmt.bind(draft.category.as_str()),
        stmt.bind(now),
    ];

    stmt.sql = format!(
        "INSERT INTO {TABLE} ({}) VALUES ({}) RETURNING {RETURNING_COLUMNS}",
        INSERT_COLUMNS.join(", "),
        placeholders.join(", "),
    );
    Ok(stmt)
}

/// `SELECT` of one row by id.
pub fn select_post(id: &str) -> Result<Statement, PostError> {
    require_id(id)?;

    let mut stmt = Statement::default();
    let id_ph = stmt.bind(id);
    stmt.sql = format!("SELECT {RETURNING_COLUMNS} FROM {TABLE} WHERE id = {id_ph}");
    Ok(stmt)
}

/// Full-column `UPDATE` keyed by id. `updated_at` is always set to `now`;
/// `id` and `created_at` are never written.
pub fn update_post(
    id: &str,
    draft: &PostDraft,
    now: DateTime<Utc>,
) -> Result<Statement, PostError> {
    require_id(id)?;
    draft.validate_fields()?;

    let mut stmt = Statement::default();
    let assignments = [
        format!("user_id = {}", stmt.bind(draft.user_id.as_str())),
        format!("content = {}", stmt.bind(draft.content.as_str())),
        format!("title = {}", stmt.bind(draft.title.as_str())),
        format!("likes = {}", stmt.bind(draft.likes)),
        format!("dislikes = {}", stmt.bind(draft.dislikes)),
        format!("views = {}", stmt.bind(draft.views)),
        format!("category = {}", stmt.bind(draft.category.as_str())),
        format!("updated_at = {}", stmt.bind(now)),
    ];
    let id_ph = stmt.bind(id);

    stmt.sql = format!(
        "UPDATE {TABLE} SET {} WHERE id = {id_ph} RETURNING {RETURNING_COLUMNS}",
        assignments.join(", "),
    );
    Ok(stmt)
}

/// `DELETE` of one row by id. Refuses to build an unscoped delete.
pub fn delete_post(id: &str) -> Result<Statement, PostError> {
    require_id(id)?;

    let mut stmt = Statement::default();
    let id_ph = stmt.bind(id);
    stmt.sql = format!("DELETE FROM {TABLE} WHERE id = {id_ph}");
    Ok(stmt)
}

/// Paged `SELECT`, optionally scoped to one owner.
///
/// Rows are ordered by the requested column and then by id, so pages do not
/// overlap when the sort column has duplicate values.
pub fn list_posts(filter: &ListFilter) -> Result<Statement, PostError> {
    let window = filter.page_window()?;
    let sort = filter.sort_column()?;

    let mut stmt = Statement::default();
    let mut sql = format!("SELECT {RETURNING_COLUMNS} FROM {TABLE}");

    if let Some(owner) = filter.owner() {
        sql.push_str(&format!(" WHERE user_id = {}", stmt.bind(owner)));
    }

    sql.push_str(&format!(" ORDER BY {} ASC, id ASC", sort.as_str()));
    let limit_ph = stmt.bind(window.limit);
    let offset_ph = stmt.bind(window.offset);
    sql.push_str(&format!(" LIMIT {limit_ph} OFFSET {offset_ph}"));

    stmt.sql = sql;
    Ok(stmt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::statement::SqlArg;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    fn draft() -> PostDraft {
        PostDraft {
            id: None,
            user_id: "u1".to_string(),
            content: "body".to_string(),
            title: "Post 13".to_string(),
            likes: 20,
            dislikes: 6,
            views: 100,
            category: "Nature".to_string(),
        }
    }

    #[test]
    fn test_insert_statement() {
        let stmt = insert_post("p1", &draft(), now()).unwrap();

        assert_eq!(
            stmt.sql,
            "INSERT INTO posts (id, user_id, content, title, likes, dislikes, views, category, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id, user_id, content, title, likes, dislikes, views, category, created_at, updated_at"
        );
        assert_eq!(
            stmt.args,
            vec![
                SqlArg::from("p1"),
                SqlArg::from("u1"),
                SqlArg::from("body"),
                SqlArg::from("Post 13"),
                SqlArg::Int(20),
                SqlArg::Int(6),
                SqlArg::Int(100),
                SqlArg::from("Nature"),
                SqlArg::Timestamp(now()),
            ]
        );
    }

    #[test]
    fn test_insert_rejects_invalid_draft() {
        let bad = PostDraft {
            user_id: String::new(),
            ..draft()
        };
        assert!(matches!(
            insert_post("p1", &bad, now()),
            Err(PostError::InvalidArgument(_))
        ));
        assert!(matches!(
            insert_post("", &draft(), now()),
            Err(PostError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_select_requires_id() {
        let stmt = select_post("p1").unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT id, user_id, content, title, likes, dislikes, views, category, created_at, updated_at \
             FROM posts WHERE id = $1"
        );
        assert_eq!(stmt.args, vec![SqlArg::from("p1")]);

        assert!(matches!(select_post(""), Err(PostError::InvalidArgument(_))));
        assert!(matches!(select_post("  "), Err(PostError::InvalidArgument(_))));
    }

    #[test]
    fn test_update_sets_every_column_and_timestamp() {
        let stmt = update_post("p1", &draft(), now()).unwrap();

        assert_eq!(
            stmt.sql,
            "UPDATE posts SET user_id = $1, content = $2, title = $3, likes = $4, dislikes = $5, \
             views = $6, category = $7, updated_at = $8 WHERE id = $9 \
             RETURNING id, user_id, content, title, likes, dislikes, views, category, created_at, updated_at"
        );
        assert_eq!(stmt.args[7], SqlArg::Timestamp(now()));
        assert_eq!(stmt.args[8], SqlArg::from("p1"));
        assert!(!stmt.sql.contains("created_at ="));
    }

    #[test]
    fn test_update_requires_id() {
        assert!(matches!(
            update_post("", &draft(), now()),
            Err(PostError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_delete_is_always_scoped() {
        let stmt = delete_post("p1").unwrap();
        assert_eq!(stmt.sql, "DELETE FROM posts WHERE id = $1");
        assert_eq!(stmt.args, vec![SqlArg::from("p1")]);

        assert!(matches!(delete_post(""), Err(PostError::InvalidArgument(_))));
    }

    #[test]
    fn test_list_without_owner() {
        let stmt = list_posts(&ListFilter::new(2, 10).order_by("title")).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT id, user_id, content, title, likes, dislikes, views, category, created_at, updated_at \
             FROM posts ORDER BY title ASC, id ASC LIMIT $1 OFFSET $2"
        );
        assert_eq!(stmt.args, vec![SqlArg::Int(10), SqlArg::Int(10)]);
    }

    #[test]
    fn test_list_with_owner() {
        let stmt = list_posts(&ListFilter::new(1, 5).owned_by("u1")).unwrap();
        assert_eq!(
            stmt.sql,
            "SELECT id, user_id, content, title, likes, dislikes, views, category, created_at, updated_at \
             FROM posts WHERE user_id = $1 ORDER BY created_at ASC, id ASC LIMIT $2 OFFSET $3"
        );
        assert_eq!(
            stmt.args,
            vec![SqlArg::from("u1"), SqlArg::Int(5), SqlArg::Int(0)]
        );
    }

    #[test]
    fn test_list_binds_owner_verbatim() {
        let stmt = list_posts(&ListFilter::new(1, 10).owned_by(" u1 ")).unwrap();
        assert!(stmt.sql.contains("WHERE user_id = $1"));
        assert_eq!(
            stmt.args,
            vec![SqlArg::from(" u1 "), SqlArg::Int(10), SqlArg::Int(0)]
        );

        let stmt = list_posts(&ListFilter::new(1, 10).owned_by(" ")).unwrap();
        assert!(stmt.sql.contains("WHERE user_id = $1"));
        assert_eq!(stmt.args[0], SqlArg::from(" "));
    }

    #[test]
    fn test_list_with_empty_owner_is_unscoped() {
        let stmt = list_posts(&ListFilter::new(1, 10).owned_by("")).unwrap();
        assert!(!stmt.sql.contains("WHERE"));
        assert_eq!(stmt.args, vec![SqlArg::Int(10), SqlArg::Int(0)]);
    }

    #[test]
    fn test_insert_rejects_blank_owner() {
        let d = PostDraft {
            user_id: "  ".to_string(),
            ..draft()
        };
        assert!(matches!(
            insert_post("p1", &d, now()),
            Err(PostError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_list_rejects_unknown_order_by() {
        let filter = ListFilter::new(1, 10).order_by("created_at; DROP TABLE posts");
        assert!(matches!(list_posts(&filter), Err(PostError::InvalidArgument(_))));
    }

    #[test]
    fn test_list_rejects_bad_pagination() {
        assert!(matches!(
            list_posts(&ListFilter::new(0, 10)),
            Err(PostError::InvalidArgument(_))
        ));
        assert!(matches!(
            list_posts(&ListFilter::new(1, 0)),
            Err(PostError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_caller_values_never_reach_sql_text() {
        let hostile = "x' OR '1'='1";
        let d = PostDraft {
            user_id: hostile.to_string(),
            title: hostile.to_string(),
            ..draft()
        };

        let statements = [
            insert_post(hostile, &d, now()).unwrap(),
            select_post(hostile).unwrap(),
            update_post(hostile, &d, now()).unwrap(),
            delete_post(hostile).unwrap(),
            list_posts(&ListFilter::new(1, 10).owned_by(hostile)).unwrap(),
        ];

        for stmt in statements {
            assert!(!stmt.sql.contains(hostile), "{}", stmt.sql);
            assert!(stmt.args.contains(&SqlArg::from(hostile)));
        }
    }
}

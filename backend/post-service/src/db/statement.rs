//! Parameterized SQL statement: text with `$n` placeholders plus the values
//! bound to them, in order.

use chrono::{DateTime, Utc};
use sqlx::error::BoxDynError;
use sqlx::postgres::PgArguments;
use sqlx::Arguments;

/// A value bound to a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlArg {
    Text(String),
    Int(i64),
    Timestamp(DateTime<Utc>),
}

impl From<&str> for SqlArg {
    fn from(value: &str) -> Self {
        SqlArg::Text(value.to_string())
    }
}

impl From<String> for SqlArg {
    fn from(value: String) -> Self {
        SqlArg::Text(value)
    }
}

impl From<i64> for SqlArg {
    fn from(value: i64) -> Self {
        SqlArg::Int(value)
    }
}

impl From<DateTime<Utc>> for SqlArg {
    fn from(value: DateTime<Utc>) -> Self {
        SqlArg::Timestamp(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<SqlArg>,
}

impl Statement {
    /// Record `arg` and return the placeholder that refers to it.
    pub(crate) fn bind(&mut self, arg: impl Into<SqlArg>) -> String {
        self.args.push(arg.into());
        format!("${}", self.args.len())
    }

    /// Encode the bound values for the PostgreSQL driver.
    pub fn arguments(&self) -> Result<PgArguments, BoxDynError> {
        let mut out = PgArguments::default();
        for arg in &self.args {
            match arg {
                SqlArg::Text(v) => out.add(v.clone())?,
                SqlArg::Int(v) => out.add(*v)?,
                SqlArg::Timestamp(v) => out.add(*v)?,
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_numbers_placeholders_in_order() {
        let mut stmt = Statement::default();
        assert_eq!(stmt.bind("a"), "$1");
        assert_eq!(stmt.bind(5_i64), "$2");
        assert_eq!(stmt.bind(String::from("b")), "$3");
        assert_eq!(
            stmt.args,
            vec![SqlArg::from("a"), SqlArg::Int(5), SqlArg::Text("b".into())]
        );
    }

    #[test]
    fn test_arguments_encode_every_value() {
        let mut stmt = Statement::default();
        stmt.bind("x");
        stmt.bind(1_i64);
        stmt.bind(Utc::now());
        assert!(stmt.arguments().is_ok());
    }
}

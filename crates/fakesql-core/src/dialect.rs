//! SQL dialect selection
//!
//! Maps the dialect a user pastes DDL in to the `sqlparser` dialect that
//! reads it. `Generic` accepts the widest syntax and is the default.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlparser::dialect::{
    Dialect as SqlParserDialect, GenericDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect,
};
use strum::{EnumIter, IntoEnumIterator};

use crate::FakeSqlError;

/// Source database dialect of the pasted DDL
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    #[default]
    Generic,
    #[serde(alias = "mariadb")]
    MySql,
    #[serde(alias = "postgresql")]
    Postgres,
    Sqlite,
}

impl SqlDialect {
    /// Look up a dialect by name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "generic" | "ansi" => Some(SqlDialect::Generic),
            "mysql" | "mariadb" => Some(SqlDialect::MySql),
            "postgres" | "postgresql" => Some(SqlDialect::Postgres),
            "sqlite" => Some(SqlDialect::Sqlite),
            _ => None,
        }
    }

    /// Canonical lower-case name, as accepted by `from_name`
    pub fn name(&self) -> &'static str {
        match self {
            SqlDialect::Generic => "generic",
            SqlDialect::MySql => "mysql",
            SqlDialect::Postgres => "postgres",
            SqlDialect::Sqlite => "sqlite",
        }
    }

    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SqlDialect::Generic => "Generic SQL",
            SqlDialect::MySql => "MySQL",
            SqlDialect::Postgres => "PostgreSQL",
            SqlDialect::Sqlite => "SQLite",
        }
    }

    /// Get the sqlparser dialect for this variant
    pub fn parser_dialect(&self) -> Box<dyn SqlParserDialect> {
        match self {
            SqlDialect::Generic => Box::new(GenericDialect {}),
            SqlDialect::MySql => Box::new(MySqlDialect {}),
            SqlDialect::Postgres => Box::new(PostgreSqlDialect {}),
            SqlDialect::Sqlite => Box::new(SQLiteDialect {}),
        }
    }
}

impl std::fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SqlDialect {
    type Err = FakeSqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            let known: Vec<&str> = SqlDialect::iter().map(|d| d.name()).collect();
            FakeSqlError::Configuration(format!(
                "unknown SQL dialect '{}' (expected one of: {})",
                s,
                known.join(", ")
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(SqlDialect::from_name("MySQL"), Some(SqlDialect::MySql));
        assert_eq!(SqlDialect::from_name("mariadb"), Some(SqlDialect::MySql));
        assert_eq!(SqlDialect::from_name("postgresql"), Some(SqlDialect::Postgres));
        assert_eq!(SqlDialect::from_name(" sqlite "), Some(SqlDialect::Sqlite));
        assert_eq!(SqlDialect::from_name("ansi"), Some(SqlDialect::Generic));
        assert_eq!(SqlDialect::from_name("oracle"), None);
    }

    #[test]
    fn test_from_str_error_lists_known_dialects() {
        let err = "oracle".parse::<SqlDialect>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("oracle"));
        assert!(message.contains("generic, mysql, postgres, sqlite"));
    }

    #[test]
    fn test_name_round_trips() {
        for dialect in SqlDialect::iter() {
            assert_eq!(SqlDialect::from_name(dialect.name()), Some(dialect));
        }
    }

    #[test]
    fn test_serde_aliases() {
        let dialect: SqlDialect = serde_json::from_str("\"postgresql\"").unwrap();
        assert_eq!(dialect, SqlDialect::Postgres);
        assert_eq!(serde_json::to_string(&SqlDialect::MySql).unwrap(), "\"mysql\"");
    }
}

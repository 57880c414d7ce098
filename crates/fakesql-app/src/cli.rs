//! Command line arguments

use std::path::PathBuf;

use clap::Parser;
use fakesql_core::SqlDialect;

/// Paste SQL DDL and annotate its columns with fake-data sources.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "fakesql", author, version, about)]
pub struct Cli {
    /// SQL dialect used to parse DDL (generic, mysql, postgres, sqlite).
    #[arg(long, env = "FAKESQL_DIALECT")]
    pub dialect: Option<SqlDialect>,

    /// Settings file to use instead of the default location.
    #[arg(long, env = "FAKESQL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `fakesql_designer=debug`.
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Also write JSON logs to the log directory.
    #[arg(long)]
    pub json_logs: bool,

    /// Show table names as declared instead of title-cased.
    #[arg(long)]
    pub raw_names: bool,

    /// DDL files to submit at startup, in order.
    pub files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_flags_and_files() {
        let cli = Cli::try_parse_from([
            "fakesql",
            "--dialect",
            "postgres",
            "--json-logs",
            "schema.sql",
            "more.sql",
        ])
        .expect("valid arguments");

        assert_eq!(cli.dialect, Some(SqlDialect::Postgres));
        assert!(cli.json_logs);
        assert!(!cli.raw_names);
        assert_eq!(
            cli.files,
            vec![PathBuf::from("schema.sql"), PathBuf::from("more.sql")]
        );
    }

    #[test]
    fn test_rejects_unknown_dialect() {
        assert!(Cli::try_parse_from(["fakesql", "--dialect", "oracle"]).is_err());
    }
}

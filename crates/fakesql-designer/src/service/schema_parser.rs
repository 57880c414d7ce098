//! DDL parsing
//!
//! Hands each fragment to `sqlparser` and projects the resulting
//! `CREATE TABLE` AST into the fakesql column model. The parser owns the
//! grammar; this module only decides how its output maps onto `Column`.

use fakesql_core::{Column, ParseError, SqlDialect, Table};
use sqlparser::ast::{ColumnDef, ColumnOption, CreateTable, Statement, TableConstraint};
use sqlparser::parser::Parser;
use sqlparser::tokenizer::Token;

use super::DdlSplitter;

/// Type names that imply an auto-incrementing column
const SERIAL_TYPES: &[&str] = &["SERIAL", "SMALLSERIAL", "BIGSERIAL", "SERIAL2", "SERIAL4", "SERIAL8"];

/// Parses DDL fragments into tables for one dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaParser {
    dialect: SqlDialect,
}

impl SchemaParser {
    pub fn new(dialect: SqlDialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }

    /// Split `script` and parse every fragment.
    ///
    /// All-or-nothing: the first fragment the parser rejects fails the whole
    /// script and no tables are returned.
    pub fn parse_script(&self, script: &str) -> Result<Vec<Table>, ParseError> {
        DdlSplitter::split(script)
            .iter()
            .enumerate()
            .map(|(index, fragment)| self.parse_fragment(index, fragment))
            .collect()
    }

    /// Parse a single `CREATE TABLE` fragment
    pub fn parse_fragment(&self, index: usize, fragment: &str) -> Result<Table, ParseError> {
        let dialect = self.dialect.parser_dialect();
        let statements = Parser::parse_sql(dialect.as_ref(), fragment)
            .map_err(|e| ParseError::new(index, e.to_string()))?;

        match statements.first() {
            Some(Statement::CreateTable(create)) => Ok(project_table(create)),
            Some(other) => Err(ParseError::new(
                index,
                format!("expected CREATE TABLE, found: {}", statement_preview(other)),
            )),
            None => Err(ParseError::new(index, "no statement found")),
        }
    }
}

fn statement_preview(statement: &Statement) -> String {
    statement.to_string().chars().take(60).collect()
}

fn project_table(create: &CreateTable) -> Table {
    let name = create
        .name
        .0
        .last()
        .map(|ident| ident.value.clone())
        .unwrap_or_else(|| create.name.to_string());

    let mut columns: Vec<Column> = create.columns.iter().map(project_column).collect();

    for constraint in &create.constraints {
        match constraint {
            TableConstraint::PrimaryKey { columns: keys, .. } => {
                for key in keys {
                    if let Some(column) = find_column(&mut columns, &key.value) {
                        column.primary_key = true;
                        column.not_null = true;
                    }
                }
            }
            TableConstraint::Unique { columns: keys, .. } if keys.len() == 1 => {
                if let Some(column) = find_column(&mut columns, &keys[0].value) {
                    column.unique = true;
                }
            }
            _ => {}
        }
    }

    Table { name, columns }
}

fn find_column<'a>(columns: &'a mut [Column], name: &str) -> Option<&'a mut Column> {
    columns
        .iter_mut()
        .find(|column| column.name.eq_ignore_ascii_case(name))
}

fn project_column(def: &ColumnDef) -> Column {
    let shape = TypeShape::parse(&def.data_type.to_string());

    let mut column = Column::named(def.name.value.clone());
    column.auto_increment = SERIAL_TYPES.contains(&shape.base.as_str());
    column.data_type = shape.base;
    column.length = shape.args.first().copied();
    column.precision = column.length;
    column.scale = shape.args.get(1).copied();
    column.is_unsigned = shape.unsigned;

    let mut constraint = Vec::new();
    for option_def in &def.options {
        match &option_def.option {
            ColumnOption::NotNull => {
                column.not_null = true;
                constraint.push(option_def.option.to_string());
            }
            ColumnOption::Unique { is_primary, .. } => {
                if *is_primary {
                    column.primary_key = true;
                    column.not_null = true;
                } else {
                    column.unique = true;
                }
                constraint.push(option_def.option.to_string());
            }
            ColumnOption::Check(_) | ColumnOption::ForeignKey { .. } => {
                constraint.push(option_def.option.to_string());
            }
            ColumnOption::Default(expr) => column.default = Some(expr.to_string()),
            ColumnOption::CharacterSet(charset) => column.character_set = Some(charset.to_string()),
            ColumnOption::Comment(comment) => {
                column.comment = Some(comment.clone());
                column.description = Some(comment.clone());
            }
            ColumnOption::DialectSpecific(tokens) if tokens.iter().any(is_auto_increment) => {
                column.auto_increment = true;
            }
            ColumnOption::Generated {
                generation_expr: None,
                ..
            } => column.auto_increment = true,
            _ => {}
        }
    }

    if !constraint.is_empty() {
        column.constraint = Some(constraint.join(" "));
    }

    column
}

fn is_auto_increment(token: &Token) -> bool {
    let text = token.to_string();
    text.eq_ignore_ascii_case("AUTO_INCREMENT") || text.eq_ignore_ascii_case("AUTOINCREMENT")
}

/// A rendered SQL type broken into base name, numeric arguments and sign
#[derive(Debug, PartialEq)]
struct TypeShape {
    base: String,
    args: Vec<u32>,
    unsigned: bool,
}

impl TypeShape {
    /// Break down a type as rendered by the parser, e.g. `INT(11) UNSIGNED`
    fn parse(rendered: &str) -> Self {
        let upper = rendered.to_uppercase();
        let (head, args, tail) = match (upper.find('('), upper.rfind(')')) {
            (Some(open), Some(close)) if close > open => (
                &upper[..open],
                Some(&upper[open + 1..close]),
                &upper[close + 1..],
            ),
            _ => (upper.as_str(), None, ""),
        };

        let mut words: Vec<&str> = head.split_whitespace().chain(tail.split_whitespace()).collect();
        let unsigned = words.contains(&"UNSIGNED");
        words.retain(|word| !matches!(*word, "UNSIGNED" | "ZEROFILL"));

        // Non-numeric arguments (ENUM values, MAX) carry no length.
        let args = args
            .and_then(|list| {
                list.split(',')
                    .map(|part| part.trim().parse::<u32>().ok())
                    .collect::<Option<Vec<_>>>()
            })
            .unwrap_or_default();

        Self {
            base: words.join(" "),
            args,
            unsigned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn parse_one(sql: &str) -> Table {
        SchemaParser::default()
            .parse_fragment(0, sql)
            .expect("should parse")
    }

    #[test]
    fn test_type_shape() {
        assert_eq!(
            TypeShape::parse("VARCHAR(50)"),
            TypeShape {
                base: "VARCHAR".into(),
                args: vec![50],
                unsigned: false
            }
        );
        assert_eq!(
            TypeShape::parse("decimal(10,2)"),
            TypeShape {
                base: "DECIMAL".into(),
                args: vec![10, 2],
                unsigned: false
            }
        );
        assert_eq!(
            TypeShape::parse("INT(11) UNSIGNED"),
            TypeShape {
                base: "INT".into(),
                args: vec![11],
                unsigned: true
            }
        );
        assert_eq!(
            TypeShape::parse("TIMESTAMP(3) WITH TIME ZONE"),
            TypeShape {
                base: "TIMESTAMP WITH TIME ZONE".into(),
                args: vec![3],
                unsigned: false
            }
        );
        assert_eq!(TypeShape::parse("ENUM('a', 'b')").args, Vec::<u32>::new());
    }

    #[test]
    fn test_parse_simple_table() {
        let table = parse_one("CREATE TABLE users (id INT PRIMARY KEY, name VARCHAR(50));");

        assert_eq!(table.name, "users");
        assert_eq!(table.column_names(), vec!["id", "name"]);

        let id = &table.columns[0];
        assert_eq!(id.data_type, "INT");
        assert!(id.primary_key);
        assert!(id.not_null);
        assert_eq!(id.constraint.as_deref(), Some("PRIMARY KEY"));
        assert_eq!(id.length, None);

        let name = &table.columns[1];
        assert_eq!(name.data_type, "VARCHAR");
        assert_eq!(name.length, Some(50));
        assert_eq!(name.precision, Some(50));
        assert!(!name.primary_key);
        assert!(!name.not_null);
        assert_eq!(name.constraint, None);
        assert_eq!(name.source, None);
    }

    #[test]
    fn test_parse_column_options() {
        let table = parse_one(indoc! {"
            CREATE TABLE accounts (
                id INT NOT NULL AUTO_INCREMENT,
                email VARCHAR(255) NOT NULL UNIQUE,
                balance DECIMAL(10,2) DEFAULT 0,
                nickname VARCHAR(30) COMMENT 'shown in the header',
                PRIMARY KEY (id)
            );
        "});

        let id = &table.columns[0];
        assert!(id.auto_increment);
        assert!(id.primary_key);
        assert!(id.not_null);

        let email = &table.columns[1];
        assert!(email.unique);
        assert!(email.not_null);
        assert_eq!(email.constraint.as_deref(), Some("NOT NULL UNIQUE"));

        let balance = &table.columns[2];
        assert_eq!(balance.data_type, "DECIMAL");
        assert_eq!(balance.length, Some(10));
        assert_eq!(balance.scale, Some(2));
        assert_eq!(balance.default.as_deref(), Some("0"));

        let nickname = &table.columns[3];
        assert_eq!(nickname.comment.as_deref(), Some("shown in the header"));
        assert_eq!(nickname.description, nickname.comment);
    }

    #[test]
    fn test_parse_table_level_unique() {
        let table = parse_one(
            "CREATE TABLE t (a INT, b INT, c INT, UNIQUE (a), UNIQUE (b, c));",
        );
        assert!(table.columns[0].unique);
        assert!(!table.columns[1].unique);
        assert!(!table.columns[2].unique);
    }

    #[test]
    fn test_parse_mysql_unsigned() {
        let parser = SchemaParser::new(SqlDialect::MySql);
        let table = parser
            .parse_fragment(0, "CREATE TABLE t (id INT UNSIGNED NOT NULL);")
            .expect("should parse");
        assert!(table.columns[0].is_unsigned);
        assert_eq!(table.columns[0].data_type, "INT");
    }

    #[test]
    fn test_parse_serial_is_auto_increment() {
        let parser = SchemaParser::new(SqlDialect::Postgres);
        let table = parser
            .parse_fragment(0, "CREATE TABLE t (id SERIAL PRIMARY KEY, n TEXT);")
            .expect("should parse");
        assert!(table.columns[0].auto_increment);
        assert!(!table.columns[1].auto_increment);
    }

    #[test]
    fn test_parse_sqlite_autoincrement() {
        let parser = SchemaParser::new(SqlDialect::Sqlite);
        let table = parser
            .parse_fragment(0, "CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, n TEXT);")
            .expect("should parse");

        let id = &table.columns[0];
        assert!(id.auto_increment);
        assert!(id.primary_key);
        assert!(id.not_null);
        assert!(!table.columns[1].auto_increment);
    }

    #[test]
    fn test_parse_identity_is_auto_increment() {
        let parser = SchemaParser::new(SqlDialect::Postgres);
        let table = parser
            .parse_fragment(0, "CREATE TABLE t (id INT GENERATED ALWAYS AS IDENTITY, n INT);")
            .expect("should parse");
        assert!(table.columns[0].auto_increment);
        assert!(!table.columns[1].auto_increment);
    }

    #[test]
    fn test_parse_mysql_character_set() {
        let parser = SchemaParser::new(SqlDialect::MySql);
        let table = parser
            .parse_fragment(
                0,
                "CREATE TABLE t (name VARCHAR(10) CHARACTER SET utf8mb4, code CHAR(2));",
            )
            .expect("should parse");
        assert_eq!(table.columns[0].character_set.as_deref(), Some("utf8mb4"));
        assert_eq!(table.columns[1].character_set, None);
    }

    #[test]
    fn test_parse_references_and_check_join_constraint() {
        let table = parse_one("CREATE TABLE t (c INT REFERENCES u(id) CHECK (c > 0));");

        let c = &table.columns[0];
        assert_eq!(c.constraint.as_deref(), Some("REFERENCES u (id) CHECK (c > 0)"));
        assert!(!c.not_null);
        assert!(!c.unique);
        assert_eq!(c.source, None);
    }

    #[test]
    fn test_parse_schema_qualified_name() {
        let table = parse_one("CREATE TABLE public.orders (id INT);");
        assert_eq!(table.name, "orders");
    }

    #[test]
    fn test_parse_rejects_invalid_syntax() {
        let err = SchemaParser::default()
            .parse_fragment(3, "CREATE TABLE broken (id INT,,);")
            .unwrap_err();
        assert_eq!(err.fragment_index, 3);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_parse_rejects_other_statements() {
        let err = SchemaParser::default()
            .parse_fragment(0, "CREATE VIEW v AS SELECT 1;")
            .unwrap_err();
        assert!(err.message.starts_with("expected CREATE TABLE"));
    }

    #[test]
    fn test_parse_script_is_all_or_nothing() {
        let parser = SchemaParser::default();
        let ok = parser
            .parse_script("CREATE TABLE a (id INT); CREATE TABLE b (id INT);")
            .expect("should parse");
        assert_eq!(ok.len(), 2);

        let err = parser
            .parse_script("CREATE TABLE a (id INT); CREATE TABLE (oops; CREATE TABLE c (id INT);")
            .unwrap_err();
        assert_eq!(err.fragment_index, 1);
    }

    #[test]
    fn test_parse_script_empty() {
        assert!(SchemaParser::default().parse_script("  ").unwrap().is_empty());
    }
}

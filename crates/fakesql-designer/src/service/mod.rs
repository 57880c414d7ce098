//! Service layer for the schema designer
//!
//! Splits pasted scripts into statements and parses them into tables.

mod ddl_splitter;
mod schema_parser;

pub use ddl_splitter::{DdlSplitter, STATEMENT_DELIMITER};
pub use schema_parser::SchemaParser;

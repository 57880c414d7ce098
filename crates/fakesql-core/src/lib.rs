//! fakesql core - shared types for the schema annotation tool
//!
//! This crate holds the pieces every other fakesql crate depends on:
//!
//! - `Table` / `Column` - the parsed schema, projected into a plain model
//! - `SourceAnnotation` - where a column's mock values should come from
//! - `FakerFunction` - the static catalog of generator names
//! - `SqlDialect` - which parser dialect DDL is read with
//! - `FakeSqlError` / `ParseError` - error types

mod dialect;
mod error;
mod faker;
mod schema;

pub use dialect::SqlDialect;
pub use error::*;
pub use faker::{FakerFunction, faker_catalog};
pub use schema::*;

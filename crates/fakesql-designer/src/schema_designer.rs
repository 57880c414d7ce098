//! Schema designer for fakesql
//!
//! Turns pasted SQL DDL into an editable schema and drives the three nested
//! views used to annotate it.
//!
//! ## Features
//!
//! - Splitting a pasted script into `CREATE TABLE` fragments
//! - Parsing each fragment with `sqlparser` and projecting it into the
//!   column-annotation model
//! - A single schema store with revision-checked selections
//! - Table list, column list and column annotation editor view-models
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fakesql_core::SqlDialect;
//! use fakesql_designer::SchemaWorkbench;
//!
//! let mut workbench = SchemaWorkbench::new(SqlDialect::Generic);
//! workbench.submit("CREATE TABLE users (id INT PRIMARY KEY);")?;
//! workbench.select_table(0);
//! workbench.open_selected_table();
//! for event in workbench.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

pub mod events;
pub mod models;
pub mod service;
pub mod views;

mod workbench;

// Re-exports for convenience
pub use events::SchemaEvent;
pub use models::{
    ClearedReference, ListSelection, Removed, Revision, SchemaStore, SelectionScope,
};
pub use service::{DdlSplitter, SchemaParser};
pub use views::{
    AnnotationRejected, AppliedAnnotation, ColumnAnnotationEditor, ColumnListView, ColumnRow,
    SourceKind, TableListView, TableRow, title_case,
};
pub use workbench::{PARSE_ERROR_MESSAGE, SchemaWorkbench};

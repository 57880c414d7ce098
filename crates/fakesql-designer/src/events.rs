//! Events emitted by the schema workbench

use fakesql_core::{ColumnFlags, ParseError, SourceAnnotation};

use crate::models::ClearedReference;
use crate::views::AnnotationRejected;

/// Events emitted by the SchemaWorkbench
///
/// The front-end drains these after each action to report what changed.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaEvent {
    /// A submission parsed and replaced the whole schema.
    SchemaReplaced {
        /// Number of tables in the new schema
        table_count: usize,
    },

    /// A submission was rejected; the schema is unchanged.
    ParseFailed {
        /// The fragment the parser rejected
        error: ParseError,
    },

    /// A table was removed from the schema.
    TableDeleted {
        /// Position the table had
        index: usize,
        table_name: String,
    },

    /// A column was removed from a table.
    ColumnDeleted {
        table_name: String,
        /// Position the column had
        index: usize,
        column_name: String,
    },

    /// Reference annotations were cleared after their target was removed.
    ReferencesCleared { references: Vec<ClearedReference> },

    /// The editor's flags and source were written to the column.
    AnnotationApplied {
        table_name: String,
        column_name: String,
        flags: ColumnFlags,
        source: Option<SourceAnnotation>,
    },

    /// The column list was closed because its table's position changed.
    ColumnListClosed { table_name: String },

    /// The editor was closed because its column's position changed.
    EditorClosed {
        table_name: String,
        column_name: String,
    },

    /// The editor could not write its edit back.
    EditRejected {
        table_name: String,
        column_name: String,
        reason: AnnotationRejected,
    },
}

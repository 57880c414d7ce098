//! View-models for the three nested views
//!
//! Table list → column list → column annotation editor. None of them own
//! schema data; each keeps revision-checked selections and reads the
//! `SchemaStore` it is handed on every call.

mod annotation_editor;
mod column_list;
mod table_list;

pub use annotation_editor::{
    AnnotationRejected, AppliedAnnotation, ColumnAnnotationEditor, SourceKind,
};
pub use column_list::{ColumnListView, ColumnRow};
pub use table_list::{TableListView, TableRow, title_case};

//! Schema workbench
//!
//! Owns the `SchemaStore` and the nested views, and is the only place that
//! mutates the store. Every state change is queued as a [`SchemaEvent`].
//!
//! ## Flow
//! 1. `submit` pasted DDL, replacing the schema on success
//! 2. `select_table` then `open_selected_table` to list its columns
//! 3. `select_column` then `edit_selected_column` to open the editor
//! 4. change the editor via `with_editor`, then `apply_editor` or `cancel_editor`

use fakesql_core::{ParseError, SqlDialect, Table};

use crate::events::SchemaEvent;
use crate::models::{ClearedReference, SchemaStore};
use crate::service::SchemaParser;
use crate::views::{
    AnnotationRejected, AppliedAnnotation, ColumnAnnotationEditor, ColumnListView, ColumnRow,
    TableListView, TableRow,
};

/// Message shown to the user when a submission is rejected
pub const PARSE_ERROR_MESSAGE: &str = "Please check your SQL syntax";

/// Schema store plus the table list, column list and annotation editor
#[derive(Debug, Clone, Default)]
pub struct SchemaWorkbench {
    parser: SchemaParser,
    store: SchemaStore,
    tables: TableListView,
    columns: Option<ColumnListView>,
    editor: Option<ColumnAnnotationEditor>,
    events: Vec<SchemaEvent>,
}

impl SchemaWorkbench {
    pub fn new(dialect: SqlDialect) -> Self {
        Self {
            parser: SchemaParser::new(dialect),
            ..Self::default()
        }
    }

    /// Show table names as stored instead of title-cased
    pub fn with_title_case(mut self, enabled: bool) -> Self {
        self.tables = self.tables.with_title_case(enabled);
        self
    }

    pub fn dialect(&self) -> SqlDialect {
        self.parser.dialect()
    }

    /// Parse later submissions with another dialect
    pub fn set_dialect(&mut self, dialect: SqlDialect) {
        self.parser = SchemaParser::new(dialect);
    }

    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    /// Parse `script` and replace the whole schema with the result.
    ///
    /// All-or-nothing: on a parse error the schema, selections and open
    /// views are left exactly as they were.
    #[tracing::instrument(skip(self, script), fields(dialect = %self.parser.dialect(), bytes = script.len()))]
    pub fn submit(&mut self, script: &str) -> Result<usize, ParseError> {
        let tables = match self.parser.parse_script(script) {
            Ok(tables) => tables,
            Err(error) => {
                tracing::warn!(
                    fragment = error.fragment_index,
                    message = %error.message,
                    "Rejected DDL submission"
                );
                self.events.push(SchemaEvent::ParseFailed {
                    error: error.clone(),
                });
                return Err(error);
            }
        };

        let table_count = tables.len();
        self.store.replace_all(tables);
        self.tables.clear_selection();
        self.columns = None;
        self.editor = None;

        tracing::info!(table_count, "Schema replaced");
        match self.store.to_json_pretty() {
            Ok(json) => tracing::debug!("Schema:\n{}", json),
            Err(e) => tracing::warn!("Failed to serialize schema: {}", e),
        }

        self.events.push(SchemaEvent::SchemaReplaced { table_count });
        Ok(table_count)
    }

    pub fn table_rows(&self) -> Vec<TableRow> {
        self.tables.rows(&self.store)
    }

    pub fn select_table(&mut self, index: usize) -> bool {
        self.tables.select(&self.store, index)
    }

    pub fn selected_table(&self) -> Option<usize> {
        self.tables.selected_index(&self.store)
    }

    /// Delete the selected table. A no-op when nothing is selected.
    pub fn delete_selected_table(&mut self) -> bool {
        let Some(index) = self.selected_table() else {
            return false;
        };
        let open_table = self.open_table().map(|table| table.name.clone());
        let Some(removed) = self.tables.delete_selected(&mut self.store) else {
            return false;
        };

        tracing::info!(table = %removed.item.name, index, "Deleted table");
        self.events.push(SchemaEvent::TableDeleted {
            index,
            table_name: removed.item.name,
        });
        self.report_cleared(removed.cleared_references);
        self.close_stale_views(open_table);
        true
    }

    /// Open the column list for the selected table ("Set Column Values").
    ///
    /// A no-op when nothing is selected.
    pub fn open_selected_table(&mut self) -> bool {
        let Some(view) = self
            .selected_table()
            .and_then(|index| ColumnListView::open(&self.store, index))
        else {
            return false;
        };

        self.columns = Some(view);
        self.editor = None;
        true
    }

    pub fn column_list(&self) -> Option<&ColumnListView> {
        self.columns.as_ref()
    }

    /// The table the column list is showing
    pub fn open_table(&self) -> Option<&Table> {
        self.columns.as_ref()?.table(&self.store)
    }

    /// Rows of the open column list, empty when none is open
    pub fn column_rows(&self) -> Vec<ColumnRow> {
        self.columns
            .as_ref()
            .map(|view| view.rows(&self.store))
            .unwrap_or_default()
    }

    pub fn select_column(&mut self, index: usize) -> bool {
        match self.columns.as_mut() {
            Some(view) => view.select(&self.store, index),
            None => false,
        }
    }

    pub fn selected_column(&self) -> Option<usize> {
        self.columns.as_ref()?.selected_index(&self.store)
    }

    /// Delete the selected column. A no-op when nothing is selected.
    pub fn delete_selected_column(&mut self) -> bool {
        let Some(view) = self.columns.as_mut() else {
            return false;
        };
        let Some(index) = view.selected_index(&self.store) else {
            return false;
        };
        let Some(table_name) = view.table(&self.store).map(|table| table.name.clone()) else {
            return false;
        };
        let Some(removed) = view.delete_selected(&mut self.store) else {
            return false;
        };

        tracing::info!(table = %table_name, column = %removed.item.name, index, "Deleted column");
        self.events.push(SchemaEvent::ColumnDeleted {
            table_name: table_name.clone(),
            index,
            column_name: removed.item.name,
        });
        self.report_cleared(removed.cleared_references);
        self.close_stale_views(Some(table_name));
        true
    }

    /// Open the annotation editor for the selected column.
    ///
    /// A no-op when nothing is selected.
    pub fn edit_selected_column(&mut self) -> bool {
        let Some(view) = self.columns.as_ref() else {
            return false;
        };
        let (Some(table_index), Some(column_index)) =
            (view.table_index(&self.store), view.selected_index(&self.store))
        else {
            return false;
        };

        self.editor = ColumnAnnotationEditor::open(&self.store, table_index, column_index);
        self.editor.is_some()
    }

    pub fn editor(&self) -> Option<&ColumnAnnotationEditor> {
        self.editor.as_ref()
    }

    /// Run `f` against the open editor. Returns `None` when no editor is open.
    pub fn with_editor<R>(
        &mut self,
        f: impl FnOnce(&mut ColumnAnnotationEditor, &SchemaStore) -> R,
    ) -> Option<R> {
        let editor = self.editor.as_mut()?;
        Some(f(editor, &self.store))
    }

    /// Write the editor's edit to the store and close it.
    ///
    /// Returns `None` when no editor is open. A rejected edit keeps the
    /// editor open unless its column is gone.
    pub fn apply_editor(&mut self) -> Option<Result<AppliedAnnotation, AnnotationRejected>> {
        let editor = self.editor.as_ref()?;
        let result = editor.apply(&mut self.store);

        match &result {
            Ok(applied) => {
                tracing::info!(
                    table = %applied.table_name,
                    column = %applied.column_name,
                    source = ?applied.source,
                    "Applied column annotation"
                );
                self.events.push(SchemaEvent::AnnotationApplied {
                    table_name: applied.table_name.clone(),
                    column_name: applied.column_name.clone(),
                    flags: applied.flags,
                    source: applied.source.clone(),
                });
                self.editor = None;
            }
            Err(reason) => {
                tracing::warn!(
                    table = %editor.table_name(),
                    column = %editor.column_name(),
                    "Annotation rejected: {}",
                    reason
                );
                self.events.push(SchemaEvent::EditRejected {
                    table_name: editor.table_name().to_string(),
                    column_name: editor.column_name().to_string(),
                    reason: reason.clone(),
                });
                if *reason == AnnotationRejected::Stale {
                    self.editor = None;
                }
            }
        }

        Some(result)
    }

    /// Discard the open editor's edit
    pub fn cancel_editor(&mut self) -> bool {
        self.editor.take().is_some()
    }

    /// Close the column list and any editor opened from it
    pub fn close_columns(&mut self) -> bool {
        self.editor = None;
        self.columns.take().is_some()
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<SchemaEvent> {
        std::mem::take(&mut self.events)
    }

    fn report_cleared(&mut self, references: Vec<ClearedReference>) {
        if !references.is_empty() {
            self.events
                .push(SchemaEvent::ReferencesCleared { references });
        }
    }

    /// Close views whose target no longer resolves.
    ///
    /// `open_table` is the name the column list showed before the change.
    fn close_stale_views(&mut self, open_table: Option<String>) {
        if self
            .columns
            .as_ref()
            .is_some_and(|view| view.table_index(&self.store).is_none())
        {
            tracing::debug!(table = ?open_table, "Closing column list for moved table");
            self.columns = None;
            self.close_editor();
            if let Some(table_name) = open_table {
                self.events.push(SchemaEvent::ColumnListClosed { table_name });
            }
        }

        if self
            .editor
            .as_ref()
            .is_some_and(|editor| editor.column_index(&self.store).is_none())
        {
            tracing::debug!("Closing editor for moved column");
            self.close_editor();
        }
    }

    fn close_editor(&mut self) {
        if let Some(editor) = self.editor.take() {
            self.events.push(SchemaEvent::EditorClosed {
                table_name: editor.table_name().to_string(),
                column_name: editor.column_name().to_string(),
            });
        }
    }
}

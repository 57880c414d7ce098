//! Column list view-model
//!
//! Shows the columns of one table. The view is bound to the table through a
//! table-scoped selection, so it goes blank once that table is deleted or
//! the schema is replaced.

use fakesql_core::{Column, Table};

use crate::models::{ListSelection, Removed, SchemaStore, SelectionScope};

/// One rendered row of the column list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    /// 1-based ordinal, derived on every render
    pub position: usize,
    pub name: String,
    pub data_type: String,
    pub length: Option<u32>,
    pub not_null: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub auto_increment: bool,
    pub default: Option<String>,
    /// Whether the column draws its values from another table
    pub has_reference: bool,
    /// Display form of the source annotation, if any
    pub source: Option<String>,
}

impl ColumnRow {
    fn from_column(index: usize, column: &Column) -> Self {
        Self {
            position: index + 1,
            name: column.name.clone(),
            data_type: column.data_type.clone(),
            length: column.length,
            not_null: column.not_null,
            primary_key: column.primary_key,
            unique: column.unique,
            auto_increment: column.auto_increment,
            default: column.default.clone(),
            has_reference: column.reference().is_some(),
            source: column.source.as_ref().map(ToString::to_string),
        }
    }
}

/// Lists one table's columns with a single-row selection
#[derive(Debug, Clone)]
pub struct ColumnListView {
    table: ListSelection,
    selection: ListSelection,
}

impl ColumnListView {
    /// Open the view for the table at `table_index`
    pub fn open(store: &SchemaStore, table_index: usize) -> Option<Self> {
        store.table(table_index)?;

        let mut table = ListSelection::new(SelectionScope::Tables);
        table.select(table_index, store.revision());

        Some(Self {
            table,
            selection: ListSelection::new(SelectionScope::Columns),
        })
    }

    /// Index of the bound table, or `None` once the binding is stale
    pub fn table_index(&self, store: &SchemaStore) -> Option<usize> {
        self.table.resolve(store.revision())
    }

    pub fn table<'a>(&self, store: &'a SchemaStore) -> Option<&'a Table> {
        self.table_index(store).and_then(|index| store.table(index))
    }

    pub fn rows(&self, store: &SchemaStore) -> Vec<ColumnRow> {
        self.table(store)
            .map(|table| {
                table
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(index, column)| ColumnRow::from_column(index, column))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Select the row at `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, store: &SchemaStore, index: usize) -> bool {
        let in_range = self
            .table(store)
            .is_some_and(|table| index < table.columns.len());
        if in_range {
            self.selection.select(index, store.revision());
        }
        in_range
    }

    pub fn selected_index(&self, store: &SchemaStore) -> Option<usize> {
        self.table_index(store)?;
        self.selection.resolve(store.revision())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Delete the selected column. A no-op when nothing is selected.
    pub fn delete_selected(&mut self, store: &mut SchemaStore) -> Option<Removed<Column>> {
        let table_index = self.table_index(store)?;
        let column_index = self.selected_index(store)?;
        let removed = store.delete_column_at(table_index, column_index);
        self.selection.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakesql_core::SourceAnnotation;
    use pretty_assertions::assert_eq;

    fn store() -> SchemaStore {
        SchemaStore::with_tables(vec![
            Table::new("users")
                .with_column(Column::named("id").data_type("INT").primary_key())
                .with_column(Column::named("name").data_type("VARCHAR").with_length(50)),
            Table::new("orders")
                .with_column(Column::named("A"))
                .with_column(Column::named("B"))
                .with_column(
                    Column::named("C").with_source(SourceAnnotation::reference("users", "id")),
                ),
        ])
    }

    #[test]
    fn test_open_out_of_range() {
        assert!(ColumnListView::open(&store(), 2).is_none());
    }

    #[test]
    fn test_rows_summarise_columns() {
        let store = store();
        let view = ColumnListView::open(&store, 0).expect("table exists");
        let rows = view.rows(&store);

        assert_eq!(
            rows[0],
            ColumnRow {
                position: 1,
                name: "id".into(),
                data_type: "INT".into(),
                length: None,
                not_null: true,
                primary_key: true,
                unique: false,
                auto_increment: false,
                default: None,
                has_reference: false,
                source: None,
            }
        );
        assert_eq!(rows[1].length, Some(50));
    }

    #[test]
    fn test_reference_marker() {
        let store = store();
        let view = ColumnListView::open(&store, 1).expect("table exists");
        let rows = view.rows(&store);

        assert!(!rows[0].has_reference);
        assert!(rows[2].has_reference);
        assert_eq!(rows[2].source.as_deref(), Some("users.id"));
    }

    #[test]
    fn test_delete_renumbers_positions() {
        let mut store = store();
        let mut view = ColumnListView::open(&store, 1).expect("table exists");
        assert!(view.select(&store, 1));

        let removed = view.delete_selected(&mut store).expect("row selected");
        let rows = view.rows(&store);

        assert_eq!(removed.item.name, "B");
        assert_eq!(
            rows.iter()
                .map(|r| (r.position, r.name.as_str()))
                .collect::<Vec<_>>(),
            vec![(1, "A"), (2, "C")]
        );
        assert_eq!(view.selected_index(&store), None);
        assert_eq!(view.table_index(&store), Some(1));
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let mut store = store();
        let mut view = ColumnListView::open(&store, 1).expect("table exists");

        assert!(view.delete_selected(&mut store).is_none());
        assert_eq!(view.rows(&store).len(), 3);
    }

    #[test]
    fn test_column_selection_goes_stale_after_other_deletion() {
        let mut store = store();
        let mut first = ColumnListView::open(&store, 0).expect("table exists");
        let mut second = ColumnListView::open(&store, 1).expect("table exists");
        first.select(&store, 1);
        second.select(&store, 0);

        second.delete_selected(&mut store);

        assert_eq!(first.selected_index(&store), None);
        assert_eq!(first.rows(&store).len(), 2);
    }

    #[test]
    fn test_binding_goes_stale_when_table_deleted() {
        let mut store = store();
        let mut view = ColumnListView::open(&store, 1).expect("table exists");
        view.select(&store, 0);

        store.delete_table_at(0);

        assert_eq!(view.table_index(&store), None);
        assert!(view.rows(&store).is_empty());
        assert!(!view.select(&store, 0));
        assert!(view.delete_selected(&mut store).is_none());
        assert_eq!(store.tables()[0].columns.len(), 3);
    }
}

//! Schema store
//!
//! The single source of truth for the parsed schema. Views never hold
//! tables or columns themselves; they keep selections and read through the
//! store on every render.

use fakesql_core::{Column, ColumnFlags, SourceAnnotation, Table};
use serde::Serialize;

use super::Revision;

/// A reference annotation cleared because its target disappeared
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearedReference {
    /// Table owning the annotated column
    pub table_name: String,
    /// The annotated column
    pub column_name: String,
    /// The annotation that no longer resolved
    pub source: SourceAnnotation,
}

/// An item removed from the store, with the references its removal cleared
#[derive(Debug, Clone, PartialEq)]
pub struct Removed<T> {
    pub item: T,
    pub cleared_references: Vec<ClearedReference>,
}

/// Ordered tables of the current schema generation
#[derive(Debug, Clone, Default)]
pub struct SchemaStore {
    tables: Vec<Table>,
    revision: Revision,
}

impl SchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `tables`
    pub fn with_tables(tables: Vec<Table>) -> Self {
        let mut store = Self::new();
        store.replace_all(tables);
        store
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }

    pub fn column(&self, table_index: usize, column_index: usize) -> Option<&Column> {
        self.table(table_index)
            .and_then(|table| table.columns.get(column_index))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Current layout stamp
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Replace the whole schema with a new generation.
    ///
    /// Every selection taken before this call stops resolving.
    pub fn replace_all(&mut self, tables: Vec<Table>) {
        self.tables = tables;
        self.revision.tables += 1;
        self.revision.columns += 1;
    }

    /// Remove the table at `index`; out of range is a no-op
    pub fn delete_table_at(&mut self, index: usize) -> Option<Removed<Table>> {
        if index >= self.tables.len() {
            return None;
        }

        let table = self.tables.remove(index);
        self.revision.tables += 1;
        let cleared_references = self.clear_dangling_references();

        Some(Removed {
            item: table,
            cleared_references,
        })
    }

    /// Remove one column; out of range is a no-op
    pub fn delete_column_at(
        &mut self,
        table_index: usize,
        column_index: usize,
    ) -> Option<Removed<Column>> {
        let table = self.tables.get_mut(table_index)?;
        if column_index >= table.columns.len() {
            return None;
        }

        let column = table.columns.remove(column_index);
        self.revision.columns += 1;
        let cleared_references = self.clear_dangling_references();

        Some(Removed {
            item: column,
            cleared_references,
        })
    }

    /// Overwrite a column's editable flags. Returns false if out of range.
    pub fn set_column_flags(
        &mut self,
        table_index: usize,
        column_index: usize,
        flags: ColumnFlags,
    ) -> bool {
        match self.column_mut(table_index, column_index) {
            Some(column) => {
                column.set_flags(flags);
                true
            }
            None => false,
        }
    }

    /// Set or clear a column's source annotation. Returns false if out of range.
    pub fn set_column_source(
        &mut self,
        table_index: usize,
        column_index: usize,
        source: Option<SourceAnnotation>,
    ) -> bool {
        match self.column_mut(table_index, column_index) {
            Some(column) => {
                column.source = source;
                true
            }
            None => false,
        }
    }

    /// Column names of the first table called `table_name`, in order.
    ///
    /// Empty when no table has that name.
    pub fn columns_of(&self, table_name: &str) -> Vec<String> {
        self.tables
            .iter()
            .find(|table| table.name == table_name)
            .map(|table| table.columns.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Whether some table called `table_name` has a column `column_name`
    pub fn has_column(&self, table_name: &str, column_name: &str) -> bool {
        self.tables
            .iter()
            .filter(|table| table.name == table_name)
            .any(|table| table.column(column_name).is_some())
    }

    /// Pretty JSON of the whole schema, used for diagnostic logging
    pub fn to_json_pretty(&self) -> fakesql_core::Result<String> {
        Ok(serde_json::to_string_pretty(&self.tables)?)
    }

    fn column_mut(&mut self, table_index: usize, column_index: usize) -> Option<&mut Column> {
        self.tables
            .get_mut(table_index)
            .and_then(|table| table.columns.get_mut(column_index))
    }

    /// Clear every reference annotation whose target no longer exists
    fn clear_dangling_references(&mut self) -> Vec<ClearedReference> {
        let dangling: Vec<(usize, usize)> = self
            .tables
            .iter()
            .enumerate()
            .flat_map(|(t, table)| {
                table
                    .columns
                    .iter()
                    .enumerate()
                    .filter_map(move |(c, column)| column.reference().map(|target| (t, c, target)))
            })
            .filter(|(_, _, (table_name, column_name))| !self.has_column(table_name, column_name))
            .map(|(t, c, _)| (t, c))
            .collect();

        let mut cleared = Vec::with_capacity(dangling.len());
        for (t, c) in dangling {
            let table = &mut self.tables[t];
            let column = &mut table.columns[c];
            if let Some(source) = column.source.take() {
                tracing::warn!(
                    table = %table.name,
                    column = %column.name,
                    reference = %source,
                    "Clearing reference to a removed column"
                );
                cleared.push(ClearedReference {
                    table_name: table.name.clone(),
                    column_name: column.name.clone(),
                    source,
                });
            }
        }

        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakesql_core::FakerFunction;
    use pretty_assertions::assert_eq;

    fn sample_store() -> SchemaStore {
        SchemaStore::with_tables(vec![
            Table::new("users")
                .with_column(Column::named("id").data_type("INT").primary_key())
                .with_column(Column::named("email").data_type("VARCHAR").with_length(255)),
            Table::new("orders")
                .with_column(Column::named("id").data_type("INT").primary_key())
                .with_column(
                    Column::named("user_id")
                        .data_type("INT")
                        .with_source(SourceAnnotation::reference("users", "id")),
                ),
        ])
    }

    #[test]
    fn test_replace_all_bumps_both_counters() {
        let mut store = sample_store();
        let before = store.revision();

        store.replace_all(vec![Table::new("only")]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.tables()[0].name, "only");
        assert_eq!(store.revision().tables, before.tables + 1);
        assert_eq!(store.revision().columns, before.columns + 1);
    }

    #[test]
    fn test_delete_table_out_of_range_is_noop() {
        let mut store = sample_store();
        let before = store.revision();

        assert!(store.delete_table_at(9).is_none());
        assert_eq!(store.len(), 2);
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn test_delete_column_renumbers() {
        let mut store = SchemaStore::with_tables(vec![
            Table::new("t")
                .with_column(Column::named("a"))
                .with_column(Column::named("b"))
                .with_column(Column::named("c")),
        ]);

        let removed = store.delete_column_at(0, 1).expect("column exists");
        assert_eq!(removed.item.name, "b");
        assert_eq!(store.tables()[0].column_names(), vec!["a", "c"]);
        assert!(store.delete_column_at(0, 2).is_none());
        assert!(store.delete_column_at(4, 0).is_none());
    }

    #[test]
    fn test_deleting_referenced_table_clears_references() {
        let mut store = sample_store();

        let removed = store.delete_table_at(0).expect("table exists");

        assert_eq!(removed.item.name, "users");
        assert_eq!(
            removed.cleared_references,
            vec![ClearedReference {
                table_name: "orders".into(),
                column_name: "user_id".into(),
                source: SourceAnnotation::reference("users", "id"),
            }]
        );
        assert_eq!(store.column(0, 1).and_then(|c| c.source.clone()), None);
    }

    #[test]
    fn test_deleting_referenced_column_clears_references() {
        let mut store = sample_store();

        let removed = store.delete_column_at(0, 0).expect("column exists");

        assert_eq!(removed.cleared_references.len(), 1);
        assert_eq!(store.column(1, 1).unwrap().source, None);
    }

    #[test]
    fn test_unrelated_deletion_keeps_references() {
        let mut store = sample_store();

        let removed = store.delete_column_at(0, 1).expect("column exists");

        assert!(removed.cleared_references.is_empty());
        assert_eq!(store.column(1, 1).unwrap().reference(), Some(("users", "id")));
    }

    #[test]
    fn test_set_flags_and_source() {
        let mut store = sample_store();
        let flags = ColumnFlags {
            not_null: true,
            unique: true,
            ..ColumnFlags::default()
        };

        assert!(store.set_column_flags(0, 1, flags));
        assert!(store.set_column_source(0, 1, Some(SourceAnnotation::faker(FakerFunction::Email))));
        assert!(!store.set_column_flags(0, 7, flags));
        assert!(!store.set_column_source(5, 0, None));

        let email = store.column(0, 1).unwrap();
        assert_eq!(email.flags(), flags);
        assert_eq!(email.source, Some(SourceAnnotation::faker(FakerFunction::Email)));
    }

    #[test]
    fn test_columns_of() {
        let store = sample_store();
        assert_eq!(store.columns_of("orders"), vec!["id", "user_id"]);
        assert!(store.columns_of("missing").is_empty());
        assert!(store.has_column("users", "email"));
        assert!(!store.has_column("users", "user_id"));
    }

    #[test]
    fn test_json_lists_tables_in_order() {
        let json: serde_json::Value =
            serde_json::from_str(&sample_store().to_json_pretty().unwrap()).unwrap();
        assert_eq!(json[0]["name"], "users");
        assert_eq!(json[1]["columns"][1]["source"]["kind"], "reference");
    }
}

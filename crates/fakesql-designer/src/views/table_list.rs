//! Table list view-model

use fakesql_core::Table;

use crate::models::{ListSelection, Removed, SchemaStore, SelectionScope};

/// One rendered row of the table list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Position in the store
    pub index: usize,
    /// Stored table name
    pub name: String,
    /// Name as displayed
    pub title: String,
}

/// Title-case a name for display.
///
/// Every letter that follows a non-letter is upper-cased and every other
/// letter lower-cased, so `user_accounts` becomes `User_Accounts`.
pub fn title_case(name: &str) -> String {
    let mut titled = String::with_capacity(name.len());
    let mut in_word = false;

    for ch in name.chars() {
        if ch.is_alphabetic() {
            if in_word {
                titled.extend(ch.to_lowercase());
            } else {
                titled.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            titled.push(ch);
            in_word = false;
        }
    }

    titled
}

/// Lists the store's tables with a single-row selection
#[derive(Debug, Clone)]
pub struct TableListView {
    selection: ListSelection,
    title_case: bool,
}

impl Default for TableListView {
    fn default() -> Self {
        Self::new()
    }
}

impl TableListView {
    pub fn new() -> Self {
        Self {
            selection: ListSelection::new(SelectionScope::Tables),
            title_case: true,
        }
    }

    /// Show stored names as-is instead of title-casing them
    pub fn with_title_case(mut self, enabled: bool) -> Self {
        self.title_case = enabled;
        self
    }

    pub fn rows(&self, store: &SchemaStore) -> Vec<TableRow> {
        store
            .tables()
            .iter()
            .enumerate()
            .map(|(index, table)| TableRow {
                index,
                name: table.name.clone(),
                title: if self.title_case {
                    title_case(&table.name)
                } else {
                    table.name.clone()
                },
            })
            .collect()
    }

    /// Select the row at `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, store: &SchemaStore, index: usize) -> bool {
        if index >= store.len() {
            return false;
        }
        self.selection.select(index, store.revision());
        true
    }

    pub fn selected_index(&self, store: &SchemaStore) -> Option<usize> {
        self.selection.resolve(store.revision())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Delete the selected table. A no-op when nothing is selected.
    pub fn delete_selected(&mut self, store: &mut SchemaStore) -> Option<Removed<Table>> {
        let index = self.selected_index(store)?;
        let removed = store.delete_table_at(index);
        self.selection.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> SchemaStore {
        SchemaStore::with_tables(vec![
            Table::new("users"),
            Table::new("order_items"),
            Table::new("audit"),
        ])
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("users"), "Users");
        assert_eq!(title_case("order_items"), "Order_Items");
        assert_eq!(title_case("USER ACCOUNTS"), "User Accounts");
        assert_eq!(title_case("v2table"), "V2Table");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_rows_keep_stored_names() {
        let view = TableListView::new();
        let rows = view.rows(&store());

        assert_eq!(
            rows.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
            vec!["Users", "Order_Items", "Audit"]
        );
        assert_eq!(rows[1].name, "order_items");
        assert_eq!(rows[2].index, 2);
    }

    #[test]
    fn test_rows_without_title_case() {
        let view = TableListView::new().with_title_case(false);
        assert_eq!(view.rows(&store())[1].title, "order_items");
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let store = store();
        let mut view = TableListView::new();

        assert!(!view.select(&store, 3));
        assert_eq!(view.selected_index(&store), None);
        assert!(view.select(&store, 1));
        assert_eq!(view.selected_index(&store), Some(1));
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let mut store = store();
        let mut view = TableListView::new();

        assert!(view.delete_selected(&mut store).is_none());
        assert_eq!(view.rows(&store).len(), 3);
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut store = store();
        let mut view = TableListView::new();
        view.select(&store, 0);

        let removed = view.delete_selected(&mut store).expect("row selected");

        assert_eq!(removed.item.name, "users");
        assert_eq!(view.rows(&store)[0].name, "order_items");
        assert_eq!(view.selected_index(&store), None);
        assert!(view.delete_selected(&mut store).is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_selection_goes_stale_after_replace() {
        let mut store = store();
        let mut view = TableListView::new();
        view.select(&store, 2);

        store.replace_all(vec![Table::new("fresh")]);

        assert_eq!(view.selected_index(&store), None);
    }
}

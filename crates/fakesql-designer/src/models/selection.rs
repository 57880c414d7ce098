//! Revision-checked selections
//!
//! Deleting a row shifts every later index, so a remembered index is only
//! meaningful for the store layout it was taken from. The store stamps its
//! layout with a `Revision`; a `ListSelection` keeps the stamp it was made
//! under and stops resolving as soon as the relevant counter moves.

/// Layout stamp of a `SchemaStore`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Revision {
    /// Bumped when the table list is replaced or a table is removed
    pub tables: u64,
    /// Bumped when any column is removed
    pub columns: u64,
}

/// Which part of the layout a selection depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionScope {
    /// Index into the table list
    Tables,
    /// Index into one table's columns
    Columns,
}

impl SelectionScope {
    fn still_valid(&self, taken: Revision, current: Revision) -> bool {
        match self {
            SelectionScope::Tables => taken.tables == current.tables,
            SelectionScope::Columns => taken == current,
        }
    }
}

/// Zero-or-one selected row of a list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSelection {
    scope: SelectionScope,
    selected: Option<(usize, Revision)>,
}

impl ListSelection {
    pub fn new(scope: SelectionScope) -> Self {
        Self {
            scope,
            selected: None,
        }
    }

    /// Remember `index` as selected under `revision`
    pub fn select(&mut self, index: usize, revision: Revision) {
        self.selected = Some((index, revision));
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The selected index, if one was made under a layout still current
    pub fn resolve(&self, current: Revision) -> Option<usize> {
        self.selected
            .filter(|(_, taken)| self.scope.still_valid(*taken, current))
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_resolves_to_none() {
        let selection = ListSelection::new(SelectionScope::Tables);
        assert_eq!(selection.resolve(Revision::default()), None);
    }

    #[test]
    fn test_table_selection_ignores_column_changes() {
        let mut selection = ListSelection::new(SelectionScope::Tables);
        selection.select(2, Revision { tables: 1, columns: 0 });

        assert_eq!(selection.resolve(Revision { tables: 1, columns: 5 }), Some(2));
        assert_eq!(selection.resolve(Revision { tables: 2, columns: 5 }), None);
    }

    #[test]
    fn test_column_selection_invalidated_by_any_change() {
        let mut selection = ListSelection::new(SelectionScope::Columns);
        selection.select(0, Revision { tables: 1, columns: 1 });

        assert_eq!(selection.resolve(Revision { tables: 1, columns: 1 }), Some(0));
        assert_eq!(selection.resolve(Revision { tables: 1, columns: 2 }), None);
        assert_eq!(selection.resolve(Revision { tables: 2, columns: 1 }), None);
    }

    #[test]
    fn test_clear_and_reselect() {
        let mut selection = ListSelection::new(SelectionScope::Columns);
        let current = Revision { tables: 0, columns: 1 };
        selection.select(1, Revision::default());
        assert_eq!(selection.resolve(current), None);

        selection.select(1, current);
        assert_eq!(selection.resolve(current), Some(1));

        selection.clear();
        assert_eq!(selection.resolve(current), None);
    }
}

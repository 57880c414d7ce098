//! Column annotation editor
//!
//! Edits one column's four flags and its fake-data source. Nothing reaches
//! the store until [`ColumnAnnotationEditor::apply`] is called; dropping the
//! editor discards the edit.
//!
//! The reference branch works like a pair of dependent dropdowns: picking a
//! reference table rebuilds the column options from
//! [`SchemaStore::columns_of`] and forgets any column picked before.

use fakesql_core::{ColumnFlag, ColumnFlags, FakerFunction, SourceAnnotation, faker_catalog};
use thiserror::Error;

use crate::models::{ListSelection, SchemaStore, SelectionScope};

/// The two kinds of source a column can draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Faker,
    Reference,
}

/// Why an edit could not be written back
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationRejected {
    #[error("the column being edited no longer exists at the same position")]
    Stale,

    #[error("no faker function chosen")]
    MissingFaker,

    #[error("reference needs both a table and a column")]
    IncompleteReference,

    #[error("{table_name}.{column_name} does not exist")]
    MissingTarget {
        table_name: String,
        column_name: String,
    },

    #[error("a column cannot reference its own table")]
    SelfReference,
}

/// What an applied edit wrote to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedAnnotation {
    pub table_index: usize,
    pub column_index: usize,
    pub table_name: String,
    pub column_name: String,
    pub flags: ColumnFlags,
    pub source: Option<SourceAnnotation>,
}

/// Pending edit of one column's annotation
#[derive(Debug, Clone)]
pub struct ColumnAnnotationEditor {
    table_index: usize,
    /// Column position, stamped with the layout it was opened under
    target: ListSelection,
    table_name: String,
    column_name: String,
    flags: ColumnFlags,
    kind: Option<SourceKind>,
    faker: Option<FakerFunction>,
    reference_table: Option<String>,
    reference_columns: Vec<String>,
    reference_column: Option<String>,
}

impl ColumnAnnotationEditor {
    /// Open an editor prefilled from the column's current flags and source
    pub fn open(store: &SchemaStore, table_index: usize, column_index: usize) -> Option<Self> {
        let table = store.table(table_index)?;
        let column = table.columns.get(column_index)?;

        let mut target = ListSelection::new(SelectionScope::Columns);
        target.select(column_index, store.revision());

        let mut editor = Self {
            table_index,
            target,
            table_name: table.name.clone(),
            column_name: column.name.clone(),
            flags: column.flags(),
            kind: None,
            faker: None,
            reference_table: None,
            reference_columns: Vec::new(),
            reference_column: None,
        };

        match &column.source {
            Some(SourceAnnotation::Faker { function_name }) => editor.choose_faker(*function_name),
            Some(SourceAnnotation::Reference {
                table_name,
                column_name,
            }) => {
                editor.kind = Some(SourceKind::Reference);
                editor.reference_table = Some(table_name.clone());
                editor.reference_columns = store.columns_of(table_name);
                editor.reference_column = Some(column_name.clone());
            }
            None => {}
        }

        Some(editor)
    }

    pub fn table_index(&self) -> usize {
        self.table_index
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    /// Current column position, or `None` once the layout has changed
    pub fn column_index(&self, store: &SchemaStore) -> Option<usize> {
        self.target.resolve(store.revision())
    }

    pub fn flags(&self) -> ColumnFlags {
        self.flags
    }

    /// Toggle one flag. Turning on primary key also turns on not-null.
    pub fn set_flag(&mut self, flag: ColumnFlag, value: bool) {
        self.flags.set(flag, value);
        if flag == ColumnFlag::PrimaryKey && value {
            self.flags.not_null = true;
        }
    }

    pub fn kind(&self) -> Option<SourceKind> {
        self.kind
    }

    /// Switch between the faker and reference branches.
    ///
    /// Each branch keeps its own choices, only the active one is applied.
    pub fn choose_kind(&mut self, kind: SourceKind) {
        self.kind = Some(kind);
    }

    pub fn faker_options(&self) -> Vec<FakerFunction> {
        faker_catalog()
    }

    pub fn faker(&self) -> Option<FakerFunction> {
        self.faker
    }

    pub fn choose_faker(&mut self, function: FakerFunction) {
        self.kind = Some(SourceKind::Faker);
        self.faker = Some(function);
    }

    /// Names of every other table, in store order without repeats
    pub fn reference_table_options(&self, store: &SchemaStore) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for (index, table) in store.tables().iter().enumerate() {
            if index == self.table_index || table.name == self.table_name {
                continue;
            }
            if !names.contains(&table.name) {
                names.push(table.name.clone());
            }
        }
        names
    }

    pub fn reference_table(&self) -> Option<&str> {
        self.reference_table.as_deref()
    }

    /// Column options for the chosen reference table
    pub fn reference_columns(&self) -> &[String] {
        &self.reference_columns
    }

    pub fn reference_column(&self) -> Option<&str> {
        self.reference_column.as_deref()
    }

    /// Pick the reference table and rebuild its column options.
    ///
    /// Returns false, changing nothing, if `table_name` is not an option.
    pub fn choose_reference_table(&mut self, store: &SchemaStore, table_name: &str) -> bool {
        if !self
            .reference_table_options(store)
            .iter()
            .any(|name| name == table_name)
        {
            return false;
        }

        self.kind = Some(SourceKind::Reference);
        self.reference_table = Some(table_name.to_string());
        self.reference_columns = store.columns_of(table_name);
        self.reference_column = None;
        true
    }

    /// Pick the reference column. A no-op without a chosen reference table.
    pub fn choose_reference_column(&mut self, column_name: &str) -> bool {
        if self.reference_table.is_none()
            || !self.reference_columns.iter().any(|name| name == column_name)
        {
            return false;
        }

        self.reference_column = Some(column_name.to_string());
        true
    }

    /// Drop every source choice so apply clears the annotation
    pub fn clear_source(&mut self) {
        self.kind = None;
        self.faker = None;
        self.reference_table = None;
        self.reference_columns.clear();
        self.reference_column = None;
    }

    /// The annotation apply would write, or why it cannot
    pub fn pending_source(&self) -> Result<Option<SourceAnnotation>, AnnotationRejected> {
        match self.kind {
            None => Ok(None),
            Some(SourceKind::Faker) => self
                .faker
                .map(|function| Some(SourceAnnotation::faker(function)))
                .ok_or(AnnotationRejected::MissingFaker),
            Some(SourceKind::Reference) => match (&self.reference_table, &self.reference_column) {
                (Some(table), Some(column)) => Ok(Some(SourceAnnotation::reference(table, column))),
                _ => Err(AnnotationRejected::IncompleteReference),
            },
        }
    }

    /// Write the pending flags and source back to the column.
    ///
    /// The reference target is checked against the store as it is now, so a
    /// table or column deleted since it was chosen is rejected.
    pub fn apply(&self, store: &mut SchemaStore) -> Result<AppliedAnnotation, AnnotationRejected> {
        let column_index = self
            .column_index(store)
            .ok_or(AnnotationRejected::Stale)?;
        let source = self.pending_source()?;

        if let Some(SourceAnnotation::Reference {
            table_name,
            column_name,
        }) = &source
        {
            if *table_name == self.table_name {
                return Err(AnnotationRejected::SelfReference);
            }
            if !store.has_column(table_name, column_name) {
                return Err(AnnotationRejected::MissingTarget {
                    table_name: table_name.clone(),
                    column_name: column_name.clone(),
                });
            }
        }

        if !store.set_column_flags(self.table_index, column_index, self.flags)
            || !store.set_column_source(self.table_index, column_index, source.clone())
        {
            return Err(AnnotationRejected::Stale);
        }

        Ok(AppliedAnnotation {
            table_index: self.table_index,
            column_index,
            table_name: self.table_name.clone(),
            column_name: self.column_name.clone(),
            flags: self.flags,
            source,
        })
    }
}

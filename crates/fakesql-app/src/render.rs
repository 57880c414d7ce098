//! Terminal rendering of views and workbench events

use comfy_table::{Table, presets::UTF8_FULL};
use fakesql_core::{ColumnFlag, FakerFunction};
use fakesql_designer::{
    ColumnAnnotationEditor, ColumnRow, PARSE_ERROR_MESSAGE, SchemaEvent, SchemaStore, SourceKind,
    TableRow,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "" }
}

fn selection_marker(index: usize, selected: Option<usize>) -> &'static str {
    if selected == Some(index) { ">" } else { "" }
}

/// The table list; row numbers are 1-based
pub fn tables_table(rows: &[TableRow], selected: Option<usize>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "#", "Table"]);
    for row in rows {
        table.add_row(vec![
            selection_marker(row.index, selected).to_string(),
            (row.index + 1).to_string(),
            row.title.clone(),
        ]);
    }
    table
}

/// The column list of one table
pub fn columns_table(rows: &[ColumnRow], selected: Option<usize>) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "", "#", "Name", "Type", "Length", "Not Null", "PK", "Unique", "Auto Inc", "Default",
        "Source",
    ]);
    for row in rows {
        let source = match (&row.source, row.has_reference) {
            (Some(source), true) => format!("ref {}", source),
            (Some(source), false) => source.clone(),
            (None, _) => String::new(),
        };
        table.add_row(vec![
            selection_marker(row.position - 1, selected).to_string(),
            row.position.to_string(),
            row.name.clone(),
            row.data_type.clone(),
            row.length.map(|l| l.to_string()).unwrap_or_default(),
            yes_no(row.not_null).to_string(),
            yes_no(row.primary_key).to_string(),
            yes_no(row.unique).to_string(),
            yes_no(row.auto_increment).to_string(),
            row.default.clone().unwrap_or_default(),
            source,
        ]);
    }
    table
}

/// Pending state of the annotation editor
pub fn editor_table(editor: &ColumnAnnotationEditor, store: &SchemaStore) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Column".to_string(),
        format!("{}.{}", editor.table_name(), editor.column_name()),
    ]);

    let flags = editor.flags();
    for flag in [
        ColumnFlag::PrimaryKey,
        ColumnFlag::Unique,
        ColumnFlag::AutoIncrement,
        ColumnFlag::NotNull,
    ] {
        let value = if flags.get(flag) { "on" } else { "off" };
        table.add_row(vec![flag.display_name(), value]);
    }

    match editor.kind() {
        None => {
            table.add_row(vec!["Source", "none"]);
        }
        Some(SourceKind::Faker) => {
            table.add_row(vec!["Source", "faker"]);
            table.add_row(vec![
                "Faker".to_string(),
                editor.faker().map(|f| f.name()).unwrap_or("-").to_string(),
            ]);
        }
        Some(SourceKind::Reference) => {
            table.add_row(vec!["Source", "reference"]);
            table.add_row(vec![
                "Reference table".to_string(),
                editor.reference_table().unwrap_or("-").to_string(),
            ]);
            table.add_row(vec![
                "Reference column".to_string(),
                editor.reference_column().unwrap_or("-").to_string(),
            ]);
            if editor.reference_table().is_some() {
                table.add_row(vec![
                    "Column options".to_string(),
                    editor.reference_columns().join(", "),
                ]);
            }
        }
    }

    table.add_row(vec![
        "Table options".to_string(),
        editor.reference_table_options(store).join(", "),
    ]);
    table
}

/// Generator names, comma separated
pub fn faker_list(functions: &[FakerFunction]) -> String {
    functions
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lines describing one workbench event
pub fn event_lines(event: &SchemaEvent) -> Vec<String> {
    match event {
        SchemaEvent::SchemaReplaced { table_count } => {
            vec![format!("Loaded {} table(s).", table_count)]
        }
        SchemaEvent::ParseFailed { error } => {
            vec![format!("{}: {}", PARSE_ERROR_MESSAGE, error)]
        }
        SchemaEvent::TableDeleted { table_name, .. } => {
            vec![format!("Deleted table {}.", table_name)]
        }
        SchemaEvent::ColumnDeleted {
            table_name,
            column_name,
            ..
        } => vec![format!("Deleted column {}.{}.", table_name, column_name)],
        SchemaEvent::ReferencesCleared { references } => references
            .iter()
            .map(|r| {
                format!(
                    "Cleared reference {} on {}.{}.",
                    r.source, r.table_name, r.column_name
                )
            })
            .collect(),
        SchemaEvent::AnnotationApplied {
            table_name,
            column_name,
            source,
            ..
        } => {
            let source = source
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "no source".to_string());
            vec![format!("Updated {}.{} ({}).", table_name, column_name, source)]
        }
        SchemaEvent::ColumnListClosed { table_name } => vec![format!(
            "Closed the column list of {}; table positions changed.",
            table_name
        )],
        SchemaEvent::EditorClosed {
            table_name,
            column_name,
        } => vec![format!(
            "Discarded the edit of {}.{}; column positions changed.",
            table_name, column_name
        )],
        SchemaEvent::EditRejected {
            table_name,
            column_name,
            reason,
        } => vec![format!(
            "Could not update {}.{}: {}.",
            table_name, column_name, reason
        )],
    }
}

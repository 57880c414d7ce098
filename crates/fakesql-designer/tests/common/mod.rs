//! Shared fixtures for workbench integration tests

#![allow(dead_code)]

use fakesql_core::SqlDialect;
use fakesql_designer::SchemaWorkbench;

/// The two-table schema from the tool's quick-start
pub const USERS_AND_ORDERS: &str = "CREATE TABLE users (id INT PRIMARY KEY, name VARCHAR(50)); \
     CREATE TABLE orders (id INT PRIMARY KEY, user_id INT);";

/// A workbench with `script` already submitted and its events drained
pub fn workbench_with(script: &str) -> SchemaWorkbench {
    let mut workbench = SchemaWorkbench::new(SqlDialect::Generic);
    workbench.submit(script).expect("fixture schema should parse");
    workbench.drain_events();
    workbench
}

/// Select and open the table at `index`
pub fn open_table(workbench: &mut SchemaWorkbench, index: usize) {
    assert!(workbench.select_table(index), "table {index} should exist");
    assert!(workbench.open_selected_table());
}

/// Open the editor for column `column` of table `table`
pub fn edit_column(workbench: &mut SchemaWorkbench, table: usize, column: usize) {
    open_table(workbench, table);
    assert!(workbench.select_column(column), "column {column} should exist");
    assert!(workbench.edit_selected_column());
}

pub fn table_names(workbench: &SchemaWorkbench) -> Vec<String> {
    workbench
        .store()
        .tables()
        .iter()
        .map(|table| table.name.clone())
        .collect()
}

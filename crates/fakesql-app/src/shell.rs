//! Interactive command shell
//!
//! A line-oriented stand-in for the three windows of the designer: the
//! table list, the column list of the opened table, and the annotation
//! editor of the column being edited. Row numbers typed by the user are
//! 1-based, like the ones rendered.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use fakesql_core::{ColumnFlag, FakerFunction, SqlDialect, faker_catalog};
use fakesql_designer::SchemaWorkbench;
use thiserror::Error;

use crate::render;

/// Line that ends a `paste` block
pub const PASTE_TERMINATOR: &str = ".";

const HELP: &str = "\
Schema
  paste                 read DDL until a line with a single '.', then submit it
  load <file>           submit the DDL in a file
  dump [table]          print the schema (or one table) as JSON
  dialect [name]        show or change the dialect later DDL is parsed with
Tables
  tables                list tables
  select <n>            select table n
  delete                delete the selected table
  open                  list the selected table's columns (Set Column Values)
Columns
  columns               list the open table's columns
  column <n>            select column n
  delete-column         delete the selected column
  edit                  edit the selected column's annotation
  close                 close the column list
Editor
  show                  show the pending annotation
  flag <pk|unique|auto|notnull> <on|off>
  faker <name>          use a faker generator
  fakers                list faker generators
  ref-table <name>      draw values from another table
  ref-column <name>     pick the referenced column
  clear-source          remove the source
  apply                 write the edit to the column
  cancel                discard the edit
Other
  help                  show this help
  quit                  exit";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Paste,
    Load(PathBuf),
    Dump(Option<String>),
    Dialect(Option<SqlDialect>),
    Tables,
    Select(usize),
    Delete,
    Open,
    Columns,
    Column(usize),
    DeleteColumn,
    Edit,
    Close,
    Show,
    Flag(ColumnFlag, bool),
    Faker(FakerFunction),
    Fakers,
    RefTable(String),
    RefColumn(String),
    ClearSource,
    Apply,
    Cancel,
    Help,
    Quit,
}

/// A line that is not a valid command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{0}' is not a row number")]
    InvalidRow(String),

    #[error("unknown flag '{0}', expected pk, unique, auto or notnull")]
    InvalidFlag(String),

    #[error("expected on or off, got '{0}'")]
    InvalidToggle(String),

    #[error("unknown faker '{0}', try 'fakers'")]
    UnknownFaker(String),

    #[error("unknown dialect '{0}', expected generic, mysql, postgres or sqlite")]
    UnknownDialect(String),
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(rest)
    }
}

/// Parse a 1-based row number into an index
fn row_index(text: &str) -> Result<usize, CommandError> {
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(CommandError::InvalidRow(text.to_string())),
    }
}

fn toggle(text: &str) -> Result<bool, CommandError> {
    match text.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(CommandError::InvalidToggle(text.to_string())),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((line, ""));

        let command = match word.to_lowercase().as_str() {
            "" => return Err(CommandError::Empty),
            "paste" => Command::Paste,
            "load" => Command::Load(PathBuf::from(required(rest, "load", "a file path")?)),
            "dump" => Command::Dump((!rest.is_empty()).then(|| rest.to_string())),
            "dialect" if rest.is_empty() => Command::Dialect(None),
            "dialect" => Command::Dialect(Some(
                SqlDialect::from_name(rest)
                    .ok_or_else(|| CommandError::UnknownDialect(rest.to_string()))?,
            )),
            "tables" | "ls" => Command::Tables,
            "select" => Command::Select(row_index(required(rest, "select", "a table number")?)?),
            "delete" => Command::Delete,
            "open" => Command::Open,
            "columns" => Command::Columns,
            "column" => Command::Column(row_index(required(rest, "column", "a column number")?)?),
            "delete-column" => Command::DeleteColumn,
            "edit" => Command::Edit,
            "close" => Command::Close,
            "show" => Command::Show,
            "flag" => {
                let args = required(rest, "flag", "a flag and on/off")?;
                let (name, value) = args.split_once(char::is_whitespace).ok_or(
                    CommandError::MissingArgument {
                        command: "flag",
                        argument: "on or off",
                    },
                )?;
                let flag = ColumnFlag::from_name(name)
                    .ok_or_else(|| CommandError::InvalidFlag(name.to_string()))?;
                Command::Flag(flag, toggle(value.trim())?)
            }
            "faker" => {
                let name = required(rest, "faker", "a generator name")?;
                Command::Faker(
                    FakerFunction::from_name(name)
                        .ok_or_else(|| CommandError::UnknownFaker(name.to_string()))?,
                )
            }
            "fakers" => Command::Fakers,
            "ref-table" => Command::RefTable(required(rest, "ref-table", "a table name")?.to_string()),
            "ref-column" => {
                Command::RefColumn(required(rest, "ref-column", "a column name")?.to_string())
            }
            "clear-source" => Command::ClearSource,
            "apply" => Command::Apply,
            "cancel" => Command::Cancel,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

/// Whether the shell keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reads commands from `input` and writes views and messages to `output`
pub struct Shell<R, W> {
    workbench: SchemaWorkbench,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(workbench: SchemaWorkbench, input: R, output: W) -> Self {
        Self {
            workbench,
            input,
            output,
        }
    }

    pub fn workbench(&self) -> &SchemaWorkbench {
        &self.workbench
    }

    pub fn into_parts(self) -> (SchemaWorkbench, W) {
        (self.workbench, self.output)
    }

    /// Read and run commands until `quit` or end of input
    pub fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "{}", self.prompt())?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(());
            };

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(CommandError::Empty) => continue,
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    continue;
                }
            };

            match self.execute(command) {
                Ok(Flow::Quit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(e) => {
                    tracing::warn!("Command failed: {:#}", e);
                    writeln!(self.output, "error: {:#}", e)?;
                }
            }
        }
    }

    /// Run one command and report the events it caused
    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        tracing::debug!(?command, "Executing command");

        match command {
            Command::Paste => {
                let script = self.read_paste()?;
                if let Err(e) = self.workbench.submit(&script) {
                    tracing::debug!(fragment = e.fragment_index, "Pasted DDL rejected");
                }
            }
            Command::Load(path) => self.load_file(&path)?,
            Command::Dump(table) => self.dump(table.as_deref())?,
            Command::Dialect(None) => {
                let dialect = self.workbench.dialect();
                writeln!(self.output, "Parsing DDL as {}.", dialect.display_name())?;
            }
            Command::Dialect(Some(dialect)) => {
                self.workbench.set_dialect(dialect);
                tracing::info!(%dialect, "Changed dialect");
                writeln!(
                    self.output,
                    "Parsing new DDL as {}. The current schema is unchanged.",
                    dialect.display_name()
                )?;
            }
            Command::Tables => self.print_tables()?,
            Command::Select(index) => {
                if self.workbench.select_table(index) {
                    self.print_tables()?;
                } else {
                    writeln!(self.output, "There is no table {}.", index + 1)?;
                }
            }
            Command::Delete => {
                if self.workbench.delete_selected_table() {
                    self.report_events()?;
                    self.print_tables()?;
                } else {
                    writeln!(self.output, "No table selected.")?;
                }
            }
            Command::Open => {
                if self.workbench.open_selected_table() {
                    self.print_columns()?;
                } else {
                    writeln!(self.output, "No table selected.")?;
                }
            }
            Command::Columns => self.print_columns()?,
            Command::Column(index) => {
                if self.workbench.select_column(index) {
                    self.print_columns()?;
                } else if self.workbench.column_list().is_none() {
                    writeln!(self.output, "No table open.")?;
                } else {
                    writeln!(self.output, "There is no column {}.", index + 1)?;
                }
            }
            Command::DeleteColumn => {
                if self.workbench.delete_selected_column() {
                    self.report_events()?;
                    self.print_columns()?;
                } else {
                    writeln!(self.output, "No column selected.")?;
                }
            }
            Command::Edit => {
                if self.workbench.edit_selected_column() {
                    self.print_editor()?;
                } else {
                    writeln!(self.output, "No column selected.")?;
                }
            }
            Command::Close => {
                if !self.workbench.close_columns() {
                    writeln!(self.output, "No table open.")?;
                }
            }
            Command::Show => self.print_editor()?,
            Command::Flag(flag, value) => {
                if self
                    .workbench
                    .with_editor(|editor, _| editor.set_flag(flag, value))
                    .is_some()
                {
                    self.print_editor()?;
                } else {
                    self.no_editor()?;
                }
            }
            Command::Faker(function) => {
                if self
                    .workbench
                    .with_editor(|editor, _| editor.choose_faker(function))
                    .is_some()
                {
                    self.print_editor()?;
                } else {
                    self.no_editor()?;
                }
            }
            Command::Fakers => {
                let options = self
                    .workbench
                    .editor()
                    .map(|editor| editor.faker_options())
                    .unwrap_or_else(faker_catalog);
                writeln!(self.output, "{}", render::faker_list(&options))?;
            }
            Command::RefTable(name) => {
                match self
                    .workbench
                    .with_editor(|editor, store| editor.choose_reference_table(store, &name))
                {
                    Some(true) => self.print_editor()?,
                    Some(false) => {
                        writeln!(self.output, "'{}' is not one of the other tables.", name)?
                    }
                    None => self.no_editor()?,
                }
            }
            Command::RefColumn(name) => {
                match self.workbench.with_editor(|editor, _| {
                    (editor.choose_reference_column(&name), editor.reference_table().is_some())
                }) {
                    Some((true, _)) => self.print_editor()?,
                    Some((false, false)) => {
                        writeln!(self.output, "Choose a reference table first.")?
                    }
                    Some((false, true)) => {
                        writeln!(self.output, "'{}' is not a column of that table.", name)?
                    }
                    None => self.no_editor()?,
                }
            }
            Command::ClearSource => {
                if self
                    .workbench
                    .with_editor(|editor, _| editor.clear_source())
                    .is_some()
                {
                    self.print_editor()?;
                } else {
                    self.no_editor()?;
                }
            }
            Command::Apply => match self.workbench.apply_editor() {
                Some(Ok(_)) => {
                    self.report_events()?;
                    self.print_columns()?;
                }
                Some(Err(_)) => {}
                None => self.no_editor()?,
            },
            Command::Cancel => {
                if !self.workbench.cancel_editor() {
                    self.no_editor()?;
                }
            }
            Command::Help => writeln!(self.output, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        self.report_events()?;
        Ok(Flow::Continue)
    }

    /// Submit the DDL in `path`
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let script = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read DDL from {:?}", path))?;
        tracing::info!(path = %path.display(), "Loading DDL file");

        if self.workbench.submit(&script).is_ok() {
            self.report_events()?;
            self.print_tables()?;
        }
        self.report_events()
    }

    fn prompt(&self) -> String {
        let table = self.workbench.open_table().map(|table| table.name.as_str());
        match (table, self.workbench.editor()) {
            (_, Some(editor)) => {
                format!("fakesql:{}.{}> ", editor.table_name(), editor.column_name())
            }
            (Some(table), None) => format!("fakesql:{}> ", table),
            (None, None) => "fakesql> ".to_string(),
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        Ok((read > 0).then_some(line))
    }

    /// Collect lines up to the terminator or end of input
    fn read_paste(&mut self) -> Result<String> {
        writeln!(
            self.output,
            "Paste DDL, then a line with a single '{}':",
            PASTE_TERMINATOR
        )?;
        self.output.flush()?;

        let mut script = String::new();
        while let Some(line) = self.read_line()? {
            if line.trim_end() == PASTE_TERMINATOR {
                break;
            }
            script.push_str(&line);
        }
        Ok(script)
    }

    fn report_events(&mut self) -> Result<()> {
        for event in self.workbench.drain_events() {
            for line in render::event_lines(&event) {
                writeln!(self.output, "{}", line)?;
            }
        }
        Ok(())
    }

    fn no_editor(&mut self) -> Result<()> {
        writeln!(self.output, "No column being edited. Use 'edit' first.")?;
        Ok(())
    }

    fn print_tables(&mut self) -> Result<()> {
        let rows = self.workbench.table_rows();
        if rows.is_empty() {
            writeln!(self.output, "No tables. Use 'paste' or 'load <file>'.")?;
            return Ok(());
        }
        let table = render::tables_table(&rows, self.workbench.selected_table());
        writeln!(self.output, "{}", table)?;
        Ok(())
    }

    fn print_columns(&mut self) -> Result<()> {
        let Some(name) = self.workbench.open_table().map(|table| table.name.clone()) else {
            writeln!(self.output, "No table open. Use 'select <n>' then 'open'.")?;
            return Ok(());
        };
        let table = render::columns_table(
            &self.workbench.column_rows(),
            self.workbench.selected_column(),
        );
        writeln!(self.output, "{}\n{}", name, table)?;
        Ok(())
    }

    fn print_editor(&mut self) -> Result<()> {
        let Some(editor) = self.workbench.editor() else {
            return self.no_editor();
        };
        let table = render::editor_table(editor, self.workbench.store());
        writeln!(self.output, "{}", table)?;
        Ok(())
    }

    fn dump(&mut self, table_name: Option<&str>) -> Result<()> {
        let json = match table_name {
            None => self.workbench.store().to_json_pretty()?,
            Some(name) => match self
                .workbench
                .store()
                .tables()
                .iter()
                .find(|table| table.name == name)
            {
                Some(table) => table.to_json_pretty()?,
                None => {
                    writeln!(self.output, "There is no table '{}'.", name)?;
                    return Ok(());
                }
            },
        };
        writeln!(self.output, "{}", json)?;
        Ok(())
    }
}

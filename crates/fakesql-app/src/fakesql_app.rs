//! fakesql terminal front-end
//!
//! Wires the schema workbench to a line-oriented shell:
//!
//! - `cli` - command line arguments
//! - `settings` - the JSON settings file
//! - `logging` - tracing subscriber setup
//! - `shell` - command parsing and the read-eval loop
//! - `render` - tables and messages shown to the user

pub mod cli;
pub mod logging;
pub mod render;
pub mod settings;
pub mod shell;

pub use cli::Cli;
pub use settings::AppSettings;
pub use shell::{Command, CommandError, Flow, Shell};

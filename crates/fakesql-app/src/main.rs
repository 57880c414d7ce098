use std::io;

use anyhow::Result;
use clap::Parser;
use fakesql_app::logging::{self, LoggingConfig};
use fakesql_app::{AppSettings, Cli, Shell};
use fakesql_designer::SchemaWorkbench;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => AppSettings::load_from(path)?,
        None => AppSettings::load()?,
    };
    settings.apply_overrides(&cli);

    let _log_guard = logging::init(LoggingConfig::from_settings(&settings.logging))?;
    tracing::info!(dialect = %settings.dialect, files = cli.files.len(), "Starting fakesql");

    let workbench = SchemaWorkbench::new(settings.dialect)
        .with_title_case(settings.display.title_case_tables);
    let mut shell = Shell::new(workbench, io::stdin().lock(), io::stdout().lock());

    for file in &cli.files {
        shell.load_file(file)?;
    }

    shell.run()
}

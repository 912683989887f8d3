//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, OutputFormat, Settings};
use crate::domain::{validate, TreeBuilder};
use crate::parser::read_records;
use crate::render::render;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        // Completions depend on nothing but the argument definitions
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        Some(Commands::Tree { file }) => cmd_tree(file, effective_settings(cli)?.format),
        Some(Commands::Check { file }) => {
            effective_settings(cli)?;
            cmd_check(file)
        }
        Some(Commands::Config { command }) => cmd_config(command, &effective_settings(cli)?),
        None => Err(CliError::Usage(
            "no command given, see `rectree --help`".to_string(),
        )),
    }
}

/// Load the configuration layers, apply the `--format` flag and the colour
/// choice.
fn effective_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        settings.format = format;
    }
    if !settings.color {
        output::disable_color();
    }
    debug!(?settings, "effective settings");
    Ok(settings)
}

#[instrument(level = "debug")]
fn cmd_tree(file: &Path, format: OutputFormat) -> CliResult<()> {
    let records = read_records(file)?;
    match TreeBuilder::new().build(&records)? {
        Some(root) => output::info(&render(&root, format)?),
        None => output::warning("no tree (empty input)"),
    }
    Ok(())
}

#[instrument(level = "debug")]
fn cmd_check(file: &Path) -> CliResult<()> {
    let records = read_records(file)?;
    if records.is_empty() {
        output::warning("no records, nothing to check");
        return Ok(());
    }
    validate(&records)?;
    output::success(&format!("{} records form a valid tree", records.len()));
    Ok(())
}

fn cmd_config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(settings.to_toml()?.trim_end()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

//! QuickScribe CLI - folder and calendar organized notes from the terminal
//!
//! Every invocation is one action against the note store; the current view
//! (selected folder or date, open forms, unsaved draft) is kept in a session
//! file between invocations.

mod cli;
mod commands;
mod config;
mod error;
mod session;
#[cfg(test)]
mod tests;

use std::env;
use std::path::PathBuf;

use clap::Parser;

use crate::cli::{Cli, Commands, FolderCommands};
use crate::commands::add::run_add;
use crate::commands::cancel::run_cancel;
use crate::commands::common::{resolve_db_path, resolve_session_path, App};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::folder::{
    run_folder_add, run_folder_delete, run_folder_list, run_folder_open,
};
use crate::commands::navigate::{run_date, run_home};
use crate::commands::show::run_show;
use crate::config::{default_config_path, CliConfig};
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scribe=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Show {
        json: false,
        html: None,
    });

    match command {
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref()),
        Commands::Config { command } => run_config(command, &default_config_path()),
        command => {
            let config = CliConfig::load().map_err(CliError::Config)?;
            let db_path = resolve_db_path(
                cli.db_path,
                env::var_os("SCRIBE_DB_PATH").map(PathBuf::from),
                config.db_path(),
            );
            let session_path = resolve_session_path(
                cli.session,
                env::var_os("SCRIBE_SESSION_PATH").map(PathBuf::from),
            );

            let mut app = App::open(&db_path, &session_path)?;
            run_with_store(&mut app, &config, command)
        }
    }
}

fn run_with_store(app: &mut App, config: &CliConfig, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Home => run_home(app),
        Commands::Folder { command } => match command {
            FolderCommands::Add { name } => run_folder_add(app, name),
            FolderCommands::Open { id } => run_folder_open(app, id),
            FolderCommands::Rm { id } => run_folder_delete(app, id),
            FolderCommands::List { json } => run_folder_list(app, json),
        },
        Commands::Date { date } => run_date(app, date.as_deref()),
        Commands::Add { heading, content } => run_add(app, config, heading, content),
        Commands::Edit {
            id,
            heading,
            content,
        } => run_edit(app, id, heading, content),
        Commands::Cancel => run_cancel(app),
        Commands::Rm { id } => run_delete(app, id),
        Commands::Show { json, html } => run_show(app, json, html.as_deref()),
        // Handled before the store is opened
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}

use std::path::Path;

use scribe_core::HexColor;

use crate::cli::ConfigCommands;
use crate::config::CliConfig;
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, config_path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            default_db_path,
            banner,
            body,
        } => run_config_init(config_path, default_db_path, banner, body),
        ConfigCommands::Show => run_config_show(config_path),
    }
}

/// Merge the given values into the config file, creating it if needed
pub fn run_config_init(
    config_path: &Path,
    db_path: Option<String>,
    banner: Option<HexColor>,
    body: Option<HexColor>,
) -> Result<(), CliError> {
    let mut config = CliConfig::load_from_path(config_path).map_err(CliError::Config)?;

    if db_path.is_some() {
        config.db_path = db_path;
    }
    if let Some(color) = banner {
        config.default_banner_color = Some(color.to_string());
    }
    if let Some(color) = body {
        config.default_body_color = Some(color.to_string());
    }

    config
        .save_to_path(config_path)
        .map_err(CliError::Config)?;
    tracing::info!("Saved CLI config to {}", config_path.display());
    println!("{}", config_path.display());
    Ok(())
}

fn run_config_show(config_path: &Path) -> Result<(), CliError> {
    let config = CliConfig::load_from_path(config_path).map_err(CliError::Config)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

//! View state carried between invocations.

use std::path::Path;

use scribe_core::view::ViewState;

use crate::error::CliError;

/// Load the saved view state; a missing or unreadable session starts fresh
pub fn load_state(path: &Path) -> Result<ViewState, CliError> {
    if !path.exists() {
        return Ok(ViewState::default());
    }

    let raw = std::fs::read_to_string(path)?;
    match serde_json::from_str(&raw) {
        Ok(state) => Ok(state),
        Err(error) => {
            tracing::warn!(
                "Ignoring unreadable session at {}: {error}",
                path.display()
            );
            Ok(ViewState::default())
        }
    }
}

pub fn save_state(path: &Path, state: &ViewState) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(state)?)?;
    Ok(())
}

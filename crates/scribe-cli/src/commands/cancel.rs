use scribe_core::view::Command;

use crate::commands::common::{report, App};
use crate::error::CliError;

pub fn run_cancel(app: &mut App) -> Result<(), CliError> {
    let command = if app.state.editing_note_id.is_some() {
        Command::CancelEdit
    } else {
        Command::CancelCreate
    };

    let notice = app.apply(command)?;
    if notice.is_none() {
        println!("Cancelled.");
    }
    report(notice)
}

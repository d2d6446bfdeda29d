use scribe_core::view::Command;
use scribe_core::NoteId;

use crate::commands::common::{report, App};
use crate::error::CliError;

pub fn run_delete(app: &mut App, id: NoteId) -> Result<(), CliError> {
    report(app.apply(Command::DeleteNote(id))?)
}

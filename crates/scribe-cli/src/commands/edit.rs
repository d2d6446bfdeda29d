use scribe_core::view::Command;
use scribe_core::{NoteFields, NoteId};

use crate::cli::NoteContentArgs;
use crate::commands::common::{report, resolve_description, App};
use crate::error::CliError;

/// Put a note in edit mode and save the given changes.
///
/// With no changes on the command line the description opens in the editor.
pub fn run_edit(
    app: &mut App,
    id: NoteId,
    heading: Option<String>,
    content: NoteContentArgs,
) -> Result<(), CliError> {
    let Some(note) = app.store.get_note(id)? else {
        if app.state.is_editing(id) {
            app.apply(Command::CancelEdit)?;
        }
        return Err(CliError::Rejected(format!("Note {id} no longer exists.")));
    };

    let base = if app.state.is_editing(id) {
        app.state.draft.clone().unwrap_or_else(|| note.fields())
    } else {
        report(app.apply(Command::BeginEdit(id))?)?;
        note.fields()
    };

    let nothing_given = heading.is_none()
        && content.description.is_none()
        && content.banner.is_none()
        && content.body.is_none();
    let description = resolve_description(
        content.description,
        content.editor || nothing_given,
        base.description.as_deref().unwrap_or(""),
    )?
    .or(base.description);

    let fields = NoteFields {
        heading: heading.unwrap_or(base.heading),
        description,
        banner_color: content.banner.unwrap_or(base.banner_color),
        body_color: content.body.unwrap_or(base.body_color),
    };

    report(app.apply(Command::SaveEdit(fields))?)
}

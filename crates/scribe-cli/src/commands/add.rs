use scribe_core::view::Command;
use scribe_core::NoteFields;

use crate::cli::NoteContentArgs;
use crate::commands::common::{report, resolve_description, App};
use crate::config::CliConfig;
use crate::error::CliError;

/// Open the create form and submit it in one step.
///
/// When an earlier submit was rejected the form is still open with its
/// values in the draft; anything not given on the command line comes from
/// there before falling back to the configured defaults.
pub fn run_add(
    app: &mut App,
    config: &CliConfig,
    heading: Option<String>,
    content: NoteContentArgs,
) -> Result<(), CliError> {
    let draft = if app.state.creating_note {
        app.state.draft.clone()
    } else {
        app.apply(Command::BeginCreate)?;
        None
    };

    let draft_description = draft.as_ref().and_then(|d| d.description.clone());
    let description = resolve_description(
        content.description,
        content.editor,
        draft_description.as_deref().unwrap_or(""),
    )?
    .or(draft_description);

    let banner_color = match content
        .banner
        .or_else(|| draft.as_ref().map(|d| d.banner_color.clone()))
    {
        Some(color) => color,
        None => config.banner_color().map_err(CliError::Config)?,
    };
    let body_color = match content
        .body
        .or_else(|| draft.as_ref().map(|d| d.body_color.clone()))
    {
        Some(color) => color,
        None => config.body_color().map_err(CliError::Config)?,
    };

    let fields = NoteFields {
        heading: heading
            .or_else(|| draft.map(|d| d.heading))
            .unwrap_or_default(),
        description,
        banner_color,
        body_color,
    };

    report(app.apply(Command::SubmitCreate(fields))?)
}

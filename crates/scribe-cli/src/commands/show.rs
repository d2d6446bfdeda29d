use std::path::Path;

use scribe_core::render::render_page;
use scribe_core::view::{Scope, Screen, ViewState};
use scribe_core::{Folder, NoteId};
use serde::Serialize;

use crate::commands::common::{format_note_lines, note_to_list_item, App, NoteListItem};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ScreenItem {
    pub title: String,
    pub scope: Scope,
    pub creating_note: bool,
    pub editing_note_id: Option<i64>,
    pub folders: Vec<Folder>,
    pub notes: Vec<NoteListItem>,
}

pub fn screen_to_item(screen: &Screen) -> ScreenItem {
    ScreenItem {
        title: screen.title(),
        scope: screen.state.scope,
        creating_note: screen.state.creating_note,
        editing_note_id: screen.state.editing_note_id.map(NoteId::get),
        folders: screen.folders.clone(),
        notes: screen.notes.iter().map(note_to_list_item).collect(),
    }
}

pub fn run_show(app: &mut App, as_json: bool, html_path: Option<&Path>) -> Result<(), CliError> {
    let screen = app.screen()?;

    if let Some(path) = html_path {
        std::fs::write(path, render_page(&screen))?;
        println!("{}", path.display());
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&screen_to_item(&screen))?);
    } else if html_path.is_none() {
        print_screen(&screen);
    }

    Ok(())
}

pub fn print_screen(screen: &Screen) {
    for line in format_screen_lines(screen) {
        println!("{line}");
    }
}

pub fn format_screen_lines(screen: &Screen) -> Vec<String> {
    let mut lines = vec![screen.title()];

    if let Some(line) = form_status(&screen.state) {
        lines.push(line);
    }

    if screen.notes.is_empty() {
        lines.push(screen.empty_message());
    } else {
        lines.extend(format_note_lines(
            &screen.notes,
            screen.state.editing_note_id,
        ));
    }

    lines
}

fn form_status(state: &ViewState) -> Option<String> {
    if let Some(id) = state.editing_note_id {
        return Some(format!("(editing note {id})"));
    }
    if state.creating_note {
        let kept = if state.draft.is_some() {
            "; draft kept"
        } else {
            ""
        };
        return Some(format!("(new note form open{kept})"));
    }
    None
}

use std::env;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::Command as Process;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Local, NaiveDate, NaiveDateTime, Utc};
use scribe_core::sanitize::strip_scripts;
use scribe_core::util::plain_text_preview;
use scribe_core::view::{Command, Controller, Notice, NoticeLevel, Screen, ViewState};
use scribe_core::{Folder, FolderId, Note, NoteId, Store};
use serde::Serialize;

use crate::error::CliError;
use crate::session::{load_state, save_state};

/// An open store together with the session it drives
pub struct App {
    pub store: Store,
    pub state: ViewState,
    pub session_path: PathBuf,
    /// Where `scribe date` without an argument lands
    pub today: NaiveDate,
}

impl App {
    pub fn open(db_path: &Path, session_path: &Path) -> Result<Self, CliError> {
        let store = Store::open(db_path)?;
        let state = load_state(session_path)?;

        Ok(Self {
            store,
            state,
            session_path: session_path.to_path_buf(),
            today: Local::now().date_naive(),
        })
    }

    /// Run one controller command and persist the resulting state
    pub fn apply(&mut self, command: Command) -> Result<Option<Notice>, CliError> {
        let controller = Controller::new(&self.store, self.today);
        let outcome = controller.handle(self.state.clone(), command)?;

        self.state = outcome.state;
        save_state(&self.session_path, &self.state)?;
        Ok(outcome.notice)
    }

    /// Resolve the current view, saving any correction to the session
    pub fn screen(&mut self) -> Result<Screen, CliError> {
        let controller = Controller::new(&self.store, self.today);
        let screen = controller.screen(self.state.clone())?;

        if screen.state != self.state {
            self.state = screen.state.clone();
            save_state(&self.session_path, &self.state)?;
        }
        Ok(screen)
    }
}

/// Print a success or info notice; warnings and errors become `CliError`
pub fn report(notice: Option<Notice>) -> Result<(), CliError> {
    let Some(notice) = notice else {
        return Ok(());
    };

    match notice.level {
        NoticeLevel::Success | NoticeLevel::Info => {
            println!("{}", notice.message);
            Ok(())
        }
        NoticeLevel::Warning | NoticeLevel::Error => Err(CliError::Rejected(notice.message)),
    }
}

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: i64,
    pub heading: String,
    pub preview: String,
    pub description: String,
    pub banner_color: String,
    pub body_color: String,
    pub folder_id: Option<i64>,
    pub note_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub relative_time: String,
}

pub fn note_to_list_item(note: &Note) -> NoteListItem {
    let now = Utc::now().naive_utc();

    NoteListItem {
        id: note.id.get(),
        heading: note.heading.clone(),
        preview: plain_text_preview(&note.description, 80),
        description: strip_scripts(&note.description),
        banner_color: note.banner_color.to_string(),
        body_color: note.body_color.to_string(),
        folder_id: note.folder_id.map(FolderId::get),
        note_date: note.note_date,
        created_at: note.created_at,
        relative_time: format_relative_time(note.created_at, now),
    }
}

pub fn format_note_lines(notes: &[Note], editing: Option<NoteId>) -> Vec<String> {
    let now = Utc::now().naive_utc();
    notes
        .iter()
        .map(|note| {
            let marker = if editing == Some(note.id) { '*' } else { ' ' };
            let heading = truncate(&note.heading, 30);
            let preview = plain_text_preview(&note.description, 40);
            let relative_time = format_relative_time(note.created_at, now);

            format!(
                "{marker}{:>5}  {heading:<30}  {preview:<40}  {relative_time}",
                note.id
            )
        })
        .collect()
}

pub fn format_folder_lines(folders: &[Folder], selected: Option<FolderId>) -> Vec<String> {
    folders
        .iter()
        .map(|folder| {
            let marker = if selected == Some(folder.id) { '*' } else { ' ' };
            format!("{marker}{:>5}  {}", folder.id, folder.name)
        })
        .collect()
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut truncated = value.chars().take(max_chars.saturating_sub(3)).collect::<String>();
    truncated.push_str("...");
    truncated
}

pub fn format_relative_time(timestamp: NaiveDateTime, now: NaiveDateTime) -> String {
    let diff = (now - timestamp).num_seconds().max(0);
    let minute = 60;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::InvalidDate(value.to_string()))
}

/// Description from `--description`, stdin (`-`) or the editor.
///
/// `Ok(None)` means the caller should keep whatever it already has.
pub fn resolve_description(
    description: Option<String>,
    use_editor: bool,
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    if use_editor {
        let edited = capture_editor_input_with_initial(initial_content)?;
        return Ok(Some(edited.unwrap_or_default()));
    }

    match description.as_deref() {
        Some("-") => read_stdin().map(Some),
        _ => Ok(description),
    }
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn read_stdin() -> Result<String, CliError> {
    let mut buffer = String::new();
    io::stdin().lock().read_to_string(&mut buffer)?;
    normalize_content(&buffer).ok_or(CliError::EmptyStdin)
}

pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_note_file_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let note_content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&note_content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Process::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let mut command = Process::new(program);
            command.args(parts).arg(file_path);

            let status = command.status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

fn create_temp_note_file_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("scribe-note-{}-{now}.html", std::process::id()))
}

/// `--db-path`, then `SCRIBE_DB_PATH`, then the config file, then the data dir
pub fn resolve_db_path(
    cli_db_path: Option<PathBuf>,
    env_db_path: Option<PathBuf>,
    config_db_path: Option<PathBuf>,
) -> PathBuf {
    cli_db_path
        .or(env_db_path)
        .or(config_db_path)
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    data_dir().join("notes.db")
}

/// `--session`, then `SCRIBE_SESSION_PATH`, then the data dir
pub fn resolve_session_path(
    cli_session_path: Option<PathBuf>,
    env_session_path: Option<PathBuf>,
) -> PathBuf {
    cli_session_path
        .or(env_session_path)
        .unwrap_or_else(default_session_path)
}

pub fn default_session_path() -> PathBuf {
    data_dir().join("session.json")
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scribe")
}

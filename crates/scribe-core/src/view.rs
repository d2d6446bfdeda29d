//! View-state controller
//!
//! `ViewState` is the transient navigation and form state of a client: which
//! folder or date is selected, whether the create form is open, which note is
//! being edited, and any draft the user has not managed to save yet. It is a
//! plain serializable value; clients own it and pass it through
//! [`Controller::handle`] for every user action.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Folder, FolderId, NewNote, Note, NoteFields, NoteId, Placement};
use crate::services::Store;

/// Which notes are on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "view")]
pub enum Scope {
    /// Undated notes, optionally narrowed to one folder
    Home { folder_id: Option<FolderId> },
    /// Notes on one calendar date, whatever their folder
    ByDate { date: NaiveDate },
}

impl Scope {
    /// Unscoped home
    pub const fn home() -> Self {
        Self::Home { folder_id: None }
    }

    /// Where a note created in this scope is placed
    pub const fn placement(self) -> Placement {
        match self {
            Self::Home {
                folder_id: Some(id),
            } => Placement::Folder(id),
            Self::Home { folder_id: None } => Placement::Home,
            Self::ByDate { date } => Placement::Date(date),
        }
    }

    /// The selected folder, if any
    pub const fn folder_id(self) -> Option<FolderId> {
        match self {
            Self::Home { folder_id } => folder_id,
            Self::ByDate { .. } => None,
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::home()
    }
}

/// Client-held navigation and form state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub scope: Scope,
    /// The create form is open
    pub creating_note: bool,
    /// The note currently in edit mode
    pub editing_note_id: Option<NoteId>,
    /// Values from a rejected submit, kept so the user does not retype them
    pub draft: Option<NoteFields>,
}

impl ViewState {
    /// Switch scope, closing both forms and dropping the draft
    fn navigate(&mut self, scope: Scope) {
        self.scope = scope;
        self.reset_forms();
    }

    fn reset_forms(&mut self) {
        self.creating_note = false;
        self.editing_note_id = None;
        self.draft = None;
    }

    pub fn is_editing(&self, id: NoteId) -> bool {
        self.editing_note_id == Some(id)
    }
}

/// A user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectHome,
    SelectFolder(FolderId),
    /// Date view scoped to today
    ShowDateView,
    PickDate(NaiveDate),
    CreateFolder(String),
    DeleteFolder(FolderId),
    BeginCreate,
    SubmitCreate(NoteFields),
    CancelCreate,
    BeginEdit(NoteId),
    SaveEdit(NoteFields),
    CancelEdit,
    DeleteNote(NoteId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Message for the user about the last action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    /// Turn a recoverable error into a notice; anything else propagates
    fn from_error(error: Error) -> Result<Self> {
        if !error.is_recoverable() {
            return Err(error);
        }
        Ok(match error {
            Error::DuplicateName(_) => Self::new(NoticeLevel::Error, error.to_string()),
            Error::Validation(message) => Self::warning(message),
            other => Self::warning(other.to_string()),
        })
    }
}

/// Result of handling a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub state: ViewState,
    pub notice: Option<Notice>,
}

impl Outcome {
    const fn quiet(state: ViewState) -> Self {
        Self {
            state,
            notice: None,
        }
    }

    const fn with(state: ViewState, notice: Notice) -> Self {
        Self {
            state,
            notice: Some(notice),
        }
    }
}

/// Everything a client needs to draw the current view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    /// The state the screen was resolved from, after dangling references
    /// were dropped
    pub state: ViewState,
    /// "Home", the folder name, or the ISO date
    pub label: String,
    pub folders: Vec<Folder>,
    pub notes: Vec<Note>,
}

impl Screen {
    pub fn title(&self) -> String {
        match self.state.scope {
            Scope::Home { .. } => format!("Notes in: {}", self.label),
            Scope::ByDate { .. } => format!("Notes on: {}", self.label),
        }
    }

    pub fn empty_message(&self) -> String {
        format!("No notes in '{}'. Add one above!", self.label)
    }

    /// The note in edit mode, if it is on screen
    pub fn editing_note(&self) -> Option<&Note> {
        let id = self.state.editing_note_id?;
        self.notes.iter().find(|note| note.id == id)
    }
}

/// Applies commands to a `ViewState` against a `Store`
pub struct Controller<'a> {
    store: &'a Store,
    today: NaiveDate,
}

impl<'a> Controller<'a> {
    /// `today` is where the date view opens
    pub const fn new(store: &'a Store, today: NaiveDate) -> Self {
        Self { store, today }
    }

    /// Handle one user action.
    ///
    /// Duplicate names, validation failures and vanished notes come back as a
    /// notice with the state kept; every other error is returned.
    pub fn handle(&self, mut state: ViewState, command: Command) -> Result<Outcome> {
        tracing::debug!("Handling {command:?}");

        match command {
            Command::SelectHome => {
                state.navigate(Scope::home());
                Ok(Outcome::quiet(state))
            }
            Command::SelectFolder(id) => {
                state.navigate(Scope::Home {
                    folder_id: Some(id),
                });
                Ok(Outcome::quiet(state))
            }
            Command::ShowDateView => {
                state.navigate(Scope::ByDate { date: self.today });
                Ok(Outcome::quiet(state))
            }
            Command::PickDate(date) => {
                state.navigate(Scope::ByDate { date });
                Ok(Outcome::quiet(state))
            }
            Command::CreateFolder(name) => match self.store.create_folder(&name) {
                Ok(folder) => Ok(Outcome::with(
                    state,
                    Notice::success(format!("Folder '{}' created.", folder.name)),
                )),
                Err(error) => Ok(Outcome::with(state, Notice::from_error(error)?)),
            },
            Command::DeleteFolder(id) => self.delete_folder(state, id),
            Command::BeginCreate => {
                state.creating_note = true;
                state.editing_note_id = None;
                state.draft = None;
                Ok(Outcome::quiet(state))
            }
            Command::SubmitCreate(fields) => self.submit_create(state, fields),
            Command::CancelCreate => {
                if !state.creating_note {
                    return Ok(Outcome::with(state, Notice::info("No note form is open.")));
                }
                state.creating_note = false;
                state.draft = None;
                Ok(Outcome::quiet(state))
            }
            Command::BeginEdit(id) => {
                if self.store.get_note(id)?.is_none() {
                    return Ok(Outcome::with(
                        state,
                        Notice::warning(format!("Note {id} no longer exists.")),
                    ));
                }
                state.editing_note_id = Some(id);
                state.creating_note = false;
                state.draft = None;
                Ok(Outcome::quiet(state))
            }
            Command::SaveEdit(fields) => self.save_edit(state, fields),
            Command::CancelEdit => {
                if state.editing_note_id.is_none() {
                    return Ok(Outcome::with(state, Notice::info("No note is being edited.")));
                }
                state.editing_note_id = None;
                state.draft = None;
                Ok(Outcome::quiet(state))
            }
            Command::DeleteNote(id) => {
                self.store.delete_note(id)?;
                if state.is_editing(id) {
                    state.editing_note_id = None;
                    state.draft = None;
                }
                Ok(Outcome::with(state, Notice::success("Note deleted!")))
            }
        }
    }

    fn delete_folder(&self, mut state: ViewState, id: FolderId) -> Result<Outcome> {
        self.store.delete_folder(id)?;

        if state.scope.folder_id() == Some(id) {
            state.scope = Scope::home();
        }
        state.creating_note = false;
        state.draft = None;
        // The edited note may have gone with the folder
        if let Some(editing) = state.editing_note_id {
            if self.store.get_note(editing)?.is_none() {
                state.editing_note_id = None;
            }
        }

        Ok(Outcome::with(state, Notice::success("Folder deleted.")))
    }

    fn submit_create(&self, mut state: ViewState, fields: NoteFields) -> Result<Outcome> {
        let label = self.validate_scope(&mut state)?;
        let new_note = NewNote::new(fields, state.scope.placement());

        match self.store.create_note(&new_note) {
            Ok(_) => {
                state.creating_note = false;
                state.editing_note_id = None;
                state.draft = None;
                Ok(Outcome::with(
                    state,
                    Notice::success(format!("Note added to '{label}'!")),
                ))
            }
            Err(error) => {
                let notice = Notice::from_error(error)?;
                state.creating_note = true;
                state.draft = Some(new_note.fields);
                Ok(Outcome::with(state, notice))
            }
        }
    }

    fn save_edit(&self, mut state: ViewState, fields: NoteFields) -> Result<Outcome> {
        let Some(id) = state.editing_note_id else {
            return Ok(Outcome::with(
                state,
                Notice::warning("No note is being edited."),
            ));
        };

        match self.store.update_note(id, &fields) {
            Ok(_) => {
                state.editing_note_id = None;
                state.draft = None;
                Ok(Outcome::with(
                    state,
                    Notice::success("Note updated successfully!"),
                ))
            }
            Err(Error::Validation(message)) => {
                state.draft = Some(fields);
                Ok(Outcome::with(state, Notice::warning(message)))
            }
            Err(error) => {
                let notice = Notice::from_error(error)?;
                state.editing_note_id = None;
                state.draft = None;
                Ok(Outcome::with(state, notice))
            }
        }
    }

    /// Drop a selected folder that no longer exists and return the scope label
    fn validate_scope(&self, state: &mut ViewState) -> Result<String> {
        match state.scope {
            Scope::Home {
                folder_id: Some(id),
            } => {
                if let Some(folder) = self.store.get_folder(id)? {
                    return Ok(folder.name);
                }
                tracing::warn!("Selected folder {id} no longer exists; showing Home");
                state.scope = Scope::home();
                Ok("Home".to_string())
            }
            Scope::Home { folder_id: None } => Ok("Home".to_string()),
            Scope::ByDate { date } => Ok(date.to_string()),
        }
    }

    /// Resolve the state into the folders and notes to display
    pub fn screen(&self, mut state: ViewState) -> Result<Screen> {
        let label = self.validate_scope(&mut state)?;
        let notes = match state.scope {
            Scope::Home { folder_id } => self.store.list_notes_by_folder(folder_id)?,
            Scope::ByDate { date } => self.store.list_notes_by_date(date)?,
        };
        let folders = self.store.list_folders()?;

        Ok(Screen {
            state,
            label,
            folders,
            notes,
        })
    }
}

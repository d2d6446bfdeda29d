use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use scribe_core::view::{Scope, ViewState};
use scribe_core::{HexColor, NoteId, Placement};

use crate::cli::{CompletionShell, NoteContentArgs};
use crate::commands::add::run_add;
use crate::commands::cancel::run_cancel;
use crate::commands::common::{
    default_editor, format_relative_time, normalize_content, parse_date, resolve_db_path,
    resolve_session_path, App,
};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config_init;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::folder::{run_folder_add, run_folder_delete, run_folder_open};
use crate::commands::navigate::{run_date, run_home};
use crate::commands::show::{format_screen_lines, run_show, screen_to_item};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::session::{load_state, save_state};

#[test]
fn normalize_content_trims_and_rejects_empty() {
    assert_eq!(normalize_content("  hello  "), Some("hello".to_string()));
    assert_eq!(normalize_content(" \n\t "), None);
}

#[test]
fn default_editor_is_defined() {
    assert!(!default_editor().is_empty());
}

#[test]
fn format_relative_time_units() {
    let now = day(2024, 6, 15).and_hms_opt(12, 0, 0).unwrap();
    assert_eq!(
        format_relative_time(now - chrono::Duration::seconds(30), now),
        "just now"
    );
    assert_eq!(
        format_relative_time(now - chrono::Duration::minutes(2), now),
        "2m ago"
    );
    assert_eq!(
        format_relative_time(now - chrono::Duration::hours(2), now),
        "2h ago"
    );
    assert_eq!(
        format_relative_time(now + chrono::Duration::hours(1), now),
        "just now"
    );
}

#[test]
fn parse_date_requires_iso_format() {
    assert_eq!(parse_date(" 2024-03-01 ").unwrap(), day(2024, 3, 1));
    assert!(matches!(
        parse_date("03/01/2024"),
        Err(CliError::InvalidDate(_))
    ));
    assert!(matches!(parse_date("2024-02-30"), Err(CliError::InvalidDate(_))));
}

#[test]
fn resolve_db_path_prefers_flag_then_env_then_config() {
    let flag = Some(PathBuf::from("/flag.db"));
    let env = Some(PathBuf::from("/env.db"));
    let config = Some(PathBuf::from("/config.db"));

    assert_eq!(
        resolve_db_path(flag, env.clone(), config.clone()),
        PathBuf::from("/flag.db")
    );
    assert_eq!(
        resolve_db_path(None, env, config.clone()),
        PathBuf::from("/env.db")
    );
    assert_eq!(resolve_db_path(None, None, config), PathBuf::from("/config.db"));
    assert!(resolve_db_path(None, None, None).ends_with("scribe/notes.db"));
}

#[test]
fn resolve_session_path_prefers_flag_then_env() {
    assert_eq!(
        resolve_session_path(Some(PathBuf::from("/a.json")), Some(PathBuf::from("/b.json"))),
        PathBuf::from("/a.json")
    );
    assert_eq!(
        resolve_session_path(None, Some(PathBuf::from("/b.json"))),
        PathBuf::from("/b.json")
    );
    assert!(resolve_session_path(None, None).ends_with("scribe/session.json"));
}

#[test]
fn duplicate_folder_is_rejected_once_stored() {
    let paths = TestPaths::new();
    let mut app = paths.open();

    run_folder_add(&mut app, "Work".to_string()).unwrap();
    let error = run_folder_add(&mut app, "Work".to_string()).unwrap_err();
    assert!(matches!(error, CliError::Rejected(ref message) if message == "Folder 'Work' already exists"));

    assert_eq!(app.store.list_folders().unwrap().len(), 1);
    paths.cleanup();
}

#[test]
fn add_places_note_in_open_folder() {
    let paths = TestPaths::new();
    let mut app = paths.open();

    run_folder_add(&mut app, "Work".to_string()).unwrap();
    let work = app.store.list_folders().unwrap().remove(0);
    run_folder_open(&mut app, work.id).unwrap();

    run_add(
        &mut app,
        &CliConfig::default(),
        Some("Standup".to_string()),
        content(Some("<p>notes</p>")),
    )
    .unwrap();

    let filed = app.store.list_notes_by_folder(Some(work.id)).unwrap();
    assert_eq!(filed.len(), 1);
    assert_eq!(filed[0].heading, "Standup");
    assert_eq!(filed[0].placement(), Placement::Folder(work.id));
    assert!(app.store.list_notes_by_folder(None).unwrap().is_empty());
    paths.cleanup();
}

#[test]
fn open_missing_folder_is_rejected() {
    let paths = TestPaths::new();
    let mut app = paths.open();

    let error = run_folder_open(&mut app, "42".parse().unwrap()).unwrap_err();
    assert!(matches!(error, CliError::Rejected(_)));
    assert_eq!(app.state.scope, Scope::home());
    paths.cleanup();
}

#[test]
fn add_uses_configured_default_colors() {
    let paths = TestPaths::new();
    let mut app = paths.open();
    let config = CliConfig {
        default_body_color: Some("#000000".to_string()),
        ..CliConfig::default()
    };

    let banner = "#112233".parse::<HexColor>().unwrap();
    run_add(
        &mut app,
        &config,
        Some("Dark".to_string()),
        NoteContentArgs {
            banner: Some(banner.clone()),
            ..NoteContentArgs::default()
        },
    )
    .unwrap();

    let note = app.store.list_notes_by_folder(None).unwrap().remove(0);
    assert_eq!(note.banner_color, banner);
    assert_eq!(note.body_color.as_str(), "#000000");
    paths.cleanup();
}

#[test]
fn rejected_add_keeps_draft_for_next_attempt() {
    let paths = TestPaths::new();
    let config = CliConfig::default();
    {
        let mut app = paths.open();
        let error = run_add(
            &mut app,
            &config,
            Some("   ".to_string()),
            content(Some("<p>keep me</p>")),
        )
        .unwrap_err();
        assert!(
            matches!(error, CliError::Rejected(ref message) if message == "Note heading cannot be empty.")
        );
    }

    let saved = load_state(&paths.session).unwrap();
    assert!(saved.creating_note);
    assert_eq!(
        saved.draft.as_ref().and_then(|draft| draft.description.as_deref()),
        Some("<p>keep me</p>")
    );

    let mut app = paths.open();
    run_add(&mut app, &config, Some("Titled".to_string()), content(None)).unwrap();

    let note = app.store.list_notes_by_folder(None).unwrap().remove(0);
    assert_eq!(note.heading, "Titled");
    assert_eq!(note.description, "<p>keep me</p>");
    assert_eq!(load_state(&paths.session).unwrap(), ViewState::default());
    paths.cleanup();
}

#[test]
fn edit_replaces_given_fields_only() {
    let paths = TestPaths::new();
    let mut app = paths.open();

    run_add(
        &mut app,
        &CliConfig::default(),
        Some("First".to_string()),
        content(Some("<p>body</p>")),
    )
    .unwrap();
    let note = app.store.list_notes_by_folder(None).unwrap().remove(0);

    run_edit(
        &mut app,
        note.id,
        Some("Renamed".to_string()),
        NoteContentArgs::default(),
    )
    .unwrap();

    let stored = app.store.get_note(note.id).unwrap().unwrap();
    assert_eq!(stored.heading, "Renamed");
    assert_eq!(stored.description, "<p>body</p>");
    assert_eq!(stored.created_at, note.created_at);
    assert_eq!(app.state.editing_note_id, None);
    paths.cleanup();
}

#[test]
fn edit_missing_note_is_rejected() {
    let paths = TestPaths::new();
    let mut app = paths.open();

    let error = run_edit(
        &mut app,
        NoteId::new(999),
        Some("x".to_string()),
        NoteContentArgs::default(),
    )
    .unwrap_err();
    assert!(matches!(error, CliError::Rejected(_)));
    assert_eq!(app.state.editing_note_id, None);
    paths.cleanup();
}

#[test]
fn cancel_closes_open_form() {
    let paths = TestPaths::new();
    let mut app = paths.open();

    let _ = run_add(&mut app, &CliConfig::default(), None, content(None));
    assert!(app.state.creating_note);

    run_cancel(&mut app).unwrap();
    assert_eq!(load_state(&paths.session).unwrap(), ViewState::default());

    // Nothing left to cancel is not an error
    run_cancel(&mut app).unwrap();
    paths.cleanup();
}

#[test]
fn date_view_places_and_filters_notes() {
    let paths = TestPaths::new();
    let mut app = paths.open();
    let config = CliConfig::default();

    run_add(&mut app, &config, Some("Undated".to_string()), content(None)).unwrap();
    run_date(&mut app, Some("2024-03-01")).unwrap();
    run_add(&mut app, &config, Some("Dated".to_string()), content(None)).unwrap();

    let screen = app.screen().unwrap();
    assert_eq!(screen.title(), "Notes on: 2024-03-01");
    assert_eq!(screen.notes.len(), 1);
    assert_eq!(screen.notes[0].heading, "Dated");

    run_date(&mut app, None).unwrap();
    assert_eq!(
        app.state.scope,
        Scope::ByDate {
            date: day(2024, 6, 15)
        }
    );
    assert!(app.screen().unwrap().notes.is_empty());

    run_home(&mut app).unwrap();
    let home = app.screen().unwrap();
    assert_eq!(home.notes.len(), 1);
    assert_eq!(home.notes[0].heading, "Undated");
    paths.cleanup();
}

#[test]
fn invalid_date_leaves_state_alone() {
    let paths = TestPaths::new();
    let mut app = paths.open();

    let error = run_date(&mut app, Some("tomorrow")).unwrap_err();
    assert!(matches!(error, CliError::InvalidDate(_)));
    assert_eq!(app.state, ViewState::default());
    paths.cleanup();
}

#[test]
fn delete_removes_note() {
    let paths = TestPaths::new();
    let mut app = paths.open();

    run_add(&mut app, &CliConfig::default(), Some("Gone".to_string()), content(None)).unwrap();
    let note = app.store.list_notes_by_folder(None).unwrap().remove(0);

    run_delete(&mut app, note.id).unwrap();
    assert!(app.store.get_note(note.id).unwrap().is_none());

    // Deleting again still succeeds
    run_delete(&mut app, note.id).unwrap();
    paths.cleanup();
}

#[test]
fn deleting_open_folder_returns_home() {
    let paths = TestPaths::new();
    let mut app = paths.open();

    run_folder_add(&mut app, "Scratch".to_string()).unwrap();
    let folder = app.store.list_folders().unwrap().remove(0);
    run_folder_open(&mut app, folder.id).unwrap();
    run_add(&mut app, &CliConfig::default(), Some("Tmp".to_string()), content(None)).unwrap();

    run_folder_delete(&mut app, folder.id).unwrap();

    let saved = load_state(&paths.session).unwrap();
    assert_eq!(saved.scope, Scope::home());
    assert!(app.store.list_notes_by_folder(Some(folder.id)).unwrap().is_empty());
    paths.cleanup();
}

#[test]
fn show_writes_sanitized_html_page() {
    let paths = TestPaths::new();
    let mut app = paths.open();

    run_add(
        &mut app,
        &CliConfig::default(),
        Some("<b>X</b>".to_string()),
        content(Some("<script>alert(1)</script>Hello")),
    )
    .unwrap();

    let html_path = paths.db.with_extension("html");
    run_show(&mut app, false, Some(&html_path)).unwrap();

    let page = std::fs::read_to_string(&html_path).unwrap();
    assert!(page.contains("&lt;b&gt;X&lt;/b&gt;"));
    assert!(page.contains(">Hello</div>"));
    assert!(!page.contains("alert(1)"));

    let _ = std::fs::remove_file(html_path);
    paths.cleanup();
}

#[test]
fn screen_item_and_lines_describe_view() {
    let paths = TestPaths::new();
    let mut app = paths.open();

    let empty = app.screen().unwrap();
    assert_eq!(
        format_screen_lines(&empty),
        vec![
            "Notes in: Home".to_string(),
            "No notes in 'Home'. Add one above!".to_string(),
        ]
    );

    run_add(
        &mut app,
        &CliConfig::default(),
        Some("Groceries".to_string()),
        content(Some("<p>Buy <b>milk</b></p>")),
    )
    .unwrap();

    let screen = app.screen().unwrap();
    let item = screen_to_item(&screen);
    assert_eq!(item.title, "Notes in: Home");
    assert_eq!(item.notes[0].preview, "Buy milk");

    let lines = format_screen_lines(&screen);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("Groceries"));
    assert!(lines[1].contains("Buy milk"));
    paths.cleanup();
}

#[test]
fn text_and_json_views_drop_script_blocks() {
    let paths = TestPaths::new();
    let mut app = paths.open();

    run_add(
        &mut app,
        &CliConfig::default(),
        Some("T".to_string()),
        content(Some("<script>alert(1)</script>Hello")),
    )
    .unwrap();

    let screen = app.screen().unwrap();
    let lines = format_screen_lines(&screen);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("Hello"));
    assert!(!lines[1].contains("alert(1)"));

    let item = screen_to_item(&screen);
    assert_eq!(item.notes[0].preview, "Hello");
    assert_eq!(item.notes[0].description, "Hello");

    // Stored content is left as entered
    assert_eq!(screen.notes[0].description, "<script>alert(1)</script>Hello");
    paths.cleanup();
}

#[test]
fn dangling_folder_in_session_falls_back_home() {
    let paths = TestPaths::new();
    save_state(
        &paths.session,
        &ViewState {
            scope: Scope::Home {
                folder_id: Some("77".parse().unwrap()),
            },
            ..ViewState::default()
        },
    )
    .unwrap();

    let mut app = paths.open();
    let screen = app.screen().unwrap();
    assert_eq!(screen.title(), "Notes in: Home");
    assert_eq!(load_state(&paths.session).unwrap().scope, Scope::home());
    paths.cleanup();
}

#[test]
fn unreadable_session_starts_fresh() {
    let paths = TestPaths::new();
    std::fs::write(&paths.session, "not json").unwrap();

    assert_eq!(load_state(&paths.session).unwrap(), ViewState::default());
    paths.cleanup();
}

#[test]
fn config_init_merges_values() {
    let paths = TestPaths::new();
    let config_path = paths.db.with_extension("config.json");

    run_config_init(
        &config_path,
        Some(" /data/notes.db ".to_string()),
        Some("#abcdef".parse().unwrap()),
        None,
    )
    .unwrap();
    run_config_init(&config_path, None, None, Some("#000000".parse().unwrap())).unwrap();

    let config = CliConfig::load_from_path(&config_path).unwrap();
    assert_eq!(config.db_path(), Some(PathBuf::from("/data/notes.db")));
    assert_eq!(config.default_banner_color.as_deref(), Some("#ABCDEF"));
    assert_eq!(config.default_body_color.as_deref(), Some("#000000"));

    let _ = std::fs::remove_file(config_path);
    paths.cleanup();
}

#[test]
fn run_completions_writes_bash_script_file() {
    let output_path = std::env::temp_dir().join(format!(
        "scribe-completions-test-{}.bash",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_nanos())
    ));

    run_completions(CompletionShell::Bash, Some(&output_path)).unwrap();

    let script = std::fs::read_to_string(&output_path).unwrap();
    assert!(script.contains("_scribe()"));
    assert!(script.contains("complete -F _scribe"));

    let _ = std::fs::remove_file(output_path);
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn content(description: Option<&str>) -> NoteContentArgs {
    NoteContentArgs {
        description: description.map(str::to_string),
        ..NoteContentArgs::default()
    }
}

struct TestPaths {
    db: PathBuf,
    session: PathBuf,
}

impl TestPaths {
    fn new() -> Self {
        static NEXT_TEST_ID: AtomicU64 = AtomicU64::new(0);

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |duration| duration.as_nanos());
        let sequence = NEXT_TEST_ID.fetch_add(1, Ordering::Relaxed);
        let stem = format!("scribe-cli-test-{timestamp}-{sequence}");
        let dir = std::env::temp_dir();

        Self {
            db: dir.join(format!("{stem}.db")),
            session: dir.join(format!("{stem}.session.json")),
        }
    }

    /// Open the app with a fixed "today"
    fn open(&self) -> App {
        let mut app = App::open(&self.db, &self.session).unwrap();
        app.today = day(2024, 6, 15);
        app
    }

    fn cleanup(&self) {
        let _ = std::fs::remove_file(&self.db);
        let _ = std::fs::remove_file(self.db.with_extension("db-shm"));
        let _ = std::fs::remove_file(self.db.with_extension("db-wal"));
        let _ = std::fs::remove_file(&self.session);
    }
}

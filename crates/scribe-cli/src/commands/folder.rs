use scribe_core::view::Command;
use scribe_core::FolderId;

use crate::commands::common::{format_folder_lines, report, App};
use crate::commands::show::print_screen;
use crate::error::CliError;

pub fn run_folder_add(app: &mut App, name: String) -> Result<(), CliError> {
    report(app.apply(Command::CreateFolder(name))?)
}

pub fn run_folder_open(app: &mut App, id: FolderId) -> Result<(), CliError> {
    if app.store.get_folder(id)?.is_none() {
        return Err(CliError::Rejected(format!("Folder {id} does not exist.")));
    }

    app.apply(Command::SelectFolder(id))?;
    print_screen(&app.screen()?);
    Ok(())
}

pub fn run_folder_delete(app: &mut App, id: FolderId) -> Result<(), CliError> {
    report(app.apply(Command::DeleteFolder(id))?)
}

pub fn run_folder_list(app: &App, as_json: bool) -> Result<(), CliError> {
    let folders = app.store.list_folders()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&folders)?);
    } else if folders.is_empty() {
        println!("No folders yet.");
    } else {
        for line in format_folder_lines(&folders, app.state.scope.folder_id()) {
            println!("{line}");
        }
    }

    Ok(())
}

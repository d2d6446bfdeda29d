use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use scribe_core::{FolderId, HexColor, NoteId};

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Folder and calendar organized notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Optional path to the view session file
    #[arg(long, global = true, value_name = "PATH")]
    pub session: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show unfiled notes
    Home,
    /// Manage folders
    Folder {
        #[command(subcommand)]
        command: FolderCommands,
    },
    /// Show notes for a date (today when omitted)
    Date {
        /// Date as YYYY-MM-DD
        date: Option<String>,
    },
    /// Add a note to the current folder or date
    #[command(alias = "new")]
    Add {
        /// Note heading
        #[arg(long)]
        heading: Option<String>,
        #[command(flatten)]
        content: NoteContentArgs,
    },
    /// Edit an existing note
    Edit {
        /// Note ID
        id: NoteId,
        /// New heading
        #[arg(long)]
        heading: Option<String>,
        #[command(flatten)]
        content: NoteContentArgs,
    },
    /// Close the open create or edit form and drop its draft
    Cancel,
    /// Delete a note
    #[command(alias = "delete")]
    Rm {
        /// Note ID
        id: NoteId,
    },
    /// Show the current view
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Also write the view as an HTML page
        #[arg(long, value_name = "PATH")]
        html: Option<PathBuf>,
    },
    /// Configure CLI defaults
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Description and color options shared by `add` and `edit`
#[derive(Debug, Clone, Default, clap::Args)]
pub struct NoteContentArgs {
    /// HTML description (`-` reads stdin)
    #[arg(long)]
    pub description: Option<String>,
    /// Write the description in $VISUAL / $EDITOR
    #[arg(short, long, conflicts_with = "description")]
    pub editor: bool,
    /// Banner color (#RRGGBB)
    #[arg(long, value_name = "COLOR")]
    pub banner: Option<HexColor>,
    /// Body color (#RRGGBB)
    #[arg(long, value_name = "COLOR")]
    pub body: Option<HexColor>,
}

#[derive(Subcommand)]
pub enum FolderCommands {
    /// Create a folder
    Add {
        /// Folder name
        name: String,
    },
    /// Show the notes in a folder
    Open {
        /// Folder ID
        id: FolderId,
    },
    /// Delete a folder and every note in it
    Rm {
        /// Folder ID
        id: FolderId,
    },
    /// List folders
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create or update the config file
    Init {
        /// Database used when --db-path and SCRIBE_DB_PATH are unset
        #[arg(long, value_name = "PATH")]
        default_db_path: Option<String>,
        /// Default banner color for new notes
        #[arg(long, value_name = "COLOR")]
        banner: Option<HexColor>,
        /// Default body color for new notes
        #[arg(long, value_name = "COLOR")]
        body: Option<HexColor>,
    },
    /// Print the current config
    Show,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

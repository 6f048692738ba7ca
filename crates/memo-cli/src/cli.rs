use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use memo_core::Theme;

#[derive(Parser)]
#[command(name = "memo")]
#[command(about = "Read and write password-protected memos from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// CLI profile name for stored endpoints
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Memo backend origin (overrides profile and MEMO_API_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Image upload endpoint (overrides profile and MEMO_UPLOAD_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub upload_url: Option<String>,

    /// 4-character password (falls back to MEMO_PASSWORD, then a prompt)
    #[arg(long, global = true, value_name = "CODE")]
    pub password: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List memos
    #[command(alias = "ls")]
    List {
        /// Only show memos whose title or content contains this text
        #[arg(short, long)]
        query: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search memos by title or content
    Search {
        /// Search query
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a memo with its images
    Show {
        /// Memo ID or unique ID prefix
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new memo
    #[command(alias = "new")]
    Add {
        /// Memo title
        #[arg(short, long, default_value = "")]
        title: String,
        /// Image files to upload and embed
        #[arg(short, long, value_name = "PATH")]
        image: Vec<PathBuf>,
        /// Memo content
        content: Vec<String>,
    },
    /// Edit an existing memo
    Edit {
        /// Memo ID or unique ID prefix
        id: String,
        /// Replace the title
        #[arg(short, long)]
        title: Option<String>,
        /// Replace the content (opens $EDITOR when no change is given)
        #[arg(short, long)]
        content: Option<String>,
        /// Image files to upload and embed
        #[arg(short, long, value_name = "PATH")]
        image: Vec<PathBuf>,
    },
    /// Delete a memo
    #[command(alias = "rm")]
    Delete {
        /// Memo ID or unique ID prefix
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Change the color theme or the password
    Settings {
        /// Color theme
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,
        /// New 4-character password; omitted keeps the current one
        #[arg(long, value_name = "CODE")]
        new_password: Option<String>,
    },
    /// Interactive session
    Shell,
    /// Configure CLI profiles
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

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ThemeArg {
    LightPink,
    DeepBlue,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::LightPink => Self::LightPink,
            ThemeArg::DeepBlue => Self::DeepBlue,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Memo backend origin
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Image upload endpoint
        #[arg(long, value_name = "URL")]
        upload_url: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Print the resolved profile
    Show {
        /// Profile name to show
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    // Use a static to compute the version string once
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "snip", bin_name = "snip", version = get_version())]
#[command(
    about = "Capture text snippets with surrounding page context",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Capture a new snippet
    #[command(alias = "c")]
    Capture {
        /// The text to capture
        text: String,

        /// File holding the surrounding document, for context extraction
        #[arg(long, value_name = "FILE")]
        from: Option<PathBuf>,

        /// Source URL to record
        #[arg(long, default_value = "")]
        url: String,

        /// Source page title to record
        #[arg(long, default_value = "")]
        title: String,

        /// Skip the post-capture undo window
        #[arg(long)]
        no_undo: bool,
    },

    /// List snippets, newest first
    #[command(alias = "ls")]
    List {
        /// Case-insensitive filter over text, title, url and tags
        #[arg(required = false)]
        query: Option<String>,

        /// Page to show
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show a snippet in full, context included
    #[command(alias = "v")]
    View {
        /// Position or id of the snippet
        selector: String,
    },

    /// Rewrite a snippet's text in the editor
    #[command(alias = "e")]
    Edit {
        /// Position or id of the snippet
        selector: String,

        /// Replacement text (skips the editor)
        #[arg(long)]
        text: Option<String>,
    },

    /// Delete one or more snippets
    #[command(alias = "rm")]
    Delete {
        /// Positions or ids of the snippets
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Copy a snippet's text to the clipboard
    #[command(alias = "cp")]
    Copy {
        /// Position or id of the snippet
        selector: String,
    },

    /// Mark snippets as favorites
    Fav {
        /// Positions or ids of the snippets
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Clear the favorite mark
    Unfav {
        /// Positions or ids of the snippets
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Replace the tags on a snippet
    Tag {
        /// Position or id of the snippet
        selector: String,

        /// Tags to set; give none to clear them
        #[arg(num_args = 0..)]
        tags: Vec<String>,
    },

    /// Attach a note to a snippet
    Note {
        /// Position or id of the snippet
        selector: String,

        /// Note text; an empty string clears it
        note: String,
    },

    /// Set or clear a snippet's color and folder
    Set {
        /// Positions or ids of the snippets
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,

        /// Color label
        #[arg(long, conflicts_with = "clear_color")]
        color: Option<String>,

        /// Remove the color label
        #[arg(long)]
        clear_color: bool,

        /// Folder name
        #[arg(long, conflicts_with = "clear_folder")]
        folder: Option<String>,

        /// Remove the folder assignment
        #[arg(long)]
        clear_folder: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., quota_bytes)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

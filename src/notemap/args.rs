use clap::{Parser, Subcommand};

/// Version string with git hash and commit date for dev builds.
/// Format: "0.4.2" for releases, "0.4.2@abc1234 2025-01-15" otherwise.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "notemap", version = get_version())]
#[command(about = "Markdown vault engine: notes, sections, links, tags", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault root directory (defaults to $NOTEMAP_VAULT, then the cwd)
    #[arg(long, global = true)]
    pub vault: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all notes in the vault
    #[command(alias = "ls")]
    List,

    /// Print a note's metadata and content
    #[command(alias = "cat")]
    View {
        /// Note path, with or without the .md extension
        path: String,
    },

    /// Create a new note
    #[command(alias = "new")]
    Create {
        /// Note path, with or without the .md extension
        path: String,

        /// Initial content
        #[arg(short, long, default_value = "")]
        content: String,

        /// Template to apply (overrides any folder mapping)
        #[arg(short, long)]
        template: Option<String>,

        /// Template variables as key=value (repeatable)
        #[arg(short = 'D', long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,
    },

    /// Append content to the end of a note
    Append {
        path: String,
        content: String,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        path: String,
    },

    /// List a note's sections (headings and levels)
    Sections {
        path: String,
    },

    /// Read one section of a note, or replace its content
    Section {
        path: String,

        /// Heading text, leading '#' markers optional
        heading: String,

        /// New content for the section (reads the section if omitted)
        #[arg(long, allow_hyphen_values = true)]
        replace: Option<String>,
    },

    /// List resolved outgoing links of a note
    Links {
        path: String,
    },

    /// List notes that link to a note
    Backlinks {
        path: String,
    },

    /// Print the full link graph as JSON
    Graph,

    /// List all tags with usage counts, or notes carrying one tag
    Tags {
        /// Tag to look up, leading '#' optional (census if omitted)
        tag: Option<String>,
    },

    /// Add or remove a tag in a note's frontmatter
    Tag {
        path: String,

        /// Tag name, leading '#' optional
        tag: String,

        /// Remove the tag instead of adding it
        #[arg(long)]
        remove: bool,
    },

    /// Search note contents and paths (case-insensitive)
    Search {
        query: String,
    },

    /// List available templates
    Templates,

    /// Manage folder-to-template mappings
    #[command(subcommand)]
    Folder(FolderCommands),

    /// Print vault statistics as JSON
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum FolderCommands {
    /// List all folder-to-template mappings
    #[command(alias = "ls")]
    List,

    /// Map a folder pattern to a template (supports *, ?, [..], **)
    Set {
        /// Folder pattern, e.g. "journal/**"
        pattern: String,

        /// Template name
        template: String,
    },

    /// Remove a folder mapping
    #[command(alias = "rm")]
    Remove {
        /// Exact pattern of the mapping to remove
        pattern: String,
    },

    /// Show which template a folder would receive
    Resolve {
        folder: String,
    },
}

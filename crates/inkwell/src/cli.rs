//! Clap derive structures for the `inkwell` CLI.
//!
//! Command tree and global flags.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use inkwell_config::Defaults;
use inkwell_core::Environment;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// inkwell -- manage blog categories and posts from the command line
#[derive(Debug, Parser)]
#[command(
    name = "inkwell",
    version,
    about = "Manage blog categories and posts from the command line",
    long_about = "A command-line client for the inkwell blog REST API.\n\n\
        Talks to the development backend on localhost by default in debug\n\
        builds; select a profile or pass --origin for a deployed server.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "INKWELL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend environment (development or production)
    #[arg(long, short = 'e', env = "INKWELL_ENVIRONMENT", global = true)]
    pub environment: Option<Environment>,

    /// Origin serving the API, e.g. https://blog.example.com
    #[arg(long, env = "INKWELL_ORIGIN", global = true)]
    pub origin: Option<String>,

    /// Log in as this user before running the command
    #[arg(long, short = 'u', env = "INKWELL_USERNAME", global = true)]
    pub username: Option<String>,

    /// Output format [default: `defaults.output` from the config, else table]
    #[arg(
        id = "output",
        long = "output",
        short = 'o',
        env = "INKWELL_OUTPUT",
        value_name = "FORMAT",
        global = true
    )]
    pub output_flag: Option<OutputFormat>,

    /// Colorize table output [default: `defaults.color` from the config, else auto]
    #[arg(id = "color", long = "color", value_name = "WHEN", global = true)]
    pub color_flag: Option<ColorMode>,

    /// Effective output format, see [`GlobalOpts::apply_defaults`].
    #[arg(skip)]
    pub output: OutputFormat,

    /// Effective color mode, see [`GlobalOpts::apply_defaults`].
    #[arg(skip)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Assume yes for destructive commands
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides the profile)
    #[arg(long, env = "INKWELL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// Resolve `output` and `color`: flag first, then the config file's
    /// `[defaults]`, then the built-in default.
    pub fn apply_defaults(&mut self, defaults: &Defaults) {
        self.output = self
            .output_flag
            .clone()
            .unwrap_or_else(|| from_config("output", &defaults.output));
        self.color = self
            .color_flag
            .clone()
            .unwrap_or_else(|| from_config("color", &defaults.color));
    }
}

fn from_config<T: ValueEnum + Default>(key: &str, raw: &str) -> T {
    T::from_str(raw, true).unwrap_or_else(|_| {
        tracing::warn!(key, value = raw, "ignoring invalid value in [defaults]");
        T::default()
    })
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// JSON on one line
    JsonCompact,
    /// YAML
    Yaml,
    /// Bare ids, one per line
    Plain,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal and NO_COLOR is unset
    #[default]
    Auto,
    /// Force color
    Always,
    /// Disable color
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage post categories
    #[command(alias = "cat", alias = "c")]
    Categories(CategoriesArgs),

    /// Manage blog posts
    #[command(alias = "p")]
    Posts(PostsArgs),

    /// Show the signed-in user
    Whoami,

    /// Show backend endpoints and session state
    Status,

    /// Print the browser login URL for the session auth views
    LoginUrl {
        /// Path to return to after logging in
        #[arg(long)]
        next: Option<String>,
    },

    /// Print the browser logout URL for the session auth views
    LogoutUrl {
        /// Path to return to after logging out
        #[arg(long)]
        next: Option<String>,
    },

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CATEGORIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List categories with their post counts
    #[command(alias = "ls")]
    List,

    /// Show one category
    Get {
        /// Category ID
        id: i64,
    },

    /// Create a category
    Create {
        /// Category name
        name: String,

        /// Optional description
        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// Change a category's name or description
    Update {
        /// Category ID
        id: i64,

        #[arg(long, short = 'n')]
        name: Option<String>,

        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// Delete a category
    #[command(alias = "rm")]
    Delete {
        /// Category ID
        id: i64,
    },

    /// List the posts in a category
    Posts {
        /// Category ID
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  POSTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub command: PostsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PostsCommand {
    /// List posts
    #[command(alias = "ls")]
    List {
        /// Only posts in this category
        #[arg(long, short = 'c')]
        category: Option<i64>,

        /// Only published posts
        #[arg(long, conflicts_with = "drafts")]
        published: bool,

        /// Only unpublished drafts
        #[arg(long)]
        drafts: bool,

        /// Result page (for paginated backends)
        #[arg(long)]
        page: Option<u32>,
    },

    /// Show one post
    Get {
        /// Post ID
        id: i64,
    },

    /// Create a post
    Create {
        #[arg(long, short = 't')]
        title: String,

        #[command(flatten)]
        content: ContentArgs,

        /// Category ID
        #[arg(long, short = 'c')]
        category: i64,

        /// Publish immediately
        #[arg(long)]
        publish: bool,
    },

    /// Change a post's title, content, or category
    Update {
        /// Post ID
        id: i64,

        #[arg(long, short = 't')]
        title: Option<String>,

        #[command(flatten)]
        content: ContentArgs,

        /// Move to this category
        #[arg(long, short = 'c')]
        category: Option<i64>,
    },

    /// Mark a post as published
    Publish {
        /// Post ID
        id: i64,
    },

    /// Return a post to draft
    Unpublish {
        /// Post ID
        id: i64,
    },

    /// Delete a post
    #[command(alias = "rm")]
    Delete {
        /// Post ID
        id: i64,
    },

    /// List posts written by the signed-in user
    Mine,
}

/// Post body, inline or from a file.
#[derive(Debug, Args)]
pub struct ContentArgs {
    /// Post body text
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read the post body from a file ("-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub content_file: Option<PathBuf>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG & COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Show the effective configuration (secrets masked)
    Show,

    /// List configured profiles
    Profiles,

    /// Set a key on the active profile and save the file
    Set {
        /// Profile key, e.g. origin, environment, username, timeout
        key: String,

        /// New value
        value: String,
    },

    /// Make a profile the default
    Use {
        /// Profile name
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}

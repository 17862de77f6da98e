//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Typst note-taking CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: typnote.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "typnote.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a notebook (config, notes and templates directories)
    #[command(visible_alias = "i")]
    Init {
        /// Notebook directory (relative to current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,

        /// Print the config template without writing anything
        #[arg(long)]
        dry: bool,
    },

    /// Create a new note from a template
    #[command(visible_alias = "n")]
    New {
        #[command(flatten)]
        args: NewArgs,
    },

    /// Compile a note to PDF
    #[command(visible_alias = "c")]
    Compile {
        #[command(flatten)]
        args: CompileArgs,
    },

    /// Print the metadata of a note
    #[command(visible_alias = "m")]
    Meta {
        #[command(flatten)]
        args: MetaArgs,
    },

    /// List notes with their metadata
    #[command(visible_alias = "l")]
    List {
        #[command(flatten)]
        args: ListArgs,
    },

    /// Recompile notes to PDF when they change
    #[command(visible_alias = "w")]
    Watch {
        /// Files or directories to watch (default: notes directory)
        #[arg(value_hint = clap::ValueHint::AnyPath)]
        paths: Vec<PathBuf>,
    },
}

/// New command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct NewArgs {
    /// Note title (default: untitled)
    pub title: Option<String>,

    /// Template name (default: templates.default)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Note type written into the metadata
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Note status written into the metadata
    #[arg(short, long)]
    pub status: Option<String>,

    /// Tags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Note date as YYYY-MM-DD (default: today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Print the rendered note and its target path without writing
    #[arg(long)]
    pub dry: bool,
}

/// Compile command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CompileArgs {
    /// Note to compile
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Output PDF path (default: pdf.output_dir or next to the note)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Open the PDF after compiling
    #[arg(long)]
    pub open: bool,
}

/// Meta command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct MetaArgs {
    /// Note to query
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Output JSON instead of a field listing
    #[arg(short, long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

/// List command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Paths to list (files, directories, or omit for the notes directory).
    /// Use `-` to read paths from stdin (one per line).
    #[arg(value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Only notes carrying this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Only notes with this status
    #[arg(short, long)]
    pub status: Option<String>,

    /// Only notes of this type
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Output JSON instead of a table
    #[arg(short, long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
}

//! typnote - note-taking commands for typst.

#![allow(dead_code)]

mod cli;
mod compiler;
mod config;
mod embed;
mod logger;
mod metadata;
mod note;
mod notebook;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::NoteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = NoteConfig::load(&cli)?;

    match &cli.command {
        Commands::Init { name, dry } => cli::init::new_notebook(&config, name.is_some(), *dry),
        Commands::New { args } => cli::new::new_note(&config, args),
        Commands::Compile { args } => cli::compile::compile_note(&config, args),
        Commands::Meta { args } => cli::meta::show_meta(&config, args),
        Commands::List { args } => cli::list::list_notes(&config, args),
        Commands::Watch { paths } => cli::watch::watch_notes(&config, paths),
    }
}

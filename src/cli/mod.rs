//! CLI module - Command-line interface for YoriFlix
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// YoriFlix - Telegram movie catalog
/// Turns chat exports from movie channels into a curated catalog
#[derive(Parser)]
#[command(name = "yoriflix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a Telegram chat export (JSON or plain text)
    #[command(alias = "sync")]
    Import {
        /// Path to the export file; reads stdin when omitted
        file: Option<String>,

        /// Channel handle for permalinks, overriding the config
        #[arg(long)]
        handle: Option<String>,
    },

    /// List the catalog grouped by genre
    #[command(alias = "ls", alias = "l")]
    List,

    /// Search movies by title or genre
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Show details about one catalog entry
    #[command(alias = "i")]
    Info {
        /// Movie ID (e.g. ID_42)
        id: String,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;

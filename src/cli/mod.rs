//! CLI module - Command-line interface for Postshelf
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Postshelf - posts API with web-search bookshelf
#[derive(Parser)]
#[command(name = "postshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default when no command is given)
    #[command(alias = "daemon", alias = "run")]
    Serve,

    /// Connect to the database, apply migrations, and exit
    #[command(alias = "-c", alias = "--check")]
    Check,

    /// Run one web search and print the results
    #[command(alias = "s")]
    Search {
        /// Search topic
        #[arg(required = true)]
        topic: Vec<String>,

        /// Number of results to request
        #[arg(short = 'n', long, default_value_t = 5)]
        max_results: usize,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;

//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gameshelf")]
#[command(about = "Browse a catalog of scraped web games", long_about = None)]
pub(crate) struct Cli {
    /// Catalog root containing the scraped source folders (defaults to the
    /// saved setting, then ./scraped_data)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Source descriptor file (defaults to <root>/sources.yaml, then discovery)
    #[arg(long, global = true)]
    pub sources: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List games, optionally limited to one category
    List {
        /// Category to show (e.g., "Girl", "Jump & Run"); aliases are accepted
        #[arg(short, long)]
        category: Option<String>,

        /// Print the matching records as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Show every category with its game count and description
    Categories,

    /// Show one game's details and sectioned description
    Show {
        /// Source id (e.g., html5games, root)
        source: String,

        /// Record id (the file name without .json)
        id: String,

        /// Print the record and its sections as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the sources that would be loaded
    Sources,

    /// Manage gameshelf settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the current settings and the resolved catalog root
    Show,

    /// Print the settings file path
    Path,

    /// Save the catalog root used when --root is not given
    SetRoot {
        /// Catalog root directory
        dir: PathBuf,
    },
}

//! Command-line argument parsing
//!
//! Supports:
//! - Repairing block spacing in a markdown file
//! - Rendering the preview fragment
//! - Exporting a standalone HTML document
//! - Showing and changing the saved settings

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Markdown writing tools
#[derive(Parser, Debug)]
#[command(name = "papersmith", version, about = "Markdown editor core: spacing repair, preview and export")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Insert the blank lines the renderer needs between blocks
    Fix {
        /// Markdown file to repair
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the result back instead of printing it
        #[arg(short = 'i', long)]
        in_place: bool,
    },

    /// Render the preview HTML fragment
    Preview {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Export a standalone HTML document with page margins and math
    Export {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (suggested name in the export directory when omitted)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Open the exported document afterwards
        #[arg(long)]
        open: bool,
    },

    /// Show or change the saved settings
    Config {
        /// Print only the settings file location
        #[arg(long, conflicts_with = "set")]
        path: bool,

        /// Change a setting and save (repeatable), e.g. --set margin_v=2.5
        #[arg(long, value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
}

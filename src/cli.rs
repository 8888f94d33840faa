use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfpick")]
#[command(about = "Copy selected pages of a PDF into a new file")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server over stdio
    Mcp,

    /// Show page count and metadata
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Write the selected pages to a new PDF
    #[command(alias = "trim")]
    Select {
        /// Source PDF file
        path: PathBuf,

        /// Page ranges (e.g., "1-3,5,6-9,11")
        pages: String,

        /// Output file (defaults to <name>_trimmed.pdf next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace the output file if it already exists
        #[arg(short, long)]
        force: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
}

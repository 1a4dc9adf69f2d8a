use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mdtoc::TocOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mdtoc")]
#[command(about = "Markdown table of contents extraction with MCP server support")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Which headings end up in the table of contents
#[derive(Args, Debug, Clone)]
pub struct OutlineArgs {
    /// Shallowest heading level to include
    #[arg(long, default_value = "1")]
    pub min_depth: u8,

    /// Deepest heading level to include
    #[arg(long, default_value = "6")]
    pub max_depth: u8,

    /// Only outline the section after the heading matching this pattern
    #[arg(long)]
    pub heading: Option<String>,

    /// Leave out headings matching this pattern
    #[arg(long)]
    pub skip: Option<String>,
}

impl OutlineArgs {
    pub fn to_options(&self) -> Result<TocOptions> {
        let mut options = TocOptions::default().with_depths(self.min_depth, self.max_depth);
        if let Some(heading) = &self.heading {
            options = options.with_heading(heading)?;
        }
        if let Some(skip) = &self.skip {
            options = options.with_skip(skip)?;
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Print the table of contents as an indented tree
    Toc {
        /// Markdown file to inspect
        path: PathBuf,

        #[command(flatten)]
        outline: OutlineArgs,
    },

    /// Print the table of contents as JSON
    Json {
        /// Markdown file to inspect
        path: PathBuf,

        /// Single-line output
        #[arg(short, long)]
        compact: bool,

        #[command(flatten)]
        outline: OutlineArgs,
    },

    /// Print the heading ids the active-heading tracker observes
    Ids {
        /// Markdown file to inspect
        path: PathBuf,

        #[command(flatten)]
        outline: OutlineArgs,
    },

    /// Render the "On This Page" panel as HTML
    Render {
        /// Markdown file to inspect
        path: PathBuf,

        /// Heading id to highlight
        #[arg(short, long)]
        active: Option<String>,

        #[command(flatten)]
        outline: OutlineArgs,
    },

    /// Show which heading is active after scrolling to a line
    Active {
        /// Markdown file to inspect
        path: PathBuf,

        /// Line the top of the viewport is scrolled to (0-based)
        #[arg(short, long)]
        scroll: usize,

        /// Viewport height in lines
        #[arg(short, long, default_value = "40")]
        viewport: usize,

        #[command(flatten)]
        outline: OutlineArgs,
    },

    /// Print the outline of every markdown file under a directory
    Scan {
        /// Directory to walk
        dir: PathBuf,

        #[command(flatten)]
        outline: OutlineArgs,
    },
}

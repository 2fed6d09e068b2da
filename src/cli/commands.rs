//! CLI definition using clap.
//!
//! A single command: run one refinement session and print the report.

use clap::Parser;
use std::path::PathBuf;

/// Copyloop - a Creator/Editor refinement loop for ad copy
#[derive(Parser, Debug)]
#[command(name = "copyloop")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Product to write copy for [default: from config]
    #[arg(long)]
    pub product: Option<String>,

    /// Target audience [default: from config]
    #[arg(long)]
    pub audience: Option<String>,

    /// Rejected drafts tolerated before giving up [default: 5]
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Trace each round on stderr
    #[arg(short = 't', long, visible_short_alias = 'v', visible_alias = "verbose")]
    pub trace: bool,

    /// Embed the full attempt history in the report
    #[arg(long)]
    pub transcript: bool,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.trace
    }
}

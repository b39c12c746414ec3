use std::path::PathBuf;

use clap::Parser;
use ymerge_io::{DocumentSource, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name = "ymerge",
    about = "Merge YAML configuration documents; later files extend and override earlier ones",
    version,
    override_usage = "ymerge [OPTIONS] file1.yaml file2.yaml ..."
)]
pub struct Cli {
    /// Documents to merge, in order. `-` reads a document from stdin.
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<DocumentSource>,

    /// Write the merged document here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Log every loaded document and fold step
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors; conflict warnings are suppressed
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print a summary of conflicting keys after merging
    #[arg(long)]
    pub report_conflicts: bool,

    /// TOML file supplying defaults for the options above
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

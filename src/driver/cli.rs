//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

use crate::adapter::connect::client::DEFAULT_ENDPOINT;

/// ワークアウトファイルをアップロードするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "gupload")]
#[command(about = "Upload workout files (.fit, .gpx, .tcx) to an activity service", long_about = None)]
pub struct Args {
    /// Activity files, glob patterns, directories or .csv manifests
    #[arg(required = true, num_args = 1..)]
    pub paths: Vec<String>,

    /// Activity name (only applied when a single activity file is given)
    #[arg(short = 'a', long = "name")]
    pub name: Option<String>,

    /// Activity type applied to every non-manifest file
    #[arg(short = 't', long = "type")]
    pub activity_type: Option<String>,

    /// Login username
    #[arg(short, long)]
    pub username: Option<String>,

    /// Login password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Verbosity: 1=DEBUG 2=INFO 3=WARNING 4=ERROR 5=CRITICAL
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub verbose: u8,

    /// Dry run mode - resolve files but don't contact the service
    #[arg(long)]
    pub dry_run: bool,

    /// Drop repeated files from the batch
    #[arg(long)]
    pub dedupe: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Service base URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::{Args, Parser, Subcommand};

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Analyze Options:
    --source, -s <SOURCE>     Pose sequence JSON file (per-frame joint positions)
    --report <PATH>           Write the text report to a file
    --json <PATH>             Write metrics and feedback as JSON to a file
    --detector <DETECTOR>     Step detection algorithm (velocity, zero-crossing) [default: velocity]
    --threshold <THRESHOLD>   Ankle velocity threshold for the velocity detector [default: 1.0]
    --verbose                 Show verbose output

Examples:
    gait-analysis analyze --source session.json
    gait-analysis analyze -s session.json --report report.txt
    gait-analysis analyze -s session.json --json metrics.json --detector zero-crossing
    gait-analysis analyze -s session.json --threshold 1.5 --verbose false"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a recorded pose sequence and report gait metrics
    Analyze(AnalyzeArgs),
}

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Pose sequence JSON file (per-frame joint positions)
    #[arg(short, long)]
    pub source: String,

    /// Write the text report to a file
    #[arg(long)]
    pub report: Option<String>,

    /// Write metrics and feedback as JSON to a file
    #[arg(long)]
    pub json: Option<String>,

    /// Step detection algorithm (velocity, zero-crossing)
    #[arg(long, default_value = "velocity")]
    pub detector: String,

    /// Ankle velocity threshold for the velocity detector
    #[arg(long, default_value_t = 1.0)]
    pub threshold: f64,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

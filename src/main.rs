// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::Parser;

use gait_analysis::cli::analyze::run_analysis;
use gait_analysis::cli::args::{Cli, Commands};
use gait_analysis::cli::logging::set_verbose;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => {
            set_verbose(args.verbose);
            run_analysis(&args);
        }
    }
}

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scorecard::cli::{self, Cli};
use scorecard::utils::report_error;

fn init_tracing(debug: bool) {
    let default_directive = if debug { "scorecard=debug" } else { "scorecard=warn" };
    let filter = EnvFilter::try_from_env("SCORECARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Some(err) = cli.usage_error() {
        err.exit();
    }

    if let Err(err) = cli::run(cli) {
        report_error(&err);
        std::process::exit(1);
    }
}

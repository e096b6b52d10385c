mod args;
mod error;
mod tracker;

use anyhow::Result;
use args::Args;
use clap::Parser;
use tracker::{runner::ProcessRunner, Tracker};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(error) = run(args) {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let targets = args.targets();
    let tracker = Tracker::new(ProcessRunner, args.search_tool, args.path);

    let stdout = std::io::stdout();
    tracker.run(args.mode, &targets, &args.variables, &mut stdout.lock())
}

/// Logs go to stderr so that stdout only carries reports. `-v` flags take
/// precedence over `RUST_LOG`.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reftrace=warn")),
        1 => EnvFilter::new("reftrace=info"),
        _ => EnvFilter::new("reftrace=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

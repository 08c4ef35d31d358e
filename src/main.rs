mod app;
mod cli;
mod store;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    match app::run(cli, &mut input, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("layoutboard: {e}");
            ExitCode::FAILURE
        }
    }
}

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use md2lab_cli::{convert, error};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the --html output, so logs go to stderr.
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = convert::Args::parse();
    if let Err(e) = convert::run(&args) {
        error::display(e);
    }
}

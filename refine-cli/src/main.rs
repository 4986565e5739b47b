//! # Refine CLI Entry Point
//!
//! The main entry point for the refine command-line tool.

use clap::Parser;
use refine_cli::cli::{Cli, handle_cli};
use refine_core::output::print_error;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
  let cmd = Cli::parse();

  // Set up tracing based on verbosity level
  let level = match cmd.verbose {
    0 => tracing::Level::WARN,  // Default: warnings and errors
    1 => tracing::Level::INFO,  // -v: info, warnings, and errors
    2 => tracing::Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => tracing::Level::TRACE, // -vvv or more: trace and everything else
  };

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  if let Err(e) = handle_cli(cmd) {
    print_error(&format!("{e:#}"));
    std::process::exit(1);
  }
}

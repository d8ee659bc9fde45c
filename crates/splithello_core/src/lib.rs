pub mod config;
pub mod engine;
pub mod report;

use tracing_subscriber::EnvFilter;

pub use config::{Cli, Config};
pub use engine::ProbeSuite;

/// Logs go to stderr; stdout carries only the report.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

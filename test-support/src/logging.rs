//! Logging utilities for tests.
//!
//! Installs a subscriber with an explicit filter instead of reading
//! `RUST_LOG`, so tests never depend on the caller's environment.

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt};

/// Install a global subscriber writing to `writer` with `filter`.
///
/// Returns `false` if a subscriber was already installed, which happens
/// when several tests in one binary ask for logging.
///
/// # Examples
///
/// ```rust,no_run
/// use test_support::logging::init_with_writer_and_filter;
/// use tracing_subscriber::fmt;
///
/// init_with_writer_and_filter(fmt::writer::BoxMakeWriter::new(std::io::sink), "cli_project=debug");
/// ```
pub fn init_with_writer_and_filter<W>(writer: W, filter: &str) -> bool
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(writer)
        .try_init()
        .is_ok()
}

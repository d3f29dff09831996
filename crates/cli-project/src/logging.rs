//! Logging set-up for the harness and its binary.
//!
//! Structured logging goes through `tracing`; the subscriber writes to
//! stderr so it never mixes with argument vectors or listings printed on
//! stdout. Filters come from `RUST_LOG`.

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global tracing subscriber, writing to stderr.
///
/// Call `init` before any logging statements to avoid missing logs.
///
/// # Examples
///
/// ```rust,no_run
/// cli_project::logging::init();
/// tracing::info!("logging ready");
/// ```
pub fn init() {
    init_with_writer(fmt::writer::BoxMakeWriter::new(std::io::stderr));
}

/// Install the global tracing subscriber with a custom writer.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init_with_writer<W>(writer: W)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(writer)
        .with_target(false)
        .init();
}

//! Diagnostic tracing for the interpreter.
//!
//! Output goes to stderr so that stdout only ever carries the final tape.

use std::io::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`, defaulting to `warn` if unset. The default level keeps the
/// skipped-line reports from the parser visible.
///
/// # Example
/// ```bash
/// RUST_LOG=tmi=trace tmi program.tm < input.txt
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .compact(),
        )
        .init();
}

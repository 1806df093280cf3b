//! Structured logging setup.
//!
//! Library code only emits `tracing` events; binaries call [`init_logging`]
//! once to route them to stderr.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count when `RUST_LOG` is not set.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "chainwalk=info",
        1 => "chainwalk=debug",
        _ => "chainwalk=trace",
    }
}

/// Initialize structured logging with `RUST_LOG` environment variable support.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` picks the level via
/// [`default_directive`]. Subsequent calls are silently ignored.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // try_init so double-init in tests doesn't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

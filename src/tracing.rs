//! Logging for the csvgrid binary
//!
//! The library only emits `tracing` events; this module decides where they
//! go. Useful targets:
//! - `csvgrid::csv::codec` - one `debug!` per load/save with sizes, and a
//!   `warn!` when a file had to be decoded lossily
//! - `csvgrid::csv::model` - a `debug!` whenever a write grows the grid
//! - `csvgrid::csv::tokenizer` - a `trace!` for every field read, with its
//!   length and what followed it
//!
//! For example `RUST_LOG=csvgrid::csv::tokenizer=trace csvgrid data.csv`
//! shows how a file is split into fields.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "csvgrid.log";

/// Install the global subscriber
///
/// stderr gets whatever `RUST_LOG` selects (only warnings when unset), so
/// table and field output on stdout stays clean. A daily rotated file in
/// [`crate::config_paths::logs_dir`] records everything at `debug`. If the
/// log directory can't be created the binary still runs with stderr only.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);

    let (file_layer, file_error) = match crate::config_paths::ensure_logs_dir() {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let layer = fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), None)
        }
        Err(e) => (None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!("File logging disabled: {}", e);
    }
}

//! Tracing bootstrap for SeriesDB embedders.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! embedding binary's call. This helper wires the usual fmt subscriber with
//! `RUST_LOG`-style filtering for binaries that have no subscriber of their
//! own.

use crate::{Error, Result};

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber.
///
/// `default_directive` applies when `RUST_LOG` is unset, e.g. `"seriesdb=info"`.
pub fn init_tracing(default_directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|e| Error::Config(format!("invalid log filter directive: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| Error::Config(format!("failed to install tracing subscriber: {}", e)))?;

    Ok(())
}

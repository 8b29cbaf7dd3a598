//! Project indexer and command line front end for ABL completion.
//!
//! Glues the parsing crates to the file system: reads sources, indexes
//! whole directory trees in parallel, loads a schema dump, and renders
//! results as text or JSON.
//!
//! # Debugging
//!
//! - `RUST_LOG=debug ablidx index src`: pass-level events
//! - `RUST_LOG=abl_parse=trace`: every recognizer step

pub mod commands;
pub mod config;
pub mod edit;
mod error;
pub mod index;
pub mod report;

use std::sync::Once;

pub use config::{IndexConfig, OutputFormat};
pub use error::{Error, Result};
pub use index::ProjectIndex;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Only does anything when `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

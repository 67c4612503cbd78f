// sakpro/src/logger.rs
//! Logging setup for the CLI.
//!
//! `RUST_LOG` is honoured unless a level is forced from the command line.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger`, writing to stderr.
///
/// `level` overrides whatever `RUST_LOG` requests. Calling this more than once
/// is harmless; later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None);
    let _ = builder.try_init();
}

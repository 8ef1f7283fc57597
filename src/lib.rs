// src/lib.rs

pub mod config;
pub mod deps;
pub mod detect;
pub mod errors;
pub mod fs;
pub mod host;
pub mod logging;
pub mod types;

use std::path::Path;

use tracing::info;

use crate::config::{ConfigFile, load_and_validate};
use crate::errors::Result;
use crate::fs::RealFileSystem;
use crate::host::configure;

/// High-level entry point for hosts described by a TOML file.
///
/// This wires together:
/// - config loading and validation
/// - logging (from `[settings].log_level` or `REQWATCH_LOG`)
/// - the configure hook over the real filesystem
///
/// The returned configuration carries the updated recreate flags.
pub fn configure_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let cfg = load_and_validate(path)?;
    logging::init_logging(cfg.settings.log_level)?;

    let settings = cfg.detector_settings();
    let cfg = configure(cfg, &RealFileSystem, settings)?;

    info!(marked = ?cfg.marked_for_recreation(), "requirements check complete");
    Ok(cfg)
}

// src/config/mod.rs

//! TOML-backed host configuration for reqwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk and resolve its relative paths (`loader.rs`).
//! - Validate environments and the shared work dir (`validate.rs`).
//!
//! The validated [`ConfigFile`] implements [`crate::host::HostConfig`], so it
//! can be handed straight to [`crate::host::configure`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, parse_str};
pub use model::{ConfigFile, EnvConfig, RawConfigFile, RawEnvConfig, SettingsSection};
pub use validate::validate_config;

// src/host/mod.rs

//! Boundary with the environment-orchestration host.
//!
//! The host owns its configuration object; this crate only reads it and
//! flips per-environment recreate flags through the traits below.

pub mod adapter;

use std::path::Path;

pub use adapter::{EnvironmentReport, configure, ensure_envs_recreated, evaluate_environment};

/// One configured environment as seen by the change detector.
pub trait Environment {
    fn name(&self) -> &str;

    /// Raw declared dependency tokens, e.g. `["-rrequirements.txt", "pytest"]`.
    fn declared_dependencies(&self) -> &[String];

    /// Resolved directory of the physical environment. Used as its identity.
    fn env_dir(&self) -> &Path;

    fn recreate(&self) -> bool;
    fn set_recreate(&mut self, recreate: bool);
}

/// Mutable host configuration handed to the configure hook.
pub trait HostConfig {
    type Env: Environment;

    /// Host-level "always recreate" override (e.g. `tox --recreate`).
    fn recreate_requested(&self) -> bool;

    /// Shared working directory that survives environment recreation.
    fn work_dir(&self) -> &Path;

    /// Directory the dependency references were declared relative to.
    /// Snapshot names are built from watched paths relative to it; the
    /// default (empty) uses the paths as resolved.
    fn root_dir(&self) -> &Path {
        Path::new("")
    }

    /// Names of the environments taking part in this run.
    fn enabled_environments(&self) -> Vec<String>;

    fn environment_mut(&mut self, name: &str) -> Option<&mut Self::Env>;
}

#![allow(dead_code)]

pub use reqwatch_test_utils::builders;
pub use reqwatch_test_utils::init_tracing;
pub use reqwatch_test_utils::project::Project;

use reqwatch::config::ConfigFile;
use reqwatch::fs::RealFileSystem;
use reqwatch::host::{EnvironmentReport, ensure_envs_recreated};

/// One host run over the real filesystem: evaluate, return reports, keep
/// the (mutated) config for inspection.
pub fn run_host(cfg: &mut ConfigFile) -> Vec<EnvironmentReport> {
    let settings = cfg.detector_settings();
    ensure_envs_recreated(cfg, &RealFileSystem, settings).expect("host run failed")
}

/// Clear recreate flags between runs, like a fresh host invocation would.
pub fn reset_flags(cfg: &mut ConfigFile) {
    for env in cfg.env.values_mut() {
        env.recreate = false;
    }
}

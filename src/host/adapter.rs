// src/host/adapter.rs

use std::path::PathBuf;

use tracing::{debug, info};

use crate::deps::ClosureResolver;
use crate::detect::{ChangeDetector, SnapshotLayout};
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::host::{Environment, HostConfig};
use crate::types::DetectorSettings;

/// What happened to one environment during [`configure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentReport {
    pub name: String,
    /// Every file in the requirements closure, in path order.
    pub watched: Vec<PathBuf>,
    /// The subset of `watched` whose fingerprint differs from the last run.
    pub changed: Vec<PathBuf>,
    /// Whether this run flipped the recreate flag.
    pub marked: bool,
}

/// Configure hook: mark every enabled environment whose requirements
/// closure changed since the previous run, then hand the configuration back.
pub fn configure<H: HostConfig>(
    mut host: H,
    fs: &dyn FileSystem,
    settings: DetectorSettings,
) -> Result<H> {
    ensure_envs_recreated(&mut host, fs, settings)?;
    Ok(host)
}

/// Run detection over all enabled environments of `host`.
///
/// Returns no reports when the host already asked for recreation of
/// everything; nothing is read in that case.
pub fn ensure_envs_recreated<H: HostConfig>(
    host: &mut H,
    fs: &dyn FileSystem,
    settings: DetectorSettings,
) -> Result<Vec<EnvironmentReport>> {
    if host.recreate_requested() {
        info!("recreation requested by user; skipping requirements change detection");
        return Ok(Vec::new());
    }

    let work_dir = host.work_dir().to_path_buf();
    let root_dir = host.root_dir().to_path_buf();
    let layout = SnapshotLayout::new(&work_dir, settings.algorithm).with_root(&root_dir);
    let mut reports = Vec::new();

    for name in host.enabled_environments() {
        let Some(env) = host.environment_mut(&name) else {
            debug!(env = %name, "enabled environment not configured; skipping");
            continue;
        };
        reports.push(evaluate_environment(fs, settings, layout, env)?);
    }

    Ok(reports)
}

/// Check every file of one environment's requirements closure and mark the
/// environment for recreation if any of them changed.
///
/// All snapshots are refreshed even after the first change is found.
pub fn evaluate_environment<E: Environment + ?Sized>(
    fs: &dyn FileSystem,
    settings: DetectorSettings,
    layout: SnapshotLayout<'_>,
    env: &mut E,
) -> Result<EnvironmentReport> {
    let watched = ClosureResolver::new(fs).resolve(env.declared_dependencies());
    let detector = ChangeDetector::new(fs, settings);

    let mut changed = Vec::new();
    for file in &watched {
        let snapshot = layout.path_for(file, env.env_dir());
        if detector.has_changed(file, &snapshot)? {
            debug!(env = %env.name(), file = ?file, "requirements file changed");
            changed.push(file.clone());
        }
    }

    let marked = !changed.is_empty() && !env.recreate();
    if marked {
        info!(
            env = %env.name(),
            changed = ?changed,
            "requirements changed; environment will be recreated"
        );
        env.set_recreate(true);
    }

    Ok(EnvironmentReport {
        name: env.name().to_string(),
        watched: watched.into_iter().collect(),
        changed,
        marked,
    })
}

// src/detect/snapshot.rs

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::detect::fingerprint::{Fingerprint, hex_digest};
use crate::fs::{FileSystem, lexical_clean, relative_to};
use crate::types::HashAlgorithm;

/// Extension of every snapshot file.
///
/// The effective path on disk is:
///
/// `<work_dir>/<watched path with separators as '-'>.<env key>.previous`
pub const SNAPSHOT_SUFFIX: &str = "previous";

/// Stable key for an environment, derived from its resolved directory.
///
/// Environments which share a directory share a key, so reusing one
/// physical environment from several named environments does not flag it
/// over and over.
pub fn environment_key(algorithm: HashAlgorithm, env_dir: &Path) -> String {
    let identity = lexical_clean(env_dir);
    hex_digest(algorithm, identity.to_string_lossy().as_bytes())
}

/// File name of the snapshot for `watched` in the environment keyed `env_key`.
pub fn snapshot_file_name(watched: &Path, env_key: &str) -> String {
    let flattened = watched.to_string_lossy().replace(['/', '\\'], "-");
    format!("{flattened}.{env_key}.{SNAPSHOT_SUFFIX}")
}

/// Where snapshots live: one file per (watched file, environment) under the
/// host's shared working directory.
///
/// The working directory must outlive the environments: snapshots kept
/// inside an environment directory would vanish exactly when that
/// environment is recreated.
///
/// Watched paths are named relative to `root_dir`, the directory the
/// requirements were declared from, so a project checked out deep in the
/// filesystem still gets short names like `req1-requirements.txt.<key>.previous`.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotLayout<'a> {
    work_dir: &'a Path,
    root_dir: &'a Path,
    algorithm: HashAlgorithm,
}

impl<'a> SnapshotLayout<'a> {
    pub fn new(work_dir: &'a Path, algorithm: HashAlgorithm) -> Self {
        Self {
            work_dir,
            root_dir: Path::new(""),
            algorithm,
        }
    }

    /// Name watched files relative to `root_dir`. Files outside it keep
    /// their `..` prefix; paths that cannot be related are used as given.
    pub fn with_root(mut self, root_dir: &'a Path) -> Self {
        self.root_dir = root_dir;
        self
    }

    pub fn path_for(&self, watched: &Path, env_dir: &Path) -> PathBuf {
        let key = environment_key(self.algorithm, env_dir);
        let name = relative_to(watched, self.root_dir);
        self.work_dir.join(snapshot_file_name(&name, &key))
    }
}

/// Fingerprint stored at `snapshot`, or `None` when there is none yet.
pub fn load_snapshot(fs: &dyn FileSystem, snapshot: &Path) -> Result<Option<Fingerprint>> {
    if !fs.exists(snapshot) {
        return Ok(None);
    }
    let stored = fs.read_to_string(snapshot)?;
    Ok(Fingerprint::from_stored(&stored))
}

/// Overwrite `snapshot`, creating its directory on first use.
pub fn save_snapshot(fs: &dyn FileSystem, snapshot: &Path, fingerprint: &Fingerprint) -> Result<()> {
    if let Some(parent) = snapshot.parent() {
        if !parent.as_os_str().is_empty() && !fs.is_dir(parent) {
            fs.create_dir_all(parent)?;
        }
    }
    fs.write(snapshot, fingerprint.as_str().as_bytes())?;
    debug!(snapshot = ?snapshot, fingerprint = %fingerprint, "stored snapshot");
    Ok(())
}

// src/detect/detector.rs

use std::path::Path;

use tracing::debug;

use crate::detect::fingerprint::Fingerprint;
use crate::detect::snapshot::{load_snapshot, save_snapshot};
use crate::errors::{ReqwatchError, Result};
use crate::fs::FileSystem;
use crate::types::{DetectorSettings, FirstSightPolicy};

/// Outcome of checking one requirements file against its snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Fingerprint from the previous run, `None` on first sight.
    pub previous: Option<Fingerprint>,
    /// Fingerprint of the file as it is now; already persisted.
    pub current: Fingerprint,
}

impl Observation {
    pub fn is_changed(&self, policy: FirstSightPolicy) -> bool {
        match &self.previous {
            Some(previous) => previous != &self.current,
            None => policy == FirstSightPolicy::Changed,
        }
    }
}

/// Compares requirements files with their last recorded fingerprint.
#[derive(Debug, Clone, Copy)]
pub struct ChangeDetector<'a> {
    fs: &'a dyn FileSystem,
    settings: DetectorSettings,
}

impl<'a> ChangeDetector<'a> {
    pub fn new(fs: &'a dyn FileSystem, settings: DetectorSettings) -> Self {
        Self { fs, settings }
    }

    /// Whether `file_path` differs from the fingerprint stored at
    /// `snapshot_path`.
    ///
    /// The snapshot is rewritten on every call, changed or not. Fails with
    /// [`ReqwatchError::MissingRequirementsFile`] if `file_path` is empty or
    /// not an existing file.
    pub fn has_changed(&self, file_path: &Path, snapshot_path: &Path) -> Result<bool> {
        let observation = self.observe(file_path, snapshot_path)?;
        Ok(observation.is_changed(self.settings.first_sight))
    }

    /// Like [`ChangeDetector::has_changed`] but returns both fingerprints.
    pub fn observe(&self, file_path: &Path, snapshot_path: &Path) -> Result<Observation> {
        if file_path.as_os_str().is_empty() || !self.fs.is_file(file_path) {
            return Err(ReqwatchError::MissingRequirementsFile(file_path.to_path_buf()));
        }

        let content = self.fs.read_to_string(file_path)?;
        let current = Fingerprint::of_content(self.settings.algorithm, &content);
        let previous = load_snapshot(self.fs, snapshot_path)?;

        save_snapshot(self.fs, snapshot_path, &current)?;

        debug!(
            file = ?file_path,
            previous = previous.as_ref().map(Fingerprint::as_str).unwrap_or("<none>"),
            current = %current,
            "compared requirements fingerprint"
        );

        Ok(Observation { previous, current })
    }
}

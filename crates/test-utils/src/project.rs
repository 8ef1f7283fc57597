use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Temporary project directory with helpers to lay out requirements files.
///
/// The directory is removed when the `Project` is dropped.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("creating temporary project")?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `rel` inside the project.
    pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write (or overwrite) `rel`, creating parent directories as needed.
    pub fn write_file(&self, rel: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
        }
        fs::write(&path, content).with_context(|| format!("writing {:?}", path))?;
        Ok(path)
    }

    pub fn read_file(&self, rel: impl AsRef<Path>) -> Result<String> {
        let path = self.path(rel);
        fs::read_to_string(&path).with_context(|| format!("reading {:?}", path))
    }

    /// Names of files in `rel` ending with `suffix`, sorted.
    pub fn files_with_suffix(&self, rel: impl AsRef<Path>, suffix: &str) -> Result<Vec<String>> {
        let dir = self.path(rel);
        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).with_context(|| format!("reading dir {:?}", dir))? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if name.ends_with(suffix) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

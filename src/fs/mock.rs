// src/fs/mock.rs

use super::{FileSystem, lexical_clean};
use anyhow::{Result, anyhow};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir,
}

#[derive(Debug, Default)]
struct MockState {
    entries: BTreeMap<PathBuf, MockEntry>,
    denied: BTreeSet<PathBuf>,
    unreadable: BTreeSet<PathBuf>,
    reads: usize,
}

/// In-memory filesystem for unit tests.
///
/// Paths are stored lexically cleaned, and the empty path, `.` and `/` always
/// exist as directories. [`FileSystem::write`] behaves like the real thing: it
/// fails when the parent directory is missing or writes under it were
/// denied with [`MockFileSystem::deny_writes_under`]. Reads of files marked
/// with [`MockFileSystem::deny_reads`] fail while the file still exists.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file, creating its parent directories implicitly.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = lexical_clean(path.as_ref());
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            insert_dirs(&mut state, parent);
        }
        state.entries.insert(path, MockEntry::File(content.into()));
    }

    /// Make every write at or below `dir` fail with a permission error.
    pub fn deny_writes_under(&self, dir: impl AsRef<Path>) {
        self.lock().denied.insert(lexical_clean(dir.as_ref()));
    }

    /// Make reading `path` fail with a permission error.
    pub fn deny_reads(&self, path: impl AsRef<Path>) {
        self.lock().unreadable.insert(lexical_clean(path.as_ref()));
    }

    /// Number of `read_to_string` calls served so far.
    pub fn read_count(&self) -> usize {
        self.lock().reads
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A poisoned lock only means another test thread panicked.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn is_implicit_root(path: &Path) -> bool {
    path.as_os_str().is_empty() || path == Path::new(".") || path == Path::new("/")
}

fn insert_dirs(state: &mut MockState, dir: &Path) {
    for ancestor in dir.ancestors() {
        if is_implicit_root(ancestor) {
            continue;
        }
        state
            .entries
            .entry(ancestor.to_path_buf())
            .or_insert(MockEntry::Dir);
    }
}

fn dir_exists(state: &MockState, dir: &Path) -> bool {
    is_implicit_root(dir) || matches!(state.entries.get(dir), Some(MockEntry::Dir))
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = lexical_clean(path);
        let mut state = self.lock();
        state.reads += 1;
        if state.unreadable.contains(&path) {
            return Err(anyhow!("Permission denied: {:?}", path));
        }
        match state.entries.get(&path) {
            Some(MockEntry::File(content)) => {
                String::from_utf8(content.clone()).map_err(|e| anyhow!("Invalid UTF-8: {}", e))
            }
            Some(MockEntry::Dir) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let path = lexical_clean(path);
        let mut state = self.lock();
        if state.denied.iter().any(|d| path.starts_with(d)) {
            return Err(anyhow!("Permission denied: {:?}", path));
        }
        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        if !dir_exists(&state, parent) {
            return Err(anyhow!("No such directory: {:?}", parent));
        }
        if let Some(MockEntry::Dir) = state.entries.get(&path) {
            return Err(anyhow!("Is a directory: {:?}", path));
        }
        state.entries.insert(path, MockEntry::File(contents.to_vec()));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let path = lexical_clean(path);
        let mut state = self.lock();
        if state.denied.iter().any(|d| path.starts_with(d)) {
            return Err(anyhow!("Permission denied: {:?}", path));
        }
        insert_dirs(&mut state, &path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let path = lexical_clean(path);
        is_implicit_root(&path) || self.lock().entries.contains_key(&path)
    }

    fn is_file(&self, path: &Path) -> bool {
        let path = lexical_clean(path);
        matches!(self.lock().entries.get(&path), Some(MockEntry::File(_)))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = lexical_clean(path);
        dir_exists(&self.lock(), &path)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        // No symlinks in the mock: the lexical form is canonical.
        let path = lexical_clean(path);
        if self.exists(&path) {
            Ok(path)
        } else {
            Err(anyhow!("File not found: {:?}", path))
        }
    }
}

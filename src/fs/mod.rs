// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface.
///
/// Everything the resolver and the change detector touch goes through this
/// trait, so the core can be exercised against [`mock::MockFileSystem`].
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Overwrite `path` with `contents`. The parent directory must exist.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents).with_context(|| format!("writing file {:?}", path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("creating dir {:?}", path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path).with_context(|| format!("canonicalizing {:?}", path))
    }
}

/// Remove `.` components and fold `..` into the preceding component without
/// touching the filesystem.
///
/// Leading `..` components of a relative path are kept, `..` directly under
/// the root is dropped. An empty result becomes `.`.
pub fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

/// Express `path` relative to `base`, both taken lexically.
///
/// An empty `base` returns `path` unchanged, as does any pair that cannot be
/// related without touching the filesystem (one absolute and one relative,
/// different prefixes, or `..` left over in `base`). Paths outside `base`
/// get leading `..` components.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    if base.as_os_str().is_empty() || path.is_absolute() != base.is_absolute() {
        return path.to_path_buf();
    }

    let path_clean = lexical_clean(path);
    let base_clean = lexical_clean(base);
    let mut rest = path_clean.components().peekable();
    let mut base_rest = base_clean.components().peekable();
    while let (Some(a), Some(b)) = (rest.peek(), base_rest.peek()) {
        if a != b {
            break;
        }
        rest.next();
        base_rest.next();
    }

    let mut out = PathBuf::new();
    for component in base_rest {
        match component {
            Component::Normal(_) => out.push(".."),
            Component::CurDir => {}
            _ => return path.to_path_buf(),
        }
    }
    for component in rest {
        out.push(component.as_os_str());
    }

    if out.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        out
    }
}

// src/deps/closure.rs

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::deps::reference::{DependencyReference, parse_directive};
use crate::fs::{FileSystem, lexical_clean};

/// Expands root dependency references into every file that can affect an
/// environment's dependency set.
///
/// Nested `-r` / `-c` paths are resolved against the directory of the file
/// that contains them. Files that do not exist are skipped silently, and a
/// file reached twice (directly, through a cycle, or under a second
/// spelling) is only expanded once.
#[derive(Debug, Clone, Copy)]
pub struct ClosureResolver<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ClosureResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Resolve raw declared dependency tokens (e.g. tox `deps` entries).
    pub fn resolve<I, S>(&self, declared: I) -> BTreeSet<PathBuf>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let refs: Vec<DependencyReference> = declared
            .into_iter()
            .map(|raw| DependencyReference::parse(raw.as_ref()))
            .collect();
        self.resolve_references(&refs)
    }

    pub fn resolve_references(&self, refs: &[DependencyReference]) -> BTreeSet<PathBuf> {
        // Reverse so roots are expanded in declaration order when popped.
        let mut stack: Vec<PathBuf> = refs
            .iter()
            .rev()
            .filter_map(DependencyReference::file_path)
            .map(lexical_clean)
            .collect();

        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut watched = BTreeSet::new();

        while let Some(path) = stack.pop() {
            if !self.fs.is_file(&path) {
                debug!(path = ?path, "referenced file does not exist; skipping");
                continue;
            }

            let key = self
                .fs
                .canonicalize(&path)
                .unwrap_or_else(|_| path.clone());
            if !visited.insert(key) {
                continue;
            }

            let content = match self.fs.read_to_string(&path) {
                Ok(content) => content,
                Err(err) => {
                    warn!(path = ?path, error = %err, "cannot read requirements file; not expanding it");
                    watched.insert(path);
                    continue;
                }
            };

            let nested = nested_references(&path, &content);
            for next in nested.into_iter().rev() {
                debug!(from = ?path, nested = ?next, "found nested requirements reference");
                stack.push(next);
            }

            watched.insert(path);
        }

        watched
    }
}

/// Include directives of `content`, resolved relative to `including_file`.
fn nested_references(including_file: &Path, content: &str) -> Vec<PathBuf> {
    let parent = including_file.parent().unwrap_or_else(|| Path::new(""));
    content
        .lines()
        .filter_map(parse_directive)
        .map(|(_, nested)| lexical_clean(&parent.join(nested)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    fn paths(items: &[&str]) -> BTreeSet<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn package_references_are_dropped() {
        let fs = MockFileSystem::new();
        fs.add_file("requirements.txt", "pytest\n");

        let resolved = ClosureResolver::new(&fs).resolve(["pep8", "-rrequirements.txt", "flake8"]);
        assert_eq!(resolved, paths(&["requirements.txt"]));
    }

    #[test]
    fn nested_paths_are_relative_to_the_including_file() {
        let fs = MockFileSystem::new();
        fs.add_file("req1/requirements.txt", "-r requirements/base.txt\n");
        fs.add_file("req1/requirements/base.txt", "-c ../constraints.txt\npytest\n");
        fs.add_file("req1/constraints.txt", "pytest<9\n");
        // Same name relative to the process cwd must not be picked up.
        fs.add_file("requirements/base.txt", "wrong\n");

        let resolved = ClosureResolver::new(&fs).resolve(["-rreq1/requirements.txt"]);
        assert_eq!(
            resolved,
            paths(&[
                "req1/constraints.txt",
                "req1/requirements.txt",
                "req1/requirements/base.txt",
            ])
        );
    }

    #[test]
    fn missing_files_are_skipped() {
        let fs = MockFileSystem::new();
        fs.add_file("requirements.txt", "-r missing.txt\n-r present.txt\n");
        fs.add_file("present.txt", "click\n");

        let resolved =
            ClosureResolver::new(&fs).resolve(["-rrequirements.txt", "-rnot-in-checkout.txt"]);
        assert_eq!(resolved, paths(&["present.txt", "requirements.txt"]));
    }

    #[test]
    fn cycles_terminate() {
        let fs = MockFileSystem::new();
        fs.add_file("a.txt", "-r b.txt\n");
        fs.add_file("b.txt", "-r ./a.txt\n-r a.txt\n");
        fs.add_file("self.txt", "-r ./././self.txt\n");

        let resolved = ClosureResolver::new(&fs).resolve(["-ra.txt", "-rself.txt"]);
        assert_eq!(resolved, paths(&["a.txt", "b.txt", "self.txt"]));
    }

    #[test]
    fn shared_nested_file_is_deduplicated() {
        let fs = MockFileSystem::new();
        fs.add_file("req1/requirements.txt", "-r ../base.txt\n");
        fs.add_file("req2/requirements.txt", "-r ../base.txt\n");
        fs.add_file("base.txt", "pep8\n");

        let resolved = ClosureResolver::new(&fs)
            .resolve(["-rreq1/requirements.txt", "-rreq2/requirements.txt"]);
        assert_eq!(
            resolved,
            paths(&["base.txt", "req1/requirements.txt", "req2/requirements.txt"])
        );
    }

    #[test]
    fn constraint_roots_are_watched() {
        let fs = MockFileSystem::new();
        fs.add_file("constraints.txt", "attrs==23.1\n");

        let resolved = ClosureResolver::new(&fs).resolve(["-cconstraints.txt"]);
        assert_eq!(resolved, paths(&["constraints.txt"]));
    }

    #[test]
    fn unreadable_files_are_watched_but_not_expanded() {
        let fs = MockFileSystem::new();
        fs.add_file("requirements.txt", "-r locked.txt\n");
        fs.add_file("locked.txt", "-r hidden.txt\n");
        fs.add_file("hidden.txt", "six\n");
        fs.deny_reads("locked.txt");

        let resolved = ClosureResolver::new(&fs).resolve(["-rrequirements.txt"]);
        assert_eq!(resolved, paths(&["locked.txt", "requirements.txt"]));
    }
}

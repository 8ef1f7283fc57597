// src/deps/reference.rs

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// `-r path`, `-rpath`, `--requirement path`, `--requirement=path` and the
/// `-c` / `--constraint` equivalents.
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:-(?P<short>[rc])\s*|--(?P<long>requirement|constraint)(?:\s*=\s*|\s+))(?P<path>\S.*?)\s*$",
    )
    .expect("directive regex is valid")
});

/// A `#` at the start of a line or after whitespace starts a comment.
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|\s+)#.*$").expect("comment regex is valid")
});

/// Which include option introduced a file reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `-r` / `--requirement`
    Requirements,
    /// `-c` / `--constraint`
    Constraints,
}

impl DirectiveKind {
    /// Short option spelling, e.g. `-r`.
    pub fn flag(self) -> &'static str {
        match self {
            DirectiveKind::Requirements => "-r",
            DirectiveKind::Constraints => "-c",
        }
    }
}

/// One token from an environment's declared dependency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyReference {
    /// Anything that is not a file include, e.g. `pytest>=7` or `-e .`.
    Package(String),
    /// A file include; the path is taken verbatim (relative to the host's
    /// working directory).
    File { kind: DirectiveKind, path: PathBuf },
}

impl DependencyReference {
    pub fn parse(raw: &str) -> Self {
        match parse_directive(raw) {
            Some((kind, path)) => DependencyReference::File {
                kind,
                path: PathBuf::from(path),
            },
            None => DependencyReference::Package(raw.trim().to_string()),
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        match self {
            DependencyReference::File { path, .. } => Some(path),
            DependencyReference::Package(_) => None,
        }
    }
}

/// Parse a single line as an include directive.
///
/// Returns the directive kind and the referenced path with any trailing
/// comment removed, or `None` when the line is not an include.
pub fn parse_directive(line: &str) -> Option<(DirectiveKind, &str)> {
    let without_comment = match COMMENT_RE.find(line) {
        Some(m) => &line[..m.start()],
        None => line,
    };

    let caps = DIRECTIVE_RE.captures(without_comment)?;
    let kind = match caps
        .name("short")
        .or_else(|| caps.name("long"))
        .map(|m| m.as_str())
    {
        Some("r") | Some("requirement") => DirectiveKind::Requirements,
        Some("c") | Some("constraint") => DirectiveKind::Constraints,
        _ => return None,
    };
    let path = caps.name("path")?;
    Some((kind, &without_comment[path.start()..path.end()]))
}

// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::deps::DependencyReference;
use crate::errors::Result;
use crate::fs::lexical_clean;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; relative paths are left as
/// written and nothing is validated. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    parse_str(&contents)
}

pub fn parse_str(contents: &str) -> Result<RawConfigFile> {
    let config: RawConfigFile = toml::from_str(contents)?;
    Ok(config)
}

/// Load a configuration file from path and validate it.
///
/// This is the recommended entry point for embedding hosts:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Resolves relative `root_dir`, `work_dir`, `envdir` and `-r` / `-c`
///   paths against the directory containing the config file, which is also
///   the default `root_dir`.
/// - Checks for unknown `envlist` entries and misplaced work dirs.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let mut raw = load_from_path(path)?;
    resolve_relative_paths(&mut raw, &config_root_dir(path));
    let config = ConfigFile::try_from(raw)?;
    Ok(config)
}

/// Directory relative paths in a config file are resolved against.
///
/// - If the config path has a non-empty parent (e.g. "ci/reqwatch.toml"),
///   we use that directory.
/// - If it's just a bare filename like "reqwatch.toml" (parent = ""),
///   we fall back to the current working directory "."
pub fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Rebase every relative path of `raw` onto `root`.
///
/// An empty `root_dir` becomes `root`. Other empty paths are left alone so
/// validation still reports them.
pub fn resolve_relative_paths(raw: &mut RawConfigFile, root: &Path) {
    let root_dir = &mut raw.settings.root_dir;
    *root_dir = lexical_clean(&root.join(&*root_dir));

    let work_dir = &mut raw.settings.work_dir;
    if !work_dir.as_os_str().is_empty() {
        *work_dir = lexical_clean(&root.join(&*work_dir));
    }

    for env in raw.env.values_mut() {
        if let Some(envdir) = env.envdir.as_mut() {
            if !envdir.as_os_str().is_empty() {
                *envdir = lexical_clean(&root.join(&*envdir));
            }
        }
        for dep in env.deps.iter_mut() {
            if let DependencyReference::File { kind, path } = DependencyReference::parse(dep) {
                if path.is_relative() {
                    *dep = format!("{}{}", kind.flag(), lexical_clean(&root.join(path)).display());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_follow_the_config_file() {
        let mut raw = parse_str(
            r#"
[settings]
work_dir = ".tox"

[env.py]
deps = ["-rreq1/requirements.txt", "pytest", "-c /abs/constraints.txt"]

[env.lint]
envdir = ".tox/py"
"#,
        )
        .unwrap();

        resolve_relative_paths(&mut raw, Path::new("/project"));

        assert_eq!(raw.settings.work_dir, PathBuf::from("/project/.tox"));
        assert_eq!(raw.settings.root_dir, PathBuf::from("/project"));
        assert_eq!(raw.env["lint"].envdir, Some(PathBuf::from("/project/.tox/py")));
        assert_eq!(
            raw.env["py"].deps,
            vec![
                "-r/project/req1/requirements.txt".to_string(),
                "pytest".to_string(),
                "-c /abs/constraints.txt".to_string(),
            ]
        );
    }

    #[test]
    fn bare_file_name_uses_cwd() {
        let root = config_root_dir(Path::new("reqwatch.toml"));
        assert!(root.is_absolute() || root == Path::new("."));
        assert_eq!(config_root_dir(Path::new("ci/reqwatch.toml")), PathBuf::from("ci"));
    }

    #[test]
    fn explicit_root_dir_is_rebased() {
        let mut raw = parse_str(
            r#"
[settings]
root_dir = "../src"

[env.py]
deps = ["-rrequirements.txt"]
"#,
        )
        .unwrap();

        resolve_relative_paths(&mut raw, Path::new("/project/ci"));
        assert_eq!(raw.settings.root_dir, PathBuf::from("/project/src"));
    }
}

// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::host::{Environment, HostConfig};
use crate::logging::LogLevel;
use crate::types::{DetectorSettings, FirstSightPolicy, HashAlgorithm};

/// Host configuration as read from a TOML file.
///
/// ```toml
/// [settings]
/// work_dir = ".tox"
/// envlist = ["py", "lint"]
///
/// [env.py]
/// deps = ["-rrequirements.txt", "pytest"]
///
/// [env.lint]
/// deps = ["-rrequirements.txt", "flake8"]
/// envdir = ".tox/py"
/// ```
///
/// All sections are optional at this stage; [`ConfigFile::try_from`]
/// enforces the rest.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub settings: SettingsSection,

    /// All environments from `[env.<name>]`.
    #[serde(default)]
    pub env: BTreeMap<String, RawEnvConfig>,
}

/// `[settings]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsSection {
    /// Shared directory holding the snapshot files. Must not be inside any
    /// environment directory.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// Directory requirement paths are declared relative to. Snapshot files
    /// are named after watched paths relative to it. Defaults to the config
    /// file's directory.
    #[serde(default)]
    pub root_dir: PathBuf,

    /// Recreate every environment without looking at requirements.
    #[serde(default)]
    pub recreate: bool,

    #[serde(default)]
    pub algorithm: HashAlgorithm,

    #[serde(default)]
    pub first_sight: FirstSightPolicy,

    #[serde(default)]
    pub log_level: Option<LogLevel>,

    /// Environments taking part in this run; empty means all of them.
    #[serde(default)]
    pub envlist: Vec<String>,
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".tox")
}

impl Default for SettingsSection {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            root_dir: PathBuf::new(),
            recreate: false,
            algorithm: HashAlgorithm::default(),
            first_sight: FirstSightPolicy::default(),
            log_level: None,
            envlist: Vec::new(),
        }
    }
}

impl SettingsSection {
    pub fn detector_settings(&self) -> DetectorSettings {
        DetectorSettings {
            algorithm: self.algorithm,
            first_sight: self.first_sight,
        }
    }
}

/// `[env.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEnvConfig {
    /// Declared dependencies: package names and `-r` / `-c` file references.
    #[serde(default)]
    pub deps: Vec<String>,

    /// Physical environment directory; defaults to `<work_dir>/<name>`.
    #[serde(default)]
    pub envdir: Option<PathBuf>,

    #[serde(default)]
    pub recreate: bool,
}

/// Validated configuration. Implements [`HostConfig`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub settings: SettingsSection,
    pub env: BTreeMap<String, EnvConfig>,
}

/// Validated environment with its directory resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub name: String,
    pub deps: Vec<String>,
    pub envdir: PathBuf,
    pub recreate: bool,
}

impl ConfigFile {
    /// Build without validation. Used after validation in `validate.rs`.
    pub(crate) fn new_unchecked(settings: SettingsSection, env: BTreeMap<String, EnvConfig>) -> Self {
        Self { settings, env }
    }

    pub fn detector_settings(&self) -> DetectorSettings {
        self.settings.detector_settings()
    }

    /// Names of the environments currently marked for recreation.
    pub fn marked_for_recreation(&self) -> Vec<&str> {
        self.env
            .values()
            .filter(|env| env.recreate)
            .map(|env| env.name.as_str())
            .collect()
    }
}

impl HostConfig for ConfigFile {
    type Env = EnvConfig;

    fn recreate_requested(&self) -> bool {
        self.settings.recreate
    }

    fn work_dir(&self) -> &Path {
        &self.settings.work_dir
    }

    fn root_dir(&self) -> &Path {
        &self.settings.root_dir
    }

    fn enabled_environments(&self) -> Vec<String> {
        if self.settings.envlist.is_empty() {
            self.env.keys().cloned().collect()
        } else {
            self.settings.envlist.clone()
        }
    }

    fn environment_mut(&mut self, name: &str) -> Option<&mut EnvConfig> {
        self.env.get_mut(name)
    }
}

impl Environment for EnvConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn declared_dependencies(&self) -> &[String] {
        &self.deps
    }

    fn env_dir(&self) -> &Path {
        &self.envdir
    }

    fn recreate(&self) -> bool {
        self.recreate
    }

    fn set_recreate(&mut self, recreate: bool) {
        self.recreate = recreate;
    }
}

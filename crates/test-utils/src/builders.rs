use std::collections::BTreeMap;
use std::path::PathBuf;

use reqwatch::config::{ConfigFile, RawConfigFile, RawEnvConfig, SettingsSection};
use reqwatch::types::{FirstSightPolicy, HashAlgorithm};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                settings: SettingsSection::default(),
                env: BTreeMap::new(),
            },
        }
    }

    pub fn with_env(mut self, name: &str, env: RawEnvConfig) -> Self {
        self.config.env.insert(name.to_string(), env);
        self
    }

    pub fn work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.settings.work_dir = dir.into();
        self
    }

    pub fn root_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.settings.root_dir = dir.into();
        self
    }

    pub fn envlist(mut self, names: &[&str]) -> Self {
        self.config.settings.envlist = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn recreate(mut self, val: bool) -> Self {
        self.config.settings.recreate = val;
        self
    }

    pub fn algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.config.settings.algorithm = algorithm;
        self
    }

    pub fn first_sight(mut self, policy: FirstSightPolicy) -> Self {
        self.config.settings.first_sight = policy;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `RawEnvConfig`.
pub struct EnvConfigBuilder {
    env: RawEnvConfig,
}

impl EnvConfigBuilder {
    pub fn new() -> Self {
        Self {
            env: RawEnvConfig::default(),
        }
    }

    pub fn dep(mut self, dep: &str) -> Self {
        self.env.deps.push(dep.to_string());
        self
    }

    /// Shorthand for `dep("-r<path>")`.
    pub fn requirements(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.dep(&format!("-r{}", path.display()))
    }

    pub fn envdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.env.envdir = Some(dir.into());
        self
    }

    pub fn recreate(mut self, val: bool) -> Self {
        self.env.recreate = val;
        self
    }

    pub fn build(self) -> RawEnvConfig {
        self.env
    }
}

impl Default for EnvConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

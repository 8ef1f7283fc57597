// src/config/validate.rs

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::model::{ConfigFile, EnvConfig, RawConfigFile};
use crate::errors::{ReqwatchError, Result};
use crate::fs::lexical_clean;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::ReqwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;

        let work_dir = raw.settings.work_dir.clone();
        let env: BTreeMap<String, EnvConfig> = raw
            .env
            .into_iter()
            .map(|(name, env)| {
                let envdir = env.envdir.unwrap_or_else(|| work_dir.join(&name));
                let resolved = EnvConfig {
                    name: name.clone(),
                    deps: env.deps,
                    envdir,
                    recreate: env.recreate,
                };
                (name, resolved)
            })
            .collect();

        Ok(ConfigFile::new_unchecked(raw.settings, env))
    }
}

/// Check a raw configuration without converting it.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_raw_config(cfg)
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_envs(cfg)?;
    validate_settings(cfg)?;
    validate_envlist(cfg)?;
    validate_envdirs(cfg)?;
    Ok(())
}

fn ensure_has_envs(cfg: &RawConfigFile) -> Result<()> {
    if cfg.env.is_empty() {
        return Err(ReqwatchError::ConfigError(
            "config must contain at least one [env.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_settings(cfg: &RawConfigFile) -> Result<()> {
    // algorithm / first_sight are strongly typed and validated during
    // deserialization.
    if cfg.settings.work_dir.as_os_str().is_empty() {
        return Err(ReqwatchError::ConfigError(
            "[settings].work_dir must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_envlist(cfg: &RawConfigFile) -> Result<()> {
    for name in cfg.settings.envlist.iter() {
        if !cfg.env.contains_key(name) {
            return Err(ReqwatchError::UnknownEnvironment(format!(
                "'{}' is listed in [settings].envlist but has no [env.{}] section",
                name, name
            )));
        }
    }
    Ok(())
}

fn validate_envdirs(cfg: &RawConfigFile) -> Result<()> {
    for (name, env) in cfg.env.iter() {
        let Some(envdir) = env.envdir.as_ref() else {
            continue;
        };
        if envdir.as_os_str().is_empty() {
            return Err(ReqwatchError::ConfigError(format!(
                "env '{}' has an empty `envdir`",
                name
            )));
        }
        // Snapshots in work_dir would be wiped together with the environment.
        let envdir_clean = lexical_clean(envdir);
        let work_dir_clean = lexical_clean(&cfg.settings.work_dir);
        let contains_work_dir = if envdir_clean == Path::new(".") {
            work_dir_clean.is_relative() && !work_dir_clean.starts_with("..")
        } else {
            work_dir_clean.starts_with(&envdir_clean)
        };
        if contains_work_dir {
            return Err(ReqwatchError::ConfigError(format!(
                "env '{}' has `envdir` {:?} containing [settings].work_dir {:?}",
                name, envdir, cfg.settings.work_dir
            )));
        }
    }
    Ok(())
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use remould_app::TabKind;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "remould";
pub const MAX_IMAGE_SIZE: u64 = 5 << 20;
const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub intake: Intake,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            intake: Intake::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub start_tab: Option<String>,
    pub seed_demo: Option<bool>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            start_tab: Some(TabKind::Rooms.as_str().to_owned()),
            seed_demo: Some(true),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Intake {
    pub max_image_size: Option<i64>,
}

impl Default for Intake {
    fn default() -> Self {
        Self {
            max_image_size: Some(MAX_IMAGE_SIZE as i64),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub file: Option<String>,
    pub level: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("REMOULD_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set REMOULD_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [ui], [intake], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "config {} has version {}; expected 1",
                path.display(),
                self.version
            );
        }

        if let Some(start_tab) = &self.ui.start_tab
            && TabKind::parse(start_tab).is_none()
        {
            bail!(
                "ui.start_tab in {} must be one of rooms, projects, shopping, profile; got {:?}",
                path.display(),
                start_tab
            );
        }

        if let Some(max_size) = self.intake.max_image_size
            && max_size <= 0
        {
            bail!(
                "intake.max_image_size in {} must be positive, got {}",
                path.display(),
                max_size
            );
        }

        if let Some(level) = &self.log.level {
            tracing_subscriber::EnvFilter::try_new(level).with_context(|| {
                format!(
                    "log.level in {} is not a valid filter {:?} -- use a level such as \"debug\" and retry",
                    path.display(),
                    level
                )
            })?;
        }

        if let Some(file) = &self.log.file
            && file.trim().is_empty()
        {
            bail!(
                "log.file in {} is empty -- remove it or set a file path",
                path.display()
            );
        }

        Ok(())
    }

    pub fn start_tab(&self) -> TabKind {
        self.ui
            .start_tab
            .as_deref()
            .and_then(TabKind::parse)
            .unwrap_or(TabKind::Rooms)
    }

    pub fn seed_demo(&self) -> bool {
        self.ui.seed_demo.unwrap_or(true)
    }

    pub fn max_image_size(&self) -> u64 {
        self.intake
            .max_image_size
            .and_then(|value| u64::try_from(value).ok())
            .unwrap_or(MAX_IMAGE_SIZE)
    }

    /// `[log] file`, else `REMOULD_LOG_FILE`. No file means no logging.
    pub fn log_file(&self) -> Option<PathBuf> {
        if let Some(file) = &self.log.file {
            return Some(PathBuf::from(file));
        }
        env::var_os("REMOULD_LOG_FILE")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    /// `REMOULD_LOG`, else `[log] level`, else `info`.
    pub fn log_filter(&self) -> String {
        if let Ok(filter) = env::var("REMOULD_LOG")
            && !filter.trim().is_empty()
        {
            return filter;
        }
        self.log
            .level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned())
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# remould config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\n# One of rooms, projects, shopping, profile\nstart_tab = \"rooms\"\n# Start with the sample rooms and projects\nseed_demo = true\n\n[intake]\n# Largest room photo accepted, in bytes\nmax_image_size = {}\n\n[log]\n# Optional. Logging is off unless a file is set here or in REMOULD_LOG_FILE\n# file = \"/absolute/path/to/remould.log\"\nlevel = \"{}\"\n",
            path.display(),
            MAX_IMAGE_SIZE,
            DEFAULT_LOG_LEVEL,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, MAX_IMAGE_SIZE};
    use anyhow::Result;
    use remould_app::TabKind;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.start_tab(), TabKind::Rooms);
        assert!(config.seed_demo());
        assert_eq!(config.max_image_size(), MAX_IMAGE_SIZE);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[ui]\nstart_tab = \"projects\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[ui], [intake], and [log]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[ui]\nstart_tab = \"projects\"\nseed_demo = false\n[intake]\nmax_image_size = 2048\n[log]\nlevel = \"debug\"\n",
        )?;
        let config = Config::load(&path)?;
        assert_eq!(config.start_tab(), TabKind::Projects);
        assert!(!config.seed_demo());
        assert_eq!(config.max_image_size(), 2048);
        assert_eq!(config.log.level.as_deref(), Some("debug"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn unknown_start_tab_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nstart_tab = \"add\"\n")?;
        let error = Config::load(&path).expect_err("add is not a tab");
        assert!(error.to_string().contains("ui.start_tab"));
        Ok(())
    }

    #[test]
    fn non_positive_image_size_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[intake]\nmax_image_size = 0\n")?;
        let error = Config::load(&path).expect_err("zero size should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn invalid_log_level_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[log]\nlevel = \"remould=loud\"\n")?;
        let error = Config::load(&path).expect_err("bad filter should fail");
        assert!(error.to_string().contains("log.level"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("REMOULD_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("REMOULD_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("REMOULD_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("remould/config.toml"));
        Ok(())
    }

    #[test]
    fn log_filter_prefers_env_over_config() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n[log]\nlevel = \"warn\"\n")?;
        let config = Config::load(&path)?;

        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("REMOULD_LOG");
        }
        assert_eq!(config.log_filter(), "warn");

        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("REMOULD_LOG", "remould_app=debug");
        }
        let from_env = config.log_filter();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("REMOULD_LOG");
        }
        assert_eq!(from_env, "remould_app=debug");
        assert_eq!(Config::default().log_filter(), "info");
        Ok(())
    }

    #[test]
    fn log_file_prefers_config_over_env() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n[log]\nfile = \"/explicit/remould.log\"\n")?;
        let config = Config::load(&path)?;

        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("REMOULD_LOG_FILE", "/from/env.log");
        }
        let explicit = config.log_file();
        let fallback = Config::default().log_file();
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("REMOULD_LOG_FILE");
        }
        assert_eq!(explicit, Some(PathBuf::from("/explicit/remould.log")));
        assert_eq!(fallback, Some(PathBuf::from("/from/env.log")));
        assert_eq!(Config::default().log_file(), None);
        Ok(())
    }

    #[test]
    fn example_config_round_trips() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[ui]"));
        assert!(example.contains("[intake]"));
        assert!(example.contains("[log]"));

        std::fs::write(&path, &example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.max_image_size(), MAX_IMAGE_SIZE);
        assert_eq!(config.log.file, None);
        Ok(())
    }
}

//! Runtime configuration for the CLI.
//!
//! Precedence per setting: command-line flag, then environment variable,
//! then platform default.

use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "STICKYNOTE_DB_PATH";
pub const LOG_DIR_ENV: &str = "STICKYNOTE_LOG_DIR";
const APP_DIR_NAME: &str = "stickynote";
const DB_FILE_NAME: &str = "stickynote.sqlite3";

/// Fully resolved settings, all paths absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

/// Raw overrides collected from flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Resolves against the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> std::io::Result<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolves with an injectable environment lookup.
    pub fn resolve_with(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> std::io::Result<Self> {
        let db_path = match overrides.db_path.or_else(|| env_path(&env, DB_PATH_ENV)) {
            Some(path) => std::path::absolute(path)?,
            None => default_db_path(),
        };

        let log_dir = match overrides.log_dir.or_else(|| env_path(&env, LOG_DIR_ENV)) {
            Some(path) => std::path::absolute(path)?,
            None => db_path
                .parent()
                .map(|parent| parent.join("logs"))
                .unwrap_or_else(|| std::env::temp_dir().join(APP_DIR_NAME).join("logs")),
        };

        let log_level = overrides
            .log_level
            .unwrap_or_else(|| stickynote_core::default_log_level().to_string());

        Ok(Self {
            db_path,
            log_dir,
            log_level,
        })
    }

    /// Directory the database file lives in.
    pub fn db_dir(&self) -> Option<&Path> {
        self.db_path.parent()
    }
}

fn env_path(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<PathBuf> {
    env(key)
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn default_db_path() -> PathBuf {
    match dirs::data_local_dir() {
        Some(base) => base.join(APP_DIR_NAME).join(DB_FILE_NAME),
        None => std::env::temp_dir().join(DB_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::{CliConfig, ConfigOverrides, DB_PATH_ENV, LOG_DIR_ENV};
    use std::path::PathBuf;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn flags_win_over_environment() {
        let overrides = ConfigOverrides {
            db_path: Some(PathBuf::from("/tmp/flag/notes.sqlite3")),
            log_dir: None,
            log_level: Some("warn".to_string()),
        };
        let config = CliConfig::resolve_with(overrides, |key| match key {
            DB_PATH_ENV => Some("/tmp/env/notes.sqlite3".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/flag/notes.sqlite3"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/flag/logs"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn environment_used_when_flags_absent_and_blank_values_ignored() {
        let config = CliConfig::resolve_with(ConfigOverrides::default(), |key| match key {
            DB_PATH_ENV => Some("/tmp/env/notes.sqlite3".to_string()),
            LOG_DIR_ENV => Some("   ".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/env/notes.sqlite3"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/env/logs"));
    }

    #[test]
    fn relative_paths_become_absolute() {
        let overrides = ConfigOverrides {
            db_path: Some(PathBuf::from("notes.sqlite3")),
            ..ConfigOverrides::default()
        };
        let config = CliConfig::resolve_with(overrides, no_env).unwrap();
        assert!(config.db_path.is_absolute());
        assert!(config.log_dir.is_absolute());
    }

    #[test]
    fn defaults_resolve_to_absolute_paths() {
        let config = CliConfig::resolve_with(ConfigOverrides::default(), no_env).unwrap();
        assert!(config.db_path.ends_with("stickynote.sqlite3"));
        assert!(config.db_dir().is_some());
        assert_eq!(
            config.log_level,
            stickynote_core::default_log_level().to_string()
        );
    }
}

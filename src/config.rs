//! Configuration management for jx-project
//!
//! Settings are loaded from environment variables with defaults. Command line
//! flags override whatever is loaded here.
//!
//! # Environment Variables
//!
//! - `JX_PROJECT_PACKS_DIR`: local build pack catalog - default: `$HOME/.jx/draft/packs`
//! - `JX_PROJECT_LOG_LEVEL`: logging level - default: "info"
//! - `JX_PROJECT_LOG_JSON`: JSON log output (true|false) - default: "false"
//! - `JX_PROJECT_DOCKER_REGISTRY_ORG`: docker registry organisation - default: the git organisation
//! - `JX_PROJECT_GIT_HOST`: git provider host - default: "github.com"
//!
//! # Example
//!
//! ```no_run
//! use jx_project::ImportConfig;
//!
//! let config = ImportConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config.packs_dir.display());
//! ```

use crate::import::DEFAULT_GIT_HOST;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_PACKS_SUBDIR: &str = ".jx/draft/packs";

pub const PACKS_DIR_ENV: &str = "JX_PROJECT_PACKS_DIR";
pub const LOG_LEVEL_ENV: &str = "JX_PROJECT_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "JX_PROJECT_LOG_JSON";
pub const DOCKER_REGISTRY_ORG_ENV: &str = "JX_PROJECT_DOCKER_REGISTRY_ORG";
pub const GIT_HOST_ENV: &str = "JX_PROJECT_GIT_HOST";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Valid options: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Packs directory is not a directory: {}", .0.display())]
    PacksDirNotDirectory(PathBuf),
}

/// Tool configuration for detect and import
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Local build pack catalog
    pub packs_dir: PathBuf,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    pub log_json: bool,

    pub docker_registry_org: Option<String>,

    pub git_host: String,
}

impl Default for ImportConfig {
    /// Loads from `JX_PROJECT_*` environment variables, falling back to defaults
    fn default() -> Self {
        let packs_dir = env::var(PACKS_DIR_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_packs_dir);

        let log_level = env::var(LOG_LEVEL_ENV)
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var(LOG_JSON_ENV)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        let docker_registry_org = env::var(DOCKER_REGISTRY_ORG_ENV)
            .ok()
            .filter(|v| !v.is_empty());

        let git_host = env::var(GIT_HOST_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_GIT_HOST.to_string());

        Self {
            packs_dir,
            log_level,
            log_json,
            docker_registry_org,
            git_host,
        }
    }
}

/// `$HOME/.jx/draft/packs`, or a relative path if there is no home directory
pub fn default_packs_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_PACKS_SUBDIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PACKS_SUBDIR))
}

impl ImportConfig {
    /// Validates the configuration
    ///
    /// A packs directory that does not exist yet is accepted here; the
    /// importer reports it when a pack is looked up.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(ConfigError::InvalidLogLevel(self.log_level.clone())),
        }

        if self.packs_dir.exists() && !self.packs_dir.is_dir() {
            return Err(ConfigError::PacksDirNotDirectory(self.packs_dir.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = vec![
            EnvGuard::unset(PACKS_DIR_ENV),
            EnvGuard::unset(LOG_LEVEL_ENV),
            EnvGuard::unset(LOG_JSON_ENV),
            EnvGuard::unset(DOCKER_REGISTRY_ORG_ENV),
            EnvGuard::unset(GIT_HOST_ENV),
        ];

        let config = ImportConfig::default();

        assert_eq!(config.packs_dir, default_packs_dir());
        assert!(config.packs_dir.ends_with(".jx/draft/packs"));
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(!config.log_json);
        assert!(config.docker_registry_org.is_none());
        assert_eq!(config.git_host, "github.com");
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        let _guards = vec![
            EnvGuard::set(PACKS_DIR_ENV, "/opt/packs"),
            EnvGuard::set(LOG_LEVEL_ENV, "DEBUG"),
            EnvGuard::set(LOG_JSON_ENV, "true"),
            EnvGuard::set(DOCKER_REGISTRY_ORG_ENV, "registry-org"),
            EnvGuard::set(GIT_HOST_ENV, "gitlab.com"),
        ];

        let config = ImportConfig::default();

        assert_eq!(config.packs_dir, PathBuf::from("/opt/packs"));
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
        assert_eq!(config.docker_registry_org.as_deref(), Some("registry-org"));
        assert_eq!(config.git_host, "gitlab.com");
    }

    fn config_with(packs_dir: PathBuf, log_level: &str) -> ImportConfig {
        ImportConfig {
            packs_dir,
            log_level: log_level.to_string(),
            log_json: false,
            docker_registry_org: None,
            git_host: DEFAULT_GIT_HOST.to_string(),
        }
    }

    #[test]
    fn test_invalid_log_level() {
        let temp = TempDir::new().unwrap();
        let config = config_with(temp.path().to_path_buf(), "loud");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLogLevel(l)) if l == "loud"));
    }

    #[test]
    fn test_packs_dir_must_be_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("packs");
        std::fs::write(&file, "").unwrap();

        let config = config_with(file, "info");

        assert!(matches!(config.validate(), Err(ConfigError::PacksDirNotDirectory(_))));
    }

    #[test]
    fn test_missing_packs_dir_is_valid() {
        let temp = TempDir::new().unwrap();
        let config = config_with(temp.path().join("later"), "warn");
        assert!(config.validate().is_ok());
    }
}

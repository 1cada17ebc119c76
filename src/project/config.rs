use super::ProjectConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the pipeline configuration file at the project root
pub const PROJECT_CONFIG_FILE_NAME: &str = "jenkins-x.yml";

/// Build pack value meaning the project manages its own pipeline
pub const NO_BUILD_PACK: &str = "none";

/// The project's persisted pipeline configuration.
///
/// Only `buildPack` is interpreted. `pipelineConfig` and any other keys are
/// carried through load/save untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub build_pack: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_config: Option<serde_yaml::Value>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl PipelineConfig {
    /// Loads the config at `path`; a missing or blank file yields the default
    pub fn load(path: &Path) -> Result<Self, ProjectConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ProjectConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ProjectConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ProjectConfigError> {
        let yaml = serde_yaml::to_string(self).map_err(|source| ProjectConfigError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, yaml).map_err(|source| ProjectConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// True if the project opted out of build packs
    pub fn is_custom_pipeline(&self) -> bool {
        self.build_pack == NO_BUILD_PACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let temp = TempDir::new().unwrap();
        let config = PipelineConfig::load(&temp.path().join(PROJECT_CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_blank_file_is_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(PROJECT_CONFIG_FILE_NAME);
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(PipelineConfig::load(&path).unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_round_trip_preserves_unknown_sections() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(PROJECT_CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "buildPack: maven\npipelineConfig:\n  env:\n  - name: FOO\n    value: bar\nnoReleasePrepare: true\n",
        )
        .unwrap();

        let mut config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.build_pack, "maven");
        config.build_pack = "gradle".to_string();
        config.save(&path).unwrap();

        let reloaded = PipelineConfig::load(&path).unwrap();
        assert_eq!(reloaded.build_pack, "gradle");
        assert_eq!(reloaded.pipeline_config, config.pipeline_config);
        assert_eq!(
            reloaded.extra.get("noReleasePrepare"),
            Some(&serde_yaml::Value::Bool(true))
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(PROJECT_CONFIG_FILE_NAME);
        std::fs::write(&path, "buildPack: [oops").unwrap();

        let err = PipelineConfig::load(&path).unwrap_err();
        assert!(matches!(err, ProjectConfigError::Parse { .. }));
    }

    #[test]
    fn test_custom_pipeline_sentinel() {
        let config = PipelineConfig {
            build_pack: NO_BUILD_PACK.to_string(),
            ..Default::default()
        };
        assert!(config.is_custom_pipeline());
    }
}

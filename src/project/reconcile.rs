//! Build pack bookkeeping in the project configuration

use super::config::PipelineConfig;
use super::ProjectConfigError;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

pub const LIGHTHOUSE_DIR: &str = ".lighthouse";
pub const TRIGGERS_FILE: &str = "triggers.yaml";

/// Result of reconciling the recorded build pack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The recorded pack was replaced and the config saved
    Updated { previous: String },
    /// The recorded pack already matched
    Unchanged,
    /// The project uses the `none` sentinel; nothing was written
    CustomPipeline,
    /// The project has native `.lighthouse/*/triggers.yaml` files; nothing was written
    LighthouseTriggers,
}

/// Records `detected_pack` in the config at `config_path` unless the project
/// opted out of packs or carries its own trigger configuration.
pub fn reconcile_build_pack(
    config_path: &Path,
    detected_pack: &str,
) -> Result<ReconcileOutcome, ProjectConfigError> {
    let project_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    if has_lighthouse_triggers(project_dir)? {
        debug!(dir = %project_dir.display(), "Lighthouse triggers present, leaving build pack untouched");
        return Ok(ReconcileOutcome::LighthouseTriggers);
    }

    let mut config = PipelineConfig::load(config_path)?;
    if config.build_pack == detected_pack {
        return Ok(ReconcileOutcome::Unchanged);
    }
    if config.is_custom_pipeline() {
        debug!(path = %config_path.display(), "Project manages its own pipeline");
        return Ok(ReconcileOutcome::CustomPipeline);
    }

    let previous = std::mem::replace(&mut config.build_pack, detected_pack.to_string());
    config.save(config_path)?;
    debug!(
        path = %config_path.display(),
        previous = %previous,
        build_pack = detected_pack,
        "Updated recorded build pack"
    );
    Ok(ReconcileOutcome::Updated { previous })
}

/// True if any `.lighthouse/<dir>/triggers.yaml` exists under `project_dir`
pub fn has_lighthouse_triggers(project_dir: &Path) -> Result<bool, ProjectConfigError> {
    let lighthouse = project_dir.join(LIGHTHOUSE_DIR);
    let entries = match fs::read_dir(&lighthouse) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(_) if !lighthouse.is_dir() => return Ok(false),
        Err(source) => {
            return Err(ProjectConfigError::Read {
                path: lighthouse,
                source,
            })
        }
    };

    for entry in entries {
        let entry = entry.map_err(|source| ProjectConfigError::Read {
            path: lighthouse.clone(),
            source,
        })?;
        if entry.path().join(TRIGGERS_FILE).is_file() {
            return Ok(true);
        }
    }
    Ok(false)
}

//! Project-side configuration: the pipeline config file, build pack
//! reconciliation and the OWNERS file

pub mod config;
pub mod owners;
pub mod reconcile;

pub use config::{PipelineConfig, NO_BUILD_PACK, PROJECT_CONFIG_FILE_NAME};
pub use owners::{ensure_owners_file, Owners, OWNERS_FILE_NAME};
pub use reconcile::{has_lighthouse_triggers, reconcile_build_pack, ReconcileOutcome};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing project configuration files
#[derive(Debug, Error)]
pub enum ProjectConfigError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize {}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

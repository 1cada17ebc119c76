//! Importing a project: detect, merge, reconcile, rewrite
//!
//! [`ProjectImporter`] runs the whole sequence for one project directory.
//! Every step is idempotent, so a failed import can be re-run as a whole.

use crate::buildpack::{merge_pack, MergeOptions, MergeReport, PackError};
use crate::detection::{DetectionError, PackDetector};
use crate::fs::{dir_exists, is_single_component};
use crate::placeholders::{replace_placeholders, PlaceholderSet, RewriteError, RewriteReport};
use crate::project::{
    ensure_owners_file, reconcile_build_pack, ProjectConfigError, ReconcileOutcome,
    PROJECT_CONFIG_FILE_NAME,
};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_GIT_HOST: &str = "github.com";

/// Errors raised by an import
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("project directory not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot derive an application name from {}", .0.display())]
    NoAppName(PathBuf),

    #[error("invalid application name '{0}': must be a single path component")]
    InvalidAppName(String),

    #[error("failed to inspect {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error("build pack '{pack}' not found in {}", packs_dir.display())]
    PackNotFound { pack: String, packs_dir: PathBuf },

    #[error("failed to merge build pack '{pack}'")]
    Pack {
        pack: String,
        #[source]
        source: PackError,
    },

    #[error(transparent)]
    ProjectConfig(#[from] ProjectConfigError),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}

/// Caller choices for one import
#[derive(Debug)]
pub struct ImportOptions {
    /// Defaults to the lower-cased directory name
    pub app_name: Option<String>,
    pub org: String,
    pub git_host: String,
    /// Defaults to `org`
    pub docker_registry_org: Option<String>,
    /// Skips detection when set
    pub pack: Option<String>,
    pub owners: Vec<String>,
    pub merge: MergeOptions,
}

impl ImportOptions {
    pub fn new(org: impl Into<String>) -> Self {
        Self {
            app_name: None,
            org: org.into(),
            git_host: DEFAULT_GIT_HOST.to_string(),
            docker_registry_org: None,
            pack: None,
            owners: Vec::new(),
            merge: MergeOptions::default(),
        }
    }
}

/// Everything an import did
#[derive(Debug)]
pub struct ImportReport {
    pub app_name: String,
    pub pack: String,
    pub pack_dir: PathBuf,
    pub merge: MergeReport,
    pub reconcile: ReconcileOutcome,
    pub owners_created: bool,
    pub rewrite: RewriteReport,
}

/// Imports projects against one pack catalog
pub struct ProjectImporter {
    detector: PackDetector,
}

impl ProjectImporter {
    pub fn new(packs_dir: impl Into<PathBuf>) -> Self {
        Self::with_detector(PackDetector::new(packs_dir))
    }

    pub fn with_detector(detector: PackDetector) -> Self {
        Self { detector }
    }

    pub fn packs_dir(&self) -> &Path {
        self.detector.packs_dir()
    }

    pub fn import(&self, dir: &Path, options: &ImportOptions) -> Result<ImportReport, ImportError> {
        if !dir.exists() {
            return Err(ImportError::PathNotFound(dir.to_path_buf()));
        }
        if !dir.is_dir() {
            return Err(ImportError::NotADirectory(dir.to_path_buf()));
        }

        let app_name = match &options.app_name {
            Some(name) => name.to_lowercase(),
            None => default_app_name(dir)?,
        };
        if !is_single_component(&app_name) {
            return Err(ImportError::InvalidAppName(app_name));
        }

        let pack = match &options.pack {
            Some(pack) => pack.clone(),
            None => self.detector.detect(dir)?,
        };
        let pack_dir = self.packs_dir().join(&pack);
        let exists = dir_exists(&pack_dir).map_err(|source| ImportError::Io {
            path: pack_dir.clone(),
            source,
        })?;
        if !exists {
            return Err(ImportError::PackNotFound {
                pack,
                packs_dir: self.packs_dir().to_path_buf(),
            });
        }
        debug!(dir = %dir.display(), pack = %pack, app = %app_name, "Importing project");

        let merge = merge_pack(dir, &pack_dir, &app_name, &options.merge).map_err(|source| {
            ImportError::Pack {
                pack: pack.clone(),
                source,
            }
        })?;

        let reconcile = reconcile_build_pack(&dir.join(PROJECT_CONFIG_FILE_NAME), &pack)?;
        debug!(outcome = ?reconcile, "Reconciled build pack");

        let owners_created = ensure_owners_file(dir, &options.owners)?;

        let docker_registry_org = options
            .docker_registry_org
            .as_deref()
            .unwrap_or(&options.org);
        let values = PlaceholderSet::new(&app_name, &options.git_host, &options.org, docker_registry_org);
        let rewrite = replace_placeholders(dir, &values)?;

        Ok(ImportReport {
            app_name: values.app_name().to_string(),
            pack,
            pack_dir,
            merge,
            reconcile,
            owners_created,
            rewrite,
        })
    }
}

/// Lower-cased base name of `dir`, resolving `.` and friends first
pub fn default_app_name(dir: &Path) -> Result<String, ImportError> {
    let resolved = dir.canonicalize().map_err(|source| ImportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ImportError::NoAppName(dir.to_path_buf()))
}

//! Build packs: loading a pack directory and merging it into a project
//!
//! A build pack directory is scanned one level deep. Sub-directories that
//! parse as charts become [`ChartBundle`]s, `.lighthouse` is read as a tree of
//! plain files, other sub-directories are skipped, and top-level files go into
//! the flat file map keyed by name.

pub mod chart;
pub mod loader;
pub mod merger;

pub use chart::{ChartBundle, ChartError, ChartFile};
pub use loader::{load_pack, LoadedPack, SkipReason, SkippedEntry};
pub use merger::{merge_pack, MergeOptions, MergeReport, PackFilter};

use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Files a pack must never contribute; they belong to the project
pub const EXCLUDED_PACK_FILES: &[&str] = &[
    crate::project::PROJECT_CONFIG_FILE_NAME,
    PIPELINE_TEMPLATE_FILE_NAME,
];

/// Pipeline template shipped with some packs
pub const PIPELINE_TEMPLATE_FILE_NAME: &str = "pipeline.yaml";

/// A build pack loaded into memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildPack {
    /// Directory name of the pack (e.g. `maven-java17`)
    pub name: String,
    pub charts: Vec<ChartBundle>,
    /// Pack-relative path to file content
    pub files: BTreeMap<PathBuf, Vec<u8>>,
}

impl BuildPack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty() && self.files.is_empty()
    }

    /// Drops the files a pack must never contribute
    pub fn remove_excluded_files(&mut self) {
        for name in EXCLUDED_PACK_FILES {
            self.files.remove(&PathBuf::from(name));
        }
    }
}

/// Errors raised while loading or merging a pack
#[derive(Debug, Error)]
pub enum PackError {
    #[error("failed to read build pack directory {}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load build pack {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<PackError>,
    },

    #[error("failed to check {}", path.display())]
    Probe {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move {} to {}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

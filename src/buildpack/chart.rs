//! Helm-shaped chart bundles
//!
//! A chart is a directory with a `Chart.yaml` at its root. Only the `name`
//! field is interpreted; every file below the directory is carried verbatim.

use super::PackError;
use crate::fs::{is_single_component, write_file};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

pub const CHART_FILE: &str = "Chart.yaml";

/// Reasons a directory is not a loadable chart
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no Chart.yaml in {}", .0.display())]
    MissingChartFile(PathBuf),

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk chart directory {}", dir.display())]
    Walk {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid Chart.yaml at {}", path.display())]
    InvalidChartFile {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Chart.yaml at {} has an empty name", .0.display())]
    MissingName(PathBuf),

    #[error("Chart.yaml at {} names the chart '{name}', which is not a single path component", path.display())]
    InvalidName { path: PathBuf, name: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMetadata {
    #[serde(default)]
    name: String,
}

/// One file of a chart, relative to the chart root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartFile {
    pub path: PathBuf,
    pub data: Vec<u8>,
}

/// A loaded chart: its name and every file it contains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBundle {
    pub name: String,
    pub files: Vec<ChartFile>,
}

impl ChartBundle {
    /// Loads the chart rooted at `dir`, recursively and in file-name order
    pub fn load_dir(dir: &Path) -> Result<Self, ChartError> {
        let chart_path = dir.join(CHART_FILE);
        if !chart_path.is_file() {
            return Err(ChartError::MissingChartFile(dir.to_path_buf()));
        }

        let raw = std::fs::read_to_string(&chart_path).map_err(|source| ChartError::Io {
            path: chart_path.clone(),
            source,
        })?;
        let metadata: ChartMetadata =
            serde_yaml::from_str(&raw).map_err(|source| ChartError::InvalidChartFile {
                path: chart_path.clone(),
                source,
            })?;
        let name = metadata.name.trim().to_string();
        if name.is_empty() {
            return Err(ChartError::MissingName(chart_path));
        }
        if !is_single_component(&name) {
            return Err(ChartError::InvalidName {
                path: chart_path,
                name,
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|source| ChartError::Walk {
                dir: dir.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let data = std::fs::read(entry.path()).map_err(|source| ChartError::Io {
                path: entry.path().to_path_buf(),
                source,
            })?;
            let path = entry
                .path()
                .strip_prefix(dir)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(ChartFile { path, data });
        }

        Ok(Self { name, files })
    }

    /// Writes the chart to `charts_dir/<name>/`, overwriting same-named files.
    /// Returns the chart directory that was written.
    pub fn save_into(&self, charts_dir: &Path) -> Result<PathBuf, PackError> {
        let chart_dir = charts_dir.join(&self.name);
        for file in &self.files {
            let dest = chart_dir.join(&file.path);
            write_file(&dest, &file.data).map_err(|source| PackError::Write {
                path: dest.clone(),
                source,
            })?;
        }
        Ok(chart_dir)
    }
}

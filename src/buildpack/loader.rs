//! Pack directory loading
//!
//! Only listing the pack directory itself is fatal. Every per-entry failure
//! is recorded as a [`SkippedEntry`] and logged at debug level.

use super::{BuildPack, ChartBundle, ChartError, PackError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Pack sub-directories read as plain file trees instead of charts
pub const TREE_DIRS: &[&str] = &[".lighthouse"];

/// Why an entry of the pack directory was not loaded
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("not a chart")]
    NotAChart(#[source] ChartError),

    #[error("unreadable")]
    Unreadable(#[source] std::io::Error),

    #[error("unreadable tree entry")]
    UnreadableTree(#[source] walkdir::Error),
}

/// An entry of the pack directory that was left out of the pack
#[derive(Debug)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// A loaded pack plus the entries that were skipped while loading it
#[derive(Debug)]
pub struct LoadedPack {
    pub pack: BuildPack,
    pub skipped: Vec<SkippedEntry>,
}

/// Loads the build pack rooted at `dir`
pub fn load_pack(dir: &Path) -> Result<LoadedPack, PackError> {
    let entries = fs::read_dir(dir).map_err(|source| PackError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut pack = BuildPack::new(name);
    let mut skipped = Vec::new();

    let mut children: Vec<PathBuf> = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => children.push(entry.path()),
            Err(e) => skipped.push(SkippedEntry {
                path: dir.to_path_buf(),
                reason: SkipReason::Unreadable(e),
            }),
        }
    }
    children.sort();

    for path in children {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if path.is_dir() {
            if TREE_DIRS.contains(&file_name.as_str()) {
                load_tree(dir, &path, &mut pack, &mut skipped);
                continue;
            }
            match ChartBundle::load_dir(&path) {
                Ok(chart) => {
                    trace!(chart = %chart.name, path = %path.display(), "Loaded chart");
                    pack.charts.push(chart);
                }
                Err(e) => skipped.push(SkippedEntry {
                    path,
                    reason: SkipReason::NotAChart(e),
                }),
            }
        } else {
            match fs::read(&path) {
                Ok(data) => {
                    pack.files.insert(PathBuf::from(file_name), data);
                }
                Err(e) => skipped.push(SkippedEntry {
                    path,
                    reason: SkipReason::Unreadable(e),
                }),
            }
        }
    }

    for entry in &skipped {
        debug!(path = %entry.path.display(), reason = %entry.reason, "Skipped build pack entry");
    }
    debug!(
        pack = %pack.name,
        charts = pack.charts.len(),
        files = pack.files.len(),
        skipped = skipped.len(),
        "Loaded build pack"
    );

    Ok(LoadedPack { pack, skipped })
}

fn load_tree(pack_root: &Path, tree: &Path, pack: &mut BuildPack, skipped: &mut Vec<SkippedEntry>) {
    for entry in WalkDir::new(tree).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                skipped.push(SkippedEntry {
                    path: e.path().unwrap_or(tree).to_path_buf(),
                    reason: SkipReason::UnreadableTree(e),
                });
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(pack_root)
            .unwrap_or(entry.path())
            .to_path_buf();
        match fs::read(entry.path()) {
            Ok(data) => {
                pack.files.insert(rel, data);
            }
            Err(e) => skipped.push(SkippedEntry {
                path: entry.path().to_path_buf(),
                reason: SkipReason::Unreadable(e),
            }),
        }
    }
}

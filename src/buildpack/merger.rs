//! Merging a build pack into a project directory
//!
//! The merge is additive. Charts are only written when the application has
//! no chart of its own, flat files are only written where nothing exists yet,
//! and the project's own pipeline files are never taken from a pack.
//!
//! Moving a pre-existing unnamed chart (`charts/Chart.yaml`) into
//! `charts/<app>/` is done entry by entry and is not rolled back if a move
//! fails part way; re-running the merge after fixing the cause completes it.

use super::chart::CHART_FILE;
use super::{load_pack, BuildPack, LoadedPack, PackError, SkippedEntry};
use crate::fs::{dir_exists, file_exists, path_exists, write_file};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

pub const CHARTS_DIR: &str = "charts";

/// Caller-supplied mutation applied to the loaded pack before it is written
pub struct PackFilter(Box<dyn Fn(&mut BuildPack) + Send + Sync>);

impl PackFilter {
    pub fn new(filter: impl Fn(&mut BuildPack) + Send + Sync + 'static) -> Self {
        Self(Box::new(filter))
    }

    /// Keeps only `.lighthouse/` files and drops every chart
    pub fn lighthouse_only() -> Self {
        Self::new(|pack| {
            pack.charts.clear();
            pack.files.retain(|path, _| path.starts_with(".lighthouse"));
        })
    }

    pub fn apply(&self, pack: &mut BuildPack) {
        (self.0)(pack)
    }
}

impl fmt::Debug for PackFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PackFilter(..)")
    }
}

/// Options for a single merge
#[derive(Debug, Default)]
pub struct MergeOptions {
    pub filter: Option<PackFilter>,
}

impl MergeOptions {
    pub fn with_filter(filter: PackFilter) -> Self {
        Self {
            filter: Some(filter),
        }
    }
}

/// What a merge changed in the project
#[derive(Debug, Default)]
pub struct MergeReport {
    pub pack: String,
    /// Names of charts written under `charts/`
    pub charts_written: Vec<String>,
    /// Entries moved from `charts/` into `charts/<app>/`
    pub moved_chart_entries: Vec<PathBuf>,
    /// Project-relative paths written from the pack
    pub files_written: Vec<PathBuf>,
    /// Pack files not written because the project already has them
    pub files_kept: Vec<PathBuf>,
    pub skipped: Vec<SkippedEntry>,
}

/// Merges the pack at `pack_dir` into `dest` for application `app_name`
pub fn merge_pack(
    dest: &Path,
    pack_dir: &Path,
    app_name: &str,
    options: &MergeOptions,
) -> Result<MergeReport, PackError> {
    let LoadedPack { mut pack, skipped } =
        load_pack(pack_dir).map_err(|source| PackError::Load {
            path: pack_dir.to_path_buf(),
            source: Box::new(source),
        })?;

    let mut report = MergeReport {
        pack: pack.name.clone(),
        skipped,
        ..Default::default()
    };

    let charts_dir = dest.join(CHARTS_DIR);
    let app_chart_dir = charts_dir.join(app_name);
    let unnamed_chart = charts_dir.join(CHART_FILE);

    if probe(&app_chart_dir, dir_exists)? {
        debug!(path = %app_chart_dir.display(), "Application chart exists, ignoring pack charts");
        pack.charts.clear();
    } else if probe(&unnamed_chart, file_exists)? {
        debug!(path = %charts_dir.display(), app = app_name, "Moving unnamed chart into application directory");
        pack.charts.clear();
        report.moved_chart_entries = move_into_app_dir(&charts_dir, app_name)?;
    }

    pack.remove_excluded_files();

    if let Some(filter) = &options.filter {
        filter.apply(&mut pack);
    }

    for chart in &pack.charts {
        let written = chart.save_into(&charts_dir)?;
        trace!(chart = %chart.name, path = %written.display(), "Wrote chart");
        report.charts_written.push(chart.name.clone());
    }

    for (rel, data) in &pack.files {
        let target = dest.join(rel);
        if probe(&target, path_exists)? {
            trace!(path = %target.display(), "Keeping existing project file");
            report.files_kept.push(rel.clone());
            continue;
        }
        write_file(&target, data).map_err(|source| PackError::Write {
            path: target.clone(),
            source,
        })?;
        trace!(path = %target.display(), "Wrote pack file");
        report.files_written.push(rel.clone());
    }

    debug!(
        pack = %report.pack,
        dest = %dest.display(),
        charts = report.charts_written.len(),
        written = report.files_written.len(),
        kept = report.files_kept.len(),
        "Merged build pack"
    );

    Ok(report)
}

fn probe(path: &Path, check: fn(&Path) -> std::io::Result<bool>) -> Result<bool, PackError> {
    check(path).map_err(|source| PackError::Probe {
        path: path.to_path_buf(),
        source,
    })
}

/// Moves every entry of `charts_dir` into `charts_dir/<app_name>/`
fn move_into_app_dir(charts_dir: &Path, app_name: &str) -> Result<Vec<PathBuf>, PackError> {
    let read_err = |source| PackError::ReadDir {
        path: charts_dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(charts_dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        names.push(PathBuf::from(entry.file_name()));
    }
    names.sort();

    let app_dir = charts_dir.join(app_name);
    fs::create_dir_all(&app_dir).map_err(|source| PackError::CreateDir {
        path: app_dir.clone(),
        source,
    })?;

    for name in &names {
        let from = charts_dir.join(name);
        let to = app_dir.join(name);
        fs::rename(&from, &to).map_err(|source| PackError::Move {
            from: from.clone(),
            to: to.clone(),
            source,
        })?;
        trace!(from = %from.display(), to = %to.display(), "Moved chart entry");
    }

    Ok(names)
}

//! Two-phase placeholder rewrite over a project tree
//!
//! Phase one walks the tree depth first, rewriting file contents and
//! collecting every path whose name carries a placeholder. Collected paths
//! are pushed to the front, so deeper entries come before their ancestors.
//! Phase two renames in that order, which keeps every collected path valid
//! until it is renamed itself.

use super::{contains_placeholder, IgnoreRuleSet, PlaceholderSet, RewriteError};
use crate::fs::path_exists;
use std::collections::VecDeque;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

pub const GIT_DIR: &str = ".git";

/// Files rewritten and entries renamed by one pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RewriteReport {
    pub rewritten: Vec<PathBuf>,
    pub renamed: Vec<(PathBuf, PathBuf)>,
}

impl RewriteReport {
    pub fn is_empty(&self) -> bool {
        self.rewritten.is_empty() && self.renamed.is_empty()
    }
}

/// Replaces placeholders in contents and names under `root`, honouring the
/// root's `.gitignore` and never entering `.git`
pub fn replace_placeholders(root: &Path, values: &PlaceholderSet) -> Result<RewriteReport, RewriteError> {
    let rules = IgnoreRuleSet::load(root)?;
    replace_placeholders_with_rules(root, values, &rules)
}

/// As [`replace_placeholders`] with caller-supplied ignore rules
pub fn replace_placeholders_with_rules(
    root: &Path,
    values: &PlaceholderSet,
    rules: &IgnoreRuleSet,
) -> Result<RewriteReport, RewriteError> {
    let mut report = RewriteReport::default();
    let mut renames: VecDeque<PathBuf> = VecDeque::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped(root, entry, rules));

    for entry in walker {
        let entry = entry.map_err(|source| RewriteError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if entry.depth() == 0 {
            continue;
        }
        if entry.file_type().is_symlink() {
            trace!(path = %entry.path().display(), "Skipping symlink");
            continue;
        }

        if replaced_name(values, entry.file_name()).as_os_str() != entry.file_name() {
            renames.push_front(entry.path().to_path_buf());
        }

        if entry.file_type().is_file() && rewrite_file(entry.path(), values)? {
            report.rewritten.push(entry.path().to_path_buf());
        }
    }

    for path in renames {
        let Some(name) = path.file_name() else {
            continue;
        };
        let target = path.with_file_name(replaced_name(values, name));
        rename_new(&path, &target).map_err(|source| RewriteError::Rename {
            from: path.clone(),
            to: target.clone(),
            source,
        })?;
        trace!(from = %path.display(), to = %target.display(), "Renamed placeholder path");
        report.renamed.push((path, target));
    }

    debug!(
        root = %root.display(),
        rewritten = report.rewritten.len(),
        renamed = report.renamed.len(),
        "Replaced placeholders"
    );
    Ok(report)
}

/// Renames `from` to `to`, refusing to replace anything already at `to`
fn rename_new(from: &Path, to: &Path) -> io::Result<()> {
    if path_exists(to)? {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "rename target already exists",
        ));
    }
    fs::rename(from, to)
}

/// `name` with every placeholder substituted, byte for byte
#[cfg(unix)]
fn replaced_name(values: &PlaceholderSet, name: &OsStr) -> OsString {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};
    OsString::from_vec(values.replace_bytes(name.as_bytes()))
}

#[cfg(not(unix))]
fn replaced_name(values: &PlaceholderSet, name: &OsStr) -> OsString {
    match name.to_str() {
        Some(name) => OsString::from(values.replace(name)),
        None => name.to_os_string(),
    }
}

fn is_skipped(root: &Path, entry: &DirEntry, rules: &IgnoreRuleSet) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let is_dir = entry.file_type().is_dir();
    if is_dir && entry.file_name() == GIT_DIR {
        return true;
    }
    let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
    rules.is_ignored(rel, is_dir)
}

/// Rewrites one file in place if it holds a placeholder. Returns whether the
/// file was written.
fn rewrite_file(path: &Path, values: &PlaceholderSet) -> Result<bool, RewriteError> {
    let data = fs::read(path).map_err(|source| RewriteError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if !contains_placeholder(&data) {
        return Ok(false);
    }
    let replaced = values.replace_bytes(&data);
    if replaced == data {
        return Ok(false);
    }
    fs::write(path, &replaced).map_err(|source| RewriteError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    trace!(path = %path.display(), "Rewrote placeholders");
    Ok(true)
}

//! Marker file rules
//!
//! Each rule pairs a marker path with the pack it selects. Rules are kept in
//! an ordered table so the precedence is visible in one place and each rule
//! can be probed on its own.

use super::DetectionError;
use crate::fs::{dir_exists, file_exists};
use std::fs;
use std::io;
use std::path::Path;

/// How a matched marker turns into a pack name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackChoice {
    /// Always this pack
    Named(&'static str),
    /// Ask the maven flavour classifier
    PomFlavour,
}

/// A marker path relative to the project root and the pack it selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRule {
    pub marker: &'static str,
    pub choice: PackChoice,
}

impl MarkerRule {
    /// True if the marker exists as a file under `dir`
    pub fn matches(&self, dir: &Path) -> Result<bool, DetectionError> {
        probe_file(&dir.join(self.marker))
    }
}

/// Marker rules in precedence order; the first match wins.
pub const MARKER_RULES: &[MarkerRule] = &[
    MarkerRule {
        marker: "pom.xml",
        choice: PackChoice::PomFlavour,
    },
    MarkerRule {
        marker: "build.gradle",
        choice: PackChoice::Named("gradle"),
    },
    MarkerRule {
        marker: "plugins.txt",
        choice: PackChoice::Named("jenkins"),
    },
    MarkerRule {
        marker: "packager-config.yml",
        choice: PackChoice::Named("cwp"),
    },
    MarkerRule {
        marker: "env/Chart.yaml",
        choice: PackChoice::Named("environment"),
    },
];

pub const DOCKERFILE: &str = "Dockerfile";
pub const CHART_FILE: &str = "Chart.yaml";
pub const CHARTS_DIR: &str = "charts";
pub const JENKINSFILE: &str = "Jenkinsfile";

pub const DOCKER_HELM_PACK: &str = "docker-helm";
pub const DOCKER_PACK: &str = "docker";
pub const HELM_PACK: &str = "helm";
pub const CUSTOM_JENKINS_PACK: &str = "custom-jenkins";

/// Returns the first marker rule matching `dir`
pub fn first_matching_rule(dir: &Path) -> Result<Option<&'static MarkerRule>, DetectionError> {
    for rule in MARKER_RULES {
        if rule.matches(dir)? {
            return Ok(Some(rule));
        }
    }
    Ok(None)
}

/// True if `path` is a regular file. A parent that is not a directory means
/// the file is absent; any other probe failure is returned.
pub fn probe_file(path: &Path) -> Result<bool, DetectionError> {
    match file_exists(path) {
        Ok(found) => Ok(found),
        Err(_) if !path.parent().is_some_and(Path::is_dir) => Ok(false),
        Err(source) => Err(DetectionError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Container/deployment signals used when no language could be detected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerLayout {
    pub dockerfile: bool,
    pub chart: bool,
}

impl ContainerLayout {
    /// Probes `dir` for a Dockerfile and for `charts/*/Chart.yaml` or `*/Chart.yaml`
    pub fn probe(dir: &Path) -> Result<Self, DetectionError> {
        let dockerfile = probe_file(&dir.join(DOCKERFILE))?;
        let chart = has_child_chart(&dir.join(CHARTS_DIR))? || has_child_chart(dir)?;
        Ok(Self { dockerfile, chart })
    }

    pub fn pack(&self) -> Option<&'static str> {
        match (self.dockerfile, self.chart) {
            (true, true) => Some(DOCKER_HELM_PACK),
            (true, false) => Some(DOCKER_PACK),
            (false, true) => Some(HELM_PACK),
            (false, false) => None,
        }
    }
}

/// True if any immediate sub-directory of `dir` holds a `Chart.yaml`.
/// A missing `dir` is not an error.
fn has_child_chart(dir: &Path) -> Result<bool, DetectionError> {
    let io_err = |source: io::Error| DetectionError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        // a plain file named like the directory just means no charts
        Err(_) if !dir.is_dir() => return Ok(false),
        Err(e) => return Err(io_err(e)),
    };

    for entry in entries {
        let entry = entry.map_err(io_err)?;
        let child = entry.path();
        let is_dir = dir_exists(&child).map_err(|source| DetectionError::Io {
            path: child.clone(),
            source,
        })?;
        if is_dir && probe_file(&child.join(CHART_FILE))? {
            return Ok(true);
        }
    }
    Ok(false)
}

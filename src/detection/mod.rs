//! Build pack detection
//!
//! [`PackDetector`] decides which build pack a source tree needs. The order
//! of evaluation is:
//!
//! 1. Marker files ([`markers::MARKER_RULES`]); `pom.xml` is refined by the
//!    maven flavour classifier and falls back to `maven` if the flavoured pack
//!    is not in the catalog.
//! 2. The language heuristic ([`heuristics::LanguageHeuristic`]).
//! 3. Dockerfile / Helm chart layout.
//! 4. A `Jenkinsfile`.
//!
//! If nothing matches, the heuristic's failure is returned wrapped in
//! [`DetectionError::NoPackDetected`].

pub mod heuristics;
pub mod markers;
pub mod maven;

use crate::fs::dir_exists;
use heuristics::LanguageHeuristic;
use markers::{ContainerLayout, MarkerRule, PackChoice, CUSTOM_JENKINS_PACK, JENKINSFILE};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while detecting a build pack
#[derive(Debug, Error)]
pub enum DetectionError {
    /// A filesystem probe failed for a reason other than absence
    #[error("failed to inspect {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the project tree failed
    #[error("failed to walk {}", dir.display())]
    Walk {
        dir: PathBuf,
        #[source]
        source: ignore::Error,
    },

    /// The heuristic found no file with a known language extension
    #[error("no source files with a known language in {}", .0.display())]
    NoSourceFiles(PathBuf),

    /// Languages were found but none of them has a pack in the catalog
    #[error("no build pack available for languages [{languages}] in {}", dir.display())]
    NoLanguageMatch { dir: PathBuf, languages: String },

    /// Every rule was exhausted
    #[error("could not detect a build pack for {}", dir.display())]
    NoPackDetected {
        dir: PathBuf,
        #[source]
        source: Box<DetectionError>,
    },
}

/// Resolves the build pack name for a project directory against a pack catalog
pub struct PackDetector {
    packs_dir: PathBuf,
    heuristic: LanguageHeuristic,
}

impl PackDetector {
    pub fn new(packs_dir: impl Into<PathBuf>) -> Self {
        Self::with_heuristic(packs_dir, LanguageHeuristic::new())
    }

    pub fn with_heuristic(packs_dir: impl Into<PathBuf>, heuristic: LanguageHeuristic) -> Self {
        Self {
            packs_dir: packs_dir.into(),
            heuristic,
        }
    }

    pub fn packs_dir(&self) -> &Path {
        &self.packs_dir
    }

    /// Detects the pack name for `dir`
    pub fn detect(&self, dir: &Path) -> Result<String, DetectionError> {
        if let Some(rule) = markers::first_matching_rule(dir)? {
            let pack = self.resolve_marker(rule, dir)?;
            debug!(dir = %dir.display(), marker = rule.marker, pack = %pack, "Detected pack from marker file");
            return Ok(pack);
        }

        let heuristic_err = match self.heuristic.detect(dir, &self.packs_dir) {
            Ok(pack) => return Ok(pack),
            Err(e) => e,
        };
        debug!(dir = %dir.display(), error = %heuristic_err, "Language heuristic found no pack");

        let layout = ContainerLayout::probe(dir)?;
        if let Some(pack) = layout.pack() {
            debug!(
                dir = %dir.display(),
                dockerfile = layout.dockerfile,
                chart = layout.chart,
                pack,
                "Detected pack from container layout"
            );
            return Ok(pack.to_string());
        }

        if markers::probe_file(&dir.join(JENKINSFILE))? {
            debug!(dir = %dir.display(), "Detected custom Jenkinsfile");
            return Ok(CUSTOM_JENKINS_PACK.to_string());
        }

        Err(DetectionError::NoPackDetected {
            dir: dir.to_path_buf(),
            source: Box::new(heuristic_err),
        })
    }

    fn resolve_marker(&self, rule: &MarkerRule, dir: &Path) -> Result<String, DetectionError> {
        match rule.choice {
            PackChoice::Named(pack) => Ok(pack.to_string()),
            PackChoice::PomFlavour => {
                let flavour = maven::pom_flavour(&self.packs_dir, &dir.join(rule.marker))?;
                let Some(pack) = flavour else {
                    return Ok(maven::MAVEN_PACK.to_string());
                };
                let pack_dir = self.packs_dir.join(&pack);
                let exists = dir_exists(&pack_dir).map_err(|source| DetectionError::Io {
                    path: pack_dir.clone(),
                    source,
                })?;
                if exists {
                    Ok(pack)
                } else {
                    debug!(pack = %pack, "Flavoured maven pack missing from catalog, using maven");
                    Ok(maven::MAVEN_PACK.to_string())
                }
            }
        }
    }
}

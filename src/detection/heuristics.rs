//! Language heuristic pass
//!
//! Walks the project (honouring `.gitignore`), sums source bytes per language
//! by extension and picks the highest ranked language that has a pack.

use super::DetectionError;
use crate::fs::dir_exists;
use crate::languages::LanguageRegistry;
use ignore::WalkBuilder;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, trace};

/// Bytes of source attributed to one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageShare {
    pub language: String,
    pub pack: String,
    pub bytes: u64,
}

pub struct LanguageHeuristic {
    registry: LanguageRegistry,
}

impl LanguageHeuristic {
    pub fn new() -> Self {
        Self::with_registry(LanguageRegistry::with_defaults())
    }

    pub fn with_registry(registry: LanguageRegistry) -> Self {
        Self { registry }
    }

    /// Ranks the languages found under `dir`, largest share first, ties by name
    pub fn rank(&self, dir: &Path) -> Result<Vec<LanguageShare>, DetectionError> {
        let mut totals: HashMap<&str, (String, u64)> = HashMap::new();

        for result in WalkBuilder::new(dir)
            .hidden(true)
            .git_ignore(true)
            .require_git(false)
            .build()
        {
            let entry = result.map_err(|source| DetectionError::Walk {
                dir: dir.to_path_buf(),
                source,
            })?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            let Some(language) = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .and_then(|ext| self.registry.for_extension(ext))
            else {
                continue;
            };

            let bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
            trace!(path = %entry.path().display(), language = language.name(), bytes, "Counted source file");

            let slot = totals
                .entry(language.name())
                .or_insert_with(|| (language.pack_name().to_string(), 0));
            slot.1 += bytes;
        }

        let mut shares: Vec<LanguageShare> = totals
            .into_iter()
            .map(|(language, (pack, bytes))| LanguageShare {
                language: language.to_string(),
                pack,
                bytes,
            })
            .collect();
        shares.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.language.cmp(&b.language)));
        Ok(shares)
    }

    /// Returns the pack of the highest ranked language that exists under `packs_dir`
    pub fn detect(&self, dir: &Path, packs_dir: &Path) -> Result<String, DetectionError> {
        let shares = self.rank(dir)?;
        if shares.is_empty() {
            return Err(DetectionError::NoSourceFiles(dir.to_path_buf()));
        }

        for share in &shares {
            let pack_dir = packs_dir.join(&share.pack);
            let exists = dir_exists(&pack_dir).map_err(|source| DetectionError::Io {
                path: pack_dir.clone(),
                source,
            })?;
            if exists {
                debug!(
                    language = %share.language,
                    pack = %share.pack,
                    bytes = share.bytes,
                    "Language heuristic selected pack"
                );
                return Ok(share.pack.clone());
            }
            trace!(language = %share.language, pack = %share.pack, "No pack for language");
        }

        Err(DetectionError::NoLanguageMatch {
            dir: dir.to_path_buf(),
            languages: shares
                .iter()
                .map(|s| s.language.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

impl Default for LanguageHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

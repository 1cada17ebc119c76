//! OWNERS file creation

use super::ProjectConfigError;
use crate::fs::path_exists;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const OWNERS_FILE_NAME: &str = "OWNERS";

/// Approvers and reviewers for the repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owners {
    #[serde(default)]
    pub approvers: Vec<String>,
    #[serde(default)]
    pub reviewers: Vec<String>,
}

/// Writes an OWNERS file listing `owners` as approvers and reviewers.
///
/// Does nothing if the file already exists or `owners` is empty. Returns
/// whether a file was written.
pub fn ensure_owners_file(dir: &Path, owners: &[String]) -> Result<bool, ProjectConfigError> {
    let path = dir.join(OWNERS_FILE_NAME);
    if owners.is_empty() {
        return Ok(false);
    }
    let exists = path_exists(&path).map_err(|source| ProjectConfigError::Read {
        path: path.clone(),
        source,
    })?;
    if exists {
        debug!(path = %path.display(), "OWNERS file exists, leaving it alone");
        return Ok(false);
    }

    let content = Owners {
        approvers: owners.to_vec(),
        reviewers: owners.to_vec(),
    };
    let yaml = serde_yaml::to_string(&content).map_err(|source| ProjectConfigError::Serialize {
        path: path.clone(),
        source,
    })?;
    std::fs::write(&path, yaml).map_err(|source| ProjectConfigError::Write {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), owners = owners.len(), "Wrote OWNERS file");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_owners() {
        let temp = TempDir::new().unwrap();

        let written = ensure_owners_file(temp.path(), &["alice".to_string()]).unwrap();

        assert!(written);
        let raw = std::fs::read_to_string(temp.path().join(OWNERS_FILE_NAME)).unwrap();
        let owners: Owners = serde_yaml::from_str(&raw).unwrap();
        assert_eq!(owners.approvers, vec!["alice"]);
        assert_eq!(owners.reviewers, vec!["alice"]);
    }

    #[test]
    fn test_existing_owners_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(OWNERS_FILE_NAME);
        std::fs::write(&path, "approvers:\n- bob\n").unwrap();

        let written = ensure_owners_file(temp.path(), &["alice".to_string()]).unwrap();

        assert!(!written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "approvers:\n- bob\n");
    }

    #[test]
    fn test_no_owners_no_file() {
        let temp = TempDir::new().unwrap();
        assert!(!ensure_owners_file(temp.path(), &[]).unwrap());
        assert!(!temp.path().join(OWNERS_FILE_NAME).exists());
    }
}

use super::RewriteError;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

pub const GITIGNORE_FILE: &str = ".gitignore";

/// `.gitignore` rules rooted at a project directory
pub struct IgnoreRuleSet {
    matcher: Gitignore,
}

impl IgnoreRuleSet {
    /// Reads `<root>/.gitignore`; a project without one ignores nothing
    pub fn load(root: &Path) -> Result<Self, RewriteError> {
        let path = root.join(GITIGNORE_FILE);
        let mut builder = GitignoreBuilder::new(root);
        if path.is_file() {
            if let Some(source) = builder.add(&path) {
                return Err(RewriteError::IgnoreRules { path, source });
            }
        }
        let matcher = builder
            .build()
            .map_err(|source| RewriteError::IgnoreRules { path, source })?;
        Ok(Self { matcher })
    }

    /// True if `rel_path` (relative to the root) is ignored
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        self.matcher.matched(rel_path, is_dir).is_ignore()
    }
}

//! Placeholder substitution
//!
//! Pack files carry `REPLACE_ME_*` tokens in their contents and names. After
//! a merge, [`replace_placeholders`] swaps them for the real application
//! name, git host, organisation and docker registry organisation.

pub mod ignore_rules;
pub mod rewriter;

pub use ignore_rules::IgnoreRuleSet;
pub use rewriter::{replace_placeholders, RewriteReport};

use std::path::PathBuf;
use thiserror::Error;

/// Common prefix of every placeholder token
pub const PLACEHOLDER_PREFIX: &str = "REPLACE_ME";

pub const APP_NAME_PLACEHOLDER: &str = "REPLACE_ME_APP_NAME";
pub const GIT_PROVIDER_PLACEHOLDER: &str = "REPLACE_ME_GIT_PROVIDER";
pub const ORG_PLACEHOLDER: &str = "REPLACE_ME_ORG";
pub const DOCKER_REGISTRY_ORG_PLACEHOLDER: &str = "REPLACE_ME_DOCKER_REGISTRY_ORG";

/// Runtime values for the four placeholders, lower-cased on construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSet {
    app_name: String,
    git_provider: String,
    org: String,
    docker_registry_org: String,
}

impl PlaceholderSet {
    pub fn new(
        app_name: impl AsRef<str>,
        git_provider: impl AsRef<str>,
        org: impl AsRef<str>,
        docker_registry_org: impl AsRef<str>,
    ) -> Self {
        Self {
            app_name: app_name.as_ref().to_lowercase(),
            git_provider: git_provider.as_ref().to_lowercase(),
            org: org.as_ref().to_lowercase(),
            docker_registry_org: docker_registry_org.as_ref().to_lowercase(),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn git_provider(&self) -> &str {
        &self.git_provider
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn docker_registry_org(&self) -> &str {
        &self.docker_registry_org
    }

    /// Token/value pairs, longest token first
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            (DOCKER_REGISTRY_ORG_PLACEHOLDER, self.docker_registry_org.as_str()),
            (GIT_PROVIDER_PLACEHOLDER, self.git_provider.as_str()),
            (APP_NAME_PLACEHOLDER, self.app_name.as_str()),
            (ORG_PLACEHOLDER, self.org.as_str()),
        ]
    }

    /// Substitutes all four placeholders in `text`
    pub fn replace(&self, text: &str) -> String {
        self.pairs()
            .iter()
            .fold(text.to_string(), |acc, (token, value)| acc.replace(token, value))
    }

    /// Byte-level variant of [`PlaceholderSet::replace`] for file contents
    /// that need not be UTF-8
    pub fn replace_bytes(&self, data: &[u8]) -> Vec<u8> {
        self.pairs()
            .iter()
            .fold(data.to_vec(), |acc, (token, value)| {
                replace_all(&acc, token.as_bytes(), value.as_bytes())
            })
    }
}

/// True if `data` contains the placeholder prefix
pub fn contains_placeholder(data: &[u8]) -> bool {
    find(data, PLACEHOLDER_PREFIX.as_bytes()).is_some()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn replace_all(haystack: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(pos) = find(rest, from) {
        out.extend_from_slice(&rest[..pos]);
        out.extend_from_slice(to);
        rest = &rest[pos + from.len()..];
    }
    out.extend_from_slice(rest);
    out
}

/// Errors raised while rewriting placeholders
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("failed to load ignore rules from {}", path.display())]
    IgnoreRules {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("failed to walk {}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to rename {} to {}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

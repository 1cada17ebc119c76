//! Maven flavour classification
//!
//! Picks a maven sub-pack from the text of a `pom.xml`. Matching is plain
//! substring and regex work over the raw file; the pom is never parsed as XML
//! because only a handful of signatures matter.

use super::DetectionError;
use crate::fs::dir_exists;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Generic maven pack, used whenever no flavour applies
pub const MAVEN_PACK: &str = "maven";

/// Prefix of version-specific maven packs (`maven-java17`)
pub const MAVEN_JAVA_PACK_PREFIX: &str = "maven-java";

/// Properties that carry the Java release, highest priority first
pub const JAVA_VERSION_PROPERTIES: &[&str] = &[
    "java.version",
    "maven.compiler.release",
    "maven.compiler.target",
];

struct FlavourRule {
    pack: &'static str,
    all_of: &'static [&'static str],
}

const FLAVOUR_RULES: &[FlavourRule] = &[
    FlavourRule {
        pack: "liberty",
        all_of: &["<packaging>war</packaging>", "org.eclipse.microprofile"],
    },
    FlavourRule {
        pack: "dropwizard",
        all_of: &["<groupId>io.dropwizard"],
    },
    FlavourRule {
        pack: "appserver",
        all_of: &["<groupId>org.apache.tomcat"],
    },
];

fn property_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        JAVA_VERSION_PROPERTIES
            .iter()
            .map(|prop| {
                let escaped = regex::escape(prop);
                let re = Regex::new(&format!(r"<{escaped}>(\d+)</{escaped}>"))
                    .expect("valid regex");
                (*prop, re)
            })
            .collect()
    })
}

/// Returns the Java version from the first property present, in
/// [`JAVA_VERSION_PROPERTIES`] order. The digits are returned verbatim.
pub fn java_version(pom: &str) -> Option<&str> {
    property_patterns().iter().find_map(|(prop, re)| {
        re.captures(pom).and_then(|caps| caps.get(1)).map(|m| {
            trace!(property = *prop, version = m.as_str(), "Found Java version property");
            m.as_str()
        })
    })
}

/// Classifies `pom_path` into a maven pack name.
///
/// Returns `Ok(None)` when the pom cannot be read: an unreadable pom is
/// undetectable, not fatal. Returns [`MAVEN_PACK`] when nothing more specific
/// applies.
pub fn pom_flavour(packs_dir: &Path, pom_path: &Path) -> Result<Option<String>, DetectionError> {
    let pom = match std::fs::read_to_string(pom_path) {
        Ok(pom) => pom,
        Err(e) => {
            debug!(path = %pom_path.display(), error = %e, "Could not read pom, skipping flavour detection");
            return Ok(None);
        }
    };

    if let Some(rule) = FLAVOUR_RULES
        .iter()
        .find(|rule| rule.all_of.iter().all(|needle| pom.contains(needle)))
    {
        debug!(pack = rule.pack, "Matched maven flavour");
        return Ok(Some(rule.pack.to_string()));
    }

    if let Some(version) = java_version(&pom) {
        let pack = format!("{MAVEN_JAVA_PACK_PREFIX}{version}");
        let pack_dir = packs_dir.join(&pack);
        let exists = dir_exists(&pack_dir).map_err(|source| DetectionError::Io {
            path: pack_dir.clone(),
            source,
        })?;
        if exists {
            debug!(pack = %pack, "Matched Java version pack");
            return Ok(Some(pack));
        }
        debug!(pack = %pack, "No pack for Java version, using generic maven");
    }

    Ok(Some(MAVEN_PACK.to_string()))
}

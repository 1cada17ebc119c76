//! jx-project - build pack detection and import for Jenkins X projects
//!
//! Given a project directory and a local catalog of build packs, this crate
//! decides which pack the project needs, merges the pack's charts and files
//! into the project without overwriting anything the project already owns,
//! records the pack in `jenkins-x.yml` and replaces `REPLACE_ME_*`
//! placeholders in file contents and names.
//!
//! # Example Usage
//!
//! ```no_run
//! use jx_project::{ImportOptions, ProjectImporter};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let importer = ProjectImporter::new("/home/me/.jx/draft/packs");
//! let report = importer.import(Path::new("./my-service"), &ImportOptions::new("acme"))?;
//! println!("applied {} to {}", report.pack, report.app_name);
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`detection`]: marker rules, maven flavours and the language heuristic
//! - [`languages`]: extension to language to pack mapping
//! - [`buildpack`]: loading packs and merging them into a project
//! - [`project`]: `jenkins-x.yml` reconciliation and the OWNERS file
//! - [`placeholders`]: placeholder substitution in contents and names
//! - [`import`]: the full import sequence

pub mod buildpack;
pub mod cli;
pub mod config;
pub mod detection;
pub mod fs;
pub mod import;
pub mod languages;
pub mod placeholders;
pub mod project;
pub mod util;

pub use buildpack::{
    load_pack, merge_pack, BuildPack, ChartBundle, LoadedPack, MergeOptions, MergeReport,
    PackError, PackFilter, SkippedEntry,
};
pub use config::{ConfigError, ImportConfig};
pub use detection::{DetectionError, PackDetector};
pub use import::{ImportError, ImportOptions, ImportReport, ProjectImporter};
pub use placeholders::{replace_placeholders, PlaceholderSet, RewriteError, RewriteReport};
pub use project::{reconcile_build_pack, PipelineConfig, ProjectConfigError, ReconcileOutcome};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

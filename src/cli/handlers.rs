//! Command handlers. Each returns the process exit code.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use super::commands::{DetectArgs, ImportArgs};
use super::output::{DetectionOutput, ImportSummary, OutputFormat, OutputFormatter};
use crate::buildpack::{MergeOptions, PackFilter};
use crate::config::ImportConfig;
use crate::detection::PackDetector;
use crate::import::{ImportOptions, ProjectImporter};

pub fn handle_detect(args: &DetectArgs, quiet: bool) -> i32 {
    exit_code(run_detect(args, quiet))
}

pub fn handle_import(args: &ImportArgs, quiet: bool) -> i32 {
    exit_code(run_import(args, quiet))
}

fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

fn load_config(packs_dir: Option<&PathBuf>) -> Result<ImportConfig> {
    let mut config = ImportConfig::default();
    if let Some(dir) = packs_dir {
        config.packs_dir = dir.clone();
    }
    config.validate().context("Invalid configuration")?;
    debug!(packs_dir = %config.packs_dir.display(), "Loaded configuration");
    Ok(config)
}

fn project_dir(path: Option<&PathBuf>) -> PathBuf {
    path.cloned().unwrap_or_else(|| PathBuf::from("."))
}

fn print(rendered: &str, quiet: bool, format: OutputFormat) {
    // Structured output is the command's result, so -q only mutes text
    if quiet && format == OutputFormat::Human {
        return;
    }
    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }
}

fn run_detect(args: &DetectArgs, quiet: bool) -> Result<()> {
    let config = load_config(args.packs_dir.as_ref())?;
    let dir = project_dir(args.project_path.as_ref());
    ensure_directory(&dir)?;

    let pack = PackDetector::new(&config.packs_dir)
        .detect(&dir)
        .with_context(|| format!("Failed to detect a build pack for {}", dir.display()))?;

    let output = DetectionOutput {
        project: dir,
        packs_dir: config.packs_dir,
        pack,
    };
    let format = OutputFormat::from(args.format);
    let rendered = OutputFormatter::new(format).format_detection(&output)?;
    print(&rendered, quiet, format);
    Ok(())
}

fn run_import(args: &ImportArgs, quiet: bool) -> Result<()> {
    let config = load_config(args.packs_dir.as_ref())?;
    let dir = project_dir(args.project_path.as_ref());

    let merge = if args.lighthouse_only {
        MergeOptions::with_filter(PackFilter::lighthouse_only())
    } else {
        MergeOptions::default()
    };
    let options = ImportOptions {
        app_name: args.app_name.clone(),
        org: args.org.clone(),
        git_host: args.git_host.clone().unwrap_or_else(|| config.git_host.clone()),
        docker_registry_org: args
            .docker_registry_org
            .clone()
            .or_else(|| config.docker_registry_org.clone()),
        pack: args.pack.clone(),
        owners: args.owners.clone(),
        merge,
    };

    let report = ProjectImporter::new(&config.packs_dir)
        .import(&dir, &options)
        .with_context(|| format!("Failed to import {}", dir.display()))?;

    let format = OutputFormat::from(args.format);
    let summary = ImportSummary::from_report(&dir, &report);
    let rendered = OutputFormatter::new(format).format_import(&summary)?;
    print(&rendered, quiet, format);
    Ok(())
}

fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("Project directory not found: {}", dir.display());
    }
    Ok(())
}

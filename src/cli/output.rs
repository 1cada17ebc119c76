//! Output formatting for command results
//!
//! Results are rendered as JSON, YAML or human-readable text. JSON and YAML
//! share the same serialisable shapes.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::import::ImportReport;
use crate::project::ReconcileOutcome;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

/// Result of `detect`
#[derive(Debug, Clone, Serialize)]
pub struct DetectionOutput {
    pub project: PathBuf,
    pub packs_dir: PathBuf,
    pub pack: String,
}

/// Result of `import`
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub project: PathBuf,
    pub app_name: String,
    pub pack: String,
    pub charts_written: Vec<String>,
    pub moved_chart_entries: Vec<PathBuf>,
    pub files_written: Vec<PathBuf>,
    pub files_kept: Vec<PathBuf>,
    pub skipped: Vec<SkippedSummary>,
    pub build_pack_record: String,
    pub owners_created: bool,
    pub files_rewritten: Vec<PathBuf>,
    pub paths_renamed: Vec<RenameSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedSummary {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenameSummary {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl ImportSummary {
    /// Builds a summary with paths shown relative to `project`, and skipped
    /// pack entries relative to the pack directory
    pub fn from_report(project: &Path, report: &ImportReport) -> Self {
        let relative = |path: &Path| path.strip_prefix(project).unwrap_or(path).to_path_buf();
        let pack_relative = |path: &Path| {
            path.strip_prefix(&report.pack_dir)
                .unwrap_or(path)
                .to_path_buf()
        };
        Self {
            project: project.to_path_buf(),
            app_name: report.app_name.clone(),
            pack: report.pack.clone(),
            charts_written: report.merge.charts_written.clone(),
            moved_chart_entries: report.merge.moved_chart_entries.clone(),
            files_written: report.merge.files_written.clone(),
            files_kept: report.merge.files_kept.clone(),
            skipped: report
                .merge
                .skipped
                .iter()
                .map(|entry| SkippedSummary {
                    path: pack_relative(&entry.path),
                    reason: entry.reason.to_string(),
                })
                .collect(),
            build_pack_record: describe_reconcile(&report.reconcile),
            owners_created: report.owners_created,
            files_rewritten: report.rewrite.rewritten.iter().map(|p| relative(p)).collect(),
            paths_renamed: report
                .rewrite
                .renamed
                .iter()
                .map(|(from, to)| RenameSummary {
                    from: relative(from),
                    to: relative(to),
                })
                .collect(),
        }
    }
}

fn describe_reconcile(outcome: &ReconcileOutcome) -> String {
    match outcome {
        ReconcileOutcome::Updated { previous } if previous.is_empty() => "created".to_string(),
        ReconcileOutcome::Updated { previous } => format!("updated (was {})", previous),
        ReconcileOutcome::Unchanged => "unchanged".to_string(),
        ReconcileOutcome::CustomPipeline => "custom pipeline, left alone".to_string(),
        ReconcileOutcome::LighthouseTriggers => "lighthouse triggers present, left alone".to_string(),
    }
}

/// Output formatter for command results
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_detection(&self, result: &DetectionOutput) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(result).context("Failed to serialize detection result to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(result).context("Failed to serialize detection result to YAML")
            }
            OutputFormat::Human => Ok(format!("{}\n", result.pack)),
        }
    }

    pub fn format_import(&self, summary: &ImportSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(summary).context("Failed to serialize import summary to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(summary).context("Failed to serialize import summary to YAML")
            }
            OutputFormat::Human => Ok(self.format_import_human(summary)),
        }
    }

    fn format_import_human(&self, summary: &ImportSummary) -> String {
        let mut output = String::new();

        output.push_str(&format!("\u{2713} Imported {}\n", summary.project.display()));
        output.push_str("\u{2501}".repeat(42).as_str());
        output.push_str("\n\n");

        output.push_str(&format!("Application:  {}\n", summary.app_name));
        output.push_str(&format!("Build Pack:   {}\n", summary.pack));
        output.push_str(&format!("jenkins-x.yml: {}\n\n", summary.build_pack_record));

        push_list(&mut output, "Charts written", summary.charts_written.iter().map(|c| c.to_string()));
        push_list(
            &mut output,
            "Chart entries moved",
            summary.moved_chart_entries.iter().map(|p| p.display().to_string()),
        );
        push_list(
            &mut output,
            "Files written",
            summary.files_written.iter().map(|p| p.display().to_string()),
        );
        push_list(
            &mut output,
            "Existing files kept",
            summary.files_kept.iter().map(|p| p.display().to_string()),
        );
        push_list(
            &mut output,
            "Pack entries skipped",
            summary
                .skipped
                .iter()
                .map(|s| format!("{} ({})", s.path.display(), s.reason)),
        );

        if summary.owners_created {
            output.push_str("OWNERS file created\n");
        }
        output.push_str(&format!(
            "Placeholders: {} files rewritten, {} paths renamed\n",
            summary.files_rewritten.len(),
            summary.paths_renamed.len()
        ));

        output
    }
}

fn push_list(output: &mut String, title: &str, items: impl ExactSizeIterator<Item = String>) {
    let len = items.len();
    if len == 0 {
        return;
    }
    output.push_str(&format!("{}:\n", title));
    for (i, item) in items.enumerate() {
        let connector = if i == len - 1 { "\u{2514}" } else { "\u{251C}" };
        output.push_str(&format!("{}\u{2500} {}\n", connector, item));
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection() -> DetectionOutput {
        DetectionOutput {
            project: PathBuf::from("/src/app"),
            packs_dir: PathBuf::from("/packs"),
            pack: "maven-java17".to_string(),
        }
    }

    fn summary() -> ImportSummary {
        ImportSummary {
            project: PathBuf::from("/src/app"),
            app_name: "app".to_string(),
            pack: "go".to_string(),
            charts_written: vec!["REPLACE_ME_APP_NAME".to_string()],
            moved_chart_entries: Vec::new(),
            files_written: vec![PathBuf::from("Dockerfile"), PathBuf::from("Makefile")],
            files_kept: Vec::new(),
            skipped: Vec::new(),
            build_pack_record: "created".to_string(),
            owners_created: true,
            files_rewritten: vec![PathBuf::from("charts/app/Chart.yaml")],
            paths_renamed: vec![RenameSummary {
                from: PathBuf::from("charts/REPLACE_ME_APP_NAME"),
                to: PathBuf::from("charts/app"),
            }],
        }
    }

    #[test]
    fn test_summary_paths_are_relative() {
        use crate::buildpack::{ChartError, MergeReport, SkipReason, SkippedEntry};
        use crate::placeholders::RewriteReport;

        let project = PathBuf::from("/src/app");
        let pack_dir = PathBuf::from("/packs/go");
        let report = ImportReport {
            app_name: "app".to_string(),
            pack: "go".to_string(),
            pack_dir: pack_dir.clone(),
            merge: MergeReport {
                pack: "go".to_string(),
                skipped: vec![SkippedEntry {
                    path: pack_dir.join("notes"),
                    reason: SkipReason::NotAChart(ChartError::MissingChartFile(pack_dir.join("notes"))),
                }],
                ..Default::default()
            },
            reconcile: ReconcileOutcome::Unchanged,
            owners_created: false,
            rewrite: RewriteReport {
                rewritten: vec![project.join("Makefile")],
                renamed: vec![(
                    project.join("charts/REPLACE_ME_APP_NAME"),
                    project.join("charts/app"),
                )],
            },
        };

        let summary = ImportSummary::from_report(&project, &report);

        assert_eq!(summary.skipped[0].path, PathBuf::from("notes"));
        assert_eq!(summary.skipped[0].reason, "not a chart");
        assert_eq!(summary.files_rewritten, vec![PathBuf::from("Makefile")]);
        assert_eq!(summary.paths_renamed[0].to, PathBuf::from("charts/app"));
        assert_eq!(summary.build_pack_record, "unchanged");
    }

    #[test]
    fn test_detection_human_is_pack_name() {
        let out = OutputFormatter::new(OutputFormat::Human)
            .format_detection(&detection())
            .unwrap();
        assert_eq!(out, "maven-java17\n");
    }

    #[test]
    fn test_detection_json() {
        let out = OutputFormatter::new(OutputFormat::Json)
            .format_detection(&detection())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["pack"], "maven-java17");
        assert_eq!(value["packs_dir"], "/packs");
    }

    #[test]
    fn test_import_yaml() {
        let out = OutputFormatter::new(OutputFormat::Yaml)
            .format_import(&summary())
            .unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
        assert_eq!(value["pack"].as_str(), Some("go"));
        assert_eq!(value["owners_created"].as_bool(), Some(true));
    }

    #[test]
    fn test_import_human() {
        let out = OutputFormatter::new(OutputFormat::Human)
            .format_import(&summary())
            .unwrap();
        assert!(out.contains("Build Pack:   go"));
        assert!(out.contains("\u{251C}\u{2500} Dockerfile"));
        assert!(out.contains("\u{2514}\u{2500} Makefile"));
        assert!(out.contains("1 files rewritten, 1 paths renamed"));
        assert!(!out.contains("Existing files kept"));
    }

    #[test]
    fn test_describe_reconcile() {
        assert_eq!(
            describe_reconcile(&ReconcileOutcome::Updated {
                previous: "maven".to_string()
            }),
            "updated (was maven)"
        );
        assert_eq!(
            describe_reconcile(&ReconcileOutcome::Updated {
                previous: String::new()
            }),
            "created"
        );
    }
}

//! Output writing for analysis reports (JSONL and plain text)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;
use crate::analysis::claim::*;
use crate::analysis::ingest::ClaimRecord;

/// A claim together with what the analyzer said about it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: String,
    pub claim: String,
    pub claim_hash: String,
    pub sample_size: u64,
    pub result: AnalysisResult,
    pub created_at: i64,
}

impl AnalysisReport {
    pub fn from_record(record: &ClaimRecord, result: AnalysisResult) -> Self {
        Self {
            id: record.report_id(),
            claim: record.claim.clone(),
            claim_hash: record.claim_hash(),
            sample_size: record.sample_size,
            result,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Write reports to a JSONL file, creating parent directories
pub fn write_reports_jsonl<P: AsRef<Path>>(path: P, reports: &[AnalysisReport]) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {:?}", dir))?;
        }
    }

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {:?}", path))?;

    for report in reports {
        let json = serde_json::to_string(report)?;
        writeln!(file, "{}", json)?;
    }

    tracing::info!("Wrote {} reports to {:?}", reports.len(), path);
    Ok(())
}

/// Load reports back from a JSONL file
pub fn load_reports_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<AnalysisReport>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read reports from {:?}", path))?;
    let mut reports = Vec::new();

    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let report: AnalysisReport = serde_json::from_str(line)
            .with_context(|| format!("Invalid report on line {} of {:?}", line_no + 1, path))?;
        reports.push(report);
    }

    Ok(reports)
}

/// Human-readable rendering of one analysis
pub fn render_report(claim: &str, result: &AnalysisResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Lie Level: {}", result.lie_level);
    let _ = writeln!(out, "{}", result.lie_level.guidance());
    let _ = writeln!(out);
    let _ = writeln!(out, "Analyzing claim: {}", claim);
    let _ = writeln!(out);

    if result.findings.is_empty() {
        let _ = writeln!(
            out,
            "No obvious statistical fallacies detected - the claim appears solid, but always double-check sources and context."
        );
        let _ = writeln!(
            out,
            "Remember Huff's advice: always ask 'Who says so?' and 'How do they know?'"
        );
    } else {
        let _ = writeln!(out, "Statistical fallacies detected:");
        for (i, finding) in result.findings.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, finding.title);
            let _ = writeln!(out, "   Issue: {}", finding.description);
            let _ = writeln!(out, "   Reference: {}", finding.reference);
            let _ = writeln!(out, "   Severity: {}", finding.severity);
        }
    }

    if let Some(sig) = &result.significance {
        let _ = writeln!(out);
        let _ = writeln!(out, "Statistical significance:");
        let _ = writeln!(
            out,
            "P-value: {:.4} (t = {:.3}, df = {:.1})",
            sig.p_value, sig.t_statistic, sig.degrees_of_freedom
        );
        if sig.is_significant {
            let _ = writeln!(
                out,
                "Statistically significant - the difference is unlikely due to chance alone, but still watch for other biases."
            );
        } else {
            let _ = writeln!(
                out,
                "Not statistically significant - the difference could easily be due to random variation."
            );
        }
    } else if let Some(err) = &result.significance_error {
        let _ = writeln!(out);
        let _ = writeln!(out, "Error in statistical calculation: {}", err);
    }

    out
}

/// Summary statistics over a batch of reports
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportStats {
    pub total: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub total_findings: usize,
    pub tested: usize,
    pub not_significant: usize,
    pub by_kind: BTreeMap<String, usize>,
}

impl ReportStats {
    pub fn from_reports(reports: &[AnalysisReport]) -> Self {
        let mut stats = Self {
            total: reports.len(),
            ..Default::default()
        };

        for report in reports {
            match report.result.lie_level {
                Severity::Low => stats.low += 1,
                Severity::Medium => stats.medium += 1,
                Severity::High => stats.high += 1,
            }
            stats.total_findings += report.result.findings.len();

            if let Some(sig) = &report.result.significance {
                stats.tested += 1;
                if !sig.is_significant {
                    stats.not_significant += 1;
                }
            }

            for finding in &report.result.findings {
                *stats.by_kind.entry(finding.title.clone()).or_default() += 1;
            }
        }

        stats
    }
}

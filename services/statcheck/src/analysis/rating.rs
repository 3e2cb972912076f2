//! Lie level aggregation
//!
//! The lie level is recomputed from scratch as a maximum, never accumulated
//! while rules run, so rule order cannot change it:
//! - max severity over all findings (Low when none fired)
//! - raised to at least the configured penalty when a significance test ran
//!   and came back non-significant

use crate::analysis::claim::*;

/// Floor applied to the lie level when group data is not significant
pub const DEFAULT_NON_SIGNIFICANCE_PENALTY: Severity = Severity::Medium;

/// Aggregate findings and an optional test result into a lie level
pub fn lie_level(
    findings: &[Finding],
    significance: Option<&SignificanceResult>,
    non_significance_penalty: Severity,
) -> Severity {
    let from_findings = findings
        .iter()
        .map(|f| f.severity)
        .max()
        .unwrap_or(Severity::Low);

    match significance {
        Some(s) if !s.is_significant => from_findings.max(non_significance_penalty),
        _ => from_findings,
    }
}

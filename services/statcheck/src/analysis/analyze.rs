//! Composed entry point: tokenize → detect → significance → lie level

use crate::analysis::claim::*;
use crate::analysis::fallacy::RuleSet;
use crate::analysis::ingest::ClaimRecord;
use crate::analysis::outputs::AnalysisReport;
use crate::analysis::rating::lie_level;
use crate::analysis::significance::SignificanceTest;
use crate::analysis::tokenize::ClaimTokenizer;
use crate::config::Config;
use std::sync::OnceLock;

/// Holds the configured components. Stateless between calls, so one
/// analyzer can serve any number of claims (and threads).
pub struct Analyzer {
    tokenizer: ClaimTokenizer,
    rules: RuleSet,
    significance: SignificanceTest,
    non_significance_penalty: Severity,
}

impl Analyzer {
    pub fn new(config: &Config) -> Self {
        let analysis = &config.analysis;
        Self {
            tokenizer: ClaimTokenizer::new(analysis.tokenizer),
            rules: RuleSet::canonical(&config.keywords, analysis.small_sample_threshold)
                .with_match_inflections(analysis.match_inflections),
            significance: SignificanceTest::new(analysis.t_test, analysis.significance_level),
            non_significance_penalty: analysis.non_significance_penalty,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn tokenize(&self, claim: &str) -> Vec<String> {
        self.tokenizer.tokenize(claim)
    }

    /// Analyze one claim. Blank claims are expected to be rejected upstream
    /// (see `validate_claim`); they simply produce no findings here.
    pub fn analyze(
        &self,
        claim: &str,
        sample_size: u64,
        g1: &GroupSummary,
        g2: &GroupSummary,
    ) -> AnalysisResult {
        let tokens = self.tokenizer.tokenize(claim);
        let findings = self.rules.detect(&tokens, sample_size);

        let (significance, significance_error) = match self.significance.compute(g1, g2) {
            Ok(result) => (result, None),
            Err(e) => {
                tracing::warn!("Significance calculation failed: {}", e);
                (None, Some(e.to_string()))
            }
        };

        let lie_level = lie_level(&findings, significance.as_ref(), self.non_significance_penalty);

        tracing::debug!(
            tokens = tokens.len(),
            findings = findings.len(),
            lie_level = %lie_level,
            "Claim analyzed"
        );

        AnalysisResult {
            findings,
            lie_level,
            significance,
            significance_error,
        }
    }

    /// Analyze a claim record into a report
    pub fn analyze_record(&self, record: &ClaimRecord) -> AnalysisReport {
        let (g1, g2) = record.groups();
        let result = self.analyze(&record.claim, record.sample_size, &g1, &g2);
        AnalysisReport::from_record(record, result)
    }

    /// Analyze every valid record; invalid ones are skipped with a warning
    pub fn analyze_batch(&self, records: &[ClaimRecord]) -> Vec<AnalysisReport> {
        records
            .iter()
            .filter(|record| match record.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Skipping claim record {}: {}", record.report_id(), e);
                    false
                }
            })
            .map(|record| self.analyze_record(record))
            .collect()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Analyzer with the canonical configuration, built once
pub fn default_analyzer() -> &'static Analyzer {
    static ANALYZER: OnceLock<Analyzer> = OnceLock::new();
    ANALYZER.get_or_init(Analyzer::default)
}

/// Analyze with the canonical configuration. Both groups share `sample_size`.
pub fn analyze(
    claim: &str,
    sample_size: u64,
    g1: &GroupSummary,
    g2: &GroupSummary,
) -> AnalysisResult {
    default_analyzer().analyze(claim, sample_size, g1, g2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_groups() -> GroupSummary {
        GroupSummary::default()
    }

    #[test]
    fn test_percentage_scenario() {
        let result = analyze(
            "This workout boosts endurance by 20% in 30 days",
            0,
            &no_groups(),
            &no_groups(),
        );
        assert_eq!(result.kinds(), vec![FallacyKind::PercentageManipulation]);
        assert_eq!(result.lie_level, Severity::Medium);
        assert!(result.significance.is_none());
    }

    #[test]
    fn test_studies_scenario() {
        let result = analyze(
            "Studies show this correlation proves the drug works",
            10,
            &no_groups(),
            &no_groups(),
        );
        assert_eq!(result.findings.len(), 4);
        assert_eq!(result.lie_level, Severity::High);
    }

    #[test]
    fn test_clean_claim_is_low() {
        let result = analyze("Results are solid", 0, &no_groups(), &no_groups());
        assert!(!result.has_findings());
        assert_eq!(result.lie_level, Severity::Low);
        assert!(result.significance.is_none());
        assert!(result.significance_error.is_none());
    }

    #[test]
    fn test_non_significant_groups_floor_to_medium() {
        let g1 = GroupSummary::new(10.0, 2.0, 40);
        let g2 = GroupSummary::new(10.1, 2.0, 40);
        let result = analyze("Results are solid", 40, &g1, &g2);

        let sig = result.significance.unwrap();
        assert!(!sig.is_significant);
        assert!(result.findings.is_empty());
        assert_eq!(result.lie_level, Severity::Medium);
    }

    #[test]
    fn test_non_significant_does_not_lower_high() {
        let g1 = GroupSummary::new(10.0, 2.0, 40);
        let g2 = GroupSummary::new(10.1, 2.0, 40);
        let result = analyze("Smoking causes cancer", 40, &g1, &g2);
        assert_eq!(result.lie_level, Severity::High);
    }

    #[test]
    fn test_zero_sd_skips_test() {
        let g1 = GroupSummary::new(10.0, 0.0, 40);
        let g2 = GroupSummary::new(12.0, 2.0, 40);
        let result = analyze("Results are solid", 40, &g1, &g2);
        assert!(result.significance.is_none());
        assert!(result.significance_error.is_none());
        assert_eq!(result.lie_level, Severity::Low);
    }

    #[test]
    fn test_calculation_error_keeps_findings() {
        let g1 = GroupSummary::new(10.0, 1e-200, 40);
        let g2 = GroupSummary::new(10.1, 1e-200, 40);
        let result = analyze("the average user", 40, &g1, &g2);

        assert!(result.significance.is_none());
        assert!(result.significance_error.is_some());
        assert_eq!(result.kinds(), vec![FallacyKind::MisleadingAverages]);
        assert_eq!(result.lie_level, Severity::Medium);
    }

    #[test]
    fn test_high_penalty_policy() {
        let mut config = Config::default();
        config.analysis.non_significance_penalty = Severity::High;
        let analyzer = Analyzer::new(&config);

        let g1 = GroupSummary::new(10.0, 2.0, 40);
        let g2 = GroupSummary::new(10.1, 2.0, 40);
        let result = analyzer.analyze("Results are solid", 40, &g1, &g2);
        assert_eq!(result.lie_level, Severity::High);
    }

    #[test]
    fn test_default_analyzer_shared() {
        assert!(std::ptr::eq(default_analyzer(), default_analyzer()));
        let a = analyze("Your risk doubles", 0, &no_groups(), &no_groups());
        let b = Analyzer::default().analyze("Your risk doubles", 0, &no_groups(), &no_groups());
        assert_eq!(a, b);
    }

    #[test]
    fn test_idempotent() {
        let analyzer = Analyzer::default();
        let g1 = GroupSummary::new(3.0, 1.0, 12);
        let g2 = GroupSummary::new(3.4, 1.1, 12);
        let claim = "Sales increased 40 percent after the chart went viral";
        let a = analyzer.analyze(claim, 12, &g1, &g2);
        let b = analyzer.analyze(claim, 12, &g1, &g2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_analyze_record() {
        let record = ClaimRecord::new("Results are solid")
            .with_sample_size(40)
            .with_groups(10.0, 2.0, 10.1, 2.0);
        let report = Analyzer::default().analyze_record(&record);

        assert_eq!(report.id, record.claim_hash());
        assert_eq!(report.result.lie_level, Severity::Medium);
        assert!(report.result.significance.is_some());
    }

    #[test]
    fn test_analyze_batch_skips_invalid() {
        let records = vec![
            ClaimRecord::new("Your risk doubles"),
            ClaimRecord::new("   "),
            ClaimRecord::new("Works great").with_groups(1.0, -1.0, 1.0, 1.0),
            ClaimRecord::new("Results are solid"),
        ];
        let reports = Analyzer::default().analyze_batch(&records);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].claim, "Your risk doubles");
        assert_eq!(reports[1].result.lie_level, Severity::Low);
    }
}

//! Core types for claim analysis results

use serde::{Deserialize, Serialize};
use std::fmt;

/// How strongly a finding (or a whole claim) suggests a misleading statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Default for Severity {
    fn default() -> Self {
        Self::Low
    }
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }

    /// One-line reading guidance shown next to a lie level
    pub fn guidance(&self) -> &'static str {
        match self {
            Severity::Low => "This claim appears relatively trustworthy, but always verify sources.",
            Severity::Medium => "This claim has some potential issues that deserve scrutiny.",
            Severity::High => "This claim shows multiple red flags that warrant serious skepticism.",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fallacy patterns the rule engine knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallacyKind {
    SmallSample,
    MisleadingAverages,
    PercentageManipulation,
    SignificanceWithoutContext,
    GraphicalManipulation,
    CorrelationVsCausation,
    BiasedSampling,
    PostHoc,
    SurvivorshipBias,
    BaseRateFallacy,
}

impl FallacyKind {
    pub fn title(&self) -> &'static str {
        match self {
            FallacyKind::SmallSample => "Small Sample Fallacy",
            FallacyKind::MisleadingAverages => "Misleading Averages",
            FallacyKind::PercentageManipulation => "Percentage Manipulation",
            FallacyKind::SignificanceWithoutContext => "Statistical Significance Without Context",
            FallacyKind::GraphicalManipulation => "Graphical Manipulation",
            FallacyKind::CorrelationVsCausation => "Correlation vs Causation (Post Hoc Fallacy)",
            FallacyKind::BiasedSampling => "Biased Sampling & Cherry-Picking",
            FallacyKind::PostHoc => "Post Hoc Ergo Propter Hoc",
            FallacyKind::SurvivorshipBias => "Survivorship Bias",
            FallacyKind::BaseRateFallacy => "Base-Rate Fallacy",
        }
    }
}

/// One detected fallacy pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: FallacyKind,
    pub title: String,
    pub description: String,
    pub reference: String,
    pub severity: Severity,
}

/// Summary statistics for one comparison group
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub mean: f64,
    pub standard_deviation: f64,
    pub sample_size: u64,
}

impl GroupSummary {
    pub fn new(mean: f64, standard_deviation: f64, sample_size: u64) -> Self {
        Self {
            mean,
            standard_deviation,
            sample_size,
        }
    }

    pub fn variance(&self) -> f64 {
        self.standard_deviation * self.standard_deviation
    }
}

/// Outcome of a two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignificanceResult {
    pub p_value: f64,
    pub is_significant: bool,
    pub t_statistic: f64,
    pub degrees_of_freedom: f64,
}

/// Everything the core says about one claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub findings: Vec<Finding>,
    pub lie_level: Severity,
    pub significance: Option<SignificanceResult>,
    /// Set when group data was usable but the t-test failed numerically
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub significance_error: Option<String>,
}

impl AnalysisResult {
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn find(&self, kind: FallacyKind) -> Option<&Finding> {
        self.findings.iter().find(|f| f.kind == kind)
    }

    pub fn kinds(&self) -> Vec<FallacyKind> {
        self.findings.iter().map(|f| f.kind).collect()
    }
}

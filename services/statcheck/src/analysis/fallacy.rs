//! Fallacy detection over claim tokens using an ordered rule table
//!
//! Each rule is data: a kind, a severity, fixed explanatory text and a list
//! of conditions that must all hold. Every matching rule fires; the table
//! order only decides the order findings are listed in.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use crate::analysis::claim::*;

pub const AVERAGE_WORDS: &[&str] = &["average", "mean", "typical"];
pub const PERCENT_WORDS: &[&str] = &["percent", "%"];
pub const CHANGE_WORDS: &[&str] = &["increase", "decrease", "boost", "reduce", "improve"];
pub const SIGNIFICANCE_WORDS: &[&str] = &["significant", "statistically"];
pub const GRAPH_WORDS: &[&str] = &["graph", "chart", "shows", "demonstrates", "visualizes"];
pub const CAUSATION_WORDS: &[&str] = &[
    "correlation",
    "related",
    "linked",
    "associated",
    "causes",
    "leads",
    "due",
];
pub const RESEARCH_WORDS: &[&str] = &["study", "research", "survey"];
pub const PROOF_WORDS: &[&str] = &["shows", "proves", "demonstrates"];
pub const SEQUENCE_WORDS: &[&str] = &["after", "following", "since", "because"];
pub const CHANGED_WORDS: &[&str] = &["improved", "increased", "decreased"];
pub const SUCCESS_WORDS: &[&str] = &["success", "effective", "works", "proven"];
pub const FAILURE_WORDS: &[&str] = &["failure", "unsuccessful", "failed"];
pub const RATE_WORDS: &[&str] = &["rate", "chance", "probability", "risk"];
pub const BASE_WORDS: &[&str] = &["base"];

pub const DEFAULT_SMALL_SAMPLE_THRESHOLD: u64 = 30;

/// Inflected forms that are common words in their own right and never
/// count as a keyword match ("this means nothing" is not about averages).
pub const NON_INFLECTIONS: &[&str] = &["means", "rated"];

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// Keyword lists for every rule slot. Variant wordings are a data change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTable {
    pub average: Vec<String>,
    pub percent: Vec<String>,
    pub change: Vec<String>,
    pub significance: Vec<String>,
    pub graph: Vec<String>,
    pub causation: Vec<String>,
    pub research: Vec<String>,
    pub proof: Vec<String>,
    pub sequence: Vec<String>,
    pub changed: Vec<String>,
    pub success: Vec<String>,
    pub failure: Vec<String>,
    pub rate: Vec<String>,
    pub base: Vec<String>,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            average: words(AVERAGE_WORDS),
            percent: words(PERCENT_WORDS),
            change: words(CHANGE_WORDS),
            significance: words(SIGNIFICANCE_WORDS),
            graph: words(GRAPH_WORDS),
            causation: words(CAUSATION_WORDS),
            research: words(RESEARCH_WORDS),
            proof: words(PROOF_WORDS),
            sequence: words(SEQUENCE_WORDS),
            changed: words(CHANGED_WORDS),
            success: words(SUCCESS_WORDS),
            failure: words(FAILURE_WORDS),
            rate: words(RATE_WORDS),
            base: words(BASE_WORDS),
        }
    }
}

/// A single predicate over the token set and the sample size
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `0 < n < threshold`
    SmallSample { threshold: u64 },
    /// No sample size was given
    NoSampleSize,
    /// At least one keyword present
    AnyOf(Vec<String>),
    /// No keyword present, by exact membership
    NoneOf(Vec<String>),
}

/// Tokens of one claim, prepared for keyword membership tests
pub struct TokenSet<'a> {
    tokens: HashSet<&'a str>,
    match_inflections: bool,
}

impl<'a> TokenSet<'a> {
    pub fn new(tokens: &'a [String], match_inflections: bool) -> Self {
        Self {
            tokens: tokens.iter().map(String::as_str).collect(),
            match_inflections,
        }
    }

    /// Exact membership, or a regular inflection when enabled
    pub fn contains(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        if self.tokens.contains(keyword.as_str()) {
            return true;
        }
        self.match_inflections
            && self
                .tokens
                .iter()
                .any(|t| !NON_INFLECTIONS.contains(t) && is_inflection_of(t, &keyword))
    }

    /// Exact membership only
    pub fn contains_exact(&self, keyword: &str) -> bool {
        self.tokens.contains(keyword.to_lowercase().as_str())
    }

    pub fn contains_any(&self, keywords: &[String]) -> bool {
        keywords.iter().any(|k| self.contains(k))
    }

    pub fn contains_any_exact(&self, keywords: &[String]) -> bool {
        keywords.iter().any(|k| self.contains_exact(k))
    }
}

/// True when `token` is a regular inflection of `keyword`
/// (`boosts` of `boost`, `studies` of `study`). Never the reverse.
pub fn is_inflection_of(token: &str, keyword: &str) -> bool {
    if keyword.is_empty() || !keyword.chars().all(char::is_alphabetic) {
        return false;
    }
    if let Some(suffix) = token.strip_prefix(keyword) {
        if matches!(suffix, "s" | "es" | "d" | "ed") {
            return true;
        }
    }
    if let Some(stem) = keyword.strip_suffix('y') {
        if let Some(suffix) = token.strip_prefix(stem) {
            return suffix == "ies" || suffix == "ied";
        }
    }
    false
}

impl Condition {
    pub fn holds(&self, tokens: &TokenSet<'_>, sample_size: u64) -> bool {
        match self {
            Condition::SmallSample { threshold } => sample_size > 0 && sample_size < *threshold,
            Condition::NoSampleSize => sample_size == 0,
            Condition::AnyOf(keywords) => tokens.contains_any(keywords),
            Condition::NoneOf(keywords) => !tokens.contains_any_exact(keywords),
        }
    }
}

/// One row of the rule table
#[derive(Debug, Clone, PartialEq)]
pub struct FallacyRule {
    pub kind: FallacyKind,
    pub severity: Severity,
    /// `{n}` is replaced by the sample size
    pub description: &'static str,
    pub reference: &'static str,
    pub conditions: Vec<Condition>,
}

impl FallacyRule {
    pub fn matches(&self, tokens: &TokenSet<'_>, sample_size: u64) -> bool {
        !self.conditions.is_empty() && self.conditions.iter().all(|c| c.holds(tokens, sample_size))
    }

    pub fn finding(&self, sample_size: u64) -> Finding {
        Finding {
            kind: self.kind,
            title: self.kind.title().to_string(),
            description: self.description.replace("{n}", &sample_size.to_string()),
            reference: self.reference.to_string(),
            severity: self.severity,
        }
    }
}

/// Ordered rule table plus matching policy
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    pub rules: Vec<FallacyRule>,
    pub match_inflections: bool,
}

impl RuleSet {
    /// The canonical ten-rule table, in evaluation order
    pub fn canonical(keywords: &KeywordTable, small_sample_threshold: u64) -> Self {
        use Condition::*;

        let k = keywords.clone();
        let rules = vec![
            FallacyRule {
                kind: FallacyKind::SmallSample,
                severity: Severity::Medium,
                description: "With only n={n}, results might be random luck rather than real patterns.",
                reference: "Chapter 1: Small samples exaggerate extremes—like polling 5 friends about politics and claiming it represents everyone.",
                conditions: vec![SmallSample { threshold: small_sample_threshold }],
            },
            FallacyRule {
                kind: FallacyKind::MisleadingAverages,
                severity: Severity::Medium,
                description: "Averages can hide important variations and be manipulated by outliers.",
                reference: "Chapter 2: 'Average' income looks high if one millionaire skews the entire dataset upward.",
                conditions: vec![AnyOf(k.average)],
            },
            FallacyRule {
                kind: FallacyKind::PercentageManipulation,
                severity: Severity::Medium,
                description: "Percentages can sound impressive without proper baseline context.",
                reference: "Chapter 3: A 100% increase from 1 to 2 is just +1—always check the absolute numbers behind percentages.",
                conditions: vec![AnyOf(k.percent), AnyOf(k.change)],
            },
            FallacyRule {
                kind: FallacyKind::SignificanceWithoutContext,
                severity: Severity::High,
                description: "Claims of statistical significance without showing effect size or practical importance.",
                reference: "Chapter 4: Statistical significance doesn't mean practical significance—a tiny difference can be 'significant' with enough data.",
                conditions: vec![AnyOf(k.significance), NoSampleSize],
            },
            FallacyRule {
                kind: FallacyKind::GraphicalManipulation,
                severity: Severity::Medium,
                description: "Charts and graphs can be designed to distort reality and mislead viewers.",
                reference: "Chapter 5: Truncated axes make tiny changes look dramatic. Always check the scale and starting points.",
                conditions: vec![AnyOf(k.graph)],
            },
            FallacyRule {
                kind: FallacyKind::CorrelationVsCausation,
                severity: Severity::High,
                description: "Just because two things happen together doesn't mean one causes the other.",
                reference: "Chapter 6: Roosters crow at dawn, but they don't cause the sun to rise. Correlation ≠ Causation.",
                conditions: vec![AnyOf(k.causation)],
            },
            FallacyRule {
                kind: FallacyKind::BiasedSampling,
                severity: Severity::High,
                description: "Results can be skewed if the sample isn't representative or data is selectively reported.",
                reference: "Chapter 7: Asking only wealthy people about tax policy gives biased results that don't represent everyone.",
                conditions: vec![AnyOf(k.research), AnyOf(k.proof)],
            },
            FallacyRule {
                kind: FallacyKind::PostHoc,
                severity: Severity::High,
                description: "Assuming that because B follows A, A must have caused B.",
                reference: "Chapter 8: Just because sales increased after hiring a consultant doesn't mean the consultant caused the increase.",
                conditions: vec![AnyOf(k.sequence), AnyOf(k.changed)],
            },
            FallacyRule {
                kind: FallacyKind::SurvivorshipBias,
                severity: Severity::High,
                description: "Focusing only on successes while ignoring failures creates false impressions.",
                reference: "Chapter 9: WWII planes showed bullet holes on survivors—but the key was to reinforce where holes weren't found.",
                conditions: vec![AnyOf(k.success), NoneOf(k.failure)],
            },
            FallacyRule {
                kind: FallacyKind::BaseRateFallacy,
                severity: Severity::High,
                description: "Ignoring the overall frequency of events in the population.",
                reference: "Chapter 10: A 99% accurate test for a rare disease (1/1000 people) still gives mostly false positives.",
                conditions: vec![AnyOf(k.rate), NoneOf(k.base)],
            },
        ];

        Self {
            rules,
            match_inflections: true,
        }
    }

    pub fn with_match_inflections(mut self, enabled: bool) -> Self {
        self.match_inflections = enabled;
        self
    }

    pub fn rule(&self, kind: FallacyKind) -> Option<&FallacyRule> {
        self.rules.iter().find(|r| r.kind == kind)
    }

    /// Evaluate every rule in table order and collect the findings
    pub fn detect(&self, tokens: &[String], sample_size: u64) -> Vec<Finding> {
        let token_set = TokenSet::new(tokens, self.match_inflections);

        self.rules
            .iter()
            .filter(|rule| rule.matches(&token_set, sample_size))
            .map(|rule| {
                tracing::debug!(kind = ?rule.kind, severity = %rule.severity, "Rule fired");
                rule.finding(sample_size)
            })
            .collect()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::canonical(&KeywordTable::default(), DEFAULT_SMALL_SAMPLE_THRESHOLD)
    }
}

/// The canonical rule table, built once
pub fn default_rules() -> &'static RuleSet {
    static RULES: OnceLock<RuleSet> = OnceLock::new();
    RULES.get_or_init(RuleSet::default)
}

/// Run the canonical rule table
pub fn detect(tokens: &[String], sample_size: u64) -> Vec<Finding> {
    default_rules().detect(tokens, sample_size)
}

use std::collections::HashSet;

use proptest::prelude::*;
use statcheck::analysis::{
    lie_level, Analyzer, ClaimTokenizer, FallacyKind, GroupSummary, RuleSet, Severity,
    SignificanceTest, TTestKind, TokenizerMode,
};

const VOCAB: &[&str] = &[
    "average", "mean", "typical", "percent", "%", "increase", "boosts", "reduce", "significant",
    "statistically", "graph", "chart", "shows", "show", "demonstrates", "correlation", "linked",
    "causes", "due", "study", "studies", "research", "survey", "proves", "after", "since",
    "because", "improved", "increased", "success", "works", "proven", "failure", "failed", "rate",
    "risk", "chance", "base", "the", "drug", "sales", "people", "our", "results", "are", "solid",
    "by", "in", "20", "days",
];

fn claim_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCAB), 0..14).prop_map(|words| words.join(" "))
}

fn kind_set(kinds: impl IntoIterator<Item = FallacyKind>) -> HashSet<FallacyKind> {
    kinds.into_iter().collect()
}

proptest! {
    #[test]
    fn detect_is_deterministic(claim in claim_strategy(), n in 0u64..100) {
        let rules = RuleSet::default();
        let tokens = ClaimTokenizer::default().tokenize(&claim);
        prop_assert_eq!(rules.detect(&tokens, n), rules.detect(&tokens, n));
    }

    #[test]
    fn analyze_is_idempotent(
        claim in claim_strategy(),
        n in 0u64..100,
        m1 in -50.0f64..50.0,
        m2 in -50.0f64..50.0,
        sd1 in 0.0f64..10.0,
        sd2 in 0.0f64..10.0,
    ) {
        let analyzer = Analyzer::default();
        let g1 = GroupSummary::new(m1, sd1, n);
        let g2 = GroupSummary::new(m2, sd2, n);
        prop_assert_eq!(analyzer.analyze(&claim, n, &g1, &g2), analyzer.analyze(&claim, n, &g1, &g2));
    }

    #[test]
    fn rule_order_does_not_change_outcome(
        claim in claim_strategy(),
        n in 0u64..60,
        order in Just((0..10usize).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let canonical = RuleSet::default();
        let mut shuffled = canonical.clone();
        shuffled.rules = order.iter().map(|&i| canonical.rules[i].clone()).collect();

        let tokens = ClaimTokenizer::default().tokenize(&claim);
        let a = canonical.detect(&tokens, n);
        let b = shuffled.detect(&tokens, n);

        prop_assert_eq!(kind_set(a.iter().map(|f| f.kind)), kind_set(b.iter().map(|f| f.kind)));
        prop_assert_eq!(
            lie_level(&a, None, Severity::Medium),
            lie_level(&b, None, Severity::Medium)
        );
    }

    #[test]
    fn lie_level_is_max_severity(claim in claim_strategy(), n in 0u64..60) {
        let result = Analyzer::default().analyze(&claim, n, &GroupSummary::default(), &GroupSummary::default());
        let max = result.findings.iter().map(|f| f.severity).max().unwrap_or(Severity::Low);
        prop_assert_eq!(result.lie_level, max);
    }

    #[test]
    fn whitespace_fallback_fires_same_rules(
        words in prop::collection::vec("[a-z]{1,10}", 0..12),
        picks in prop::collection::vec(prop::sample::select(VOCAB), 0..6),
        n in 0u64..60,
    ) {
        let ascii_picks = picks.into_iter().filter(|w| w.chars().all(|c| c.is_ascii_lowercase()));
        let claim = words.into_iter().chain(ascii_picks.map(str::to_string)).collect::<Vec<_>>().join(" ");

        let word = ClaimTokenizer::new(TokenizerMode::Word).tokenize(&claim);
        let plain = ClaimTokenizer::new(TokenizerMode::Whitespace).tokenize(&claim);

        let rules = RuleSet::default();
        prop_assert_eq!(rules.detect(&word, n), rules.detect(&plain, n));
    }

    #[test]
    fn p_value_in_unit_interval(
        m1 in 0.1f64..100.0,
        m2 in 0.1f64..100.0,
        sd1 in 0.01f64..20.0,
        sd2 in 0.01f64..20.0,
        n in 2u64..500,
        welch in any::<bool>(),
    ) {
        let kind = if welch { TTestKind::Welch } else { TTestKind::Pooled };
        let test = SignificanceTest::new(kind, 0.05);
        let result = test
            .compute(&GroupSummary::new(m1, sd1, n), &GroupSummary::new(m2, sd2, n))
            .unwrap()
            .unwrap();

        prop_assert!((0.0..=1.0).contains(&result.p_value));
        prop_assert_eq!(result.is_significant, result.p_value < 0.05);
    }
}

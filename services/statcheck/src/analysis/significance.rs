//! Two-sample t-test from group summary statistics
//!
//! Only summaries are available (mean, standard deviation, size), so the
//! test is computed directly from them:
//!
//!   pooled: s_p² = ((n1-1)s1² + (n2-1)s2²) / (n1+n2-2)
//!           se   = sqrt(s_p² (1/n1 + 1/n2)),  df = n1+n2-2
//!   welch:  se   = sqrt(s1²/n1 + s2²/n2),     df by Welch–Satterthwaite
//!
//! The p-value is two-tailed: 2 · P(T > |t|).

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use crate::analysis::claim::{GroupSummary, SignificanceResult};
use crate::error::CalculationError;

pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Variance assumption for the t-test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TTestKind {
    /// Student's test with pooled variance
    Pooled,
    /// Welch's unequal-variance test
    Welch,
}

impl Default for TTestKind {
    fn default() -> Self {
        Self::Pooled
    }
}

/// Whether a pair of summaries carries enough data to test at all
pub fn is_testable(g1: &GroupSummary, g2: &GroupSummary) -> bool {
    g1.mean != 0.0
        && g2.mean != 0.0
        && g1.standard_deviation > 0.0
        && g2.standard_deviation > 0.0
        && g1.sample_size > 1
        && g2.sample_size > 1
}

/// Configured significance calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignificanceTest {
    pub kind: TTestKind,
    pub level: f64,
}

impl Default for SignificanceTest {
    fn default() -> Self {
        Self {
            kind: TTestKind::Pooled,
            level: DEFAULT_SIGNIFICANCE_LEVEL,
        }
    }
}

impl SignificanceTest {
    pub fn new(kind: TTestKind, level: f64) -> Self {
        Self { kind, level }
    }

    /// Returns `Ok(None)` when the summaries fail the preconditions
    pub fn compute(
        &self,
        g1: &GroupSummary,
        g2: &GroupSummary,
    ) -> Result<Option<SignificanceResult>, CalculationError> {
        if !is_testable(g1, g2) {
            return Ok(None);
        }

        let n1 = g1.sample_size as f64;
        let n2 = g2.sample_size as f64;
        let (v1, v2) = (g1.variance(), g2.variance());

        let (std_error, df) = match self.kind {
            TTestKind::Pooled => {
                let df = n1 + n2 - 2.0;
                let pooled = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / df;
                ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df)
            }
            TTestKind::Welch => {
                let a = v1 / n1;
                let b = v2 / n2;
                let df = (a + b).powi(2) / (a * a / (n1 - 1.0) + b * b / (n2 - 1.0));
                ((a + b).sqrt(), df)
            }
        };

        if !std_error.is_finite() || std_error <= 0.0 {
            return Err(CalculationError::DegenerateVariance(std_error));
        }
        if !df.is_finite() || df <= 0.0 {
            return Err(CalculationError::NonFiniteStatistic {
                name: "degrees of freedom",
                value: df,
            });
        }

        let t = (g1.mean - g2.mean) / std_error;
        if !t.is_finite() {
            return Err(CalculationError::NonFiniteStatistic {
                name: "t statistic",
                value: t,
            });
        }

        let p_value = pvalue_t(t, df)?;

        Ok(Some(SignificanceResult {
            p_value,
            is_significant: p_value < self.level,
            t_statistic: t,
            degrees_of_freedom: df,
        }))
    }
}

/// Two-tailed p-value for a t statistic
pub fn pvalue_t(t: f64, df: f64) -> Result<f64, CalculationError> {
    let t_dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| CalculationError::Distribution(e.to_string()))?;

    let p = 2.0 * t_dist.sf(t.abs());
    if !p.is_finite() {
        return Err(CalculationError::NonFiniteStatistic {
            name: "p-value",
            value: p,
        });
    }
    Ok(p.clamp(0.0, 1.0))
}

/// Pooled two-sample t-test at the 5% level
pub fn compute_significance(
    g1: &GroupSummary,
    g2: &GroupSummary,
) -> Result<Option<SignificanceResult>, CalculationError> {
    SignificanceTest::default().compute(g1, g2)
}

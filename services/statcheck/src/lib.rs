//! Statistical claim checker
//!
//! Flags the classic ways a statistic can mislead (small samples, averages,
//! percentages without a baseline, correlation sold as causation, ...) and
//! optionally runs a two-sample t-test on supplied group summaries.

pub mod analysis;
pub mod config;
pub mod error;

pub use analysis::{analyze, Analyzer, AnalysisResult, Finding, GroupSummary, Severity};
pub use config::Config;
pub use error::{CalculationError, ClaimError};

//! Claim → Tokens → Fallacy Rules → Lie Level pipeline
//!
//! This module implements:
//! 1. Tokenizing claim text (regex word splitter with whitespace fallback)
//! 2. Evaluating the ordered fallacy rule table
//! 3. Two-sample t-test from group summaries
//! 4. Aggregating findings into a lie level
//! 5. Reading claim records and writing analysis reports

pub mod claim;
pub mod tokenize;
pub mod fallacy;
pub mod significance;
pub mod rating;
pub mod analyze;
pub mod ingest;
pub mod outputs;

pub use claim::*;
pub use tokenize::*;
pub use fallacy::*;
pub use significance::*;
pub use rating::*;
pub use analyze::*;
pub use ingest::*;
pub use outputs::*;

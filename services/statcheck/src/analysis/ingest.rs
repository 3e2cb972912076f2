//! Claim records - the input side of batch analysis

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use crate::analysis::claim::GroupSummary;
use crate::error::ClaimError;

/// One claim to analyze, with the optional study numbers that go with it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub claim: String,
    #[serde(default)]
    pub sample_size: u64,
    #[serde(default)]
    pub mean1: f64,
    #[serde(default)]
    pub sd1: f64,
    #[serde(default)]
    pub mean2: f64,
    #[serde(default)]
    pub sd2: f64,
}

impl ClaimRecord {
    pub fn new(claim: &str) -> Self {
        Self {
            claim: claim.to_string(),
            ..Default::default()
        }
    }

    pub fn with_sample_size(mut self, sample_size: u64) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn with_groups(mut self, mean1: f64, sd1: f64, mean2: f64, sd2: f64) -> Self {
        self.mean1 = mean1;
        self.sd1 = sd1;
        self.mean2 = mean2;
        self.sd2 = sd2;
        self
    }

    /// Compute SHA256 hash of the claim text
    pub fn claim_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.claim.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Explicit id, or the claim hash when none was given
    pub fn report_id(&self) -> String {
        self.id.clone().unwrap_or_else(|| self.claim_hash())
    }

    /// Both groups share the record's sample size
    pub fn groups(&self) -> (GroupSummary, GroupSummary) {
        (
            GroupSummary::new(self.mean1, self.sd1, self.sample_size),
            GroupSummary::new(self.mean2, self.sd2, self.sample_size),
        )
    }

    pub fn validate(&self) -> Result<(), ClaimError> {
        validate_claim(&self.claim)?;
        for (field, value) in [("sd1", self.sd1), ("sd2", self.sd2)] {
            if value < 0.0 {
                return Err(ClaimError::NegativeInput { field, value });
            }
        }
        Ok(())
    }
}

/// Reject empty or whitespace-only claim text
pub fn validate_claim(claim: &str) -> Result<(), ClaimError> {
    if claim.trim().is_empty() {
        return Err(ClaimError::BlankClaim);
    }
    Ok(())
}

/// Load claim records from a JSONL file
pub fn load_claims_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<ClaimRecord>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read claims from {:?}", path))?;

    let mut records = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: ClaimRecord = serde_json::from_str(line)
            .with_context(|| format!("Invalid claim record on line {}", line_no + 1))?;
        records.push(record);
    }

    tracing::info!("Loaded {} claim records from {:?}", records.len(), path);
    Ok(records)
}

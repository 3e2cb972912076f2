use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::analysis::claim::Severity;
use crate::analysis::fallacy::{KeywordTable, DEFAULT_SMALL_SAMPLE_THRESHOLD};
use crate::analysis::rating::DEFAULT_NON_SIGNIFICANCE_PENALTY;
use crate::analysis::significance::{TTestKind, DEFAULT_SIGNIFICANCE_LEVEL};
use crate::analysis::tokenize::TokenizerMode;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub keywords: KeywordTable,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub tokenizer: TokenizerMode,
    #[serde(default = "default_true")]
    pub match_inflections: bool,
    #[serde(default = "default_small_sample_threshold")]
    pub small_sample_threshold: u64,
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,
    #[serde(default = "default_non_significance_penalty")]
    pub non_significance_penalty: Severity,
    #[serde(default)]
    pub t_test: TTestKind,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerMode::default(),
            match_inflections: default_true(),
            small_sample_threshold: default_small_sample_threshold(),
            significance_level: default_significance_level(),
            non_significance_penalty: default_non_significance_penalty(),
            t_test: TTestKind::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;
        let config: Config = toml::from_str(&content)
            .context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use built-in defaults
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let level = self.analysis.significance_level;
        if !(level > 0.0 && level < 1.0) {
            anyhow::bail!("significance_level must be in (0, 1), got {}", level);
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_small_sample_threshold() -> u64 {
    DEFAULT_SMALL_SAMPLE_THRESHOLD
}

fn default_significance_level() -> f64 {
    DEFAULT_SIGNIFICANCE_LEVEL
}

fn default_non_significance_penalty() -> Severity {
    DEFAULT_NON_SIGNIFICANCE_PENALTY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_load() {
        let config = Config::load("../../config/statcheck.toml").unwrap();
        assert_eq!(config.analysis.tokenizer, TokenizerMode::Word);
        assert_eq!(config.analysis.small_sample_threshold, 30);
        assert_eq!(config.keywords, KeywordTable::default());
    }

    #[test]
    fn test_config_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.analysis.match_inflections);
        assert_eq!(config.analysis.significance_level, 0.05);
        assert_eq!(config.analysis.non_significance_penalty, Severity::Medium);
        assert_eq!(config.analysis.t_test, TTestKind::Pooled);
    }

    #[test]
    fn test_config_overrides() {
        let toml_str = r#"
[analysis]
tokenizer = "whitespace"
non_significance_penalty = "high"
t_test = "welch"
[keywords]
average = ["average", "mean", "median"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.analysis.tokenizer, TokenizerMode::Whitespace);
        assert_eq!(config.analysis.non_significance_penalty, Severity::High);
        assert_eq!(config.analysis.t_test, TTestKind::Welch);
        assert_eq!(config.keywords.average.len(), 3);
        assert_eq!(config.keywords.rate, KeywordTable::default().rate);
    }

    #[test]
    fn test_invalid_level_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[analysis]\nsignificance_level = 1.5\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}

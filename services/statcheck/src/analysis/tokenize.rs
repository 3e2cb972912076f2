//! Split claim text into lowercase word tokens

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Numbers keep internal separators, words keep internal apostrophes and
/// hyphens, any other non-space character stands alone ("20%" -> "20", "%").
const WORD_PATTERN: &str = r"\d+(?:[.,]\d+)*|[\p{L}\p{N}_]+(?:['’\-][\p{L}\p{N}_]+)*|\S";

/// Which splitter to try first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerMode {
    Word,
    Whitespace,
}

impl Default for TokenizerMode {
    fn default() -> Self {
        Self::Word
    }
}

/// A claim splitter. Input is expected to be lower-cased already.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> anyhow::Result<Vec<String>>;

    fn name(&self) -> &str;
}

/// Punctuation-aware splitter backed by a compiled regex
pub struct WordTokenizer {
    re: Regex,
}

impl WordTokenizer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            re: Regex::new(WORD_PATTERN)?,
        })
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> anyhow::Result<Vec<String>> {
        Ok(self
            .re
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect())
    }

    fn name(&self) -> &str {
        "word"
    }
}

/// Plain whitespace splitting
#[derive(Debug, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> anyhow::Result<Vec<String>> {
        Ok(text.split_whitespace().map(str::to_string).collect())
    }

    fn name(&self) -> &str {
        "whitespace"
    }
}

/// Lower-cases the claim and tokenizes it, falling back to whitespace
/// splitting whenever the primary tokenizer is missing or fails.
pub struct ClaimTokenizer {
    primary: Option<Box<dyn Tokenizer>>,
    fallback: WhitespaceTokenizer,
}

impl ClaimTokenizer {
    pub fn new(mode: TokenizerMode) -> Self {
        let primary: Option<Box<dyn Tokenizer>> = match mode {
            TokenizerMode::Word => match WordTokenizer::new() {
                Ok(t) => Some(Box::new(t)),
                Err(e) => {
                    tracing::warn!("Word tokenizer unavailable, using whitespace splitting: {}", e);
                    None
                }
            },
            TokenizerMode::Whitespace => None,
        };

        Self {
            primary,
            fallback: WhitespaceTokenizer,
        }
    }

    /// Use a custom primary tokenizer
    pub fn with_primary(primary: Box<dyn Tokenizer>) -> Self {
        Self {
            primary: Some(primary),
            fallback: WhitespaceTokenizer,
        }
    }

    pub fn tokenize(&self, claim: &str) -> Vec<String> {
        let lowered = claim.to_lowercase();

        if let Some(primary) = &self.primary {
            match primary.tokenize(&lowered) {
                Ok(tokens) => return tokens,
                Err(e) => {
                    tracing::warn!(
                        "{} tokenizer failed, falling back to whitespace splitting: {}",
                        primary.name(),
                        e
                    );
                }
            }
        }

        self.fallback.tokenize(&lowered).unwrap_or_default()
    }
}

impl Default for ClaimTokenizer {
    fn default() -> Self {
        Self::new(TokenizerMode::default())
    }
}

/// The default (word) tokenizer, compiled once
pub fn default_tokenizer() -> &'static ClaimTokenizer {
    static TOKENIZER: OnceLock<ClaimTokenizer> = OnceLock::new();
    TOKENIZER.get_or_init(ClaimTokenizer::default)
}

/// Tokenize with the default (word) tokenizer
pub fn tokenize(claim: &str) -> Vec<String> {
    default_tokenizer().tokenize(claim)
}

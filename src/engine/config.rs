use serde::{Deserialize, Serialize};

use crate::{
    error::{FrequencyError, Result},
    utils::encoding::Encoding,
};

pub const DEFAULT_MIN_WORD_LENGTH: usize = 2;

/// Engine settings, fixed at construction.
///
/// Missing fields fall back to their defaults when deserialized, so the
/// struct can be embedded in a larger config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// tokens shorter than this (in chars) are dropped
    pub min_word_length: usize,
    /// tried in order by file ingestion
    pub encodings: Vec<Encoding>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            encodings: Encoding::default_chain(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_word_length(mut self, min_word_length: usize) -> Self {
        self.min_word_length = min_word_length;
        self
    }

    pub fn with_encodings<I>(mut self, encodings: I) -> Self
    where
        I: IntoIterator<Item = Encoding>,
    {
        self.encodings = encodings.into_iter().collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_word_length < 1 {
            return Err(FrequencyError::Config(format!(
                "min_word_length must be >= 1, got {}",
                self.min_word_length
            )));
        }
        if self.encodings.is_empty() {
            return Err(FrequencyError::Config(
                "at least one encoding is required".to_string(),
            ));
        }
        Ok(())
    }
}

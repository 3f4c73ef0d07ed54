//! FAQ search configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// FAQ search service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqSearchConfig {
    /// Path to the FAQ corpus document (`{"faqs": [...]}`)
    #[serde(default = "default_corpus_path")]
    pub corpus_path: PathBuf,

    /// Number of results returned when the caller does not ask for a count
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Minimum similarity a result must exceed when the caller gives none
    #[serde(default = "default_threshold")]
    pub default_threshold: f64,

    /// Upper bound on caller-supplied top_k
    #[serde(default = "default_max_top_k")]
    pub max_top_k: usize,

    /// Vocabulary cap for the TF-IDF vector space
    #[serde(default = "default_max_features")]
    pub max_features: usize,
}

impl Default for FaqSearchConfig {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            default_top_k: default_top_k(),
            default_threshold: default_threshold(),
            max_top_k: default_max_top_k(),
            max_features: default_max_features(),
        }
    }
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("./data/faqs.json")
}

fn default_top_k() -> usize {
    3
}

fn default_threshold() -> f64 {
    0.1
}

fn default_max_top_k() -> usize {
    20
}

fn default_max_features() -> usize {
    1000
}

/// Builder for FaqSearchConfig
pub struct FaqSearchConfigBuilder {
    config: FaqSearchConfig,
}

impl FaqSearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: FaqSearchConfig::default(),
        }
    }

    pub fn corpus_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.corpus_path = path.into();
        self
    }

    pub fn default_top_k(mut self, top_k: usize) -> Self {
        self.config.default_top_k = top_k;
        self
    }

    pub fn default_threshold(mut self, threshold: f64) -> Self {
        self.config.default_threshold = threshold;
        self
    }

    pub fn max_top_k(mut self, max: usize) -> Self {
        self.config.max_top_k = max;
        self
    }

    pub fn max_features(mut self, max: usize) -> Self {
        self.config.max_features = max;
        self
    }

    pub fn build(self) -> FaqSearchConfig {
        self.config
    }
}

impl Default for FaqSearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = FaqSearchConfigBuilder::new()
            .corpus_path("/tmp/faqs.json")
            .default_top_k(5)
            .max_features(50)
            .build();

        assert_eq!(config.corpus_path, PathBuf::from("/tmp/faqs.json"));
        assert_eq!(config.default_top_k, 5);
        assert_eq!(config.max_features, 50);
        assert_eq!(config.max_top_k, 20);
        assert!((config.default_threshold - 0.1).abs() < f64::EPSILON);
    }
}

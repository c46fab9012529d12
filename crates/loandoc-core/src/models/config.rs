//! Configuration structures for the extraction engine.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoanDocError, Result};
use crate::extract::vocabulary::{Field, Vocabulary};

/// Main configuration for loandoc.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanDocConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output rendering configuration.
    pub output: OutputConfig,
}

/// How a numeric lookup of exactly zero is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroPolicy {
    /// A zero read from the text counts as "not found": defaults and the
    /// loan-amount derivation apply.
    #[default]
    Legacy,

    /// Only a missing label (or a value with no digits) counts as not
    /// found; a literal zero is kept.
    ExplicitZero,
}

impl ZeroPolicy {
    /// Resolve a numeric lookup to `Some(value)` when it should be used as is.
    pub fn resolve(self, found: Option<f64>) -> Option<f64> {
        match self {
            ZeroPolicy::Legacy => found.filter(|v| *v != 0.0),
            ZeroPolicy::ExplicitZero => found,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Zero-versus-missing policy for numeric fields.
    pub zero_policy: ZeroPolicy,

    /// Per-field label lists replacing the built-in vocabulary.
    pub keywords: BTreeMap<Field, Vec<String>>,

    /// Per-field regex narrowing the located value (first capture group).
    pub value_patterns: BTreeMap<Field, String>,
}

impl ExtractionConfig {
    /// Built-in vocabulary with this configuration's overrides applied.
    pub fn vocabulary(&self) -> Vocabulary {
        let vocab = self
            .keywords
            .iter()
            .fold(Vocabulary::vietnamese(), |vocab, (field, labels)| {
                vocab.with_keywords(*field, labels.iter().cloned())
            });

        self.value_patterns
            .iter()
            .fold(vocab, |vocab, (field, pattern)| {
                vocab.with_value_pattern(*field, pattern.clone())
            })
    }
}

/// Output rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Suffix appended to amounts in text output.
    pub currency_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            currency_suffix: "đ".to_string(),
        }
    }
}

impl LoanDocConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            LoanDocError::Config(format!("{}: {}", path.display(), e))
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

//! Code block definition

use crate::compare::Expectation;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Similarity required when a block declares expected output without a threshold
pub const DEFAULT_EXPECTED_SIMILARITY: f64 = 1.0;

/// A single runnable command together with how its output is validated
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Literal command text
    pub content: String,
    /// Interpreter hint (bash, azurecli, ...)
    #[serde(default)]
    pub language: String,
    /// Prose that preceded the block in the document
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    /// Minimum similarity in `0.0..=1.0`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_similarity: Option<f64>,
    /// `json` selects structural comparison
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output_language: Option<String>,
    #[serde(
        default,
        with = "super::pattern",
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_regex: Option<Regex>,
}

impl CodeBlock {
    pub fn new(content: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            language: language.into(),
            ..Default::default()
        }
    }

    pub fn with_expected_output(mut self, expected: impl Into<String>) -> Self {
        self.expected_output = Some(expected.into());
        self
    }

    pub fn with_expected_similarity(mut self, similarity: f64) -> Self {
        self.expected_similarity = Some(similarity);
        self
    }

    pub fn with_expected_output_language(mut self, language: impl Into<String>) -> Self {
        self.expected_output_language = Some(language.into());
        self
    }

    pub fn with_expected_regex(mut self, pattern: Regex) -> Self {
        self.expected_regex = Some(pattern);
        self
    }

    /// The output check declared for this block, if any.
    ///
    /// A block without a pattern and without expected output is not checked.
    pub fn expectation(&self) -> Option<Expectation> {
        if self.expected_regex.is_none() && self.expected_output.is_none() {
            return None;
        }

        Some(Expectation::select(
            self.expected_output.as_deref().unwrap_or_default(),
            self.expected_similarity
                .unwrap_or(DEFAULT_EXPECTED_SIMILARITY),
            self.expected_regex.as_ref(),
            self.expected_output_language.as_deref().unwrap_or_default(),
        ))
    }
}

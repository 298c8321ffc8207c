//! Output comparison
//!
//! Decides whether the output of a command is acceptable. The strategy is
//! chosen once per code block with a strict priority (pattern, then
//! structural JSON, then lexical) and never falls back to another strategy.

use crate::error::{CompareError, Side};
use crate::similarity::{lexical_similarity, structural_similarity};
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// How a code block's output is checked.
#[derive(Debug, Clone)]
pub enum Expectation {
    /// The output must match the pattern
    Pattern(Regex),
    /// Both sides are JSON documents compared structurally
    Structural { expected: String, min_similarity: f64 },
    /// Both sides are compared as plain text
    Lexical { expected: String, min_similarity: f64 },
}

/// Strategy that produced a [`Comparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Pattern,
    Structural,
    Lexical,
}

/// A successful comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub strategy: Strategy,
    /// Similarity score; `1.0` for a pattern match
    pub score: f64,
}

impl Expectation {
    /// Select the comparison strategy.
    ///
    /// A pattern wins over everything else. Otherwise an `expected_language`
    /// of `json` (any case) selects structural comparison and anything else
    /// selects lexical comparison.
    pub fn select(
        expected: &str,
        min_similarity: f64,
        pattern: Option<&Regex>,
        expected_language: &str,
    ) -> Self {
        if let Some(pattern) = pattern {
            return Expectation::Pattern(pattern.clone());
        }

        if expected_language.eq_ignore_ascii_case("json") {
            Expectation::Structural {
                expected: expected.to_string(),
                min_similarity,
            }
        } else {
            Expectation::Lexical {
                expected: expected.to_string(),
                min_similarity,
            }
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Expectation::Pattern(_) => Strategy::Pattern,
            Expectation::Structural { .. } => Strategy::Structural,
            Expectation::Lexical { .. } => Strategy::Lexical,
        }
    }

    /// Check `actual` against this expectation.
    pub fn verify(&self, actual: &str) -> Result<Comparison, CompareError> {
        match self {
            Expectation::Pattern(pattern) => {
                if pattern.is_match(actual) {
                    Ok(Comparison {
                        strategy: Strategy::Pattern,
                        score: 1.0,
                    })
                } else {
                    Err(CompareError::PatternMismatch {
                        pattern: pattern.as_str().to_string(),
                        actual: actual.to_string(),
                    })
                }
            }
            Expectation::Structural {
                expected,
                min_similarity,
            } => {
                debug!("Comparing JSON strings:\nExpected: {}\nActual: {}", expected, actual);
                let expected_doc = parse_json(Side::Expected, expected)?;
                let actual_doc = parse_json(Side::Actual, actual)?;
                let score = structural_similarity(&expected_doc, &actual_doc);
                debug!(min_similarity, score, "Structural similarity computed");

                if score >= *min_similarity {
                    Ok(Comparison {
                        strategy: Strategy::Structural,
                        score,
                    })
                } else {
                    Err(CompareError::StructuralMismatch {
                        expected: expected.clone(),
                        actual: actual.to_string(),
                        min_similarity: *min_similarity,
                        score,
                    })
                }
            }
            Expectation::Lexical {
                expected,
                min_similarity,
            } => {
                let score = lexical_similarity(expected, actual);
                debug!(min_similarity, score, "Lexical similarity computed");

                if score >= *min_similarity {
                    Ok(Comparison {
                        strategy: Strategy::Lexical,
                        score,
                    })
                } else {
                    Err(CompareError::LexicalMismatch {
                        expected: expected.clone(),
                        actual: actual.to_string(),
                        min_similarity: *min_similarity,
                        score,
                    })
                }
            }
        }
    }
}

/// Compare the actual output of a command to its expected output.
pub fn compare(
    actual: &str,
    expected: &str,
    min_similarity: f64,
    pattern: Option<&Regex>,
    expected_language: &str,
) -> Result<Comparison, CompareError> {
    Expectation::select(expected, min_similarity, pattern, expected_language).verify(actual)
}

fn parse_json(side: Side, text: &str) -> Result<Value, CompareError> {
    serde_json::from_str(text).map_err(|e| CompareError::MalformedInput {
        side,
        message: e.to_string(),
    })
}

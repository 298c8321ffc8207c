use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Failed to read scenario file: {path}\nReason: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("Failed to parse scenario file: {path}\nReason: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Unsupported scenario file format: {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("Scenario '{0}' does not contain any code blocks")]
    EmptyScenario(String),

    #[error("Invalid expected_similarity {value} in step '{step}' (must be within 0.0..=1.0)")]
    InvalidSimilarity { step: String, value: f64 },
}

pub type Result<T> = std::result::Result<T, ScenarioError>;

/// Which side of a comparison failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Expected,
    Actual,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Expected => write!(f, "expected"),
            Side::Actual => write!(f, "actual"),
        }
    }
}

/// Reasons a command's output was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    #[error("Expected output does not match pattern: {pattern:?}")]
    PatternMismatch { pattern: String, actual: String },

    #[error(
        "Expected output does not match actual output.\nGot:\n{actual}\nExpected:\n{expected}\nExpected score: {min_similarity:.4}\nActual score: {score:.4}"
    )]
    StructuralMismatch {
        expected: String,
        actual: String,
        min_similarity: f64,
        score: f64,
    },

    #[error(
        "Expected output does not match actual output.\nGot:\n{actual}\nExpected:\n{expected}\nExpected score: {min_similarity:.4}\nActual score: {score:.4}"
    )]
    LexicalMismatch {
        expected: String,
        actual: String,
        min_similarity: f64,
        score: f64,
    },

    #[error("Malformed {side} JSON output: {message}")]
    MalformedInput { side: Side, message: String },
}

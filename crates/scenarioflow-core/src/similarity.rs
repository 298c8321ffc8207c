//! Similarity scorers
//!
//! Both scorers return a value in `0.0..=1.0` where `1.0` means identical.

use serde_json::Value;

/// Jaro score above which the common-prefix bonus applies.
pub const BOOST_THRESHOLD: f64 = 0.7;

/// Longest common prefix that earns a bonus.
pub const MAX_PREFIX_LENGTH: usize = 4;

/// Lexical closeness of two strings (Jaro-Winkler).
///
/// `strsim::jaro_winkler` boosts only above [`BOOST_THRESHOLD`] and caps the
/// prefix at [`MAX_PREFIX_LENGTH`].
pub fn lexical_similarity(expected: &str, actual: &str) -> f64 {
    strsim::jaro_winkler(expected, actual)
}

/// Structural closeness of two JSON documents.
///
/// Objects score the mean over the union of their keys (a key missing on
/// either side scores 0). Arrays are compared positionally and divided by the
/// longer length. Scalars score 1 when equal and 0 otherwise. Values of
/// different kinds score 0. Empty containers of the same kind are identical.
pub fn structural_similarity(expected: &Value, actual: &Value) -> f64 {
    match (expected, actual) {
        (Value::Object(left), Value::Object(right)) => {
            let mut keys: Vec<&String> = left.keys().chain(right.keys()).collect();
            keys.sort();
            keys.dedup();

            if keys.is_empty() {
                return 1.0;
            }

            let total: f64 = keys
                .iter()
                .map(|key| match (left.get(*key), right.get(*key)) {
                    (Some(l), Some(r)) => structural_similarity(l, r),
                    _ => 0.0,
                })
                .sum();

            total / keys.len() as f64
        }
        (Value::Array(left), Value::Array(right)) => {
            let longest = left.len().max(right.len());
            if longest == 0 {
                return 1.0;
            }

            let total: f64 = left
                .iter()
                .zip(right.iter())
                .map(|(l, r)| structural_similarity(l, r))
                .sum();

            total / longest as f64
        }
        (l, r) if l == r => 1.0,
        _ => 0.0,
    }
}

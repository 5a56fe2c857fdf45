//! Relative-outlier detection over accumulated scores.
//!
//! Raw additive scores are not comparable across sessions, so they are first
//! squashed through `ln(score + 0.1)` and normalized with a softmax into a
//! probability distribution. Items whose probability strictly exceeds the
//! caller's threshold are the disproportionately dominant ones; everything
//! else is noise. This selects relative outliers, not absolute high scores.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::ScoreError;

/// Result type for scoring operations.
pub type ScoreResult<T> = std::result::Result<T, ScoreError>;

/// Additive offset applied before taking logarithms.
///
/// Keeps `ln` defined at zero and compresses the tail of very low scores.
pub const LOG_EPSILON: f64 = 0.1;

/// Numerically stable softmax.
///
/// Subtracts the maximum before exponentiating, so large inputs cannot
/// overflow. Returns an empty vector for empty input; otherwise the output
/// sums to 1 within floating tolerance.
pub fn softmax(xs: &[f64]) -> Vec<f64> {
    let Some(max) = xs.iter().copied().reduce(f64::max) else {
        return Vec::new();
    };
    let exps: Vec<f64> = xs.iter().map(|x| (x - max).exp()).collect();
    let denom: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / denom).collect()
}

/// Select the items whose softmax probability strictly exceeds `threshold`.
///
/// Scores must be non-negative accumulations; a negative score is an
/// upstream programming error and fails loudly. The returned map carries each
/// anomalous item with its probability. An empty input yields an empty map.
pub fn anomalies<K>(scores: &HashMap<K, f64>, threshold: f64) -> ScoreResult<HashMap<K, f64>>
where
    K: Eq + Hash + Clone,
{
    let mut items = Vec::with_capacity(scores.len());
    let mut log_scores = Vec::with_capacity(scores.len());
    for (item, &score) in scores {
        if score < 0.0 {
            return Err(ScoreError::NegativeScore { score });
        }
        items.push(item);
        log_scores.push((score + LOG_EPSILON).ln());
    }

    let probs = softmax(&log_scores);

    Ok(items
        .into_iter()
        .zip(probs)
        .filter(|(_, prob)| *prob > threshold)
        .map(|(item, prob)| (item.clone(), prob))
        .collect())
}

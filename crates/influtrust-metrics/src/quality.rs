//! Content quality heuristics: engagement consistency and caption quality.

use std::sync::LazyLock;

use influtrust_core::EngagementSample;
use regex::Regex;

/// Quality assumed when there are no samples at all.
pub const EMPTY_CONTENT_QUALITY: f64 = 0.7;
/// Consistency assumed with fewer than [`MIN_CONSISTENCY_SAMPLES`] samples.
pub const FALLBACK_CONSISTENCY: f64 = 0.6;
/// Caption quality assumed when there are no samples.
pub const EMPTY_CAPTION_QUALITY: f64 = 0.5;

pub const MIN_CONSISTENCY_SAMPLES: usize = 3;

/// Caption length (in characters) that earns the full length score.
const FULL_LENGTH_CHARS: f64 = 200.0;
const HASHTAG_SWEET_SPOT: std::ops::RangeInclusive<usize> = 1..=10;
const HASHTAG_IN_RANGE_SCORE: f64 = 0.8;
const HASHTAG_OUT_OF_RANGE_SCORE: f64 = 0.3;

const LENGTH_WEIGHT: f64 = 0.6;
const HASHTAG_WEIGHT: f64 = 0.4;

const CONSISTENCY_WEIGHT: f64 = 0.7;
const CAPTION_WEIGHT: f64 = 0.3;

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[\p{L}\p{N}_]+").expect("valid regex"));

/// Number of `#tags` in `caption`.
#[must_use]
pub fn count_hashtags(caption: &str) -> usize {
    HASHTAG_RE.find_iter(caption).count()
}

/// `1 - stddev / mean` of per-sample likes + comments, clamped to `[0, 1]`.
///
/// Needs at least [`MIN_CONSISTENCY_SAMPLES`] samples and a non-zero mean;
/// otherwise returns [`FALLBACK_CONSISTENCY`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement_consistency(samples: &[EngagementSample]) -> f64 {
    if samples.len() < MIN_CONSISTENCY_SAMPLES {
        return FALLBACK_CONSISTENCY;
    }

    let n = samples.len() as f64;
    let values: Vec<f64> = samples.iter().map(|s| s.interactions() as f64).collect();
    let mean = values.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return FALLBACK_CONSISTENCY;
    }

    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (1.0 - variance.sqrt() / mean).clamp(0.0, 1.0)
}

/// Quality of a single caption: length score blended with hashtag usage.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score_caption(caption: &str) -> f64 {
    let length_score = (caption.chars().count() as f64 / FULL_LENGTH_CHARS).min(1.0);
    let hashtag_score = if HASHTAG_SWEET_SPOT.contains(&count_hashtags(caption)) {
        HASHTAG_IN_RANGE_SCORE
    } else {
        HASHTAG_OUT_OF_RANGE_SCORE
    };
    LENGTH_WEIGHT * length_score + HASHTAG_WEIGHT * hashtag_score
}

/// Mean caption quality across samples; a missing caption scores as empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn caption_quality(samples: &[EngagementSample]) -> f64 {
    if samples.is_empty() {
        return EMPTY_CAPTION_QUALITY;
    }
    let total: f64 = samples
        .iter()
        .map(|s| score_caption(s.caption.as_deref().unwrap_or("")))
        .sum();
    total / samples.len() as f64
}

/// Overall content quality in `[0, 1]`.
#[must_use]
pub fn content_quality(samples: &[EngagementSample]) -> f64 {
    if samples.is_empty() {
        return EMPTY_CONTENT_QUALITY;
    }
    CONSISTENCY_WEIGHT * engagement_consistency(samples)
        + CAPTION_WEIGHT * caption_quality(samples)
}

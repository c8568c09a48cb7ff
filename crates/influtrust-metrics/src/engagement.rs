//! Average engagement per post/video.

use influtrust_core::EngagementSample;

/// Mean of likes + comments across `samples`.
///
/// Returns `0.0` for an empty slice. Shares and views are not part of the
/// figure.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_engagement(samples: &[EngagementSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let total: f64 = samples.iter().map(|s| s.interactions() as f64).sum();
    total / samples.len() as f64
}

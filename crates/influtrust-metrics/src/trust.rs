//! Platform-specific trust score formulas.
//!
//! Every formula is a weighted heuristic bounded to a percentage. Missing
//! data never fails a score: each platform has a documented fallback, and a
//! non-finite intermediate collapses to [`TrustScore::GENERIC_FALLBACK`].

use influtrust_core::{Platform, PlatformProfile, SampleSet, TrustScore};

use crate::engagement::compute_engagement;
use crate::quality::content_quality;

/// Instagram score when the media sub-fetch failed.
pub const INSTAGRAM_FALLBACK: TrustScore = TrustScore::new(70);
/// `YouTube` score when the channel has no fetched videos.
pub const YOUTUBE_FALLBACK: TrustScore = TrustScore::new(65);
/// `LinkedIn` score when the organization has no fetched posts.
pub const LINKEDIN_FALLBACK: TrustScore = TrustScore::new(75);

/// Instagram scores never drop below this floor.
pub const INSTAGRAM_FLOOR: u8 = 30;

/// Engagement rate (interactions per follower) that saturates the Instagram
/// engagement component.
const INSTAGRAM_REFERENCE_RATE: f64 = 0.10;
const INSTAGRAM_ENGAGEMENT_WEIGHT: f64 = 0.6;
const INSTAGRAM_QUALITY_WEIGHT: f64 = 0.4;

/// Average views per video that earns the full view component.
const YOUTUBE_REFERENCE_VIEWS: f64 = 10_000.0;
const YOUTUBE_VIEW_POINTS: f64 = 40.0;
const YOUTUBE_ENGAGEMENT_POINTS: f64 = 60.0;

const LINKEDIN_BASE: f64 = 70.0;
const LINKEDIN_MAX_BONUS: f64 = 30.0;

/// Score a profile with its platform's formula.
#[must_use]
pub fn compute_trust_score(profile: &PlatformProfile) -> TrustScore {
    let score = match profile.platform {
        Platform::Instagram => instagram_trust_score(profile.followers, &profile.samples),
        Platform::YouTube => youtube_trust_score(&profile.samples),
        Platform::LinkedIn => linkedin_trust_score(profile.followers, &profile.samples),
    };

    or_generic_fallback(score, profile)
}

/// A formula returns `None` only for a non-finite intermediate.
fn or_generic_fallback(score: Option<TrustScore>, profile: &PlatformProfile) -> TrustScore {
    score.unwrap_or_else(|| {
        tracing::warn!(
            platform = %profile.platform,
            platform_id = %profile.platform_id,
            "trust score was not finite; using generic fallback"
        );
        TrustScore::GENERIC_FALLBACK
    })
}

/// `round((engagement_rate * 0.6 + content_quality * 0.4) * 100)`, floored at 30.
///
/// `engagement_rate` is average interactions per follower relative to a 10%
/// reference rate, capped at 1. Zero followers give a zero rate.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn instagram_trust_score(followers: u64, samples: &SampleSet) -> Option<TrustScore> {
    if samples.is_unavailable() {
        return Some(INSTAGRAM_FALLBACK);
    }
    let posts = samples.samples();

    let engagement_rate = if followers == 0 {
        0.0
    } else {
        (compute_engagement(posts) / followers as f64 / INSTAGRAM_REFERENCE_RATE).min(1.0)
    };
    let quality = content_quality(posts);

    let raw = (engagement_rate * INSTAGRAM_ENGAGEMENT_WEIGHT + quality * INSTAGRAM_QUALITY_WEIGHT)
        * 100.0;
    TrustScore::from_f64_with_floor(raw, INSTAGRAM_FLOOR)
}

/// `view_score + engagement_score`, or 65 with no videos.
///
/// - `view_score = min(avg_views / 10000, 1) * 40`
/// - `engagement_score = min(engagement_rate * 2, 1) * 60` where the rate is
///   total likes + comments over total views.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn youtube_trust_score(samples: &SampleSet) -> Option<TrustScore> {
    let videos = samples.samples();
    if videos.is_empty() {
        return Some(YOUTUBE_FALLBACK);
    }

    let total_views: f64 = videos.iter().map(|v| v.views as f64).sum();
    let total_interactions: f64 = videos.iter().map(|v| v.interactions() as f64).sum();
    let avg_views = total_views / videos.len() as f64;

    let view_score = (avg_views / YOUTUBE_REFERENCE_VIEWS).min(1.0) * YOUTUBE_VIEW_POINTS;
    let engagement_rate = if total_views > 0.0 {
        total_interactions / total_views
    } else {
        0.0
    };
    let engagement_score = (engagement_rate * 2.0).min(1.0) * YOUTUBE_ENGAGEMENT_POINTS;

    TrustScore::from_f64(view_score + engagement_score)
}

/// `70 + min(engagement_pct * 3, 30)`, or 75 with no posts.
///
/// `engagement_pct` is average likes + comments per post as a percentage of
/// followers.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linkedin_trust_score(followers: u64, samples: &SampleSet) -> Option<TrustScore> {
    let posts = samples.samples();
    if posts.is_empty() {
        return Some(LINKEDIN_FALLBACK);
    }

    let engagement_pct = if followers == 0 {
        0.0
    } else {
        compute_engagement(posts) / followers as f64 * 100.0
    };
    TrustScore::from_f64(LINKEDIN_BASE + (engagement_pct * 3.0).min(LINKEDIN_MAX_BONUS))
}

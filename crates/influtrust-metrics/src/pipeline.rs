//! Profile → record scoring.

use influtrust_core::{CategoryDictionary, InfluencerRecord, PlatformProfile};

use crate::classifier::classify_categories;
use crate::engagement::compute_engagement;
use crate::trust::compute_trust_score;

/// Run engagement, trust and category scoring over one profile.
#[must_use]
pub fn score_profile(profile: &PlatformProfile, dictionary: &CategoryDictionary) -> InfluencerRecord {
    let samples = profile.samples.samples();
    let record = InfluencerRecord {
        id: InfluencerRecord::record_id(profile.platform, &profile.platform_id),
        name: profile.name.clone(),
        platform: profile.platform,
        followers: profile.followers,
        trust_score: compute_trust_score(profile),
        categories: classify_categories(profile, dictionary),
        engagement: compute_engagement(samples),
        statistics: profile.statistics.with_sample_totals(samples),
    };

    tracing::debug!(
        record_id = %record.id,
        trust_score = %record.trust_score,
        engagement = record.engagement,
        samples_unavailable = profile.samples.is_unavailable(),
        "scored profile"
    );
    record
}

#[must_use]
pub fn score_profiles(
    profiles: &[PlatformProfile],
    dictionary: &CategoryDictionary,
) -> Vec<InfluencerRecord> {
    profiles
        .iter()
        .map(|profile| score_profile(profile, dictionary))
        .collect()
}

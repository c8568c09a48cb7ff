//! Merges per-platform records into the dashboard view.

use std::cmp::Ordering;

use influtrust_core::InfluencerRecord;
use serde::{Deserialize, Serialize};

use crate::trend::{TrendProvider, TrendSummary};

/// Headline figures over every record on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub average_followers: f64,
    /// Rounded mean of the record trust scores.
    pub average_trust_score: u8,
}

impl DashboardStats {
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn from_records(records: &[InfluencerRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let n = records.len() as f64;
        let followers: f64 = records.iter().map(|r| r.followers as f64).sum();
        let trust: f64 = records
            .iter()
            .map(|r| f64::from(r.trust_score.value()))
            .sum();

        Self {
            total: records.len(),
            average_followers: followers / n,
            // Mean of values in [0, 100] stays in range.
            average_trust_score: (trust / n).round() as u8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub records: Vec<InfluencerRecord>,
    pub stats: DashboardStats,
    pub trend: TrendSummary,
}

/// Dashboard ordering: trust score descending, then followers descending,
/// then id so the result is fully deterministic.
#[must_use]
pub fn compare_records(a: &InfluencerRecord, b: &InfluencerRecord) -> Ordering {
    b.trust_score
        .cmp(&a.trust_score)
        .then_with(|| b.followers.cmp(&a.followers))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn sort_records(records: &mut [InfluencerRecord]) {
    records.sort_by(compare_records);
}

/// Sort `records`, compute their statistics and attach trend figures.
///
/// The provider sees the current statistics before they are recorded, so a
/// history-backed provider compares against earlier observations only.
#[must_use]
pub fn compose_dashboard(
    mut records: Vec<InfluencerRecord>,
    trends: &dyn TrendProvider,
) -> Dashboard {
    sort_records(&mut records);
    let stats = DashboardStats::from_records(&records);
    let trend = trends.trend(&stats);
    trends.observe(&stats);

    tracing::debug!(
        total = stats.total,
        average_trust_score = stats.average_trust_score,
        "composed dashboard"
    );

    Dashboard {
        records,
        stats,
        trend,
    }
}

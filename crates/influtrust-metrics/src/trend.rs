//! Growth trend figures derived from historical dashboard statistics.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::composer::DashboardStats;

/// Percent change of each headline figure over the trend window.
///
/// `None` when there is no usable baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TrendSummary {
    /// Change in tracked record count.
    pub monthly_growth: Option<f64>,
    /// Change in average followers.
    pub follower_growth: Option<f64>,
    /// Change in average trust score.
    pub trust_score_growth: Option<f64>,
}

/// Source of trend figures for the dashboard.
pub trait TrendProvider: Send + Sync {
    /// Trend of `current` relative to whatever history the provider keeps.
    fn trend(&self, current: &DashboardStats) -> TrendSummary;

    /// Record `current` as a new data point. No-op by default.
    fn observe(&self, _current: &DashboardStats) {}
}

/// Provider with no history; every figure is `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrendData;

impl TrendProvider for NoTrendData {
    fn trend(&self, _current: &DashboardStats) -> TrendSummary {
        TrendSummary::default()
    }
}

/// In-memory time series of dashboard statistics.
///
/// Figures compare against the oldest snapshot inside the window (30 days by
/// default). At most one snapshot is kept per `min_interval` (1 hour by
/// default), so the history holds at most `window / min_interval + 1` entries.
/// Snapshots older than the window are dropped from the front on every
/// observation.
#[derive(Debug)]
pub struct SnapshotHistory {
    window: Duration,
    min_interval: Duration,
    snapshots: Mutex<VecDeque<(DateTime<Utc>, DashboardStats)>>,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::new(Duration::days(30))
    }
}

impl SnapshotHistory {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self::with_min_interval(window, Duration::hours(1))
    }

    #[must_use]
    pub fn with_min_interval(window: Duration, min_interval: Duration) -> Self {
        Self {
            window,
            min_interval,
            snapshots: Mutex::new(VecDeque::new()),
        }
    }

    /// Record a snapshot taken at `at`.
    ///
    /// Ignored when it lands less than `min_interval` after the newest kept
    /// snapshot (or before it); the snapshots stay in time order.
    pub fn record_at(&self, stats: DashboardStats, at: DateTime<Utc>) {
        let mut snapshots = self.snapshots.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((newest, _)) = snapshots.back() {
            if at < *newest + self.min_interval {
                return;
            }
        }
        snapshots.push_back((at, stats));

        let cutoff = at - self.window;
        while snapshots.front().is_some_and(|(t, _)| *t < cutoff) {
            snapshots.pop_front();
        }
    }

    /// Trend of `current` as seen at `now`.
    #[must_use]
    pub fn trend_at(&self, current: &DashboardStats, now: DateTime<Utc>) -> TrendSummary {
        let cutoff = now - self.window;
        let snapshots = self.snapshots.lock().unwrap_or_else(PoisonError::into_inner);
        let Some((_, baseline)) = snapshots.iter().find(|(t, _)| *t >= cutoff && *t <= now) else {
            return TrendSummary::default();
        };

        #[allow(clippy::cast_precision_loss)]
        TrendSummary {
            monthly_growth: percent_change(baseline.total as f64, current.total as f64),
            follower_growth: percent_change(baseline.average_followers, current.average_followers),
            trust_score_growth: percent_change(
                f64::from(baseline.average_trust_score),
                f64::from(current.average_trust_score),
            ),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TrendProvider for SnapshotHistory {
    fn trend(&self, current: &DashboardStats) -> TrendSummary {
        self.trend_at(current, Utc::now())
    }

    fn observe(&self, current: &DashboardStats) {
        self.record_at(*current, Utc::now());
    }
}

/// Percent change rounded to two decimals; `None` for a zero baseline.
fn percent_change(baseline: f64, current: f64) -> Option<f64> {
    if baseline == 0.0 || !baseline.is_finite() || !current.is_finite() {
        return None;
    }
    let pct = (current - baseline) / baseline * 100.0;
    Some((pct * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total: usize, average_followers: f64, average_trust_score: u8) -> DashboardStats {
        DashboardStats {
            total,
            average_followers,
            average_trust_score,
        }
    }

    #[test]
    fn no_trend_data_is_all_none() {
        let summary = NoTrendData.trend(&stats(4, 1_000.0, 70));
        assert_eq!(summary, TrendSummary::default());
    }

    #[test]
    fn empty_history_has_no_baseline() {
        let history = SnapshotHistory::default();
        assert_eq!(history.trend(&stats(1, 1.0, 1)), TrendSummary::default());
        assert!(history.is_empty());
    }

    #[test]
    fn compares_against_oldest_snapshot_in_window() {
        let history = SnapshotHistory::default();
        let now = Utc::now();
        history.record_at(stats(4, 1_000.0, 50), now - Duration::days(20));
        history.record_at(stats(8, 5_000.0, 90), now - Duration::days(2));

        let summary = history.trend_at(&stats(5, 1_500.0, 60), now);
        assert_eq!(summary.monthly_growth, Some(25.0));
        assert_eq!(summary.follower_growth, Some(50.0));
        assert_eq!(summary.trust_score_growth, Some(20.0));
    }

    #[test]
    fn snapshots_outside_window_are_pruned() {
        let history = SnapshotHistory::new(Duration::days(30));
        let now = Utc::now();
        history.record_at(stats(2, 10.0, 10), now - Duration::days(45));
        history.record_at(stats(4, 20.0, 20), now);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn frequent_observations_keep_history_bounded() {
        let history = SnapshotHistory::default();
        let start = Utc::now() - Duration::days(5);
        for i in 0..20_000_i64 {
            history.record_at(stats(1, 1.0, 1), start + Duration::seconds(i * 12));
        }
        // One snapshot per hour over 20_000 * 12s = 66.7h.
        assert_eq!(history.len(), 67);
    }

    #[test]
    fn window_bounds_history_length() {
        let history = SnapshotHistory::with_min_interval(Duration::hours(10), Duration::hours(1));
        let start = Utc::now() - Duration::days(3);
        for h in 0..48 {
            history.record_at(stats(1, 1.0, 1), start + Duration::hours(h));
        }
        assert_eq!(history.len(), 11);
    }

    #[test]
    fn snapshot_within_min_interval_keeps_first_baseline() {
        let history = SnapshotHistory::default();
        let now = Utc::now();
        history.record_at(stats(4, 100.0, 40), now - Duration::minutes(30));
        history.record_at(stats(8, 900.0, 90), now - Duration::minutes(10));
        assert_eq!(history.len(), 1);

        let summary = history.trend_at(&stats(6, 150.0, 60), now);
        assert_eq!(summary.monthly_growth, Some(50.0));
    }

    #[test]
    fn zero_baseline_yields_none() {
        let history = SnapshotHistory::default();
        let now = Utc::now();
        history.record_at(stats(0, 0.0, 0), now - Duration::days(1));
        let summary = history.trend_at(&stats(3, 100.0, 50), now);
        assert_eq!(summary, TrendSummary::default());
    }

    #[test]
    fn observe_records_snapshot() {
        let history = SnapshotHistory::default();
        history.observe(&stats(1, 1.0, 1));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn percent_change_rounds_to_two_decimals() {
        assert_eq!(percent_change(3.0, 4.0), Some(33.33));
        assert_eq!(percent_change(4.0, 3.0), Some(-25.0));
    }
}

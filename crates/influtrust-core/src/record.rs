use serde::{Deserialize, Serialize};

use crate::category::CategoryCount;
use crate::platform::Platform;
use crate::profile::PlatformStatistics;

/// Heuristic trust score in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustScore(u8);

impl TrustScore {
    pub const MAX: u8 = 100;

    /// Guard value for a formula whose arithmetic went non-finite. The
    /// bounded platform formulas do not produce one from counter input.
    pub const GENERIC_FALLBACK: TrustScore = TrustScore(50);

    /// Clamp an integer into range.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    /// Round and clamp a raw score. Non-finite input yields `None`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_f64(raw: f64) -> Option<Self> {
        if !raw.is_finite() {
            return None;
        }
        // Clamped to [0, 100] first, so the cast is lossless.
        Some(Self(raw.round().clamp(0.0, f64::from(Self::MAX)) as u8))
    }

    /// Round and clamp into `[floor, 100]`.
    #[must_use]
    pub fn from_f64_with_floor(raw: f64, floor: u8) -> Option<Self> {
        Self::from_f64(raw).map(|s| Self(s.0.max(floor.min(Self::MAX))))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for TrustScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Composed per-platform dashboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluencerRecord {
    /// `"{platform}:{platform_id}"`.
    pub id: String,
    pub name: String,
    pub platform: Platform,
    pub followers: u64,
    pub trust_score: TrustScore,
    /// At most three, most frequent first.
    pub categories: Vec<CategoryCount>,
    /// Average likes + comments per post/video.
    pub engagement: f64,
    pub statistics: PlatformStatistics,
}

impl InfluencerRecord {
    #[must_use]
    pub fn record_id(platform: Platform, platform_id: &str) -> String {
        format!("{platform}:{platform_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_f64_rounds_and_clamps() {
        assert_eq!(TrustScore::from_f64(42.5).unwrap().value(), 43);
        assert_eq!(TrustScore::from_f64(-3.0).unwrap().value(), 0);
        assert_eq!(TrustScore::from_f64(250.0).unwrap().value(), 100);
    }

    #[test]
    fn from_f64_rejects_non_finite() {
        assert!(TrustScore::from_f64(f64::NAN).is_none());
        assert!(TrustScore::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn floor_is_applied() {
        assert_eq!(
            TrustScore::from_f64_with_floor(12.0, 30).unwrap().value(),
            30
        );
        assert_eq!(
            TrustScore::from_f64_with_floor(77.2, 30).unwrap().value(),
            77
        );
    }

    #[test]
    fn new_clamps_to_max() {
        assert_eq!(TrustScore::new(180).value(), 100);
    }

    #[test]
    fn serializes_as_plain_integer() {
        assert_eq!(serde_json::to_string(&TrustScore::new(65)).unwrap(), "65");
    }

    #[test]
    fn record_id_format() {
        assert_eq!(
            InfluencerRecord::record_id(Platform::YouTube, "UC123"),
            "youtube:UC123"
        );
    }
}

//! Normalized per-platform profile data as fetched from the social APIs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// One post, video, or share with its interaction counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementSample {
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub views: u64,
    /// Caption, video title + description, or post text.
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl EngagementSample {
    /// Likes plus comments; the unit every engagement heuristic works in.
    #[must_use]
    pub fn interactions(&self) -> u64 {
        self.likes.saturating_add(self.comments)
    }
}

/// Posts/videos attached to a profile.
///
/// `Unavailable` means the sub-fetch for posts failed even though the profile
/// itself was retrieved; scoring substitutes platform fallbacks for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "items", rename_all = "lowercase")]
pub enum SampleSet {
    Fetched(Vec<EngagementSample>),
    Unavailable,
}

impl SampleSet {
    #[must_use]
    pub fn samples(&self) -> &[EngagementSample] {
        match self {
            SampleSet::Fetched(items) => items,
            SampleSet::Unavailable => &[],
        }
    }

    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, SampleSet::Unavailable)
    }
}

impl Default for SampleSet {
    fn default() -> Self {
        SampleSet::Fetched(Vec::new())
    }
}

/// Aggregate statistics reported for a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformStatistics {
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub posts: u64,
}

impl PlatformStatistics {
    /// Sum interaction counts over `samples`, keeping `posts` and `views`
    /// when the platform already reported them.
    #[must_use]
    pub fn with_sample_totals(mut self, samples: &[EngagementSample]) -> Self {
        let total = |field: fn(&EngagementSample) -> u64| {
            samples.iter().map(field).fold(0u64, u64::saturating_add)
        };
        self.likes = total(|s| s.likes);
        self.comments = total(|s| s.comments);
        self.shares = total(|s| s.shares);
        if self.views == 0 {
            self.views = total(|s| s.views);
        }
        if self.posts == 0 {
            self.posts = samples.len() as u64;
        }
        self
    }
}

/// One influencer's data on one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformProfile {
    pub platform: Platform,
    pub platform_id: String,
    pub name: String,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub statistics: PlatformStatistics,
    #[serde(default)]
    pub samples: SampleSet,
    /// YouTube `snippet.categoryId` values across the fetched videos.
    #[serde(default)]
    pub category_ids: Vec<String>,
    /// YouTube video tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// LinkedIn organization industry.
    #[serde(default)]
    pub industry: Option<String>,
}

impl PlatformProfile {
    /// A profile with no samples or classifier hints.
    #[must_use]
    pub fn new(platform: Platform, platform_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            platform,
            platform_id: platform_id.into(),
            name: name.into(),
            followers: 0,
            statistics: PlatformStatistics::default(),
            samples: SampleSet::default(),
            category_ids: Vec::new(),
            tags: Vec::new(),
            industry: None,
        }
    }
}

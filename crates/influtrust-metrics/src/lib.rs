//! Trust-score aggregation pipeline for influtrust.
//!
//! Turns fetched [`PlatformProfile`](influtrust_core::PlatformProfile)s into
//! scored [`InfluencerRecord`](influtrust_core::InfluencerRecord)s and merges
//! them into a sorted dashboard. Everything here is pure and synchronous; the
//! only shared state is the optional [`SnapshotHistory`] trend provider.

pub mod classifier;
pub mod composer;
pub mod engagement;
pub mod pipeline;
pub mod quality;
pub mod trend;
pub mod trust;

pub use classifier::{classify_categories, classify_text};
pub use composer::{compose_dashboard, sort_records, Dashboard, DashboardStats};
pub use engagement::compute_engagement;
pub use pipeline::{score_profile, score_profiles};
pub use quality::{caption_quality, content_quality, engagement_consistency};
pub use trend::{NoTrendData, SnapshotHistory, TrendProvider, TrendSummary};
pub use trust::compute_trust_score;

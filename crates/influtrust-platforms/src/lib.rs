//! Outbound HTTP clients for influtrust.
//!
//! Instagram Graph, `YouTube` Data v3 and `LinkedIn` clients normalize their
//! responses into [`PlatformProfile`](influtrust_core::PlatformProfile)s;
//! [`collect`] fans out over tracked influencers and feeds the scoring
//! pipeline. [`RegistryClient`] talks to the influencer/claim registry.

pub mod collect;
pub mod error;
pub mod instagram;
pub mod linkedin;
pub mod registry;
pub mod youtube;

mod http;
mod parse_helpers;

pub use collect::{
    build_dashboard, collect_target, collect_targets, CollectionOutcome, DashboardError,
    DashboardReport, FetchFailure, PlatformClients,
};
pub use error::PlatformError;
pub use http::ClientSettings;
pub use instagram::InstagramClient;
pub use linkedin::LinkedInClient;
pub use registry::RegistryClient;
pub use youtube::YouTubeClient;

//! Concurrent profile collection and dashboard assembly.
//!
//! One tracked influencer fans out to its configured platforms concurrently;
//! influencers run with bounded concurrency. A failed platform fetch is
//! logged and reported in [`CollectionOutcome::failures`] but never aborts
//! the run.

use futures::stream::{self, StreamExt};
use influtrust_core::{AppConfig, CategoryDictionary, Platform, PlatformProfile, TargetConfig};
use influtrust_metrics::{compose_dashboard, score_profiles, Dashboard, TrendProvider};
use serde::Serialize;
use thiserror::Error;

use crate::error::PlatformError;
use crate::http::ClientSettings;
use crate::instagram::InstagramClient;
use crate::linkedin::LinkedInClient;
use crate::youtube::YouTubeClient;

/// The platform clients that have credentials configured.
///
/// A platform without a client is skipped during collection.
#[derive(Debug, Clone, Default)]
pub struct PlatformClients {
    pub instagram: Option<InstagramClient>,
    pub youtube: Option<YouTubeClient>,
    pub linkedin: Option<LinkedInClient>,
}

impl PlatformClients {
    /// Builds a client for every platform whose credential is set, honouring
    /// base URL overrides.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if a client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, PlatformError> {
        let settings = ClientSettings::from(config);

        let instagram = config
            .instagram_access_token
            .as_deref()
            .map(|token| match config.instagram_base_url.as_deref() {
                Some(base) => InstagramClient::with_base_url(token, base, &settings),
                None => InstagramClient::new(token, &settings),
            })
            .transpose()?;
        let youtube = config
            .youtube_api_key
            .as_deref()
            .map(|key| match config.youtube_base_url.as_deref() {
                Some(base) => YouTubeClient::with_base_url(key, base, &settings),
                None => YouTubeClient::new(key, &settings),
            })
            .transpose()?;
        let linkedin = config
            .linkedin_access_token
            .as_deref()
            .map(|token| match config.linkedin_base_url.as_deref() {
                Some(base) => LinkedInClient::with_base_url(token, base, &settings),
                None => LinkedInClient::new(token, &settings),
            })
            .transpose()?;

        let clients = Self {
            instagram,
            youtube,
            linkedin,
        };
        tracing::info!(platforms = ?clients.configured(), "platform clients configured");
        Ok(clients)
    }

    /// Platforms with a client, in canonical order.
    #[must_use]
    pub fn configured(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.has_client(*p))
            .collect()
    }

    #[must_use]
    pub fn has_client(&self, platform: Platform) -> bool {
        match platform {
            Platform::Instagram => self.instagram.is_some(),
            Platform::YouTube => self.youtube.is_some(),
            Platform::LinkedIn => self.linkedin.is_some(),
        }
    }

    /// Fetch one profile; `None` when the platform has no client.
    pub async fn fetch_profile(
        &self,
        platform: Platform,
        handle: &str,
    ) -> Option<Result<PlatformProfile, PlatformError>> {
        match platform {
            Platform::Instagram => match &self.instagram {
                Some(client) => Some(client.fetch_profile(handle).await),
                None => None,
            },
            Platform::YouTube => match &self.youtube {
                Some(client) => Some(client.fetch_profile(handle).await),
                None => None,
            },
            Platform::LinkedIn => match &self.linkedin {
                Some(client) => Some(client.fetch_profile(handle).await),
                None => None,
            },
        }
    }
}

/// A platform fetch that produced no profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub target: String,
    pub platform: Platform,
    pub handle: String,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct CollectionOutcome {
    pub profiles: Vec<PlatformProfile>,
    pub failures: Vec<FetchFailure>,
}

impl CollectionOutcome {
    /// Number of platform fetches actually issued.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.profiles.len() + self.failures.len()
    }

    fn merge(&mut self, other: CollectionOutcome) {
        self.profiles.extend(other.profiles);
        self.failures.extend(other.failures);
    }
}

/// Fetch every configured platform of one tracked influencer concurrently.
pub async fn collect_target(clients: &PlatformClients, target: &TargetConfig) -> CollectionOutcome {
    let fetch = move |platform: Platform| async move {
        let handle = target.handle(platform)?;
        let Some(result) = clients.fetch_profile(platform, handle).await else {
            tracing::debug!(
                target_name = %target.name,
                platform = %platform,
                "no credentials configured; skipping platform"
            );
            return None;
        };
        Some((platform, handle, result))
    };

    let (instagram, youtube, linkedin) = tokio::join!(
        fetch(Platform::Instagram),
        fetch(Platform::YouTube),
        fetch(Platform::LinkedIn)
    );

    let mut outcome = CollectionOutcome::default();
    for (platform, handle, result) in [instagram, youtube, linkedin].into_iter().flatten() {
        match result {
            Ok(profile) => outcome.profiles.push(profile),
            Err(e) => {
                tracing::warn!(
                    target_name = %target.name,
                    platform = %platform,
                    handle,
                    error = %e,
                    "platform fetch failed; continuing without it"
                );
                outcome.failures.push(FetchFailure {
                    target: target.name.clone(),
                    platform,
                    handle: handle.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }
    outcome
}

/// Collect every target, at most `max_concurrent` at a time.
pub async fn collect_targets(
    clients: &PlatformClients,
    targets: &[TargetConfig],
    max_concurrent: usize,
) -> CollectionOutcome {
    let pending: Vec<_> = targets
        .iter()
        .map(|target| collect_target(clients, target))
        .collect();
    let outcomes: Vec<CollectionOutcome> = stream::iter(pending)
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    let mut merged = CollectionOutcome::default();
    for outcome in outcomes {
        merged.merge(outcome);
    }
    tracing::info!(
        targets = targets.len(),
        profiles = merged.profiles.len(),
        failures = merged.failures.len(),
        "collection complete"
    );
    merged
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("no platform was reachable ({attempted} fetches failed)")]
    NoPlatformReachable { attempted: usize },
}

/// A composed dashboard together with the fetches that fed nothing into it.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub dashboard: Dashboard,
    pub failures: Vec<FetchFailure>,
}

/// Collect, score and compose the dashboard for `targets`.
///
/// # Errors
///
/// [`DashboardError::NoPlatformReachable`] when at least one fetch was
/// attempted and every one failed. Partial failures only appear in
/// [`DashboardReport::failures`].
pub async fn build_dashboard(
    clients: &PlatformClients,
    targets: &[TargetConfig],
    dictionary: &CategoryDictionary,
    trends: &dyn TrendProvider,
    max_concurrent: usize,
) -> Result<DashboardReport, DashboardError> {
    let outcome = collect_targets(clients, targets, max_concurrent).await;
    if outcome.profiles.is_empty() && !outcome.failures.is_empty() {
        tracing::error!(
            attempted = outcome.attempted(),
            "every platform fetch failed"
        );
        return Err(DashboardError::NoPlatformReachable {
            attempted: outcome.attempted(),
        });
    }

    let records = score_profiles(&outcome.profiles, dictionary);
    Ok(DashboardReport {
        dashboard: compose_dashboard(records, trends),
        failures: outcome.failures,
    })
}

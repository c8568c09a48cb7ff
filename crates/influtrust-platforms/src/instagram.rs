//! Instagram Graph API client.

use influtrust_core::{EngagementSample, Platform, PlatformProfile, PlatformStatistics, SampleSet};
use serde::Deserialize;

use crate::error::PlatformError;
use crate::http::{ClientSettings, HttpClient};
use crate::parse_helpers::{lenient_u64, parse_timestamp};

pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v18.0";

const ACCOUNT_FIELDS: &str = "id,username,name,followers_count,media_count";
const MEDIA_FIELDS: &str = "id,caption,like_count,comments_count,timestamp";

#[derive(Debug, Clone, Deserialize)]
pub struct InstagramAccount {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub followers_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub media_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstagramMedia {
    pub id: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub like_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub comments_count: u64,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl From<InstagramMedia> for EngagementSample {
    fn from(media: InstagramMedia) -> Self {
        EngagementSample {
            likes: media.like_count,
            comments: media.comments_count,
            shares: 0,
            views: 0,
            timestamp: media.timestamp.as_deref().and_then(parse_timestamp),
            caption: media.caption,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MediaPage {
    #[serde(default)]
    data: Vec<InstagramMedia>,
}

/// Client for business/creator accounts on the Instagram Graph API.
#[derive(Clone)]
pub struct InstagramClient {
    http: HttpClient,
    access_token: String,
    media_limit: u32,
}

impl std::fmt::Debug for InstagramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstagramClient")
            .field("http", &self.http)
            .field("access_token", &"[redacted]")
            .field("media_limit", &self.media_limit)
            .finish()
    }
}

impl InstagramClient {
    /// Creates a client pointed at the production Graph API.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(access_token: &str, settings: &ClientSettings) -> Result<Self, PlatformError> {
        Self::with_base_url(access_token, DEFAULT_BASE_URL, settings)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`PlatformError::InvalidBaseUrl`] for an unusable base URL.
    pub fn with_base_url(
        access_token: &str,
        base_url: &str,
        settings: &ClientSettings,
    ) -> Result<Self, PlatformError> {
        Ok(Self {
            http: HttpClient::new("instagram", base_url, settings)?,
            access_token: access_token.to_owned(),
            media_limit: settings.media_limit,
        })
    }

    /// Fetches account metadata by Instagram user id.
    ///
    /// # Errors
    ///
    /// Any [`PlatformError`] from the request or response parsing.
    pub async fn fetch_account(&self, account_id: &str) -> Result<InstagramAccount, PlatformError> {
        let request = self.http.get(self.http.url(&[account_id])).query(&[
            ("fields", ACCOUNT_FIELDS),
            ("access_token", self.access_token.as_str()),
        ]);
        self.http
            .send_json(request, &format!("account(id={account_id})"))
            .await
    }

    /// Fetches the most recent media of an account, newest first.
    ///
    /// # Errors
    ///
    /// Any [`PlatformError`] from the request or response parsing.
    pub async fn fetch_media(&self, account_id: &str) -> Result<Vec<InstagramMedia>, PlatformError> {
        let limit = self.media_limit.to_string();
        let request = self
            .http
            .get(self.http.url(&[account_id, "media"]))
            .query(&[
                ("fields", MEDIA_FIELDS),
                ("limit", limit.as_str()),
                ("access_token", self.access_token.as_str()),
            ]);
        let page: MediaPage = self
            .http
            .send_json(request, &format!("media(id={account_id})"))
            .await?;
        Ok(page.data)
    }

    /// Fetches the account and its recent media as a [`PlatformProfile`].
    ///
    /// A failed media fetch is logged and yields [`SampleSet::Unavailable`].
    ///
    /// # Errors
    ///
    /// Returns the account fetch error; media errors are absorbed.
    pub async fn fetch_profile(&self, account_id: &str) -> Result<PlatformProfile, PlatformError> {
        let account = self.fetch_account(account_id).await?;

        let samples = match self.fetch_media(account_id).await {
            Ok(media) => SampleSet::Fetched(media.into_iter().map(EngagementSample::from).collect()),
            Err(e) => {
                tracing::warn!(
                    platform = "instagram",
                    account_id,
                    error = %e,
                    "media fetch failed; scoring without posts"
                );
                SampleSet::Unavailable
            }
        };

        let name = account
            .name
            .or(account.username)
            .unwrap_or_else(|| account.id.clone());
        let mut profile = PlatformProfile::new(Platform::Instagram, account.id, name);
        profile.followers = account.followers_count;
        profile.statistics = PlatformStatistics {
            posts: account.media_count,
            ..PlatformStatistics::default()
        };
        profile.samples = samples;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_converts_to_sample() {
        let media: InstagramMedia = serde_json::from_str(
            r##"{"id":"1","caption":"#saude","like_count":"12","timestamp":"2024-05-01T10:30:00+0000"}"##,
        )
        .expect("valid media");
        let sample = EngagementSample::from(media);
        assert_eq!(sample.likes, 12);
        assert_eq!(sample.comments, 0);
        assert_eq!(sample.caption.as_deref(), Some("#saude"));
        assert!(sample.timestamp.is_some());
    }

    #[test]
    fn account_tolerates_missing_counts() {
        let account: InstagramAccount =
            serde_json::from_str(r#"{"id":"17841","username":"dra.ana"}"#).expect("valid account");
        assert_eq!(account.followers_count, 0);
        assert_eq!(account.media_count, 0);
    }
}

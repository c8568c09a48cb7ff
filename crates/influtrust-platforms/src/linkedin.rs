//! `LinkedIn` organization API client.

use influtrust_core::{EngagementSample, Platform, PlatformProfile, PlatformStatistics, SampleSet};
use serde::Deserialize;

use crate::error::PlatformError;
use crate::http::{ClientSettings, HttpClient};
use crate::parse_helpers::{from_epoch_millis, lenient_u64};

pub const DEFAULT_BASE_URL: &str = "https://api.linkedin.com";

const RESTLI_PROTOCOL_HEADER: &str = "X-Restli-Protocol-Version";
const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub id: u64,
    #[serde(default)]
    pub localized_name: Option<String>,
    #[serde(default)]
    pub industries: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NetworkSize {
    #[serde(default, deserialize_with = "lenient_u64")]
    first_degree_size: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStatistics {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub like_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub comment_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub share_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPost {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub commentary: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub created_at: u64,
    #[serde(default)]
    pub statistics: PostStatistics,
}

impl From<OrganizationPost> for EngagementSample {
    fn from(post: OrganizationPost) -> Self {
        EngagementSample {
            likes: post.statistics.like_count,
            comments: post.statistics.comment_count,
            shares: post.statistics.share_count,
            views: 0,
            caption: post.commentary.filter(|c| !c.trim().is_empty()),
            timestamp: (post.created_at > 0)
                .then(|| from_epoch_millis(post.created_at))
                .flatten(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PostPage {
    #[serde(default)]
    elements: Vec<OrganizationPost>,
}

fn organization_urn(organization_id: &str) -> String {
    format!("urn:li:organization:{organization_id}")
}

/// Client for company pages, authenticated with an OAuth bearer token.
#[derive(Clone)]
pub struct LinkedInClient {
    http: HttpClient,
    access_token: String,
    media_limit: u32,
}

impl std::fmt::Debug for LinkedInClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedInClient")
            .field("http", &self.http)
            .field("access_token", &"[redacted]")
            .field("media_limit", &self.media_limit)
            .finish()
    }
}

impl LinkedInClient {
    /// Creates a client pointed at the production API.
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
            http: HttpClient::new("linkedin", base_url, settings)?,
            access_token: access_token.to_owned(),
            media_limit: settings.media_limit,
        })
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&self.access_token)
            .header(RESTLI_PROTOCOL_HEADER, RESTLI_PROTOCOL_VERSION)
    }

    /// Fetches organization name and industries.
    ///
    /// # Errors
    ///
    /// Any [`PlatformError`] from the request or response parsing.
    pub async fn fetch_organization(
        &self,
        organization_id: &str,
    ) -> Result<Organization, PlatformError> {
        let request = self.authorized(
            self.http
                .get(self.http.url(&["v2", "organizations", organization_id])),
        );
        self.http
            .send_json(request, &format!("organization(id={organization_id})"))
            .await
    }

    /// Number of members following the organization.
    ///
    /// # Errors
    ///
    /// Any [`PlatformError`] from the request or response parsing.
    pub async fn fetch_follower_count(&self, organization_id: &str) -> Result<u64, PlatformError> {
        let urn = organization_urn(organization_id);
        let request = self.authorized(
            self.http
                .get(self.http.url(&["v2", "networkSizes", urn.as_str()]))
                .query(&[("edgeType", "CompanyFollowedByMember")]),
        );
        let size: NetworkSize = self
            .http
            .send_json(request, &format!("networkSizes(id={organization_id})"))
            .await?;
        Ok(size.first_degree_size)
    }

    /// Most recent posts authored by the organization.
    ///
    /// # Errors
    ///
    /// Any [`PlatformError`] from the request or response parsing.
    pub async fn fetch_posts(
        &self,
        organization_id: &str,
    ) -> Result<Vec<OrganizationPost>, PlatformError> {
        let urn = organization_urn(organization_id);
        let count = self.media_limit.to_string();
        let request = self.authorized(
            self.http
                .get(self.http.url(&["v2", "posts"]))
                .query(&[("q", "author"), ("author", urn.as_str()), ("count", count.as_str())]),
        );
        let page: PostPage = self
            .http
            .send_json(request, &format!("posts(author={organization_id})"))
            .await?;
        Ok(page.elements)
    }

    /// Fetches the organization, follower count and recent posts as a
    /// [`PlatformProfile`].
    ///
    /// The follower count and posts are fetched concurrently. A failed
    /// follower lookup is logged and counted as zero; failed posts yield
    /// [`SampleSet::Unavailable`].
    ///
    /// # Errors
    ///
    /// Returns the organization fetch error.
    pub async fn fetch_profile(
        &self,
        organization_id: &str,
    ) -> Result<PlatformProfile, PlatformError> {
        let organization = self.fetch_organization(organization_id).await?;
        let (followers, posts) = tokio::join!(
            self.fetch_follower_count(organization_id),
            self.fetch_posts(organization_id)
        );

        let followers = followers.unwrap_or_else(|e| {
            tracing::warn!(
                platform = "linkedin",
                organization_id,
                error = %e,
                "follower count fetch failed; using 0"
            );
            0
        });
        let samples = match posts {
            Ok(posts) => SampleSet::Fetched(posts.into_iter().map(EngagementSample::from).collect()),
            Err(e) => {
                tracing::warn!(
                    platform = "linkedin",
                    organization_id,
                    error = %e,
                    "posts fetch failed; scoring without posts"
                );
                SampleSet::Unavailable
            }
        };

        let name = organization
            .localized_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| organization_id.to_string());
        let mut profile = PlatformProfile::new(Platform::LinkedIn, organization_id, name);
        profile.followers = followers;
        profile.statistics = PlatformStatistics::default();
        profile.industry = (!organization.industries.is_empty())
            .then(|| organization.industries.join(", "));
        profile.samples = samples;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_converts_to_sample() {
        let post: OrganizationPost = serde_json::from_str(
            r#"{
                "id": "urn:li:share:1",
                "commentary": "Saúde mental importa",
                "createdAt": 1714559400000,
                "statistics": {"likeCount": 40, "commentCount": 5, "shareCount": 3}
            }"#,
        )
        .expect("valid post");
        let sample = EngagementSample::from(post);
        assert_eq!(sample.interactions(), 45);
        assert_eq!(sample.shares, 3);
        assert!(sample.timestamp.is_some());
    }

    #[test]
    fn post_without_statistics_counts_zero() {
        let post: OrganizationPost =
            serde_json::from_str(r#"{"commentary": "  "}"#).expect("valid post");
        let sample = EngagementSample::from(post);
        assert_eq!(sample.interactions(), 0);
        assert!(sample.caption.is_none());
        assert!(sample.timestamp.is_none());
    }

    #[test]
    fn organization_urn_format() {
        assert_eq!(organization_urn("1337"), "urn:li:organization:1337");
    }
}

//! `YouTube` Data API v3 client.

use influtrust_core::{EngagementSample, Platform, PlatformProfile, PlatformStatistics, SampleSet};
use serde::Deserialize;

use crate::error::PlatformError;
use crate::http::{ClientSettings, HttpClient};
use crate::parse_helpers::{lenient_u64, parse_timestamp};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// `search.list` rejects `maxResults` above 50.
const MAX_SEARCH_RESULTS: u32 = 50;

#[derive(Debug, Deserialize)]
struct ItemList<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub subscriber_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub video_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub snippet: ChannelSnippet,
    #[serde(default)]
    pub statistics: ChannelStatistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    id: SearchResultId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub like_count: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub comment_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub id: String,
    #[serde(default)]
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub statistics: VideoStatistics,
}

impl Video {
    fn to_sample(&self) -> EngagementSample {
        let caption = match (
            self.snippet.title.trim(),
            self.snippet.description.trim(),
        ) {
            ("", "") => None,
            (title, "") => Some(title.to_string()),
            ("", description) => Some(description.to_string()),
            (title, description) => Some(format!("{title}\n{description}")),
        };
        EngagementSample {
            likes: self.statistics.like_count,
            comments: self.statistics.comment_count,
            shares: 0,
            views: self.statistics.view_count,
            caption,
            timestamp: self.snippet.published_at.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Client for public channel and video data.
#[derive(Clone)]
pub struct YouTubeClient {
    http: HttpClient,
    api_key: String,
    media_limit: u32,
}

impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("http", &self.http)
            .field("api_key", &"[redacted]")
            .field("media_limit", &self.media_limit)
            .finish()
    }
}

impl YouTubeClient {
    /// Creates a client pointed at the production Data API.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, settings: &ClientSettings) -> Result<Self, PlatformError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, settings)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`PlatformError::InvalidBaseUrl`] for an unusable base URL.
    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        settings: &ClientSettings,
    ) -> Result<Self, PlatformError> {
        Ok(Self {
            http: HttpClient::new("youtube", base_url, settings)?,
            api_key: api_key.to_owned(),
            media_limit: settings.media_limit.min(MAX_SEARCH_RESULTS),
        })
    }

    /// Fetches channel snippet and statistics.
    ///
    /// # Errors
    ///
    /// [`PlatformError::NotFound`] when the API returns no channel for the
    /// id, or any request/parse error.
    pub async fn fetch_channel(&self, channel_id: &str) -> Result<Channel, PlatformError> {
        let request = self.http.get(self.http.url(&["channels"])).query(&[
            ("part", "snippet,statistics"),
            ("id", channel_id),
            ("key", self.api_key.as_str()),
        ]);
        let list: ItemList<Channel> = self
            .http
            .send_json(request, &format!("channels(id={channel_id})"))
            .await?;
        list.items
            .into_iter()
            .next()
            .ok_or_else(|| PlatformError::NotFound {
                resource: format!("youtube channel {channel_id}"),
            })
    }

    /// Ids of the channel's most recent uploads, newest first.
    ///
    /// # Errors
    ///
    /// Any [`PlatformError`] from the request or response parsing.
    pub async fn search_recent_video_ids(
        &self,
        channel_id: &str,
    ) -> Result<Vec<String>, PlatformError> {
        let max_results = self.media_limit.to_string();
        let request = self.http.get(self.http.url(&["search"])).query(&[
            ("part", "id"),
            ("channelId", channel_id),
            ("order", "date"),
            ("type", "video"),
            ("maxResults", max_results.as_str()),
            ("key", self.api_key.as_str()),
        ]);
        let list: ItemList<SearchResult> = self
            .http
            .send_json(request, &format!("search(channelId={channel_id})"))
            .await?;
        Ok(list.items.into_iter().filter_map(|r| r.id.video_id).collect())
    }

    /// Fetches snippet and statistics for a batch of video ids.
    ///
    /// # Errors
    ///
    /// Any [`PlatformError`] from the request or response parsing.
    pub async fn fetch_videos(&self, video_ids: &[String]) -> Result<Vec<Video>, PlatformError> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = video_ids.join(",");
        let request = self.http.get(self.http.url(&["videos"])).query(&[
            ("part", "snippet,statistics"),
            ("id", ids.as_str()),
            ("key", self.api_key.as_str()),
        ]);
        let list: ItemList<Video> = self
            .http
            .send_json(request, &format!("videos(count={})", video_ids.len()))
            .await?;
        Ok(list.items)
    }

    async fn fetch_recent_videos(&self, channel_id: &str) -> Result<Vec<Video>, PlatformError> {
        let ids = self.search_recent_video_ids(channel_id).await?;
        self.fetch_videos(&ids).await
    }

    /// Fetches the channel and its recent videos as a [`PlatformProfile`].
    ///
    /// Video category ids and tags are carried as classifier hints. A failed
    /// video fetch is logged and yields [`SampleSet::Unavailable`].
    ///
    /// # Errors
    ///
    /// Returns the channel fetch error; video errors are absorbed.
    pub async fn fetch_profile(&self, channel_id: &str) -> Result<PlatformProfile, PlatformError> {
        let channel = self.fetch_channel(channel_id).await?;

        let (samples, category_ids, tags) = match self.fetch_recent_videos(channel_id).await {
            Ok(videos) => {
                let samples = videos.iter().map(Video::to_sample).collect();
                let category_ids = videos
                    .iter()
                    .filter_map(|v| v.snippet.category_id.clone())
                    .collect();
                let tags = videos
                    .into_iter()
                    .flat_map(|v| v.snippet.tags)
                    .collect();
                (SampleSet::Fetched(samples), category_ids, tags)
            }
            Err(e) => {
                tracing::warn!(
                    platform = "youtube",
                    channel_id,
                    error = %e,
                    "video fetch failed; scoring without videos"
                );
                (SampleSet::Unavailable, Vec::new(), Vec::new())
            }
        };

        let name = if channel.snippet.title.trim().is_empty() {
            channel.id.clone()
        } else {
            channel.snippet.title
        };
        let mut profile = PlatformProfile::new(Platform::YouTube, channel.id, name);
        profile.followers = channel.statistics.subscriber_count;
        profile.statistics = PlatformStatistics {
            views: channel.statistics.view_count,
            posts: channel.statistics.video_count,
            ..PlatformStatistics::default()
        };
        profile.samples = samples;
        profile.category_ids = category_ids;
        profile.tags = tags;
        Ok(profile)
    }
}

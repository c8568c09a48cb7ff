//! Shared `reqwest` plumbing for every outbound client.

use std::time::Duration;

use influtrust_core::AppConfig;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::PlatformError;

/// Retry-After fallback when a 429 carries no usable header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Connection settings shared by all clients.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Maximum posts/videos requested per profile.
    pub media_limit: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "influtrust/0.1 (trust-dashboard)".to_string(),
            media_limit: 25,
        }
    }
}

impl From<&AppConfig> for ClientSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.http_timeout_secs,
            user_agent: config.user_agent.clone(),
            media_limit: config.media_limit,
        }
    }
}

/// A `reqwest::Client` bound to one service's base URL.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: Client,
    base_url: Url,
    service: &'static str,
}

impl HttpClient {
    pub(crate) fn new(
        service: &'static str,
        base_url: &str,
        settings: &ClientSettings,
    ) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .build()?;

        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            PlatformError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PlatformError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url,
            service,
        })
    }

    /// Base URL with `segments` appended as individual path segments.
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can always carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn get(&self, url: Url) -> RequestBuilder {
        self.client.get(url)
    }

    pub(crate) fn post(&self, url: Url) -> RequestBuilder {
        self.client.post(url)
    }

    pub(crate) fn put(&self, url: Url) -> RequestBuilder {
        self.client.put(url)
    }

    pub(crate) fn delete(&self, url: Url) -> RequestBuilder {
        self.client.delete(url)
    }

    /// Send `request` and deserialize a 2xx JSON body into `T`.
    ///
    /// # Errors
    ///
    /// - [`PlatformError::RateLimited`] on HTTP 429.
    /// - [`PlatformError::NotFound`] on HTTP 404.
    /// - [`PlatformError::Api`] on any other non-2xx status whose body
    ///   carries an error message, [`PlatformError::UnexpectedStatus`]
    ///   otherwise.
    /// - [`PlatformError::Http`] on network failure.
    /// - [`PlatformError::Deserialize`] if the body does not match `T`.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, PlatformError> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| PlatformError::Deserialize {
            context: format!("{} {context}", self.service),
            source: e,
        })
    }

    /// Send `request`, check its status, and return the raw body.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<String, PlatformError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return Err(PlatformError::RateLimited {
                service: self.service.to_string(),
                retry_after_secs,
            });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(PlatformError::NotFound {
                resource: strip_query(&url),
            });
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(match error_message(&body) {
                Some(message) => PlatformError::Api {
                    service: self.service.to_string(),
                    status: status.as_u16(),
                    message,
                },
                None => PlatformError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: strip_query(&url),
                },
            });
        }
        Ok(body)
    }
}

/// Credentials travel in query strings; keep them out of errors and logs.
fn strip_query(url: &str) -> String {
    url.split('?').next().unwrap_or(url).to_string()
}

/// Pull a human-readable message out of an error body.
///
/// Graph and `YouTube` use `{"error": {"message": …}}`; `LinkedIn` and the
/// registry put `message` (or `error` as a string) at the top level.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value
        .pointer("/error/message")
        .or_else(|| value.get("message"))
        .or_else(|| value.get("error").filter(|e| e.is_string()))?;
    message.as_str().map(str::to_owned)
}

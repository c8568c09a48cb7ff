//! Client for the influencer/claim registry service.

use influtrust_core::{Claim, ClaimDraft, RegistryInfluencer, RegistryInfluencerDraft};

use crate::error::PlatformError;
use crate::http::{ClientSettings, HttpClient};

const API_KEY_HEADER: &str = "x-api-key";

/// Typed CRUD access to `/api/influencers` and `/api/claims`.
#[derive(Clone)]
pub struct RegistryClient {
    http: HttpClient,
    api_key: String,
}

impl std::fmt::Debug for RegistryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryClient")
            .field("http", &self.http)
            .field("api_key", &"[redacted]")
            .finish()
    }
}

impl RegistryClient {
    /// # Errors
    ///
    /// Returns [`PlatformError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`PlatformError::InvalidBaseUrl`] for an unusable base URL.
    pub fn new(
        base_url: &str,
        api_key: &str,
        settings: &ClientSettings,
    ) -> Result<Self, PlatformError> {
        Ok(Self {
            http: HttpClient::new("registry", base_url, settings)?,
            api_key: api_key.to_owned(),
        })
    }

    fn url(&self, collection: &str, id: Option<&str>) -> reqwest::Url {
        match id {
            Some(id) => self.http.url(&["api", collection, id]),
            None => self.http.url(&["api", collection]),
        }
    }

    fn keyed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header(API_KEY_HEADER, &self.api_key)
    }

    /// # Errors
    ///
    /// Any [`PlatformError`] from the request or response parsing.
    pub async fn list_influencers(&self) -> Result<Vec<RegistryInfluencer>, PlatformError> {
        let request = self.keyed(self.http.get(self.url("influencers", None)));
        self.http.send_json(request, "list influencers").await
    }

    /// # Errors
    ///
    /// [`PlatformError::NotFound`] for an unknown id, or any request error.
    pub async fn get_influencer(&self, id: &str) -> Result<RegistryInfluencer, PlatformError> {
        let request = self.keyed(self.http.get(self.url("influencers", Some(id))));
        self.http
            .send_json(request, &format!("get influencer(id={id})"))
            .await
    }

    /// # Errors
    ///
    /// Any [`PlatformError`] from the request or response parsing.
    pub async fn create_influencer(
        &self,
        draft: &RegistryInfluencerDraft,
    ) -> Result<RegistryInfluencer, PlatformError> {
        let request = self.keyed(self.http.post(self.url("influencers", None)).json(draft));
        let created: RegistryInfluencer = self.http.send_json(request, "create influencer").await?;
        tracing::info!(influencer_id = %created.id, name = %created.name, "registry influencer created");
        Ok(created)
    }

    /// # Errors
    ///
    /// [`PlatformError::NotFound`] for an unknown id, or any request error.
    pub async fn update_influencer(
        &self,
        id: &str,
        draft: &RegistryInfluencerDraft,
    ) -> Result<RegistryInfluencer, PlatformError> {
        let request = self.keyed(
            self.http
                .put(self.url("influencers", Some(id)))
                .json(draft),
        );
        self.http
            .send_json(request, &format!("update influencer(id={id})"))
            .await
    }

    /// # Errors
    ///
    /// [`PlatformError::NotFound`] for an unknown id, or any request error.
    pub async fn delete_influencer(&self, id: &str) -> Result<(), PlatformError> {
        let request = self.keyed(self.http.delete(self.url("influencers", Some(id))));
        self.http.send(request).await?;
        tracing::info!(influencer_id = %id, "registry influencer deleted");
        Ok(())
    }

    /// Claims, optionally restricted to one influencer.
    ///
    /// # Errors
    ///
    /// Any [`PlatformError`] from the request or response parsing.
    pub async fn list_claims(
        &self,
        influencer_id: Option<&str>,
    ) -> Result<Vec<Claim>, PlatformError> {
        let mut request = self.http.get(self.url("claims", None));
        if let Some(influencer_id) = influencer_id {
            request = request.query(&[("influencerId", influencer_id)]);
        }
        self.http
            .send_json(self.keyed(request), "list claims")
            .await
    }

    /// # Errors
    ///
    /// [`PlatformError::NotFound`] for an unknown id, or any request error.
    pub async fn get_claim(&self, id: &str) -> Result<Claim, PlatformError> {
        let request = self.keyed(self.http.get(self.url("claims", Some(id))));
        self.http
            .send_json(request, &format!("get claim(id={id})"))
            .await
    }

    /// # Errors
    ///
    /// Any [`PlatformError`] from the request or response parsing.
    pub async fn create_claim(&self, draft: &ClaimDraft) -> Result<Claim, PlatformError> {
        let request = self.keyed(self.http.post(self.url("claims", None)).json(draft));
        let created: Claim = self.http.send_json(request, "create claim").await?;
        tracing::info!(
            claim_id = %created.id,
            influencer_id = %created.influencer_id,
            status = %created.status,
            "registry claim created"
        );
        Ok(created)
    }

    /// # Errors
    ///
    /// [`PlatformError::NotFound`] for an unknown id, or any request error.
    pub async fn update_claim(&self, id: &str, draft: &ClaimDraft) -> Result<Claim, PlatformError> {
        let request = self.keyed(self.http.put(self.url("claims", Some(id))).json(draft));
        self.http
            .send_json(request, &format!("update claim(id={id})"))
            .await
    }

    /// # Errors
    ///
    /// [`PlatformError::NotFound`] for an unknown id, or any request error.
    pub async fn delete_claim(&self, id: &str) -> Result<(), PlatformError> {
        let request = self.keyed(self.http.delete(self.url("claims", Some(id))));
        self.http.send(request).await?;
        tracing::info!(claim_id = %id, "registry claim deleted");
        Ok(())
    }
}

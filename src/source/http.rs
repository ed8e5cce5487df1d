use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::{debug, info};

use super::{AssetPage, AssetSource, PageRequest};
use crate::assets::{EnergyAsset, SubmissionPayload};
use crate::config::ApiConfig;
use crate::error::NetworkError;

/// Path of the assets collection under the API base URL.
const ASSETS_PATH: &str = "/api/v1/assets";

/// Asset backend reached over HTTP.
#[derive(Clone)]
pub struct HttpAssetSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpAssetSource {
    /// Creates a client for the API at `base_url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, NetworkError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Builds a client from the `[api]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Transport`] if the HTTP client cannot be built.
    pub fn from_config(cfg: &ApiConfig) -> Result<Self, NetworkError> {
        let source = Self::new(&cfg.base_url, Duration::from_secs(cfg.timeout_secs))?;
        Ok(match &cfg.token {
            Some(token) if !token.is_empty() => source.with_token(token),
            _ => source,
        })
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{ASSETS_PATH}", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}{ASSETS_PATH}/{id}", self.base_url)
    }

    fn add_auth(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

/// Maps non-success statuses onto [`NetworkError`].
///
/// `id` names the addressed asset; a 404 without one is reported as a plain status.
async fn check_status(resp: Response, id: Option<&str>) -> Result<Response, NetworkError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    match (status, id) {
        (StatusCode::UNAUTHORIZED, _) => Err(NetworkError::Unauthorized),
        (StatusCode::NOT_FOUND, Some(id)) => Err(NetworkError::NotFound(id.to_string())),
        _ => {
            let body = resp.text().await.unwrap_or_default();
            Err(NetworkError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

impl AssetSource for HttpAssetSource {
    async fn list(&self, page: PageRequest) -> Result<AssetPage, NetworkError> {
        debug!(skip = page.skip, limit = page.limit, "fetching asset page");
        let resp = self
            .add_auth(self.client.get(self.collection_url()))
            .query(&[("skip", page.skip), ("limit", page.limit)])
            .send()
            .await?;
        let page: AssetPage = check_status(resp, None).await?.json().await?;
        debug!(items = page.items.len(), total = page.total, "asset page received");
        Ok(page)
    }

    async fn get(&self, id: &str) -> Result<EnergyAsset, NetworkError> {
        let resp = self
            .add_auth(self.client.get(self.item_url(id)))
            .send()
            .await?;
        Ok(check_status(resp, Some(id)).await?.json().await?)
    }

    async fn create(&self, payload: &SubmissionPayload) -> Result<EnergyAsset, NetworkError> {
        let resp = self
            .add_auth(self.client.post(self.collection_url()))
            .json(payload)
            .send()
            .await?;
        let asset: EnergyAsset = check_status(resp, None).await?.json().await?;
        info!(asset_id = %asset.id, asset_type = %asset.asset_type, "asset created");
        Ok(asset)
    }

    /// Sends `PUT /api/v1/assets/{id}`.
    ///
    /// Backends that only expose list/create/delete answer with 405, which
    /// surfaces as [`NetworkError::Status`].
    async fn update(
        &self,
        id: &str,
        payload: &SubmissionPayload,
    ) -> Result<EnergyAsset, NetworkError> {
        let resp = self
            .add_auth(self.client.put(self.item_url(id)))
            .json(payload)
            .send()
            .await?;
        let asset: EnergyAsset = check_status(resp, Some(id)).await?.json().await?;
        info!(asset_id = %asset.id, "asset updated");
        Ok(asset)
    }

    async fn delete(&self, id: &str) -> Result<(), NetworkError> {
        let resp = self
            .add_auth(self.client.delete(self.item_url(id)))
            .send()
            .await?;
        check_status(resp, Some(id)).await?;
        info!(asset_id = %id, "asset deleted");
        Ok(())
    }
}

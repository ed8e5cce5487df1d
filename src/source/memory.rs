use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use super::{AssetPage, AssetSource, PageRequest};
use crate::assets::{AssetStatus, EnergyAsset, SubmissionPayload};
use crate::error::NetworkError;

/// Asset store kept in process memory.
///
/// Clones share the same store. Mirrors the backend's create behavior:
/// fresh UUID v4 ids, `online` status and a creation timestamp.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    store: Arc<Mutex<Vec<EnergyAsset>>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `assets`, kept in the given order.
    pub fn with_assets(assets: Vec<EnergyAsset>) -> Self {
        Self {
            store: Arc::new(Mutex::new(assets)),
        }
    }

    /// Copy of every stored asset.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Unavailable`] if the store lock is poisoned.
    pub fn snapshot(&self) -> Result<Vec<EnergyAsset>, NetworkError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<EnergyAsset>>, NetworkError> {
        self.store
            .lock()
            .map_err(|_| NetworkError::Unavailable("asset store lock poisoned".to_string()))
    }
}

impl AssetSource for InMemorySource {
    async fn list(&self, page: PageRequest) -> Result<AssetPage, NetworkError> {
        let store = self.lock()?;
        Ok(AssetPage {
            items: store
                .iter()
                .skip(page.skip)
                .take(page.limit)
                .cloned()
                .collect(),
            total: store.len(),
            skip: page.skip,
            limit: page.limit,
        })
    }

    async fn get(&self, id: &str) -> Result<EnergyAsset, NetworkError> {
        self.lock()?
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| NetworkError::NotFound(id.to_string()))
    }

    async fn create(&self, payload: &SubmissionPayload) -> Result<EnergyAsset, NetworkError> {
        let asset = EnergyAsset {
            id: Uuid::new_v4().to_string(),
            name: payload.name.clone(),
            asset_type: payload.asset_type.clone(),
            capacity_kw: payload.capacity_kw,
            status: Some(AssetStatus::Online),
            organization_id: None,
            metadata: None,
            created_at: Some(Utc::now()),
        };
        self.lock()?.push(asset.clone());
        debug!(asset_id = %asset.id, "stored asset");
        Ok(asset)
    }

    async fn update(
        &self,
        id: &str,
        payload: &SubmissionPayload,
    ) -> Result<EnergyAsset, NetworkError> {
        let mut store = self.lock()?;
        let asset = store
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| NetworkError::NotFound(id.to_string()))?;
        asset.name = payload.name.clone();
        asset.asset_type = payload.asset_type.clone();
        asset.capacity_kw = payload.capacity_kw;
        Ok(asset.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), NetworkError> {
        let mut store = self.lock()?;
        let before = store.len();
        store.retain(|a| a.id != id);
        if store.len() == before {
            return Err(NetworkError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

//! Data-source seam between the board and the asset backend.
//!
//! [`AssetSource`] is the injected interface the board consumes, so the
//! classifier, validator and card presenter stay pure and testable without
//! network mocking.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::assets::{EnergyAsset, SubmissionPayload};
use crate::error::NetworkError;

/// reqwest-backed client for the REST API.
pub mod http;
/// Shared in-process store.
pub mod memory;

pub use http::HttpAssetSource;
pub use memory::InMemorySource;

/// Default page size, matching the backend's default `limit`.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Window of the asset list to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub skip: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// First page with the given size (at least 1).
    pub fn first(limit: usize) -> Self {
        Self {
            skip: 0,
            limit: limit.max(1),
        }
    }

    /// Zero-based page `index` with the given size.
    pub fn nth(index: usize, limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            skip: index.saturating_mul(limit),
            limit,
        }
    }

    /// Following window.
    pub fn next(self) -> Self {
        Self {
            skip: self.skip.saturating_add(self.limit),
            ..self
        }
    }

    /// Preceding window, clamped at the start.
    pub fn prev(self) -> Self {
        Self {
            skip: self.skip.saturating_sub(self.limit),
            ..self
        }
    }

    /// Zero-based index of this page.
    pub fn index(self) -> usize {
        self.skip / self.limit.max(1)
    }
}

/// One page of the asset list as returned by `GET /api/v1/assets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetPage {
    pub items: Vec<EnergyAsset>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

impl AssetPage {
    /// Empty page for the given window, used when a fetch fails.
    pub fn empty(page: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            skip: page.skip,
            limit: page.limit,
        }
    }

    /// Returns `true` if more assets exist past this page.
    pub fn has_next(&self) -> bool {
        self.skip.saturating_add(self.items.len()) < self.total
    }
}

/// Backend operations the asset screen depends on.
///
/// Implementations must return `Send` futures so boards can be driven from a
/// multi-threaded runtime.
pub trait AssetSource {
    /// Fetches one page of assets.
    fn list(
        &self,
        page: PageRequest,
    ) -> impl Future<Output = Result<AssetPage, NetworkError>> + Send;

    /// Fetches a single asset.
    fn get(&self, id: &str) -> impl Future<Output = Result<EnergyAsset, NetworkError>> + Send;

    /// Creates an asset and returns the stored record.
    fn create(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<EnergyAsset, NetworkError>> + Send;

    /// Replaces the editable fields of an existing asset.
    fn update(
        &self,
        id: &str,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<EnergyAsset, NetworkError>> + Send;

    /// Deletes an asset.
    fn delete(&self, id: &str) -> impl Future<Output = Result<(), NetworkError>> + Send;
}

//! Asset screen controller.
//!
//! [`AssetBoard`] owns the last-fetched page and the add/edit dialog, and
//! dispatches list/create/update/delete through an injected [`AssetSource`].
//! Derived view data (partition, cards) is computed from the cached page by
//! the pure functions in [`crate::assets`].

use tracing::{info, warn};

use crate::assets::{
    AssetDialog, AssetFormState, CardDescriptor, DashboardLinks, DialogMode, EnergyAsset,
    Partition, derive_dashboard_cards_with, partition_assets, validate_and_build_submission,
};
use crate::error::{BoardError, Operation};
use crate::source::{AssetPage, AssetSource, PageRequest};

/// Controller behind the asset-management screen.
pub struct AssetBoard<S> {
    source: S,
    links: DashboardLinks,
    page: PageRequest,
    cached: AssetPage,
    dialog: AssetDialog,
    last_error: Option<String>,
}

impl<S: AssetSource> AssetBoard<S> {
    /// Creates a board over `source` starting at `page`. Nothing is fetched yet.
    pub fn new(source: S, page: PageRequest) -> Self {
        Self {
            source,
            links: DashboardLinks::default(),
            cached: AssetPage::empty(page),
            page,
            dialog: AssetDialog::Closed,
            last_error: None,
        }
    }

    /// Uses the given dashboard URLs for derived cards.
    pub fn with_links(mut self, links: DashboardLinks) -> Self {
        self.links = links;
        self
    }

    /// Re-fetches the current page.
    ///
    /// On failure the cached list degrades to empty and the error is kept
    /// for display; the previous page is not shown.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Network`] if the fetch failed.
    pub async fn refresh(&mut self) -> Result<(), BoardError> {
        match self.source.list(self.page).await {
            Ok(page) => {
                self.cached = page;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, skip = self.page.skip, "asset list fetch failed; showing empty list");
                let err = BoardError::network(Operation::List, e);
                self.cached = AssetPage::empty(self.page);
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Moves to the following page and fetches it.
    ///
    /// # Errors
    ///
    /// See [`AssetBoard::refresh`].
    pub async fn next_page(&mut self) -> Result<(), BoardError> {
        self.page = self.page.next();
        self.refresh().await
    }

    /// Moves to the preceding page (clamped at the first) and fetches it.
    ///
    /// # Errors
    ///
    /// See [`AssetBoard::refresh`].
    pub async fn prev_page(&mut self) -> Result<(), BoardError> {
        self.page = self.page.prev();
        self.refresh().await
    }

    /// Opens an empty add dialog. Returns `false` if a dialog is already open.
    pub fn open_new(&mut self) -> bool {
        self.dialog.open_new()
    }

    /// Opens the edit dialog for asset `id`, fetching it if it is not cached.
    ///
    /// Returns `Ok(false)` if a dialog is already open.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Network`] if the asset had to be fetched and the
    /// fetch failed.
    pub async fn open_edit(&mut self, id: &str) -> Result<bool, BoardError> {
        if self.dialog.is_open() {
            return Ok(false);
        }
        let asset = match self.cached.items.iter().find(|a| a.id == id) {
            Some(asset) => asset.clone(),
            None => self
                .source
                .get(id)
                .await
                .map_err(|e| BoardError::network(Operation::Get, e))?,
        };
        Ok(self.dialog.open_edit(&asset))
    }

    /// Closes the dialog without submitting.
    pub fn cancel_dialog(&mut self) -> bool {
        self.dialog.cancel()
    }

    /// Mutable access to the open form; `None` when the dialog is closed.
    pub fn form_mut(&mut self) -> Option<&mut AssetFormState> {
        self.dialog.form_mut()
    }

    /// Validates the open form and sends it to the backend.
    ///
    /// On success the dialog closes and the list is refreshed. On any failure
    /// the dialog stays open with the form intact and the error shown inline.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] for an invalid form,
    /// [`BoardError::Network`] if the backend call failed, and
    /// [`BoardError::DialogClosed`] if no dialog is open.
    pub async fn submit(&mut self) -> Result<EnergyAsset, BoardError> {
        let (mode, validated) = match &self.dialog {
            AssetDialog::Open { mode, form, .. } => {
                (mode.clone(), validate_and_build_submission(form))
            }
            AssetDialog::Closed => return Err(BoardError::DialogClosed),
        };
        let payload = match validated {
            Ok(payload) => payload,
            Err(e) => {
                self.dialog.submit_failed(e.to_string());
                return Err(e.into());
            }
        };

        let result = match &mode {
            DialogMode::New => self
                .source
                .create(&payload)
                .await
                .map_err(|e| BoardError::network(Operation::Create, e)),
            DialogMode::Edit { asset_id } => self
                .source
                .update(asset_id, &payload)
                .await
                .map_err(|e| BoardError::network(Operation::Update, e)),
        };

        match result {
            Ok(asset) => {
                info!(asset_id = %asset.id, sector = %payload.sector, "asset submitted");
                self.dialog.submitted();
                // A failed refresh degrades the list on its own; the submit still succeeded.
                let _ = self.refresh().await;
                Ok(asset)
            }
            Err(e) => {
                warn!(error = %e, "asset submit failed; dialog kept open");
                self.dialog.submit_failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Deletes asset `id` and refreshes the list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Network`] if the delete failed; the cached list
    /// is left as it was.
    pub async fn delete(&mut self, id: &str) -> Result<(), BoardError> {
        if let Err(e) = self.source.delete(id).await {
            warn!(asset_id = %id, error = %e, "asset delete failed");
            let err = BoardError::network(Operation::Delete, e);
            self.last_error = Some(err.to_string());
            return Err(err);
        }
        let _ = self.refresh().await;
        Ok(())
    }

    /// Assets of the cached page in server order (the raw table).
    pub fn assets(&self) -> &[EnergyAsset] {
        &self.cached.items
    }

    /// Cached page including the server-reported total.
    pub fn cached_page(&self) -> &AssetPage {
        &self.cached
    }

    /// Current page window.
    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Demand/supply groups of the cached page.
    pub fn partition(&self) -> Partition<'_> {
        partition_assets(&self.cached.items)
    }

    /// Dashboard cards of the cached page.
    pub fn cards(&self) -> Vec<CardDescriptor> {
        derive_dashboard_cards_with(&self.cached.items, &self.links)
    }

    pub fn dialog(&self) -> &AssetDialog {
        &self.dialog
    }

    /// Message of the last failed list or delete, cleared by a successful refresh.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetType, Sector, SubmissionPayload, SupplyType};
    use crate::error::{NetworkError, ValidationError};
    use crate::source::InMemorySource;

    /// Source whose every call fails.
    struct DownSource;

    impl AssetSource for DownSource {
        async fn list(&self, _page: PageRequest) -> Result<AssetPage, NetworkError> {
            Err(NetworkError::Unavailable("down".to_string()))
        }
        async fn get(&self, id: &str) -> Result<EnergyAsset, NetworkError> {
            Err(NetworkError::NotFound(id.to_string()))
        }
        async fn create(&self, _p: &SubmissionPayload) -> Result<EnergyAsset, NetworkError> {
            Err(NetworkError::Unavailable("down".to_string()))
        }
        async fn update(
            &self,
            _id: &str,
            _p: &SubmissionPayload,
        ) -> Result<EnergyAsset, NetworkError> {
            Err(NetworkError::Unavailable("down".to_string()))
        }
        async fn delete(&self, _id: &str) -> Result<(), NetworkError> {
            Err(NetworkError::Unavailable("down".to_string()))
        }
    }

    fn seeded() -> InMemorySource {
        InMemorySource::with_assets(vec![
            EnergyAsset::new("d1", "Main Load", AssetType::DemandSector),
            EnergyAsset::new("s1", "Roof", AssetType::Supply(SupplyType::Solar)).with_capacity(12.5),
            EnergyAsset::new("u1", "Dam", AssetType::from("hydro")),
        ])
    }

    #[tokio::test]
    async fn refresh_fills_cache_and_derives_views() {
        let mut board = AssetBoard::new(seeded(), PageRequest::default());
        assert!(board.assets().is_empty());
        board.refresh().await.expect("refresh should succeed");
        assert_eq!(board.assets().len(), 3);
        let p = board.partition();
        assert_eq!((p.demand.len(), p.supply.len(), p.unrecognized.len()), (1, 1, 1));
        assert_eq!(board.cards().len(), 4);
    }

    #[tokio::test]
    async fn failed_refresh_degrades_to_empty() {
        let mut board = AssetBoard::new(DownSource, PageRequest::default());
        let err = board.refresh().await.expect_err("refresh should fail");
        assert!(matches!(
            err,
            BoardError::Network {
                op: Operation::List,
                ..
            }
        ));
        assert!(board.assets().is_empty());
        assert!(board.cards().is_empty());
        assert!(board.last_error().is_some());
    }

    #[tokio::test]
    async fn submit_new_closes_dialog_and_refreshes() {
        let mut board = AssetBoard::new(InMemorySource::new(), PageRequest::default());
        assert!(board.open_new());
        if let Some(form) = board.form_mut() {
            form.name = "Ridge".to_string();
            form.sector = Sector::Supply;
            form.supply_type = Some(SupplyType::Wind);
            form.capacity_kw = "300".to_string();
        }
        let created = board.submit().await.expect("submit should succeed");
        assert_eq!(created.capacity_kw, Some(300.0));
        assert!(!board.dialog().is_open());
        assert_eq!(board.assets().len(), 1);
    }

    #[tokio::test]
    async fn validation_error_keeps_dialog_open() {
        let mut board = AssetBoard::new(InMemorySource::new(), PageRequest::default());
        board.open_new();
        if let Some(form) = board.form_mut() {
            form.name = "Roof Solar".to_string();
        }
        let err = board.submit().await.expect_err("submit should fail");
        assert!(matches!(
            err,
            BoardError::Validation(ValidationError::MissingSupplyType)
        ));
        assert!(board.dialog().is_open());
        assert_eq!(
            board.dialog().form().map(|f| f.name.as_str()),
            Some("Roof Solar")
        );
        assert!(board.dialog().error().is_some());
    }

    #[tokio::test]
    async fn network_error_keeps_form_fields() {
        let mut board = AssetBoard::new(DownSource, PageRequest::default());
        board.open_new();
        if let Some(form) = board.form_mut() {
            form.name = "Main Load".to_string();
            form.sector = Sector::Demand;
        }
        let err = board.submit().await.expect_err("submit should fail");
        assert!(matches!(
            err,
            BoardError::Network {
                op: Operation::Create,
                ..
            }
        ));
        assert_eq!(
            board.dialog().form().map(|f| f.name.as_str()),
            Some("Main Load")
        );
    }

    #[tokio::test]
    async fn submit_without_dialog_is_rejected() {
        let mut board = AssetBoard::new(InMemorySource::new(), PageRequest::default());
        assert!(matches!(
            board.submit().await,
            Err(BoardError::DialogClosed)
        ));
    }

    #[tokio::test]
    async fn edit_to_demand_drops_capacity() {
        let mut board = AssetBoard::new(seeded(), PageRequest::default());
        board.refresh().await.expect("refresh should succeed");
        assert!(board.open_edit("s1").await.expect("open should succeed"));
        if let Some(form) = board.form_mut() {
            form.sector = Sector::Demand;
        }
        let updated = board.submit().await.expect("submit should succeed");
        assert_eq!(updated.asset_type, AssetType::DemandSector);
        assert_eq!(updated.capacity_kw, None);
        assert_eq!(board.partition().demand.len(), 2);
    }

    #[tokio::test]
    async fn open_edit_fetches_uncached_asset() {
        let mut board = AssetBoard::new(seeded(), PageRequest::default());
        assert!(board.open_edit("u1").await.expect("open should succeed"));
        assert_eq!(
            board.dialog().form().map(|f| f.supply_type),
            Some(None)
        );
        let mut board = AssetBoard::new(seeded(), PageRequest::default());
        assert!(board.open_edit("missing").await.is_err());
        assert!(!board.dialog().is_open());
    }

    #[tokio::test]
    async fn delete_refreshes_and_reports_failures() {
        let mut board = AssetBoard::new(seeded(), PageRequest::default());
        board.refresh().await.expect("refresh should succeed");
        board.delete("d1").await.expect("delete should succeed");
        assert_eq!(board.assets().len(), 2);

        let err = board.delete("d1").await.expect_err("second delete should fail");
        assert!(matches!(
            err,
            BoardError::Network {
                op: Operation::Delete,
                ..
            }
        ));
        assert_eq!(board.assets().len(), 2);
        assert!(board.last_error().is_some());
    }

    #[tokio::test]
    async fn paging_moves_window() {
        let mut board = AssetBoard::new(seeded(), PageRequest::first(2));
        board.refresh().await.expect("refresh should succeed");
        assert!(board.cached_page().has_next());
        board.next_page().await.expect("next page should load");
        assert_eq!(board.assets().len(), 1);
        assert_eq!(board.assets()[0].id, "u1");
        board.prev_page().await.expect("prev page should load");
        assert_eq!(board.page().skip, 0);
        board.prev_page().await.expect("prev page should load");
        assert_eq!(board.page().skip, 0);
    }
}

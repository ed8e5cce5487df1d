//! Asset classification, form validation and dashboard-card derivation.
//!
//! Everything here is pure: functions take the fetched asset list or the
//! form state and return derived view data.

/// Dashboard link cards per sector.
pub mod cards;
/// Add/edit dialog state machine.
pub mod dialog;
/// Form state and submission validation.
pub mod form;
/// Demand/supply classification.
pub mod sector;
pub mod types;

pub use cards::{
    CardDescriptor, DashboardLinks, IconTag, derive_dashboard_cards, derive_dashboard_cards_with,
};
pub use dialog::{AssetDialog, DialogMode};
pub use form::{AssetFormState, SubmissionPayload, validate_and_build_submission};
pub use sector::{Partition, classify_sector, partition_assets};
pub use types::{AssetStatus, AssetType, EnergyAsset, Sector, SupplyType};

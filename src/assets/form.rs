//! Create/edit form state and its validation into a submission payload.

use serde::{Deserialize, Serialize};

use super::sector::classify_sector;
use super::types::{AssetType, DEMAND_SECTOR, EnergyAsset, Sector, SupplyType};
use crate::error::ValidationError;

/// Transient, client-only state of the asset dialog form.
///
/// `supply_type == None` stands for "no concrete supply type selected",
/// which covers both an empty selection and `demand_sector`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetFormState {
    /// Raw name text.
    pub name: String,
    /// Selected sector.
    pub sector: Sector,
    /// Selected supply type.
    pub supply_type: Option<SupplyType>,
    /// Raw capacity text (kW).
    pub capacity_kw: String,
}

impl Default for AssetFormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            sector: Sector::Supply,
            supply_type: None,
            capacity_kw: String::new(),
        }
    }
}

impl AssetFormState {
    /// Empty form for the "add" dialog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing asset for the "edit" dialog.
    pub fn from_asset(asset: &EnergyAsset) -> Self {
        let supply_type = match asset.asset_type {
            AssetType::Supply(t) => Some(t),
            _ => None,
        };
        Self {
            name: asset.name.clone(),
            sector: classify_sector(asset),
            supply_type,
            capacity_kw: asset
                .capacity_kw
                .map(|c| c.to_string())
                .unwrap_or_default(),
        }
    }

    /// Applies a raw type string to the form.
    ///
    /// `""` and `demand_sector` clear the supply type.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownAssetType`] for any other string
    /// outside the supply set. The form is left unchanged in that case.
    pub fn set_type_text(&mut self, raw: &str) -> Result<(), ValidationError> {
        let raw = raw.trim();
        self.supply_type = if raw.is_empty() || raw == DEMAND_SECTOR {
            None
        } else {
            Some(raw.parse()?)
        };
        Ok(())
    }

    /// Cycles the supply type forward, starting at the first type when unset.
    pub fn next_supply_type(&mut self) {
        self.supply_type = Some(self.supply_type.map_or(SupplyType::ALL[0], SupplyType::next));
    }

    /// Cycles the supply type backward, starting at the last type when unset.
    pub fn prev_supply_type(&mut self) {
        self.supply_type = Some(
            self.supply_type
                .map_or(SupplyType::ALL[SupplyType::ALL.len() - 1], SupplyType::prev),
        );
    }

    /// Returns `true` when the capacity field is collected for the current sector.
    pub fn collects_capacity(&self) -> bool {
        self.sector == Sector::Supply
    }
}

/// Normalized body sent to the backend on create or edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    /// Trimmed display name.
    pub name: String,
    /// Effective type (`demand_sector` for the demand sector).
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    /// Selected sector.
    pub sector: Sector,
    /// Capacity in kW; omitted rather than zero when not entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_kw: Option<f64>,
}

/// Validates the form and builds the submission payload.
///
/// Rules, in order:
/// 1. trimmed name must be non-empty,
/// 2. supply sector requires a concrete supply type,
/// 3. the demand sector forces the type to `demand_sector`,
/// 4. capacity is parsed only when entered and only for the supply sector.
///
/// Demand submissions never carry a capacity, even when the form was
/// pre-filled from an asset that had one.
///
/// # Errors
///
/// Returns the first [`ValidationError`] hit by the rules above.
pub fn validate_and_build_submission(
    form: &AssetFormState,
) -> Result<SubmissionPayload, ValidationError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let asset_type = match (form.sector, form.supply_type) {
        (Sector::Demand, _) => AssetType::DemandSector,
        (Sector::Supply, Some(t)) => AssetType::Supply(t),
        (Sector::Supply, None) => return Err(ValidationError::MissingSupplyType),
    };

    let capacity_kw = if form.collects_capacity() {
        parse_capacity(&form.capacity_kw)?
    } else {
        None
    };

    Ok(SubmissionPayload {
        name: name.to_string(),
        asset_type,
        sector: form.sector,
        capacity_kw,
    })
}

fn parse_capacity(raw: &str) -> Result<Option<f64>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        _ => Err(ValidationError::InvalidCapacity(raw.to_string())),
    }
}

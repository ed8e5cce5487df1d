//! Wire and domain types for energy assets.
//!
//! Asset types arrive from the backend as free-form strings. They are decoded
//! into the closed [`AssetType`] variant set, with anything outside it kept
//! verbatim as [`AssetType::Unrecognized`] so the raw table can still show it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Wire name of the demand-sector asset type.
pub const DEMAND_SECTOR: &str = "demand_sector";

/// Classification of an asset as consuming (demand) or producing (supply) power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    /// Consumes power.
    Demand,
    /// Generates, stores or connects power.
    Supply,
}

impl Sector {
    /// Wire name of the sector.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Demand => "demand",
            Self::Supply => "supply",
        }
    }

    /// Returns the other sector.
    pub fn toggled(self) -> Self {
        match self {
            Self::Demand => Self::Supply,
            Self::Supply => Self::Demand,
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four concrete generation, storage and connection kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyType {
    Solar,
    Wind,
    Battery,
    GridConnection,
}

impl SupplyType {
    /// All supply types in display order.
    pub const ALL: [SupplyType; 4] = [
        SupplyType::Solar,
        SupplyType::Wind,
        SupplyType::Battery,
        SupplyType::GridConnection,
    ];

    /// Wire name of the supply type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solar => "solar",
            Self::Wind => "wind",
            Self::Battery => "battery",
            Self::GridConnection => "grid_connection",
        }
    }

    /// Next type in [`SupplyType::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous type in [`SupplyType::ALL`], wrapping around.
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SupplyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupplyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownAssetType(s.to_string()))
    }
}

/// Concrete type of an energy asset as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetType {
    /// One of the four supply kinds.
    Supply(SupplyType),
    /// `demand_sector`.
    DemandSector,
    /// Any type string outside the known set, kept verbatim.
    Unrecognized(String),
}

impl AssetType {
    /// Wire name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Supply(t) => t.as_str(),
            Self::DemandSector => DEMAND_SECTOR,
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Returns `true` for the closed set of types the dashboard knows about.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for AssetType {
    fn from(raw: String) -> Self {
        if raw == DEMAND_SECTOR {
            return Self::DemandSector;
        }
        match raw.parse::<SupplyType>() {
            Ok(t) => Self::Supply(t),
            Err(_) => Self::Unrecognized(raw),
        }
    }
}

impl From<&str> for AssetType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<AssetType> for String {
    fn from(t: AssetType) -> Self {
        match t {
            AssetType::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl From<SupplyType> for AssetType {
    fn from(t: SupplyType) -> Self {
        Self::Supply(t)
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational status reported for an asset.
///
/// Status strings the dashboard does not know (e.g. `emergency`) decode to
/// [`AssetStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Online,
    Offline,
    Maintenance,
    #[serde(other)]
    Unknown,
}

impl AssetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Maintenance => "maintenance",
            Self::Unknown => "unknown",
        }
    }
}

/// An energy asset record owned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyAsset {
    /// Server-assigned unique id.
    pub id: String,
    /// Display name (non-empty).
    pub name: String,
    /// Concrete asset type.
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    /// Rated capacity (kW, non-negative).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_kw: Option<f64>,
    /// Operational status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
    /// Owning organization, if the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    /// Free-form metadata attached by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl EnergyAsset {
    /// Creates an asset with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, asset_type: AssetType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            asset_type,
            capacity_kw: None,
            status: None,
            organization_id: None,
            metadata: None,
            created_at: None,
        }
    }

    /// Sets the rated capacity.
    pub fn with_capacity(mut self, capacity_kw: f64) -> Self {
        self.capacity_kw = Some(capacity_kw);
        self
    }

    /// Sets the operational status.
    pub fn with_status(mut self, status: AssetStatus) -> Self {
        self.status = Some(status);
        self
    }
}

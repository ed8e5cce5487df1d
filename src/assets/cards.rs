//! Dashboard link cards derived from the demand/supply partition.

use serde::Serialize;

use super::sector::partition_assets;
use super::types::{AssetType, EnergyAsset, Sector, SupplyType};

/// Default energy-demand analytics dashboard.
pub const DEMAND_DASHBOARD_URL: &str = "https://dashboard.energy-response.io/energy-demand";
/// Default energy-supply analytics dashboard.
pub const SUPPLY_DASHBOARD_URL: &str = "https://dashboard.energy-response.io/energy-supply";

/// External dashboard URL per sector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLinks {
    pub demand_url: String,
    pub supply_url: String,
}

impl Default for DashboardLinks {
    fn default() -> Self {
        Self {
            demand_url: DEMAND_DASHBOARD_URL.to_string(),
            supply_url: SUPPLY_DASHBOARD_URL.to_string(),
        }
    }
}

impl DashboardLinks {
    /// URL of the dashboard for a sector.
    pub fn url_for(&self, sector: Sector) -> &str {
        match sector {
            Sector::Demand => &self.demand_url,
            Sector::Supply => &self.supply_url,
        }
    }
}

/// Icon shown on a card, one per concrete asset type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconTag {
    Sun,
    Wind,
    Battery,
    Grid,
    Factory,
}

impl IconTag {
    /// Icon for a recognized asset type; `None` for unrecognized ones.
    pub fn for_type(asset_type: &AssetType) -> Option<Self> {
        match asset_type {
            AssetType::Supply(SupplyType::Solar) => Some(Self::Sun),
            AssetType::Supply(SupplyType::Wind) => Some(Self::Wind),
            AssetType::Supply(SupplyType::Battery) => Some(Self::Battery),
            AssetType::Supply(SupplyType::GridConnection) => Some(Self::Grid),
            AssetType::DemandSector => Some(Self::Factory),
            AssetType::Unrecognized(_) => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Wind => "wind",
            Self::Battery => "battery",
            Self::Grid => "grid",
            Self::Factory => "factory",
        }
    }
}

/// Presentational unit produced for the dashboard card area.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardDescriptor {
    /// Heading that precedes the cards of one sector.
    GroupHeader {
        sector: Sector,
        /// Number of cards that follow.
        count: usize,
    },
    /// Link from one asset to its sector's analytics dashboard.
    Asset {
        asset_id: String,
        name: String,
        sector: Sector,
        dashboard_url: String,
        icon: IconTag,
    },
}

impl CardDescriptor {
    pub fn is_header(&self) -> bool {
        matches!(self, Self::GroupHeader { .. })
    }
}

/// Derives dashboard cards using the default dashboard URLs.
pub fn derive_dashboard_cards(assets: &[EnergyAsset]) -> Vec<CardDescriptor> {
    derive_dashboard_cards_with(assets, &DashboardLinks::default())
}

/// Derives dashboard cards linking to the given dashboards.
///
/// Demand group first, then supply. A group contributes a header followed by
/// one card per asset in input order, and nothing at all when empty.
pub fn derive_dashboard_cards_with(
    assets: &[EnergyAsset],
    links: &DashboardLinks,
) -> Vec<CardDescriptor> {
    let partition = partition_assets(assets);
    let mut cards = Vec::with_capacity(assets.len() + 2);

    for sector in [Sector::Demand, Sector::Supply] {
        let group = partition.group(sector);
        if group.is_empty() {
            continue;
        }
        cards.push(CardDescriptor::GroupHeader {
            sector,
            count: group.len(),
        });
        // Partitioned assets always have a recognized type.
        cards.extend(group.iter().filter_map(|asset| {
            Some(CardDescriptor::Asset {
                asset_id: asset.id.clone(),
                name: asset.name.clone(),
                sector,
                dashboard_url: links.url_for(sector).to_string(),
                icon: IconTag::for_type(&asset.asset_type)?,
            })
        }));
    }

    cards
}

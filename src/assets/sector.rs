//! Demand/supply classification of energy assets.

use tracing::debug;

use super::types::{AssetType, EnergyAsset, Sector};

/// Returns the sector an asset belongs to.
///
/// `Demand` iff the asset type is `demand_sector`; every other type,
/// including unrecognized ones, classifies as `Supply`.
pub fn classify_sector(asset: &EnergyAsset) -> Sector {
    match asset.asset_type {
        AssetType::DemandSector => Sector::Demand,
        _ => Sector::Supply,
    }
}

/// Assets split into the derived dashboard groups.
///
/// Groups borrow from the input slice and keep its order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Partition<'a> {
    /// Assets of type `demand_sector`.
    pub demand: Vec<&'a EnergyAsset>,
    /// Assets of one of the four known supply types.
    pub supply: Vec<&'a EnergyAsset>,
    /// Assets whose type is outside the known set. Shown in the raw table only.
    pub unrecognized: Vec<&'a EnergyAsset>,
}

impl Partition<'_> {
    /// Returns `true` when neither derived group has any asset.
    pub fn is_empty(&self) -> bool {
        self.demand.is_empty() && self.supply.is_empty()
    }

    /// Assets of the given sector.
    pub fn group(&self, sector: Sector) -> &[&EnergyAsset] {
        match sector {
            Sector::Demand => &self.demand,
            Sector::Supply => &self.supply,
        }
    }
}

/// Partitions a fetched asset list into demand and supply groups.
///
/// Each asset of a known type lands in exactly one group. Assets with an
/// unrecognized type land in neither derived group.
pub fn partition_assets(assets: &[EnergyAsset]) -> Partition<'_> {
    let mut partition = Partition::default();
    for asset in assets {
        if !asset.asset_type.is_recognized() {
            debug!(
                asset_id = %asset.id,
                asset_type = %asset.asset_type,
                "unknown asset type; excluded from dashboard groups"
            );
            partition.unrecognized.push(asset);
            continue;
        }
        match classify_sector(asset) {
            Sector::Demand => partition.demand.push(asset),
            Sector::Supply => partition.supply.push(asset),
        }
    }
    partition
}

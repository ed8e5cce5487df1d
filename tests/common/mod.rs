//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use asset_board::assets::{AssetStatus, AssetType, EnergyAsset, SupplyType};
use asset_board::source::{HttpAssetSource, InMemorySource};
use asset_board::stub::{self, StubState};
use tokio::net::TcpListener;

/// One demand asset, two supply assets and one with a type the board
/// does not know.
pub fn seeded_assets() -> Vec<EnergyAsset> {
    vec![
        EnergyAsset::new("d1", "Main Load", AssetType::DemandSector)
            .with_status(AssetStatus::Online),
        EnergyAsset::new("s1", "Roof Array", AssetType::Supply(SupplyType::Solar))
            .with_capacity(12.5)
            .with_status(AssetStatus::Online),
        EnergyAsset::new("s2", "Pack A", AssetType::Supply(SupplyType::Battery))
            .with_capacity(50.0)
            .with_status(AssetStatus::Maintenance),
        EnergyAsset::new("u1", "Dam", AssetType::from("hydro")),
    ]
}

/// Serves a stub API over `store` on an ephemeral port and returns its base URL.
pub async fn spawn_stub(store: InMemorySource, token: Option<&str>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port bind should succeed");
    let addr = listener.local_addr().expect("local_addr should be available");

    let mut state = StubState::new(store);
    if let Some(token) = token {
        state = state.with_token(token);
    }
    tokio::spawn(stub::serve_on(listener, Arc::new(state)));

    format!("http://{addr}")
}

/// HTTP source for `base_url` with a short timeout.
pub fn http_source(base_url: &str) -> HttpAssetSource {
    HttpAssetSource::new(base_url, Duration::from_secs(5)).expect("client should build")
}

//! `HttpAssetSource` against the in-process stub API.
#![cfg(feature = "stub")]

mod common;

use asset_board::assets::{
    AssetFormState, AssetType, Sector, SubmissionPayload, SupplyType, validate_and_build_submission,
};
use asset_board::error::NetworkError;
use asset_board::source::{AssetSource, InMemorySource, PageRequest};

#[tokio::test]
async fn list_pages_through_the_stub() {
    let base = common::spawn_stub(InMemorySource::with_assets(common::seeded_assets()), None).await;
    let source = common::http_source(&base);

    let first = source.list(PageRequest::first(3)).await.expect("list should succeed");
    assert_eq!(first.total, 4);
    assert_eq!(first.items.len(), 3);
    assert!(first.has_next());
    assert_eq!(first.items[0].asset_type, AssetType::DemandSector);

    let second = source
        .list(PageRequest::first(3).next())
        .await
        .expect("list should succeed");
    assert_eq!(second.items.len(), 1);
    assert!(!second.has_next());
    // Unknown types survive the round trip verbatim.
    assert_eq!(second.items[0].asset_type.as_str(), "hydro");
}

#[tokio::test]
async fn create_update_delete_round() {
    let store = InMemorySource::new();
    let base = common::spawn_stub(store.clone(), None).await;
    let source = common::http_source(&base);

    let form = AssetFormState {
        name: "  Ridge Turbine ".to_string(),
        sector: Sector::Supply,
        supply_type: Some(SupplyType::Wind),
        capacity_kw: "250".to_string(),
    };
    let payload = validate_and_build_submission(&form).expect("form should validate");
    let created = source.create(&payload).await.expect("create should succeed");
    assert_eq!(created.name, "Ridge Turbine");
    assert_eq!(created.capacity_kw, Some(250.0));
    assert!(created.created_at.is_some());
    assert!(!created.id.is_empty());

    let mut edit = AssetFormState::from_asset(&created);
    edit.sector = Sector::Demand;
    let payload = validate_and_build_submission(&edit).expect("form should validate");
    let updated = source
        .update(&created.id, &payload)
        .await
        .expect("update should succeed");
    assert_eq!(updated.asset_type, AssetType::DemandSector);
    assert_eq!(updated.capacity_kw, None);

    let fetched = source.get(&created.id).await.expect("get should succeed");
    assert_eq!(fetched, updated);

    source.delete(&created.id).await.expect("delete should succeed");
    assert!(store.snapshot().expect("store readable").is_empty());
}

#[tokio::test]
async fn missing_asset_maps_to_not_found() {
    let base = common::spawn_stub(InMemorySource::new(), None).await;
    let source = common::http_source(&base);

    let err = source.get("ghost").await.expect_err("get should fail");
    assert!(matches!(err, NetworkError::NotFound(ref id) if id == "ghost"));

    let err = source.delete("ghost").await.expect_err("delete should fail");
    assert!(matches!(err, NetworkError::NotFound(_)));
}

#[tokio::test]
async fn bad_token_maps_to_unauthorized() {
    let base = common::spawn_stub(InMemorySource::new(), Some("s3cret")).await;

    let anonymous = common::http_source(&base);
    let err = anonymous
        .list(PageRequest::default())
        .await
        .expect_err("list without token should fail");
    assert!(matches!(err, NetworkError::Unauthorized));

    let wrong = common::http_source(&base).with_token("nope");
    assert!(matches!(
        wrong.list(PageRequest::default()).await,
        Err(NetworkError::Unauthorized)
    ));

    let authed = common::http_source(&base).with_token("s3cret");
    let page = authed
        .list(PageRequest::default())
        .await
        .expect("list with token should succeed");
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn rejected_payload_maps_to_status() {
    let base = common::spawn_stub(InMemorySource::new(), None).await;
    let source = common::http_source(&base);

    // Bypasses the client-side validator to reach the backend's own check.
    let payload = SubmissionPayload {
        name: "   ".to_string(),
        asset_type: AssetType::Supply(SupplyType::Solar),
        sector: Sector::Supply,
        capacity_kw: None,
    };
    let err = source.create(&payload).await.expect_err("create should fail");
    match err {
        NetworkError::Status { status, body } => {
            assert_eq!(status, 422);
            assert!(body.contains("detail"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let addr = listener.local_addr().expect("local_addr should be available");
    drop(listener);

    let source = common::http_source(&format!("http://{addr}"));
    let err = source
        .list(PageRequest::default())
        .await
        .expect_err("list should fail");
    assert!(matches!(err, NetworkError::Transport(_)));
}

#[tokio::test]
async fn backend_without_put_route_reports_405() {
    // Item route only knows DELETE, like backends that never grew an edit endpoint.
    let app = axum::Router::new().route(
        "/api/v1/assets/{id}",
        axum::routing::delete(|| async { axum::http::StatusCode::NO_CONTENT }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port bind should succeed");
    let addr = listener.local_addr().expect("local_addr should be available");
    tokio::spawn(async move { axum::serve(listener, app).await });

    let source = common::http_source(&format!("http://{addr}"));
    let payload = SubmissionPayload {
        name: "Roof".to_string(),
        asset_type: AssetType::Supply(SupplyType::Solar),
        sector: Sector::Supply,
        capacity_kw: None,
    };
    let err = source
        .update("a1", &payload)
        .await
        .expect_err("update should fail");
    assert!(matches!(err, NetworkError::Status { status: 405, .. }));
}

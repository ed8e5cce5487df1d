//! Request handlers for the stub asset API.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};

use super::StubState;
use super::types::{ErrorResponse, ListQuery};
use crate::assets::{AssetType, EnergyAsset, Sector, SubmissionPayload};
use crate::error::NetworkError;
use crate::source::{AssetPage, AssetSource, PageRequest};

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<T, ApiError>;

fn error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            detail: detail.into(),
        }),
    )
}

/// Rejects the request unless it carries the configured bearer token.
fn authorize(state: &StubState, headers: &HeaderMap) -> ApiResult<()> {
    let Some(expected) = &state.token else {
        return Ok(());
    };
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if presented == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(error(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
    }
}

/// Rejects payloads the real backend would not accept.
fn check_payload(payload: &SubmissionPayload) -> ApiResult<()> {
    if payload.name.trim().is_empty() {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "name must not be empty"));
    }
    if !payload.asset_type.is_recognized() {
        return Err(error(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("unknown asset type \"{}\"", payload.asset_type),
        ));
    }
    let type_sector = match payload.asset_type {
        AssetType::DemandSector => Sector::Demand,
        _ => Sector::Supply,
    };
    if payload.sector != type_sector {
        return Err(error(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!(
                "type \"{}\" belongs to the {type_sector} sector, not {}",
                payload.asset_type, payload.sector
            ),
        ));
    }
    if let Some(capacity) = payload.capacity_kw {
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(error(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("capacity_kw must be non-negative, got {capacity}"),
            ));
        }
    }
    Ok(())
}

fn source_error(err: NetworkError) -> ApiError {
    match err {
        NetworkError::NotFound(_) => error(StatusCode::NOT_FOUND, "Asset not found"),
        other => error(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

/// `GET /api/v1/assets?skip=N&limit=M` → 200 + `AssetPage`
pub async fn list_assets(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<AssetPage>> {
    authorize(&state, &headers)?;
    let page = state
        .source
        .list(PageRequest::from(query))
        .await
        .map_err(source_error)?;
    Ok(Json(page))
}

/// `GET /api/v1/assets/{id}` → 200 + `EnergyAsset`, or 404
pub async fn get_asset(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<EnergyAsset>> {
    authorize(&state, &headers)?;
    let asset = state.source.get(&id).await.map_err(source_error)?;
    Ok(Json(asset))
}

/// `POST /api/v1/assets` → 201 + created `EnergyAsset`, or 422
pub async fn create_asset(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(payload): Json<SubmissionPayload>,
) -> ApiResult<(StatusCode, Json<EnergyAsset>)> {
    authorize(&state, &headers)?;
    check_payload(&payload)?;
    let asset = state.source.create(&payload).await.map_err(source_error)?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// `PUT /api/v1/assets/{id}` → 200 + updated `EnergyAsset`, 404 or 422
pub async fn update_asset(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<SubmissionPayload>,
) -> ApiResult<Json<EnergyAsset>> {
    authorize(&state, &headers)?;
    check_payload(&payload)?;
    let asset = state
        .source
        .update(&id, &payload)
        .await
        .map_err(source_error)?;
    Ok(Json(asset))
}

/// `DELETE /api/v1/assets/{id}` → 204, or 404
pub async fn delete_asset(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    authorize(&state, &headers)?;
    state.source.delete(&id).await.map_err(source_error)?;
    Ok(StatusCode::NO_CONTENT)
}

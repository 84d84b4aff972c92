use crate::model::booking::RejectedResponse;
use crate::model::location::{
    CreateLocationRequest, LocationListQuery, LocationResponse, LocationStatisticsResponse,
    LocationsResponse, SetOccupancyRequest, SetOccupancyRequestWithId, UpdateLocationRequest,
    UpdateLocationRequestWithId,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use garde::Validate;
use kernel::model::booking::RejectReason;
use kernel::model::id::LocationId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_location(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateLocationRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let location_id = registry.location_repository().create(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "locationId": location_id })),
    ))
}

pub async fn show_location_list(
    Query(query): Query<LocationListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<LocationsResponse>> {
    registry
        .location_repository()
        .find_all(query.into())
        .await
        .map(LocationsResponse::from)
        .map(Json)
}

pub async fn show_available_locations(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<LocationsResponse>> {
    registry
        .location_repository()
        .find_available()
        .await
        .map(LocationsResponse::from)
        .map(Json)
}

pub async fn show_full_locations(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<LocationsResponse>> {
    registry
        .location_repository()
        .find_full()
        .await
        .map(LocationsResponse::from)
        .map(Json)
}

pub async fn show_location(
    Path(location_id): Path<LocationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<LocationResponse>> {
    registry
        .location_repository()
        .find_by_id(location_id)
        .await
        .and_then(|location| match location {
            Some(location) => Ok(Json(location.into())),
            None => Err(AppError::EntityNotFound("not found".into())),
        })
}

pub async fn update_location(
    Path(location_id): Path<LocationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateLocationRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update_location = UpdateLocationRequestWithId::new(location_id, req);
    registry
        .location_repository()
        .update(update_location.into())
        .await
        .map(|_| StatusCode::OK)
}

// 入所操作。満杯の場合は理由つきの拒否応答を返す
pub async fn check_in(
    Path(location_id): Path<LocationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Response> {
    let admitted = registry.location_repository().check_in(location_id).await?;

    if !admitted {
        return Ok((
            StatusCode::CONFLICT,
            Json(RejectedResponse {
                reason: RejectReason::CapacityExceeded,
            }),
        )
            .into_response());
    }

    show_snapshot(&registry, location_id).await
}

// 退所操作。占有数は 0 を下限として減算される
pub async fn check_out(
    Path(location_id): Path<LocationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Response> {
    registry.location_repository().check_out(location_id).await?;
    show_snapshot(&registry, location_id).await
}

pub async fn set_occupancy(
    Path(location_id): Path<LocationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<SetOccupancyRequest>,
) -> AppResult<Response> {
    req.validate(&())?;

    let event = SetOccupancyRequestWithId::new(location_id, req);
    registry
        .location_repository()
        .set_occupancy(event.into())
        .await?;
    show_snapshot(&registry, location_id).await
}

pub async fn close_location(
    Path(location_id): Path<LocationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .location_repository()
        .set_closed(location_id, true)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn reopen_location(
    Path(location_id): Path<LocationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .location_repository()
        .set_closed(location_id, false)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_location_statistics(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<LocationStatisticsResponse>> {
    registry
        .location_repository()
        .statistics()
        .await
        .map(LocationStatisticsResponse::from)
        .map(Json)
}

// 更新後の状態を導出 status つきで返す
async fn show_snapshot(registry: &AppRegistry, location_id: LocationId) -> AppResult<Response> {
    registry
        .location_repository()
        .find_by_id(location_id)
        .await
        .and_then(|location| match location {
            Some(location) => Ok(Json(LocationResponse::from(location)).into_response()),
            None => Err(AppError::EntityNotFound("not found".into())),
        })
}

use crate::model::slot::{
    AvailableSlotsQuery, CreateDefaultSlotsRequest, CreateSlotRequest, SlotListQuery,
    SlotResponse, SlotStatisticsResponse, SlotsResponse, UpcomingSlotsQuery,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::id::SlotId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

const DEFAULT_UPCOMING_DAYS: i64 = 7;

pub async fn register_slot(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateSlotRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    let slot_id = registry.slot_repository().create(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "slotId": slot_id })),
    ))
}

// 指定日の既定グリッドを登録し、その日の時間帯一覧を返す
pub async fn create_default_slots(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateDefaultSlotsRequest>,
) -> AppResult<impl IntoResponse> {
    req.validate(&())?;

    registry
        .slot_repository()
        .create_default_for_date(req.date)
        .await
        .map(SlotsResponse::from)
        .map(|res| (StatusCode::CREATED, Json(res)))
}

pub async fn show_slot_list(
    Query(query): Query<SlotListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SlotsResponse>> {
    registry
        .slot_repository()
        .find_all(query.into())
        .await
        .map(SlotsResponse::from)
        .map(Json)
}

pub async fn show_available_slots(
    Query(query): Query<AvailableSlotsQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SlotsResponse>> {
    registry
        .slot_repository()
        .find_available(query.date)
        .await
        .map(SlotsResponse::from)
        .map(Json)
}

pub async fn show_today_slots(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SlotsResponse>> {
    let today = chrono::Local::now().date_naive();
    registry
        .slot_repository()
        .find_all(kernel::model::slot::SlotListFilter {
            date: Some(today),
            status: None,
        })
        .await
        .map(SlotsResponse::from)
        .map(Json)
}

pub async fn show_upcoming_slots(
    Query(query): Query<UpcomingSlotsQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SlotsResponse>> {
    let from = chrono::Local::now().date_naive();
    let days = query.days.unwrap_or(DEFAULT_UPCOMING_DAYS);
    registry
        .slot_repository()
        .find_upcoming(from, days)
        .await
        .map(SlotsResponse::from)
        .map(Json)
}

pub async fn show_slot(
    Path(slot_id): Path<SlotId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SlotResponse>> {
    registry
        .slot_repository()
        .find_by_id(slot_id)
        .await
        .and_then(|slot| match slot {
            Some(slot) => Ok(Json(slot.into())),
            None => Err(AppError::EntityNotFound("not found".into())),
        })
}

pub async fn close_slot(
    Path(slot_id): Path<SlotId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .slot_repository()
        .set_closed(slot_id, true)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn reopen_slot(
    Path(slot_id): Path<SlotId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .slot_repository()
        .set_closed(slot_id, false)
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_slot_statistics(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<SlotStatisticsResponse>> {
    let from = chrono::Local::now().date_naive();
    registry
        .slot_repository()
        .statistics(from)
        .await
        .map(SlotStatisticsResponse::from)
        .map(Json)
}

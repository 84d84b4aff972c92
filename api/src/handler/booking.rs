use crate::model::booking::{
    BookingResponse, BookingsResponse, CreateBookingRequest, RejectedResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use garde::Validate;
use kernel::model::{
    booking::{event::CreateBooking, Booking, ReserveOutcome},
    id::{BookingId, SlotId},
};
use kernel::notifier::BookingNotice;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn book_slot(
    Path(slot_id): Path<SlotId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<Response> {
    req.validate(&())?;

    let event = CreateBooking::new(slot_id, req.booked_by, Utc::now());

    // 空き確認・カウンタ加算・予約レコード作成はリポジトリ側で
    // 1 トランザクションとして行われる
    let outcome = registry.booking_repository().reserve(event).await?;

    match outcome {
        ReserveOutcome::Booked(booking) => {
            notify(&registry, &booking, NoticeKind::Confirmed).await;
            Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))).into_response())
        }
        // 満杯は異常系ではなく、理由つきの拒否応答として返す
        ReserveOutcome::Rejected(reason) => Ok((
            StatusCode::CONFLICT,
            Json(RejectedResponse { reason }),
        )
            .into_response()),
    }
}

pub async fn cancel_booking(
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    // 通知に使う予約情報を先に取得しておく
    let booking = registry
        .booking_repository()
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("予約（{}）が見つかりませんでした。", booking_id))
        })?;
    let was_active = booking.cancelled_at.is_none();

    registry
        .booking_repository()
        .release(booking_id, Utc::now())
        .await?;

    // 解放済みの予約への再実行時は通知を送らない
    if was_active {
        notify(&registry, &booking, NoticeKind::Cancelled).await;
    }

    Ok(StatusCode::OK)
}

pub async fn show_booking(
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_repository()
        .find_by_id(booking_id)
        .await
        .and_then(|booking| match booking {
            Some(booking) => Ok(Json(booking.into())),
            None => Err(AppError::EntityNotFound("not found".into())),
        })
}

pub async fn show_slot_bookings(
    Path(slot_id): Path<SlotId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .slot_repository()
        .find_by_id(slot_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("時間帯（{}）が見つかりませんでした。", slot_id))
        })?;

    registry
        .booking_repository()
        .find_active_by_slot_id(slot_id)
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

enum NoticeKind {
    Confirmed,
    Cancelled,
}

// 通知は投げっぱなしとする。失敗しても予約の結果には影響させない
async fn notify(registry: &AppRegistry, booking: &Booking, kind: NoticeKind) {
    let slot = match registry.slot_repository().find_by_id(booking.slot_id).await {
        Ok(Some(slot)) => slot,
        Ok(None) => return,
        Err(e) => {
            tracing::warn!(error.message = %e, "failed to load slot for notification");
            return;
        }
    };

    let notice = BookingNotice {
        booking_id: booking.id,
        booked_by: booking.booked_by,
        time_slot: slot.time_slot,
        date: slot.date,
    };

    let res = match kind {
        NoticeKind::Confirmed => registry.notifier().booking_confirmed(notice).await,
        NoticeKind::Cancelled => registry.notifier().booking_cancelled(notice).await,
    };
    if let Err(e) = res {
        tracing::warn!(error.message = %e, "failed to dispatch booking notification");
    }
}

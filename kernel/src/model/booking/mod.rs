pub mod event;

use crate::model::id::{BookingId, SlotId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct Booking {
    pub id: BookingId,
    pub slot_id: SlotId,
    pub booked_by: UserId,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// 予約試行の結果。満杯は異常系ではなく通常の戻り値として扱う。
#[derive(Debug)]
pub enum ReserveOutcome {
    Booked(Booking),
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    CapacityExceeded,
}

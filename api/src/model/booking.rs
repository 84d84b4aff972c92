use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    booking::{Booking, RejectReason},
    id::{BookingId, SlotId, UserId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    // 認証は別系統のため、予約者はリクエスト本文で受け取る
    #[garde(skip)]
    pub booked_by: UserId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: BookingId,
    pub slot_id: SlotId,
    pub booked_by: UserId,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            id,
            slot_id,
            booked_by,
            created_at,
            cancelled_at,
        } = value;
        Self {
            booking_id: id,
            slot_id,
            booked_by,
            created_at,
            cancelled_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

/// 満杯による拒否の応答。エラーではなく通常の応答として返す
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedResponse {
    pub reason: RejectReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_response_serializes_reason_code() {
        let body = serde_json::to_value(RejectedResponse {
            reason: RejectReason::CapacityExceeded,
        })
        .unwrap();
        assert_eq!(body["reason"], "CAPACITY_EXCEEDED");
    }
}

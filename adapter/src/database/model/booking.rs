use kernel::model::{
    booking::Booking,
    id::{BookingId, SlotId, UserId},
};
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub slot_id: SlotId,
    pub booked_by: UserId,
    pub created_at: DateTime<Utc>,
    // 解放済みの予約のみ値が入る
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<BookingRow> for Booking {
    fn from(value: BookingRow) -> Self {
        let BookingRow {
            booking_id,
            slot_id,
            booked_by,
            created_at,
            cancelled_at,
        } = value;
        Booking {
            id: booking_id,
            slot_id,
            booked_by,
            created_at,
            cancelled_at,
        }
    }
}

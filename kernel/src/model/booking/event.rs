use crate::model::id::{SlotId, UserId};
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateBooking {
    pub slot_id: SlotId,
    pub booked_by: UserId,
    pub created_at: DateTime<Utc>,
}

use chrono::NaiveDate;
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateSlot {
    pub time_slot: String,
    pub date: NaiveDate,
    pub capacity: i32,
}

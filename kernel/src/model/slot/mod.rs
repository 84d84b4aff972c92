pub mod event;

use crate::model::id::SlotId;
use crate::model::ledger::{CapacityLedger, ResourceStatus};
use chrono::NaiveDate;

/// 避難時間帯の既定グリッド。2 時間刻みで 1 日をちょうど覆う。
pub const DEFAULT_TIME_SLOTS: [&str; 12] = [
    "00:00-02:00",
    "02:00-04:00",
    "04:00-06:00",
    "06:00-08:00",
    "08:00-10:00",
    "10:00-12:00",
    "12:00-14:00",
    "14:00-16:00",
    "16:00-18:00",
    "18:00-20:00",
    "20:00-22:00",
    "22:00-00:00",
];

pub const DEFAULT_SLOT_CAPACITY: i32 = 10;

#[derive(Debug)]
pub struct EvacuationSlot {
    pub id: SlotId,
    pub time_slot: String,
    pub date: NaiveDate,
    pub ledger: CapacityLedger,
}

impl EvacuationSlot {
    pub fn status(&self) -> ResourceStatus {
        self.ledger.status()
    }
}

/// 一覧取得時の絞り込み条件。status は導出値に対する条件として解釈する。
#[derive(Debug, Default)]
pub struct SlotListFilter {
    pub date: Option<NaiveDate>,
    pub status: Option<ResourceStatus>,
}

#[derive(Debug)]
pub struct SlotStatistics {
    pub total_slots: i64,
    pub available_slots: i64,
    pub full_slots: i64,
    pub closed_slots: i64,
    pub total_capacity: i64,
    pub total_booked: i64,
}

impl SlotStatistics {
    pub fn average_utilization(&self) -> f64 {
        if self.total_capacity == 0 {
            return 0.0;
        }
        self.total_booked as f64 / self.total_capacity as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_covers_a_day_in_two_hour_steps() {
        assert_eq!(DEFAULT_TIME_SLOTS.len(), 12);
        for (i, label) in DEFAULT_TIME_SLOTS.iter().enumerate() {
            let start: u32 = label[..2].parse().unwrap();
            assert_eq!(start as usize, i * 2);
        }
    }

    #[test]
    fn utilization_is_zero_when_no_capacity() {
        let stats = SlotStatistics {
            total_slots: 0,
            available_slots: 0,
            full_slots: 0,
            closed_slots: 0,
            total_capacity: 0,
            total_booked: 0,
        };
        assert_eq!(stats.average_utilization(), 0.0);
    }
}

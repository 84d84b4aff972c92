use chrono::NaiveDate;
use kernel::model::{
    id::SlotId,
    ledger::CapacityLedger,
    slot::{EvacuationSlot, SlotStatistics},
};

#[derive(sqlx::FromRow)]
pub struct SlotRow {
    pub slot_id: SlotId,
    pub time_slot: String,
    pub date: NaiveDate,
    pub capacity: i32,
    pub booked: i32,
    pub closed: bool,
}

impl From<SlotRow> for EvacuationSlot {
    fn from(value: SlotRow) -> Self {
        let SlotRow {
            slot_id,
            time_slot,
            date,
            capacity,
            booked,
            closed,
        } = value;
        EvacuationSlot {
            id: slot_id,
            time_slot,
            date,
            ledger: CapacityLedger {
                capacity,
                used: booked,
                closed,
            },
        }
    }
}

// 集計クエリの結果を受ける adapter 内部の型
#[derive(sqlx::FromRow)]
pub struct SlotStatisticsRow {
    pub total_slots: i64,
    pub available_slots: i64,
    pub full_slots: i64,
    pub closed_slots: i64,
    pub total_capacity: i64,
    pub total_booked: i64,
}

impl From<SlotStatisticsRow> for SlotStatistics {
    fn from(value: SlotStatisticsRow) -> Self {
        let SlotStatisticsRow {
            total_slots,
            available_slots,
            full_slots,
            closed_slots,
            total_capacity,
            total_booked,
        } = value;
        SlotStatistics {
            total_slots,
            available_slots,
            full_slots,
            closed_slots,
            total_capacity,
            total_booked,
        }
    }
}

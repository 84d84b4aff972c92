use chrono::NaiveDate;
use garde::Validate;
use kernel::model::{
    id::SlotId,
    ledger::ResourceStatus,
    slot::{event::CreateSlot, EvacuationSlot, SlotListFilter, SlotStatistics, DEFAULT_SLOT_CAPACITY},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlotRequest {
    #[garde(length(min = 1))]
    pub time_slot: String,
    #[garde(skip)]
    pub date: NaiveDate,
    #[garde(range(min = 0))]
    pub capacity: Option<i32>,
}

impl From<CreateSlotRequest> for CreateSlot {
    fn from(value: CreateSlotRequest) -> Self {
        let CreateSlotRequest {
            time_slot,
            date,
            capacity,
        } = value;
        CreateSlot {
            time_slot,
            date,
            capacity: capacity.unwrap_or(DEFAULT_SLOT_CAPACITY),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDefaultSlotsRequest {
    #[garde(skip)]
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotListQuery {
    pub date: Option<NaiveDate>,
    pub status: Option<ResourceStatus>,
}

impl From<SlotListQuery> for SlotListFilter {
    fn from(value: SlotListQuery) -> Self {
        let SlotListQuery { date, status } = value;
        SlotListFilter { date, status }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlotsQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingSlotsQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotResponse {
    pub id: SlotId,
    pub time_slot: String,
    pub date: NaiveDate,
    pub capacity: i32,
    pub booked: i32,
    pub remaining: i32,
    // status は保存値ではなく、応答のたびにカウンタから導出する
    pub status: ResourceStatus,
}

impl From<EvacuationSlot> for SlotResponse {
    fn from(value: EvacuationSlot) -> Self {
        let status = value.status();
        let EvacuationSlot {
            id,
            time_slot,
            date,
            ledger,
        } = value;
        Self {
            id,
            time_slot,
            date,
            capacity: ledger.capacity,
            booked: ledger.used,
            remaining: ledger.remaining(),
            status,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsResponse {
    pub items: Vec<SlotResponse>,
}

impl From<Vec<EvacuationSlot>> for SlotsResponse {
    fn from(value: Vec<EvacuationSlot>) -> Self {
        Self {
            items: value.into_iter().map(SlotResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotStatisticsResponse {
    pub total_slots: i64,
    pub available_slots: i64,
    pub full_slots: i64,
    pub closed_slots: i64,
    pub total_capacity: i64,
    pub total_booked: i64,
    pub average_utilization: f64,
}

impl From<SlotStatistics> for SlotStatisticsResponse {
    fn from(value: SlotStatistics) -> Self {
        let average_utilization = value.average_utilization();
        let SlotStatistics {
            total_slots,
            available_slots,
            full_slots,
            closed_slots,
            total_capacity,
            total_booked,
        } = value;
        Self {
            total_slots,
            available_slots,
            full_slots,
            closed_slots,
            total_capacity,
            total_booked,
            average_utilization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::ledger::CapacityLedger;

    #[test]
    fn create_request_defaults_capacity() {
        let req: CreateSlotRequest =
            serde_json::from_str(r#"{"timeSlot": "08:00-10:00", "date": "2026-08-04"}"#).unwrap();
        let event = CreateSlot::from(req);
        assert_eq!(event.capacity, DEFAULT_SLOT_CAPACITY);
    }

    #[test]
    fn slot_response_exposes_derived_status() {
        let slot = EvacuationSlot {
            id: SlotId::new(),
            time_slot: "08:00-10:00".into(),
            date: NaiveDate::from_ymd_opt(2026, 8, 4).unwrap(),
            ledger: CapacityLedger {
                capacity: 10,
                used: 10,
                closed: false,
            },
        };
        let res = SlotResponse::from(slot);
        assert_eq!(res.remaining, 0);

        let body = serde_json::to_value(&res).unwrap();
        assert_eq!(body["status"], "full");
        assert_eq!(body["timeSlot"], "08:00-10:00");
    }
}

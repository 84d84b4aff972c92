pub mod event;

use crate::model::id::LocationId;
use crate::model::ledger::{CapacityLedger, ResourceStatus};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    ReliefCenter,
    SafeZone,
    Hospital,
    Shelter,
    RescueTeam,
}

#[derive(Debug)]
pub struct EmergencyLocation {
    pub id: LocationId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_type: LocationType,
    pub ledger: CapacityLedger,
    pub contact_number: Option<String>,
    pub address: String,
}

impl EmergencyLocation {
    pub fn status(&self) -> ResourceStatus {
        self.ledger.status()
    }
}

#[derive(Debug, Default)]
pub struct LocationListFilter {
    pub location_type: Option<LocationType>,
    pub status: Option<ResourceStatus>,
}

#[derive(Debug)]
pub struct LocationTypeStatistics {
    pub location_type: LocationType,
    pub location_count: i64,
    pub total_capacity: i64,
    pub total_occupancy: i64,
}

impl LocationTypeStatistics {
    pub fn occupancy_percentage(&self) -> f64 {
        if self.total_capacity == 0 {
            return 0.0;
        }
        self.total_occupancy as f64 / self.total_capacity as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn location_type_round_trips_as_snake_case() {
        assert_eq!(LocationType::ReliefCenter.to_string(), "relief_center");
        assert_eq!(
            LocationType::from_str("safe_zone").unwrap(),
            LocationType::SafeZone
        );
        assert!(LocationType::from_str("campsite").is_err());
    }
}

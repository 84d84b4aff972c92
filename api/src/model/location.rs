use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::LocationId,
    ledger::ResourceStatus,
    location::{
        event::{CreateLocation, SetOccupancy, UpdateLocation},
        EmergencyLocation, LocationListFilter, LocationType, LocationTypeStatistics,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[garde(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[garde(skip)]
    pub location_type: LocationType,
    #[garde(range(min = 0))]
    pub capacity: i32,
    #[garde(skip)]
    pub contact_number: Option<String>,
    #[garde(length(min = 1))]
    pub address: String,
}

impl From<CreateLocationRequest> for CreateLocation {
    fn from(value: CreateLocationRequest) -> Self {
        let CreateLocationRequest {
            name,
            latitude,
            longitude,
            location_type,
            capacity,
            contact_number,
            address,
        } = value;
        CreateLocation {
            name,
            latitude,
            longitude,
            location_type,
            capacity,
            contact_number,
            address,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    #[garde(skip)]
    pub name: Option<String>,
    #[garde(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[garde(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[garde(skip)]
    pub location_type: Option<LocationType>,
    #[garde(range(min = 0))]
    pub capacity: Option<i32>,
    #[garde(skip)]
    pub contact_number: Option<String>,
    #[garde(skip)]
    pub address: Option<String>,
}

#[derive(new)]
pub struct UpdateLocationRequestWithId(LocationId, UpdateLocationRequest);

impl From<UpdateLocationRequestWithId> for UpdateLocation {
    fn from(value: UpdateLocationRequestWithId) -> Self {
        let UpdateLocationRequestWithId(
            location_id,
            UpdateLocationRequest {
                name,
                latitude,
                longitude,
                location_type,
                capacity,
                contact_number,
                address,
            },
        ) = value;
        UpdateLocation {
            location_id,
            name,
            latitude,
            longitude,
            location_type,
            capacity,
            contact_number,
            address,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetOccupancyRequest {
    #[garde(range(min = 0))]
    pub occupancy: i32,
}

#[derive(new)]
pub struct SetOccupancyRequestWithId(LocationId, SetOccupancyRequest);

impl From<SetOccupancyRequestWithId> for SetOccupancy {
    fn from(value: SetOccupancyRequestWithId) -> Self {
        let SetOccupancyRequestWithId(location_id, SetOccupancyRequest { occupancy }) = value;
        SetOccupancy {
            location_id,
            occupancy,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationListQuery {
    pub location_type: Option<LocationType>,
    pub status: Option<ResourceStatus>,
}

impl From<LocationListQuery> for LocationListFilter {
    fn from(value: LocationListQuery) -> Self {
        let LocationListQuery {
            location_type,
            status,
        } = value;
        LocationListFilter {
            location_type,
            status,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub id: LocationId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_type: LocationType,
    pub capacity: i32,
    pub occupancy: i32,
    pub remaining: i32,
    pub status: ResourceStatus,
    pub contact_number: Option<String>,
    pub address: String,
}

impl From<EmergencyLocation> for LocationResponse {
    fn from(value: EmergencyLocation) -> Self {
        let status = value.status();
        let EmergencyLocation {
            id,
            name,
            latitude,
            longitude,
            location_type,
            ledger,
            contact_number,
            address,
        } = value;
        Self {
            id,
            name,
            latitude,
            longitude,
            location_type,
            capacity: ledger.capacity,
            occupancy: ledger.used,
            remaining: ledger.remaining(),
            status,
            contact_number,
            address,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationsResponse {
    pub items: Vec<LocationResponse>,
}

impl From<Vec<EmergencyLocation>> for LocationsResponse {
    fn from(value: Vec<EmergencyLocation>) -> Self {
        Self {
            items: value.into_iter().map(LocationResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationTypeStatisticsResponse {
    pub location_type: LocationType,
    pub location_count: i64,
    pub total_capacity: i64,
    pub total_occupancy: i64,
    pub occupancy_percentage: f64,
}

impl From<LocationTypeStatistics> for LocationTypeStatisticsResponse {
    fn from(value: LocationTypeStatistics) -> Self {
        let occupancy_percentage = value.occupancy_percentage();
        let LocationTypeStatistics {
            location_type,
            location_count,
            total_capacity,
            total_occupancy,
        } = value;
        Self {
            location_type,
            location_count,
            total_capacity,
            total_occupancy,
            occupancy_percentage,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStatisticsResponse {
    pub items: Vec<LocationTypeStatisticsResponse>,
}

impl From<Vec<LocationTypeStatistics>> for LocationStatisticsResponse {
    fn from(value: Vec<LocationTypeStatistics>) -> Self {
        Self {
            items: value
                .into_iter()
                .map(LocationTypeStatisticsResponse::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::ledger::CapacityLedger;

    #[test]
    fn location_response_serializes_type_and_status() {
        let location = EmergencyLocation {
            id: LocationId::new(),
            name: "Colombo Relief Center".into(),
            latitude: 6.9271,
            longitude: 79.8612,
            location_type: LocationType::ReliefCenter,
            ledger: CapacityLedger {
                capacity: 100,
                used: 40,
                closed: false,
            },
            contact_number: Some("+94112345678".into()),
            address: "Colombo 07".into(),
        };
        let body = serde_json::to_value(LocationResponse::from(location)).unwrap();
        assert_eq!(body["locationType"], "relief_center");
        assert_eq!(body["status"], "available");
        assert_eq!(body["remaining"], 60);
    }
}

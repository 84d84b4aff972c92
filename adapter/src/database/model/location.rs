use kernel::model::{
    id::LocationId,
    ledger::CapacityLedger,
    location::{EmergencyLocation, LocationType, LocationTypeStatistics},
};
use shared::error::{AppError, AppResult};
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct LocationRow {
    pub location_id: LocationId,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_type: String,
    pub capacity: i32,
    pub occupancy: i32,
    pub closed: bool,
    pub contact_number: Option<String>,
    pub address: String,
}

impl LocationRow {
    // location_type は TEXT カラムのため、ここで列挙型へ変換する
    pub fn into_location(self) -> AppResult<EmergencyLocation> {
        let LocationRow {
            location_id,
            name,
            latitude,
            longitude,
            location_type,
            capacity,
            occupancy,
            closed,
            contact_number,
            address,
        } = self;
        let location_type = LocationType::from_str(&location_type)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(EmergencyLocation {
            id: location_id,
            name,
            latitude,
            longitude,
            location_type,
            ledger: CapacityLedger {
                capacity,
                used: occupancy,
                closed,
            },
            contact_number,
            address,
        })
    }
}

#[derive(sqlx::FromRow)]
pub struct LocationTypeStatisticsRow {
    pub location_type: String,
    pub location_count: i64,
    pub total_capacity: i64,
    pub total_occupancy: i64,
}

impl LocationTypeStatisticsRow {
    pub fn into_statistics(self) -> AppResult<LocationTypeStatistics> {
        let LocationTypeStatisticsRow {
            location_type,
            location_count,
            total_capacity,
            total_occupancy,
        } = self;
        let location_type = LocationType::from_str(&location_type)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(LocationTypeStatistics {
            location_type,
            location_count,
            total_capacity,
            total_occupancy,
        })
    }
}

use crate::model::id::LocationId;
use crate::model::location::LocationType;
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub location_type: LocationType,
    pub capacity: i32,
    pub contact_number: Option<String>,
    pub address: String,
}

#[derive(Debug)]
pub struct UpdateLocation {
    pub location_id: LocationId,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_type: Option<LocationType>,
    pub capacity: Option<i32>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, new)]
pub struct SetOccupancy {
    pub location_id: LocationId,
    pub occupancy: i32,
}

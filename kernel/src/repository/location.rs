use crate::model::{
    id::LocationId,
    location::{
        event::{CreateLocation, SetOccupancy, UpdateLocation},
        EmergencyLocation, LocationListFilter, LocationTypeStatistics,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn create(&self, event: CreateLocation) -> AppResult<LocationId>;
    async fn update(&self, event: UpdateLocation) -> AppResult<()>;
    async fn find_by_id(&self, location_id: LocationId) -> AppResult<Option<EmergencyLocation>>;
    async fn find_all(&self, filter: LocationListFilter) -> AppResult<Vec<EmergencyLocation>>;
    // 空きの大きい順に取得する
    async fn find_available(&self) -> AppResult<Vec<EmergencyLocation>>;
    async fn find_full(&self) -> AppResult<Vec<EmergencyLocation>>;
    // 入所。空きがあれば加算して true、満杯なら false を返す
    async fn check_in(&self, location_id: LocationId) -> AppResult<bool>;
    // 退所。0 を下限として減算する
    async fn check_out(&self, location_id: LocationId) -> AppResult<()>;
    // 管理操作による占有数の補正。capacity を超える値は拒否する
    async fn set_occupancy(&self, event: SetOccupancy) -> AppResult<()>;
    async fn set_closed(&self, location_id: LocationId, closed: bool) -> AppResult<()>;
    async fn statistics(&self) -> AppResult<Vec<LocationTypeStatistics>>;
}

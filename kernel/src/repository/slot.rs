use crate::model::{
    id::SlotId,
    slot::{event::CreateSlot, EvacuationSlot, SlotListFilter, SlotStatistics},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

#[async_trait]
pub trait SlotRepository: Send + Sync {
    // 時間帯を登録する
    async fn create(&self, event: CreateSlot) -> AppResult<SlotId>;
    // 指定日の既定グリッドを登録する（登録済みの時間帯はそのまま残す）
    async fn create_default_for_date(&self, date: NaiveDate) -> AppResult<Vec<EvacuationSlot>>;
    async fn find_by_id(&self, slot_id: SlotId) -> AppResult<Option<EvacuationSlot>>;
    async fn find_all(&self, filter: SlotListFilter) -> AppResult<Vec<EvacuationSlot>>;
    // 空きのある時間帯のみを取得する
    async fn find_available(&self, date: Option<NaiveDate>) -> AppResult<Vec<EvacuationSlot>>;
    // from から days 日以内の時間帯を取得する
    async fn find_upcoming(&self, from: NaiveDate, days: i64) -> AppResult<Vec<EvacuationSlot>>;
    // 管理操作。closed は予約操作からは変更されない
    async fn set_closed(&self, slot_id: SlotId, closed: bool) -> AppResult<()>;
    async fn statistics(&self, from: NaiveDate) -> AppResult<SlotStatistics>;
}

use crate::model::{
    booking::{event::CreateBooking, Booking, ReserveOutcome},
    id::{BookingId, SlotId},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

/// 予約の作成・解放。空き確認とカウンタ加算は単一の原子的操作として
/// 実装すること。読み取りと書き込みを分けた 2 往復の実装は不可。
#[async_trait]
pub trait BookingRepository: Send + Sync {
    // 予約操作を行う。満杯時は Rejected を返し、カウンタは変更しない
    async fn reserve(&self, event: CreateBooking) -> AppResult<ReserveOutcome>;
    // 予約解放操作を行う。解放済みの予約への再実行は成功扱いで何もしない
    async fn release(&self, booking_id: BookingId, released_at: DateTime<Utc>) -> AppResult<()>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    // 時間帯に紐づく有効な予約一覧を取得する
    async fn find_active_by_slot_id(&self, slot_id: SlotId) -> AppResult<Vec<Booking>>;
}

use crate::model::id::{BookingId, UserId};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

/// 通知の内容。宛先の解決はゲートウェイ側の責務とする。
#[derive(Debug, Clone)]
pub struct BookingNotice {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub time_slot: String,
    pub date: NaiveDate,
}

/// 予約確定・解放後に呼び出す通知ディスパッチャ。
/// 送信失敗は呼び出し側でログに留め、予約自体は巻き戻さない。
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn booking_confirmed(&self, notice: BookingNotice) -> AppResult<()>;
    async fn booking_cancelled(&self, notice: BookingNotice) -> AppResult<()>;
}

use async_trait::async_trait;
use kernel::notifier::{BookingNotice, Notifier};
use shared::{
    config::NotifierConfig,
    error::{AppError, AppResult},
};

/// 通知ゲートウェイへの HTTP 送信。送信先が未設定の環境では
/// ログ出力のみを行う。
pub struct GatewayNotifier {
    client: reqwest::Client,
    config: NotifierConfig,
}

impl GatewayNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn send(&self, kind: &str, notice: BookingNotice) -> AppResult<()> {
        let Some(url) = &self.config.gateway_url else {
            tracing::info!(
                kind,
                booking_id = %notice.booking_id,
                "notification gateway is not configured, skipping"
            );
            return Ok(());
        };

        let res = self
            .client
            .post(url)
            .json(&serde_json::json!({
                "kind": kind,
                "bookingId": notice.booking_id,
                "recipient": notice.booked_by,
                "timeSlot": notice.time_slot,
                "date": notice.date,
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("notification gateway: {e}")))?;

        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "notification gateway returned {}",
                res.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for GatewayNotifier {
    async fn booking_confirmed(&self, notice: BookingNotice) -> AppResult<()> {
        self.send("booking_confirmed", notice).await
    }

    async fn booking_cancelled(&self, notice: BookingNotice) -> AppResult<()> {
        self.send("booking_cancelled", notice).await
    }
}

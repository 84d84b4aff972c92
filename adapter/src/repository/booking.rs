use crate::database::{
    model::{booking::BookingRow, slot::SlotRow},
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::model::{
    booking::{event::CreateBooking, Booking, RejectReason, ReserveOutcome},
    id::{BookingId, SlotId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    // 予約操作を行う
    async fn reserve(&self, event: CreateBooking) -> AppResult<ReserveOutcome> {
        let mut tx = self.db.begin().await?;

        // 空き確認とカウンタ加算は条件付き UPDATE 一文で同時に行う。
        // SELECT してから UPDATE する 2 往復の実装は、同じ時間帯への
        // 同時予約で capacity を超えるため不可。
        let res = sqlx::query(
            r#"
                UPDATE evacuation_slots
                SET booked = booked + 1, updated_at = now()
                WHERE slot_id = $1 AND closed = FALSE AND booked < capacity
            "#,
        )
        .bind(event.slot_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            // 加算されなかった理由を調べる。
            // - 時間帯が存在しない
            // - 時間帯が受付停止中
            // - 満杯（正常系の拒否として返す）
            let slot = sqlx::query_as::<_, SlotRow>(
                r#"
                    SELECT slot_id, time_slot, date, capacity, booked, closed
                    FROM evacuation_slots
                    WHERE slot_id = $1
                "#,
            )
            .bind(event.slot_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            return match slot {
                None => Err(AppError::EntityNotFound(format!(
                    "時間帯（{}）が見つかりませんでした。",
                    event.slot_id
                ))),
                Some(s) if s.closed => Err(AppError::UnprocessableEntity(format!(
                    "時間帯（{}）は現在受付を停止しています。",
                    event.slot_id
                ))),
                Some(_) => {
                    tx.rollback().await.map_err(AppError::TransactionError)?;
                    Ok(ReserveOutcome::Rejected(RejectReason::CapacityExceeded))
                }
            };
        }

        // カウンタ加算と予約レコードの作成は同一トランザクションで
        // コミットする。通知などの副作用はこの境界の外で行うこと。
        let booking_id = BookingId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO bookings (booking_id, slot_id, booked_by, created_at)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(booking_id)
        .bind(event.slot_id)
        .bind(event.booked_by)
        .bind(event.created_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(ReserveOutcome::Booked(Booking {
            id: booking_id,
            slot_id: event.slot_id,
            booked_by: event.booked_by,
            created_at: event.created_at,
            cancelled_at: None,
        }))
    }

    // 予約解放操作を行う
    async fn release(&self, booking_id: BookingId, released_at: DateTime<Utc>) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // 同じ予約への多重解放を直列化するため行ロックを取る。
        // ロックは予約 1 行のみで、複数資源をまたぐロックは取らない。
        let booking = sqlx::query_as::<_, BookingRow>(
            r#"
                SELECT booking_id, slot_id, booked_by, created_at, cancelled_at
                FROM bookings
                WHERE booking_id = $1
                FOR UPDATE
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(booking) = booking else {
            return Err(AppError::EntityNotFound(format!(
                "予約（{}）が見つかりませんでした。",
                booking_id
            )));
        };

        // 解放済みの予約はそのまま成功として返す
        if booking.cancelled_at.is_some() {
            return Ok(());
        }

        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET cancelled_at = $2
                WHERE booking_id = $1
            "#,
        )
        .bind(booking_id)
        .bind(released_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been cancelled".into(),
            ));
        }

        // 遅延・重複キャンセルに耐えるため 0 を下限として減算する
        sqlx::query(
            r#"
                UPDATE evacuation_slots
                SET booked = GREATEST(booked - 1, 0), updated_at = now()
                WHERE slot_id = $1
            "#,
        )
        .bind(booking.slot_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
                SELECT booking_id, slot_id, booked_by, created_at, cancelled_at
                FROM bookings
                WHERE booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Booking::from))
    }

    // 時間帯に紐づく有効な予約一覧を取得する
    async fn find_active_by_slot_id(&self, slot_id: SlotId) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
                SELECT booking_id, slot_id, booked_by, created_at, cancelled_at
                FROM bookings
                WHERE slot_id = $1 AND cancelled_at IS NULL
                ORDER BY created_at ASC
            "#,
        )
        .bind(slot_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }
}

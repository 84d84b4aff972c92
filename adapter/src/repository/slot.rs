use crate::database::{
    model::slot::{SlotRow, SlotStatisticsRow},
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use derive_new::new;
use kernel::model::{
    id::SlotId,
    ledger::ResourceStatus,
    slot::{event::CreateSlot, EvacuationSlot, SlotListFilter, SlotStatistics, DEFAULT_SLOT_CAPACITY, DEFAULT_TIME_SLOTS},
};
use kernel::repository::slot::SlotRepository;
use shared::error::{AppError, AppResult};

const SLOT_COLUMNS: &str = "slot_id, time_slot, date, capacity, booked, closed";

// 導出 status を WHERE 句へ落とし込む。status カラムは持たない
fn status_condition(status: ResourceStatus) -> &'static str {
    match status {
        ResourceStatus::Available => "closed = FALSE AND booked < capacity",
        ResourceStatus::Full => "closed = FALSE AND booked >= capacity",
        ResourceStatus::Closed => "closed = TRUE",
    }
}

#[derive(new)]
pub struct SlotRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl SlotRepository for SlotRepositoryImpl {
    async fn create(&self, event: CreateSlot) -> AppResult<SlotId> {
        let slot_id = SlotId::new();
        sqlx::query(
            r#"
                INSERT INTO evacuation_slots (slot_id, time_slot, date, capacity)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(slot_id)
        .bind(&event.time_slot)
        .bind(event.date)
        .bind(event.capacity)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(slot_id)
    }

    // 指定日の既定グリッドを登録する
    async fn create_default_for_date(&self, date: NaiveDate) -> AppResult<Vec<EvacuationSlot>> {
        let mut tx = self.db.begin().await?;

        // 既に登録済みの時間帯は予約数を保持したまま残す
        for time_slot in DEFAULT_TIME_SLOTS {
            sqlx::query(
                r#"
                    INSERT INTO evacuation_slots (slot_id, time_slot, date, capacity)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (date, time_slot) DO NOTHING
                "#,
            )
            .bind(SlotId::new())
            .bind(time_slot)
            .bind(date)
            .bind(DEFAULT_SLOT_CAPACITY)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        self.find_all(SlotListFilter {
            date: Some(date),
            status: None,
        })
        .await
    }

    async fn find_by_id(&self, slot_id: SlotId) -> AppResult<Option<EvacuationSlot>> {
        let row = sqlx::query_as::<_, SlotRow>(&format!(
            "SELECT {SLOT_COLUMNS} FROM evacuation_slots WHERE slot_id = $1"
        ))
        .bind(slot_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(EvacuationSlot::from))
    }

    async fn find_all(&self, filter: SlotListFilter) -> AppResult<Vec<EvacuationSlot>> {
        let mut qb = sqlx::QueryBuilder::new(format!(
            "SELECT {SLOT_COLUMNS} FROM evacuation_slots"
        ));
        let mut sep = " WHERE ";
        if let Some(date) = filter.date {
            qb.push(sep).push("date = ").push_bind(date);
            sep = " AND ";
        }
        if let Some(status) = filter.status {
            qb.push(sep).push(status_condition(status));
        }
        qb.push(" ORDER BY date ASC, time_slot ASC");

        let rows: Vec<SlotRow> = qb
            .build_query_as()
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(EvacuationSlot::from).collect())
    }

    async fn find_available(&self, date: Option<NaiveDate>) -> AppResult<Vec<EvacuationSlot>> {
        self.find_all(SlotListFilter {
            date,
            status: Some(ResourceStatus::Available),
        })
        .await
    }

    async fn find_upcoming(&self, from: NaiveDate, days: i64) -> AppResult<Vec<EvacuationSlot>> {
        let to = from + Duration::days(days);
        let rows = sqlx::query_as::<_, SlotRow>(&format!(
            r#"
                SELECT {SLOT_COLUMNS}
                FROM evacuation_slots
                WHERE date BETWEEN $1 AND $2
                ORDER BY date ASC, time_slot ASC
            "#
        ))
        .bind(from)
        .bind(to)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(EvacuationSlot::from).collect())
    }

    async fn set_closed(&self, slot_id: SlotId, closed: bool) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE evacuation_slots
                SET closed = $2, updated_at = now()
                WHERE slot_id = $1
            "#,
        )
        .bind(slot_id)
        .bind(closed)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified evacuation slot not found".into(),
            ));
        }

        Ok(())
    }

    async fn statistics(&self, from: NaiveDate) -> AppResult<SlotStatistics> {
        let row = sqlx::query_as::<_, SlotStatisticsRow>(
            r#"
                SELECT
                    COUNT(*) AS total_slots,
                    COUNT(*) FILTER (WHERE closed = FALSE AND booked < capacity) AS available_slots,
                    COUNT(*) FILTER (WHERE closed = FALSE AND booked >= capacity) AS full_slots,
                    COUNT(*) FILTER (WHERE closed = TRUE) AS closed_slots,
                    COALESCE(SUM(capacity), 0) AS total_capacity,
                    COALESCE(SUM(booked), 0) AS total_booked
                FROM evacuation_slots
                WHERE date >= $1
            "#,
        )
        .bind(from)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.into())
    }
}

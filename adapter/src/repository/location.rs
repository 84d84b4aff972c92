use crate::database::{
    model::location::{LocationRow, LocationTypeStatisticsRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::LocationId,
    ledger::ResourceStatus,
    location::{
        event::{CreateLocation, SetOccupancy, UpdateLocation},
        EmergencyLocation, LocationListFilter, LocationTypeStatistics,
    },
};
use kernel::repository::location::LocationRepository;
use shared::error::{AppError, AppResult};

const LOCATION_COLUMNS: &str = "location_id, name, latitude, longitude, location_type, capacity, occupancy, closed, contact_number, address";

fn status_condition(status: ResourceStatus) -> &'static str {
    match status {
        ResourceStatus::Available => "closed = FALSE AND occupancy < capacity",
        ResourceStatus::Full => "closed = FALSE AND occupancy >= capacity",
        ResourceStatus::Closed => "closed = TRUE",
    }
}

#[derive(new)]
pub struct LocationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl LocationRepository for LocationRepositoryImpl {
    async fn create(&self, event: CreateLocation) -> AppResult<LocationId> {
        let location_id = LocationId::new();
        sqlx::query(
            r#"
                INSERT INTO emergency_locations
                (location_id, name, latitude, longitude, location_type, capacity, contact_number, address)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(location_id)
        .bind(&event.name)
        .bind(event.latitude)
        .bind(event.longitude)
        .bind(event.location_type.to_string())
        .bind(event.capacity)
        .bind(&event.contact_number)
        .bind(&event.address)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(location_id)
    }

    async fn update(&self, event: UpdateLocation) -> AppResult<()> {
        // capacity を下げる場合も現在の占有数を下回らないことを
        // UPDATE の条件として同時に確認する
        let res = sqlx::query(
            r#"
                UPDATE emergency_locations
                SET name = COALESCE($2, name),
                    latitude = COALESCE($3, latitude),
                    longitude = COALESCE($4, longitude),
                    location_type = COALESCE($5, location_type),
                    capacity = COALESCE($6, capacity),
                    contact_number = COALESCE($7, contact_number),
                    address = COALESCE($8, address),
                    updated_at = now()
                WHERE location_id = $1
                  AND COALESCE($6, capacity) >= occupancy
            "#,
        )
        .bind(event.location_id)
        .bind(&event.name)
        .bind(event.latitude)
        .bind(event.longitude)
        .bind(event.location_type.map(|t| t.to_string()))
        .bind(event.capacity)
        .bind(&event.contact_number)
        .bind(&event.address)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return match self.find_by_id(event.location_id).await? {
                None => Err(AppError::EntityNotFound(format!(
                    "避難場所（{}）が見つかりませんでした。",
                    event.location_id
                ))),
                Some(_) => Err(AppError::UnprocessableEntity(
                    "収容人数を現在の占有数より小さくすることはできません。".into(),
                )),
            };
        }

        Ok(())
    }

    async fn find_by_id(&self, location_id: LocationId) -> AppResult<Option<EmergencyLocation>> {
        let row = sqlx::query_as::<_, LocationRow>(&format!(
            "SELECT {LOCATION_COLUMNS} FROM emergency_locations WHERE location_id = $1"
        ))
        .bind(location_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(LocationRow::into_location).transpose()
    }

    async fn find_all(&self, filter: LocationListFilter) -> AppResult<Vec<EmergencyLocation>> {
        let mut qb = sqlx::QueryBuilder::new(format!(
            "SELECT {LOCATION_COLUMNS} FROM emergency_locations"
        ));
        let mut sep = " WHERE ";
        if let Some(location_type) = filter.location_type {
            qb.push(sep)
                .push("location_type = ")
                .push_bind(location_type.to_string());
            sep = " AND ";
        }
        if let Some(status) = filter.status {
            qb.push(sep).push(status_condition(status));
        }
        qb.push(" ORDER BY name ASC");

        let rows: Vec<LocationRow> = qb
            .build_query_as()
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(LocationRow::into_location).collect()
    }

    // 空きの大きい順に取得する
    async fn find_available(&self) -> AppResult<Vec<EmergencyLocation>> {
        let rows = sqlx::query_as::<_, LocationRow>(&format!(
            r#"
                SELECT {LOCATION_COLUMNS}
                FROM emergency_locations
                WHERE closed = FALSE AND occupancy < capacity
                ORDER BY (capacity - occupancy) DESC
            "#
        ))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(LocationRow::into_location).collect()
    }

    async fn find_full(&self) -> AppResult<Vec<EmergencyLocation>> {
        let rows = sqlx::query_as::<_, LocationRow>(&format!(
            r#"
                SELECT {LOCATION_COLUMNS}
                FROM emergency_locations
                WHERE closed = FALSE AND occupancy >= capacity
                ORDER BY name ASC
            "#
        ))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(LocationRow::into_location).collect()
    }

    // 入所操作を行う
    async fn check_in(&self, location_id: LocationId) -> AppResult<bool> {
        // 空き確認と加算は条件付き UPDATE 一文で行う。
        // アプリケーション側で占有数を読んでから書き戻してはならない
        let res = sqlx::query(
            r#"
                UPDATE emergency_locations
                SET occupancy = occupancy + 1, updated_at = now()
                WHERE location_id = $1 AND closed = FALSE AND occupancy < capacity
            "#,
        )
        .bind(location_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() >= 1 {
            return Ok(true);
        }

        match self.find_by_id(location_id).await? {
            None => Err(AppError::EntityNotFound(format!(
                "避難場所（{}）が見つかりませんでした。",
                location_id
            ))),
            Some(location) if location.ledger.closed => Err(AppError::UnprocessableEntity(
                format!("避難場所（{}）は現在受け入れを停止しています。", location_id),
            )),
            // 満杯。拒否は正常系として扱う
            Some(_) => Ok(false),
        }
    }

    // 退所操作を行う
    async fn check_out(&self, location_id: LocationId) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE emergency_locations
                SET occupancy = GREATEST(occupancy - 1, 0), updated_at = now()
                WHERE location_id = $1
            "#,
        )
        .bind(location_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "避難場所（{}）が見つかりませんでした。",
                location_id
            )));
        }

        Ok(())
    }

    async fn set_occupancy(&self, event: SetOccupancy) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE emergency_locations
                SET occupancy = $2, updated_at = now()
                WHERE location_id = $1 AND $2 >= 0 AND $2 <= capacity
            "#,
        )
        .bind(event.location_id)
        .bind(event.occupancy)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return match self.find_by_id(event.location_id).await? {
                None => Err(AppError::EntityNotFound(format!(
                    "避難場所（{}）が見つかりませんでした。",
                    event.location_id
                ))),
                Some(_) => Err(AppError::UnprocessableEntity(
                    "占有数は 0 以上かつ収容人数以下で指定してください。".into(),
                )),
            };
        }

        Ok(())
    }

    async fn set_closed(&self, location_id: LocationId, closed: bool) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE emergency_locations
                SET closed = $2, updated_at = now()
                WHERE location_id = $1
            "#,
        )
        .bind(location_id)
        .bind(closed)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified emergency location not found".into(),
            ));
        }

        Ok(())
    }

    async fn statistics(&self) -> AppResult<Vec<LocationTypeStatistics>> {
        let rows = sqlx::query_as::<_, LocationTypeStatisticsRow>(
            r#"
                SELECT
                    location_type,
                    COUNT(*) AS location_count,
                    COALESCE(SUM(capacity), 0) AS total_capacity,
                    COALESCE(SUM(occupancy), 0) AS total_occupancy
                FROM emergency_locations
                WHERE closed = FALSE
                GROUP BY location_type
                ORDER BY location_count DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter()
            .map(LocationTypeStatisticsRow::into_statistics)
            .collect()
    }
}

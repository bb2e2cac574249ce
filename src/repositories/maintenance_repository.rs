use crate::models::{MaintenanceRecord, MaintenanceStatus, NewMaintenanceRecord};
use crate::utils::errors::{conflict_on_unique, maintenance_already_active, AppError};
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registro de la viatura en el estado dado; ante duplicados gana el más reciente
    pub async fn first_with_status(
        &self,
        vehicle_id: Uuid,
        status: MaintenanceStatus,
    ) -> Result<Option<MaintenanceRecord>, AppError> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT * FROM maintenance_records
            WHERE vehicle_id = $1 AND status = $2
            ORDER BY updated_at DESC, created_at DESC
            LIMIT 1
            "#
        )
        .bind(vehicle_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Registro más reciente en el estado dado, uno por viatura
    pub async fn latest_per_vehicle_with(
        conn: &mut PgConnection,
        status: MaintenanceStatus,
    ) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT DISTINCT ON (vehicle_id) * FROM maintenance_records
            WHERE status = $1
            ORDER BY vehicle_id, updated_at DESC, created_at DESC
            "#
        )
        .bind(status)
        .fetch_all(&mut *conn)
        .await?;

        Ok(records)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceRecord>, AppError> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn create(&self, record: NewMaintenanceRecord) -> Result<MaintenanceRecord, AppError> {
        let now = Utc::now();

        let created = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records (
                id, vehicle_id, kind, status, sei_process_number, sent_date, return_date,
                location, km_at_maintenance, description, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(record.vehicle_id)
        .bind(record.kind)
        .bind(record.status)
        .bind(record.sei_process_number)
        .bind(record.sent_date)
        .bind(record.return_date)
        .bind(record.location)
        .bind(record.km_at_maintenance)
        .bind(record.description)
        .bind(record.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, maintenance_already_active))?;

        Ok(created)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: MaintenanceStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<MaintenanceRecord, AppError> {
        let updated = sqlx::query_as::<_, MaintenanceRecord>(
            "UPDATE maintenance_records SET status = $2, updated_at = $3 WHERE id = $1 RETURNING *"
        )
        .bind(id)
        .bind(status)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, maintenance_already_active))?;

        updated.ok_or_else(|| AppError::NotFound("Registro de manutenção não encontrado".to_string()))
    }
}

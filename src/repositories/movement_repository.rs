use crate::models::{MovementStatus, NewVehicleMovement, VehicleMovement};
use crate::utils::errors::{conflict_on_unique, vehicle_in_transit, AppError};
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct MovementRepository {
    pool: PgPool,
}

impl MovementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<VehicleMovement>, AppError> {
        let movement = sqlx::query_as::<_, VehicleMovement>(
            "SELECT * FROM vehicle_movements WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movement)
    }

    pub async fn find_in_transit(&self, vehicle_id: Uuid) -> Result<Option<VehicleMovement>, AppError> {
        let movement = sqlx::query_as::<_, VehicleMovement>(
            r#"
            SELECT * FROM vehicle_movements
            WHERE vehicle_id = $1 AND status = $2
            ORDER BY departure_time DESC
            LIMIT 1
            "#
        )
        .bind(vehicle_id)
        .bind(MovementStatus::InTransit)
        .fetch_optional(&self.pool)
        .await?;

        Ok(movement)
    }

    pub async fn list_in_transit(&self) -> Result<Vec<VehicleMovement>, AppError> {
        let movements = sqlx::query_as::<_, VehicleMovement>(
            "SELECT * FROM vehicle_movements WHERE status = $1 ORDER BY departure_time ASC"
        )
        .bind(MovementStatus::InTransit)
        .fetch_all(&self.pool)
        .await?;

        Ok(movements)
    }

    /// `idx_movements_one_in_transit` rechaza una segunda salida pendiente
    pub async fn create(&self, movement: NewVehicleMovement) -> Result<VehicleMovement, AppError> {
        let now = Utc::now();

        let created = sqlx::query_as::<_, VehicleMovement>(
            r#"
            INSERT INTO vehicle_movements (
                id, vehicle_id, personnel_id, destination, destination_kind,
                departure_km, departure_time, status, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(movement.vehicle_id)
        .bind(movement.personnel_id)
        .bind(movement.destination)
        .bind(movement.destination_kind)
        .bind(movement.departure_km)
        .bind(movement.departure_time)
        .bind(MovementStatus::InTransit)
        .bind(movement.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, vehicle_in_transit))?;

        Ok(created)
    }

    /// Marca la llegada solo si el movimiento sigue en tránsito
    pub async fn mark_arrived_with(
        conn: &mut PgConnection,
        id: Uuid,
        arrival_km: i64,
        arrival_time: DateTime<Utc>,
    ) -> Result<Option<VehicleMovement>, AppError> {
        let movement = sqlx::query_as::<_, VehicleMovement>(
            r#"
            UPDATE vehicle_movements
            SET arrival_km = $2, arrival_time = $3, status = $4, updated_at = $5
            WHERE id = $1 AND status = $6
            RETURNING *
            "#
        )
        .bind(id)
        .bind(arrival_km)
        .bind(arrival_time)
        .bind(MovementStatus::Completed)
        .bind(Utc::now())
        .bind(MovementStatus::InTransit)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(movement)
    }
}

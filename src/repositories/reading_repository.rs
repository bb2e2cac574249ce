use crate::models::{NewVehicleReading, VehicleReading};
use crate::utils::errors::{odometer_regression, AppError};
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

const LATEST_FOR_VEHICLE: &str = r#"
    SELECT * FROM vehicle_readings
    WHERE vehicle_id = $1
    ORDER BY created_at DESC, km_reading DESC
    LIMIT 1
"#;

pub struct ReadingRepository {
    pool: PgPool,
}

impl ReadingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn latest_for_vehicle(&self, vehicle_id: Uuid) -> Result<Option<VehicleReading>, AppError> {
        let reading = sqlx::query_as::<_, VehicleReading>(LATEST_FOR_VEHICLE)
            .bind(vehicle_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(reading)
    }

    pub async fn list_for_vehicle(
        &self,
        vehicle_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<VehicleReading>, AppError> {
        // LIMIT NULL en PostgreSQL equivale a sin límite
        let readings = sqlx::query_as::<_, VehicleReading>(
            r#"
            SELECT * FROM vehicle_readings
            WHERE vehicle_id = $1
            ORDER BY created_at DESC, km_reading DESC
            LIMIT $2
            "#
        )
        .bind(vehicle_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(readings)
    }

    /// Última lectura de cada viatura
    pub async fn latest_per_vehicle_with(conn: &mut PgConnection) -> Result<Vec<VehicleReading>, AppError> {
        let readings = sqlx::query_as::<_, VehicleReading>(
            r#"
            SELECT DISTINCT ON (vehicle_id) * FROM vehicle_readings
            ORDER BY vehicle_id, created_at DESC, km_reading DESC
            "#
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(readings)
    }

    /// Inserta la lectura si no retrocede respecto de la última.
    ///
    /// El llamador debe tener bloqueada la fila de la viatura en la misma
    /// transacción (`VehicleRepository::lock_with`).
    pub async fn create_checked_with(
        conn: &mut PgConnection,
        reading: NewVehicleReading,
    ) -> Result<VehicleReading, AppError> {
        let latest = sqlx::query_as::<_, VehicleReading>(LATEST_FOR_VEHICLE)
            .bind(reading.vehicle_id)
            .fetch_optional(&mut *conn)
            .await?;

        if let Some(last) = latest {
            if reading.km_reading < last.km_reading {
                return Err(odometer_regression(last.km_reading));
            }
        }

        let created = sqlx::query_as::<_, VehicleReading>(
            r#"
            INSERT INTO vehicle_readings (id, vehicle_id, km_reading, reading_date, recorded_by, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(reading.vehicle_id)
        .bind(reading.km_reading)
        .bind(reading.reading_date)
        .bind(reading.recorded_by)
        .bind(reading.notes)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(created)
    }
}

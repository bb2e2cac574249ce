use crate::models::{Vehicle, VehicleType};
use crate::utils::errors::{not_found_error, AppError};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all_with(conn: &mut PgConnection) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles ORDER BY created_at ASC, id ASC"
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(vehicles)
    }

    pub async fn list_types_with(conn: &mut PgConnection) -> Result<Vec<VehicleType>, AppError> {
        let types = sqlx::query_as::<_, VehicleType>(
            "SELECT id, name, description, km_interval, time_interval_days FROM vehicle_types"
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(types)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_type_by_id(&self, id: Uuid) -> Result<Option<VehicleType>, AppError> {
        let vehicle_type = sqlx::query_as::<_, VehicleType>(
            "SELECT id, name, description, km_interval, time_interval_days FROM vehicle_types WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle_type)
    }

    /// Bloquea la fila de la viatura hasta el fin de la transacción.
    ///
    /// Serializa las escrituras que comparan contra el estado de la viatura
    /// (última lectura, movimiento en tránsito).
    pub async fn lock_with(conn: &mut PgConnection, id: Uuid) -> Result<(), AppError> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| not_found_error("Viatura", &id.to_string()))?;

        Ok(())
    }
}

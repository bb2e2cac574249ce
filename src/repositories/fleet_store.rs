//! Almacén de registros de la frota
//!
//! Contrato que consumen los servicios. Las lecturas puntuales son
//! independientes entre sí; los recorridos de toda la frota usan `snapshot`,
//! que lee un único estado consistente. Las escrituras aplican sus propias
//! invariantes de forma atómica. Ningún método reintenta.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::fleet_snapshot::FleetSnapshot;
use crate::models::{
    MaintenanceRecord, MaintenanceStatus, NewMaintenanceRecord, NewVehicleMovement,
    NewVehicleReading, Personnel, Vehicle, VehicleMovement, VehicleReading, VehicleType,
};
use crate::utils::errors::AppResult;

#[async_trait]
pub trait FleetStore: Send + Sync {
    // Viaturas y catálogos

    /// Viaturas, tipos, mantenimiento activo y última lectura, leídos de un
    /// mismo estado del almacén
    async fn snapshot(&self) -> AppResult<FleetSnapshot>;

    async fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    async fn find_vehicle_type(&self, id: Uuid) -> AppResult<Option<VehicleType>>;

    async fn find_personnel(&self, id: Uuid) -> AppResult<Option<Personnel>>;

    // Mantenimiento

    /// Primer registro de la viatura con el estado dado.
    ///
    /// Si hubiera más de uno, devuelve el actualizado más recientemente.
    async fn first_maintenance_with_status(
        &self,
        vehicle_id: Uuid,
        status: MaintenanceStatus,
    ) -> AppResult<Option<MaintenanceRecord>>;

    async fn find_maintenance(&self, id: Uuid) -> AppResult<Option<MaintenanceRecord>>;

    /// Falla con `Conflict` si el registro sería un segundo `in_progress` de la viatura
    async fn insert_maintenance(&self, record: NewMaintenanceRecord) -> AppResult<MaintenanceRecord>;

    /// Misma regla que `insert_maintenance`; `NotFound` si el registro no existe
    async fn update_maintenance_status(
        &self,
        id: Uuid,
        status: MaintenanceStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<MaintenanceRecord>;

    // Odómetro

    /// Última lectura insertada para la viatura
    async fn latest_reading(&self, vehicle_id: Uuid) -> AppResult<Option<VehicleReading>>;

    /// Lecturas de la viatura, de la más reciente a la más antigua
    async fn list_readings(&self, vehicle_id: Uuid, limit: Option<i64>) -> AppResult<Vec<VehicleReading>>;

    /// Falla con `BadRequest` si el km es menor que la última lectura de la viatura.
    /// La comparación y la inserción son atómicas.
    async fn insert_reading(&self, reading: NewVehicleReading) -> AppResult<VehicleReading>;

    // Guarita

    async fn find_movement(&self, id: Uuid) -> AppResult<Option<VehicleMovement>>;

    async fn find_in_transit_movement(&self, vehicle_id: Uuid) -> AppResult<Option<VehicleMovement>>;

    async fn list_in_transit_movements(&self) -> AppResult<Vec<VehicleMovement>>;

    /// Falla con `Conflict` si la viatura ya tiene un movimiento en tránsito
    async fn insert_movement(&self, movement: NewVehicleMovement) -> AppResult<VehicleMovement>;

    /// Cierra el movimiento e inserta la lectura de llegada en una sola unidad atómica.
    ///
    /// Falla con `Conflict` si el movimiento ya no está en tránsito y con
    /// `BadRequest` si el km de llegada es menor que la última lectura.
    async fn complete_movement(
        &self,
        id: Uuid,
        arrival_km: i64,
        arrival_time: DateTime<Utc>,
        reading: NewVehicleReading,
    ) -> AppResult<(VehicleMovement, VehicleReading)>;
}

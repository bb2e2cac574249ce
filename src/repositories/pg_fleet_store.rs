//! Implementación PostgreSQL del almacén de registros
//!
//! Compone los repositorios por entidad sobre un mismo pool. Las escrituras
//! que comparan contra la última lectura bloquean antes la fila de la viatura;
//! la foto de la frota se lee en una transacción REPEATABLE READ de solo lectura.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::fleet_snapshot::FleetSnapshot;
use super::fleet_store::FleetStore;
use super::maintenance_repository::MaintenanceRepository;
use super::movement_repository::MovementRepository;
use super::personnel_repository::PersonnelRepository;
use super::reading_repository::ReadingRepository;
use super::vehicle_repository::VehicleRepository;
use crate::models::{
    MaintenanceRecord, MaintenanceStatus, NewMaintenanceRecord, NewVehicleMovement,
    NewVehicleReading, Personnel, Vehicle, VehicleMovement, VehicleReading, VehicleType,
};
use crate::utils::errors::{movement_already_completed, AppResult};

pub struct PgFleetStore {
    pool: PgPool,
    vehicles: VehicleRepository,
    maintenance: MaintenanceRepository,
    readings: ReadingRepository,
    movements: MovementRepository,
    personnel: PersonnelRepository,
}

impl PgFleetStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            maintenance: MaintenanceRepository::new(pool.clone()),
            readings: ReadingRepository::new(pool.clone()),
            movements: MovementRepository::new(pool.clone()),
            personnel: PersonnelRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl FleetStore for PgFleetStore {
    async fn snapshot(&self) -> AppResult<FleetSnapshot> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let vehicles = VehicleRepository::list_all_with(&mut *tx).await?;
        let types = VehicleRepository::list_types_with(&mut *tx).await?;
        let active =
            MaintenanceRepository::latest_per_vehicle_with(&mut *tx, MaintenanceStatus::InProgress)
                .await?;
        let readings = ReadingRepository::latest_per_vehicle_with(&mut *tx).await?;

        tx.commit().await?;

        tracing::debug!("📸 Snapshot da frota: {} viaturas", vehicles.len());
        Ok(FleetSnapshot::new(vehicles, types, active, readings))
    }

    async fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        self.vehicles.find_by_id(id).await
    }

    async fn find_vehicle_type(&self, id: Uuid) -> AppResult<Option<VehicleType>> {
        self.vehicles.find_type_by_id(id).await
    }

    async fn find_personnel(&self, id: Uuid) -> AppResult<Option<Personnel>> {
        self.personnel.find_by_id(id).await
    }

    async fn first_maintenance_with_status(
        &self,
        vehicle_id: Uuid,
        status: MaintenanceStatus,
    ) -> AppResult<Option<MaintenanceRecord>> {
        self.maintenance.first_with_status(vehicle_id, status).await
    }

    async fn find_maintenance(&self, id: Uuid) -> AppResult<Option<MaintenanceRecord>> {
        self.maintenance.find_by_id(id).await
    }

    async fn insert_maintenance(&self, record: NewMaintenanceRecord) -> AppResult<MaintenanceRecord> {
        self.maintenance.create(record).await
    }

    async fn update_maintenance_status(
        &self,
        id: Uuid,
        status: MaintenanceStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<MaintenanceRecord> {
        self.maintenance.update_status(id, status, updated_at).await
    }

    async fn latest_reading(&self, vehicle_id: Uuid) -> AppResult<Option<VehicleReading>> {
        self.readings.latest_for_vehicle(vehicle_id).await
    }

    async fn list_readings(&self, vehicle_id: Uuid, limit: Option<i64>) -> AppResult<Vec<VehicleReading>> {
        self.readings.list_for_vehicle(vehicle_id, limit).await
    }

    async fn insert_reading(&self, reading: NewVehicleReading) -> AppResult<VehicleReading> {
        let mut tx = self.pool.begin().await?;

        VehicleRepository::lock_with(&mut *tx, reading.vehicle_id).await?;
        let created = ReadingRepository::create_checked_with(&mut *tx, reading).await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn find_movement(&self, id: Uuid) -> AppResult<Option<VehicleMovement>> {
        self.movements.find_by_id(id).await
    }

    async fn find_in_transit_movement(&self, vehicle_id: Uuid) -> AppResult<Option<VehicleMovement>> {
        self.movements.find_in_transit(vehicle_id).await
    }

    async fn list_in_transit_movements(&self) -> AppResult<Vec<VehicleMovement>> {
        self.movements.list_in_transit().await
    }

    async fn insert_movement(&self, movement: NewVehicleMovement) -> AppResult<VehicleMovement> {
        self.movements.create(movement).await
    }

    async fn complete_movement(
        &self,
        id: Uuid,
        arrival_km: i64,
        arrival_time: DateTime<Utc>,
        reading: NewVehicleReading,
    ) -> AppResult<(VehicleMovement, VehicleReading)> {
        let mut tx = self.pool.begin().await?;

        // Sin commit, cualquier error revierte también el cierre del movimiento
        VehicleRepository::lock_with(&mut *tx, reading.vehicle_id).await?;

        let movement = MovementRepository::mark_arrived_with(&mut *tx, id, arrival_km, arrival_time)
            .await?
            .ok_or_else(movement_already_completed)?;

        let reading = ReadingRepository::create_checked_with(&mut *tx, reading).await?;

        tx.commit().await?;

        Ok((movement, reading))
    }
}

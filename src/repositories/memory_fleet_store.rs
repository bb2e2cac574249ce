//! Almacén de registros en memoria
//!
//! Usado por los tests y por el modo demo sin base de datos
//! (`STORE_BACKEND=memory`). Las tablas son vectores en orden de inserción,
//! así que la última lectura insertada es la más reciente. Cada escritura
//! verifica sus invariantes bajo el mismo lock con el que modifica.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::fleet_snapshot::FleetSnapshot;
use super::fleet_store::FleetStore;
use crate::models::{
    MaintenanceRecord, MaintenanceStatus, MovementStatus, NewMaintenanceRecord,
    NewVehicleMovement, NewVehicleReading, Personnel, Vehicle, VehicleMovement, VehicleReading,
    VehicleType,
};
use crate::utils::errors::{
    maintenance_already_active, movement_already_completed, odometer_regression,
    vehicle_in_transit, AppError, AppResult,
};

#[derive(Default)]
struct Tables {
    vehicle_types: Vec<VehicleType>,
    vehicles: Vec<Vehicle>,
    personnel: Vec<Personnel>,
    maintenance: Vec<MaintenanceRecord>,
    readings: Vec<VehicleReading>,
    movements: Vec<VehicleMovement>,
}

impl Tables {
    fn latest_km(&self, vehicle_id: Uuid) -> Option<i64> {
        self.readings
            .iter()
            .rev()
            .find(|r| r.vehicle_id == vehicle_id)
            .map(|r| r.km_reading)
    }

    fn ensure_km_not_behind(&self, vehicle_id: Uuid, km_reading: i64) -> AppResult<()> {
        match self.latest_km(vehicle_id) {
            Some(last_km) if km_reading < last_km => Err(odometer_regression(last_km)),
            _ => Ok(()),
        }
    }

    /// Otro registro `in_progress` de la viatura, ignorando `except`
    fn has_other_active_maintenance(&self, vehicle_id: Uuid, except: Option<Uuid>) -> bool {
        self.maintenance.iter().any(|r| {
            r.vehicle_id == vehicle_id
                && r.status == MaintenanceStatus::InProgress
                && Some(r.id) != except
        })
    }

    fn push_reading(&mut self, reading: NewVehicleReading) -> VehicleReading {
        let created = VehicleReading {
            id: Uuid::new_v4(),
            vehicle_id: reading.vehicle_id,
            km_reading: reading.km_reading,
            reading_date: reading.reading_date,
            recorded_by: reading.recorded_by,
            notes: reading.notes,
            created_at: Utc::now(),
        };
        self.readings.push(created.clone());
        created
    }
}

#[derive(Default)]
pub struct MemoryFleetStore {
    tables: RwLock<Tables>,
}

impl MemoryFleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_vehicle_type(&self, vehicle_type: VehicleType) {
        self.tables.write().await.vehicle_types.push(vehicle_type);
    }

    pub async fn insert_vehicle(&self, vehicle: Vehicle) {
        self.tables.write().await.vehicles.push(vehicle);
    }

    pub async fn insert_personnel(&self, personnel: Personnel) {
        self.tables.write().await.personnel.push(personnel);
    }
}

#[async_trait]
impl FleetStore for MemoryFleetStore {
    async fn snapshot(&self) -> AppResult<FleetSnapshot> {
        let tables = self.tables.read().await;
        let active = tables
            .maintenance
            .iter()
            .filter(|r| r.status == MaintenanceStatus::InProgress)
            .cloned()
            .collect();

        Ok(FleetSnapshot::new(
            tables.vehicles.clone(),
            tables.vehicle_types.clone(),
            active,
            tables.readings.clone(),
        ))
    }

    async fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables.vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn find_vehicle_type(&self, id: Uuid) -> AppResult<Option<VehicleType>> {
        let tables = self.tables.read().await;
        Ok(tables.vehicle_types.iter().find(|t| t.id == id).cloned())
    }

    async fn find_personnel(&self, id: Uuid) -> AppResult<Option<Personnel>> {
        let tables = self.tables.read().await;
        Ok(tables.personnel.iter().find(|p| p.id == id).cloned())
    }

    async fn first_maintenance_with_status(
        &self,
        vehicle_id: Uuid,
        status: MaintenanceStatus,
    ) -> AppResult<Option<MaintenanceRecord>> {
        let tables = self.tables.read().await;
        // max_by_key devuelve el último máximo: ante empate gana el insertado después
        Ok(tables
            .maintenance
            .iter()
            .filter(|r| r.vehicle_id == vehicle_id && r.status == status)
            .max_by_key(|r| r.updated_at)
            .cloned())
    }

    async fn find_maintenance(&self, id: Uuid) -> AppResult<Option<MaintenanceRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.maintenance.iter().find(|r| r.id == id).cloned())
    }

    async fn insert_maintenance(&self, record: NewMaintenanceRecord) -> AppResult<MaintenanceRecord> {
        let now = Utc::now();
        let created = MaintenanceRecord {
            id: Uuid::new_v4(),
            vehicle_id: record.vehicle_id,
            kind: record.kind,
            status: record.status,
            sei_process_number: record.sei_process_number,
            sent_date: record.sent_date,
            return_date: record.return_date,
            location: record.location,
            km_at_maintenance: record.km_at_maintenance,
            description: record.description,
            notes: record.notes,
            created_at: now,
            updated_at: now,
        };

        let mut tables = self.tables.write().await;
        if created.status == MaintenanceStatus::InProgress
            && tables.has_other_active_maintenance(created.vehicle_id, None)
        {
            return Err(maintenance_already_active());
        }
        tables.maintenance.push(created.clone());
        Ok(created)
    }

    async fn update_maintenance_status(
        &self,
        id: Uuid,
        status: MaintenanceStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<MaintenanceRecord> {
        let mut tables = self.tables.write().await;
        let vehicle_id = tables
            .maintenance
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.vehicle_id)
            .ok_or_else(|| AppError::NotFound("Registro de manutenção não encontrado".to_string()))?;

        if status == MaintenanceStatus::InProgress
            && tables.has_other_active_maintenance(vehicle_id, Some(id))
        {
            return Err(maintenance_already_active());
        }

        let record = tables
            .maintenance
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound("Registro de manutenção não encontrado".to_string()))?;

        record.status = status;
        record.updated_at = updated_at;
        Ok(record.clone())
    }

    async fn latest_reading(&self, vehicle_id: Uuid) -> AppResult<Option<VehicleReading>> {
        let tables = self.tables.read().await;
        Ok(tables
            .readings
            .iter()
            .rev()
            .find(|r| r.vehicle_id == vehicle_id)
            .cloned())
    }

    async fn list_readings(&self, vehicle_id: Uuid, limit: Option<i64>) -> AppResult<Vec<VehicleReading>> {
        let tables = self.tables.read().await;
        let limit = limit.map(|l| l.max(0) as usize).unwrap_or(usize::MAX);
        Ok(tables
            .readings
            .iter()
            .rev()
            .filter(|r| r.vehicle_id == vehicle_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert_reading(&self, reading: NewVehicleReading) -> AppResult<VehicleReading> {
        let mut tables = self.tables.write().await;
        tables.ensure_km_not_behind(reading.vehicle_id, reading.km_reading)?;
        Ok(tables.push_reading(reading))
    }

    async fn find_movement(&self, id: Uuid) -> AppResult<Option<VehicleMovement>> {
        let tables = self.tables.read().await;
        Ok(tables.movements.iter().find(|m| m.id == id).cloned())
    }

    async fn find_in_transit_movement(&self, vehicle_id: Uuid) -> AppResult<Option<VehicleMovement>> {
        let tables = self.tables.read().await;
        Ok(tables
            .movements
            .iter()
            .find(|m| m.vehicle_id == vehicle_id && m.status == MovementStatus::InTransit)
            .cloned())
    }

    async fn list_in_transit_movements(&self) -> AppResult<Vec<VehicleMovement>> {
        let tables = self.tables.read().await;
        Ok(tables
            .movements
            .iter()
            .filter(|m| m.status == MovementStatus::InTransit)
            .cloned()
            .collect())
    }

    async fn insert_movement(&self, movement: NewVehicleMovement) -> AppResult<VehicleMovement> {
        let now = Utc::now();
        let created = VehicleMovement {
            id: Uuid::new_v4(),
            vehicle_id: movement.vehicle_id,
            personnel_id: movement.personnel_id,
            destination: movement.destination,
            destination_kind: movement.destination_kind,
            departure_km: movement.departure_km,
            departure_time: movement.departure_time,
            arrival_km: None,
            arrival_time: None,
            status: MovementStatus::InTransit,
            notes: movement.notes,
            created_at: now,
            updated_at: now,
        };

        let mut tables = self.tables.write().await;
        let pending = tables
            .movements
            .iter()
            .any(|m| m.vehicle_id == created.vehicle_id && m.status == MovementStatus::InTransit);
        if pending {
            return Err(vehicle_in_transit());
        }
        tables.movements.push(created.clone());
        Ok(created)
    }

    async fn complete_movement(
        &self,
        id: Uuid,
        arrival_km: i64,
        arrival_time: DateTime<Utc>,
        reading: NewVehicleReading,
    ) -> AppResult<(VehicleMovement, VehicleReading)> {
        // Un único lock de escritura cubre las verificaciones y ambas modificaciones
        let mut tables = self.tables.write().await;

        let in_transit = tables
            .movements
            .iter()
            .any(|m| m.id == id && m.status == MovementStatus::InTransit);
        if !in_transit {
            return Err(movement_already_completed());
        }
        tables.ensure_km_not_behind(reading.vehicle_id, reading.km_reading)?;

        let movement = tables
            .movements
            .iter_mut()
            .find(|m| m.id == id && m.status == MovementStatus::InTransit)
            .ok_or_else(movement_already_completed)?;

        movement.arrival_km = Some(arrival_km);
        movement.arrival_time = Some(arrival_time);
        movement.status = MovementStatus::Completed;
        movement.updated_at = Utc::now();
        let movement = movement.clone();

        let reading = tables.push_reading(reading);
        Ok((movement, reading))
    }
}

//! Constructores compartidos por los tests unitarios

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{
    MaintenanceKind, MaintenanceRecord, MaintenanceStatus, NewMaintenanceRecord,
    NewVehicleMovement, NewVehicleReading, OwnershipKind, Personnel, ServiceKind, Vehicle,
    VehicleMovement, VehicleReading, VehicleType,
};
use crate::repositories::{FleetSnapshot, FleetStore, MemoryFleetStore};
use crate::utils::errors::AppResult;

/// Reloj fijo para que los cálculos de días sean deterministas
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

pub fn vehicle(prefix: &str, next_maintenance_km: Option<i64>) -> Vehicle {
    let created = fixed_now() - Duration::days(365);
    Vehicle {
        id: Uuid::new_v4(),
        plate: format!("PLT-{}", prefix),
        chassis_number: format!("CHS-{}", prefix),
        renavam: format!("REN-{}", prefix),
        operational_prefix: prefix.to_string(),
        brand: "Mercedes-Benz".to_string(),
        model: "Atego 1729".to_string(),
        year: 2019,
        type_id: Uuid::new_v4(),
        ownership: OwnershipKind::Owned,
        service: ServiceKind::Operational,
        next_maintenance_km,
        created_at: created,
        updated_at: created,
    }
}

pub fn personnel(name: &str) -> Personnel {
    let created = fixed_now() - Duration::days(30);
    Personnel {
        id: Uuid::new_v4(),
        rank: "Sd".to_string(),
        rg: 123456,
        name: name.to_string(),
        active: true,
        created_at: created,
        updated_at: created,
    }
}

pub fn maintenance(
    vehicle_id: Uuid,
    status: MaintenanceStatus,
    sent_date: Option<DateTime<Utc>>,
    location: Option<&str>,
) -> NewMaintenanceRecord {
    NewMaintenanceRecord {
        vehicle_id,
        kind: MaintenanceKind::Corrective,
        status,
        sei_process_number: None,
        sent_date,
        return_date: None,
        location: location.map(str::to_string),
        km_at_maintenance: 10_000,
        description: "Troca de embreagem".to_string(),
        notes: None,
    }
}

pub fn reading(vehicle_id: Uuid, km_reading: i64) -> NewVehicleReading {
    NewVehicleReading {
        vehicle_id,
        km_reading,
        reading_date: fixed_now() - Duration::days(1),
        recorded_by: Some("Guarda".to_string()),
        notes: None,
    }
}

/// `MemoryFleetStore` que simula escrituras concurrentes.
///
/// Inserta una lectura pendiente justo después del siguiente `find_movement`
/// y cuenta las lecturas puntuales por viatura.
#[derive(Default)]
pub struct InterleavingStore {
    pub inner: MemoryFleetStore,
    pending_reading: Mutex<Option<NewVehicleReading>>,
    point_reads: AtomicUsize,
}

impl InterleavingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn inject_after_find_movement(&self, reading: NewVehicleReading) {
        *self.pending_reading.lock().await = Some(reading);
    }

    /// Lecturas de mantenimiento, odómetro o tipo hechas fuera de `snapshot`
    pub fn point_reads(&self) -> usize {
        self.point_reads.load(Ordering::SeqCst)
    }

    fn count_point_read(&self) {
        self.point_reads.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl FleetStore for InterleavingStore {
    async fn snapshot(&self) -> AppResult<FleetSnapshot> {
        self.inner.snapshot().await
    }

    async fn find_vehicle(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        self.inner.find_vehicle(id).await
    }

    async fn find_vehicle_type(&self, id: Uuid) -> AppResult<Option<VehicleType>> {
        self.count_point_read();
        self.inner.find_vehicle_type(id).await
    }

    async fn find_personnel(&self, id: Uuid) -> AppResult<Option<Personnel>> {
        self.inner.find_personnel(id).await
    }

    async fn first_maintenance_with_status(
        &self,
        vehicle_id: Uuid,
        status: MaintenanceStatus,
    ) -> AppResult<Option<MaintenanceRecord>> {
        self.count_point_read();
        self.inner.first_maintenance_with_status(vehicle_id, status).await
    }

    async fn find_maintenance(&self, id: Uuid) -> AppResult<Option<MaintenanceRecord>> {
        self.inner.find_maintenance(id).await
    }

    async fn insert_maintenance(&self, record: NewMaintenanceRecord) -> AppResult<MaintenanceRecord> {
        self.inner.insert_maintenance(record).await
    }

    async fn update_maintenance_status(
        &self,
        id: Uuid,
        status: MaintenanceStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<MaintenanceRecord> {
        self.inner.update_maintenance_status(id, status, updated_at).await
    }

    async fn latest_reading(&self, vehicle_id: Uuid) -> AppResult<Option<VehicleReading>> {
        self.count_point_read();
        self.inner.latest_reading(vehicle_id).await
    }

    async fn list_readings(&self, vehicle_id: Uuid, limit: Option<i64>) -> AppResult<Vec<VehicleReading>> {
        self.inner.list_readings(vehicle_id, limit).await
    }

    async fn insert_reading(&self, reading: NewVehicleReading) -> AppResult<VehicleReading> {
        self.inner.insert_reading(reading).await
    }

    async fn find_movement(&self, id: Uuid) -> AppResult<Option<VehicleMovement>> {
        let found = self.inner.find_movement(id).await?;
        if let Some(reading) = self.pending_reading.lock().await.take() {
            self.inner.insert_reading(reading).await?;
        }
        Ok(found)
    }

    async fn find_in_transit_movement(&self, vehicle_id: Uuid) -> AppResult<Option<VehicleMovement>> {
        self.inner.find_in_transit_movement(vehicle_id).await
    }

    async fn list_in_transit_movements(&self) -> AppResult<Vec<VehicleMovement>> {
        self.inner.list_in_transit_movements().await
    }

    async fn insert_movement(&self, movement: NewVehicleMovement) -> AppResult<VehicleMovement> {
        self.inner.insert_movement(movement).await
    }

    async fn complete_movement(
        &self,
        id: Uuid,
        arrival_km: i64,
        arrival_time: DateTime<Utc>,
        reading: NewVehicleReading,
    ) -> AppResult<(VehicleMovement, VehicleReading)> {
        self.inner.complete_movement(id, arrival_km, arrival_time, reading).await
    }
}

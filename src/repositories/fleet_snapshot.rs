//! Foto consistente de la frota
//!
//! Los cálculos que recorren todas las viaturas (alertas, listado, estadísticas)
//! trabajan sobre una `FleetSnapshot` leída de un único estado del almacén,
//! nunca sobre consultas sueltas que podrían ver escrituras intermedias.

use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{MaintenanceRecord, Vehicle, VehicleReading, VehicleType};

#[derive(Debug, Clone, Default)]
pub struct FleetSnapshot {
    /// Viaturas en orden de creación
    pub vehicles: Vec<Vehicle>,
    vehicle_types: HashMap<Uuid, VehicleType>,
    active_maintenance: HashMap<Uuid, MaintenanceRecord>,
    latest_readings: HashMap<Uuid, VehicleReading>,
}

impl FleetSnapshot {
    /// Arma la foto a partir de las filas leídas.
    ///
    /// `active_maintenance` son registros `in_progress`: por viatura gana el de
    /// `updated_at` más reciente (empate: el último de la lista).
    /// `readings` va en orden de inserción: por viatura gana la última.
    pub fn new(
        vehicles: Vec<Vehicle>,
        vehicle_types: Vec<VehicleType>,
        active_maintenance: Vec<MaintenanceRecord>,
        readings: Vec<VehicleReading>,
    ) -> Self {
        let mut active: HashMap<Uuid, MaintenanceRecord> = HashMap::new();
        for record in active_maintenance {
            let keep_current = active
                .get(&record.vehicle_id)
                .map_or(false, |current| current.updated_at > record.updated_at);
            if !keep_current {
                active.insert(record.vehicle_id, record);
            }
        }

        let latest_readings = readings
            .into_iter()
            .map(|reading| (reading.vehicle_id, reading))
            .collect();

        Self {
            vehicles,
            vehicle_types: vehicle_types.into_iter().map(|t| (t.id, t)).collect(),
            active_maintenance: active,
            latest_readings,
        }
    }

    pub fn vehicle_type(&self, type_id: Uuid) -> Option<&VehicleType> {
        self.vehicle_types.get(&type_id)
    }

    pub fn active_maintenance(&self, vehicle_id: Uuid) -> Option<&MaintenanceRecord> {
        self.active_maintenance.get(&vehicle_id)
    }

    pub fn latest_reading(&self, vehicle_id: Uuid) -> Option<&VehicleReading> {
        self.latest_readings.get(&vehicle_id)
    }

    /// Kilometraje actual; 0 sin lecturas
    pub fn current_km(&self, vehicle_id: Uuid) -> i64 {
        self.latest_reading(vehicle_id).map_or(0, |r| r.km_reading)
    }
}

//! Vista enriquecida de viaturas y estadísticas de la frota
//!
//! Cada viatura se combina con su tipo, su disponibilidad y su odómetro.
//! El listado y las estadísticas se calculan sobre una única `FleetSnapshot`.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::availability_service::{AvailabilityService, MaintenanceAvailability};
use crate::models::{ServiceKind, Vehicle, VehicleType};
use crate::repositories::{FleetSnapshot, FleetStore};
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetails {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
    pub in_maintenance: bool,
    pub maintenance_location: Option<String>,
    pub current_km: i64,
    pub km_until_maintenance: Option<i64>,
}

/// Filtros opcionales del listado
#[derive(Debug, Clone, Copy, Default)]
pub struct VehicleFilter {
    pub service: Option<ServiceKind>,
    pub in_maintenance: Option<bool>,
}

impl VehicleFilter {
    fn matches(&self, details: &VehicleDetails) -> bool {
        self.service.map_or(true, |s| details.vehicle.service == s)
            && self.in_maintenance.map_or(true, |m| details.in_maintenance == m)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    pub total: usize,
    pub active: usize,
    pub in_maintenance: usize,
    pub operational: usize,
    pub backup: usize,
    pub active_percentage: u32,
    pub in_maintenance_percentage: u32,
}

/// Porcentaje redondeado al entero más cercano; 0 con la frota vacía
fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

#[derive(Clone)]
pub struct VehicleService {
    store: Arc<dyn FleetStore>,
    availability: AvailabilityService,
}

impl VehicleService {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self {
            availability: AvailabilityService::new(store.clone()),
            store,
        }
    }

    /// Detalle de una viatura con lecturas puntuales
    pub async fn get_details(&self, id: Uuid) -> AppResult<Option<VehicleDetails>> {
        let vehicle = match self.store.find_vehicle(id).await? {
            Some(vehicle) => vehicle,
            None => return Ok(None),
        };

        let vehicle_type = self.store.find_vehicle_type(vehicle.type_id).await?;
        let availability = self.availability.maintenance_status(vehicle.id).await?;
        let current_km = self.availability.current_km(vehicle.id).await?;

        Ok(Some(assemble(vehicle, vehicle_type, availability, current_km)))
    }

    /// Listado enriquecido; conserva el orden de la frota
    pub async fn list_details(&self, filter: VehicleFilter) -> AppResult<Vec<VehicleDetails>> {
        let snapshot = self.store.snapshot().await?;

        Ok(snapshot
            .vehicles
            .iter()
            .map(|vehicle| details_from_snapshot(&snapshot, vehicle))
            .filter(|d| filter.matches(d))
            .collect())
    }

    pub async fn fleet_stats(&self) -> AppResult<FleetStats> {
        let snapshot = self.store.snapshot().await?;
        let vehicles = &snapshot.vehicles;
        let total = vehicles.len();

        let in_maintenance = vehicles
            .iter()
            .filter(|v| snapshot.active_maintenance(v.id).is_some())
            .count();

        let active = total - in_maintenance;
        let operational = vehicles
            .iter()
            .filter(|v| v.service == ServiceKind::Operational)
            .count();

        Ok(FleetStats {
            total,
            active,
            in_maintenance,
            operational,
            backup: total - operational,
            active_percentage: percentage(active, total),
            in_maintenance_percentage: percentage(in_maintenance, total),
        })
    }
}

fn assemble(
    vehicle: Vehicle,
    vehicle_type: Option<VehicleType>,
    availability: MaintenanceAvailability,
    current_km: i64,
) -> VehicleDetails {
    let km_until_maintenance = vehicle.maintenance_threshold().map(|next| next - current_km);

    VehicleDetails {
        vehicle,
        vehicle_type,
        in_maintenance: availability.in_maintenance,
        maintenance_location: availability.maintenance_location,
        current_km,
        km_until_maintenance,
    }
}

fn details_from_snapshot(snapshot: &FleetSnapshot, vehicle: &Vehicle) -> VehicleDetails {
    assemble(
        vehicle.clone(),
        snapshot.vehicle_type(vehicle.type_id).cloned(),
        MaintenanceAvailability::from_active_record(snapshot.active_maintenance(vehicle.id)),
        snapshot.current_km(vehicle.id),
    )
}

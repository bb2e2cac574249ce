//! Disponibilidad y odómetro de viaturas
//!
//! Una viatura está en mantenimiento solo si tiene un registro `in_progress`.
//! Las que esperan en el CEMAN (`awaiting_ceman`) siguen disponibles.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::models::{MaintenanceRecord, MaintenanceStatus};
use crate::repositories::FleetStore;
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceAvailability {
    pub in_maintenance: bool,
    pub maintenance_location: Option<String>,
}

impl MaintenanceAvailability {
    pub fn from_active_record(record: Option<&MaintenanceRecord>) -> Self {
        match record {
            Some(record) => Self {
                in_maintenance: true,
                maintenance_location: record.location.clone(),
            },
            None => Self::default(),
        }
    }
}

#[derive(Clone)]
pub struct AvailabilityService {
    store: Arc<dyn FleetStore>,
}

impl AvailabilityService {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    /// Registro de mantenimiento activo (`in_progress`) de la viatura
    pub async fn active_maintenance(&self, vehicle_id: Uuid) -> AppResult<Option<MaintenanceRecord>> {
        self.store
            .first_maintenance_with_status(vehicle_id, MaintenanceStatus::InProgress)
            .await
    }

    pub async fn maintenance_status(&self, vehicle_id: Uuid) -> AppResult<MaintenanceAvailability> {
        let active = self.active_maintenance(vehicle_id).await?;
        Ok(MaintenanceAvailability::from_active_record(active.as_ref()))
    }

    /// Kilometraje actual según la última lectura; 0 si no hay lecturas
    pub async fn current_km(&self, vehicle_id: Uuid) -> AppResult<i64> {
        let latest = self.store.latest_reading(vehicle_id).await?;
        Ok(latest.map(|r| r.km_reading).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryFleetStore;
    use crate::test_support::{fixed_now, maintenance, reading, vehicle};
    use chrono::Duration;

    async fn setup() -> (Arc<MemoryFleetStore>, AvailabilityService) {
        let store = Arc::new(MemoryFleetStore::new());
        let service = AvailabilityService::new(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn test_awaiting_ceman_keeps_vehicle_available() {
        let (store, service) = setup().await;
        let v = vehicle("ABT-01", None);
        store.insert_vehicle(v.clone()).await;
        store
            .insert_maintenance(maintenance(
                v.id,
                MaintenanceStatus::AwaitingCeman,
                Some(fixed_now() - Duration::days(60)),
                Some("CEMAN"),
            ))
            .await
            .unwrap();

        let status = service.maintenance_status(v.id).await.unwrap();
        assert!(!status.in_maintenance);
        assert_eq!(status.maintenance_location, None);
    }

    #[tokio::test]
    async fn test_in_progress_surfaces_location() {
        let (store, service) = setup().await;
        let v = vehicle("ABT-02", None);
        store.insert_vehicle(v.clone()).await;
        store
            .insert_maintenance(maintenance(
                v.id,
                MaintenanceStatus::InProgress,
                None,
                Some("Oficina Central"),
            ))
            .await
            .unwrap();

        let status = service.maintenance_status(v.id).await.unwrap();
        assert!(status.in_maintenance);
        assert_eq!(status.maintenance_location.as_deref(), Some("Oficina Central"));
    }

    #[tokio::test]
    async fn test_completed_records_do_not_count() {
        let (store, service) = setup().await;
        let v = vehicle("ABT-03", None);
        store.insert_vehicle(v.clone()).await;
        for status in [MaintenanceStatus::Completed, MaintenanceStatus::Cancelled] {
            store
                .insert_maintenance(maintenance(v.id, status, None, None))
                .await
                .unwrap();
        }

        assert_eq!(
            service.maintenance_status(v.id).await.unwrap(),
            MaintenanceAvailability::default()
        );
    }

    #[tokio::test]
    async fn test_current_km_defaults_to_zero() {
        let (store, service) = setup().await;
        let v = vehicle("ABT-04", None);
        store.insert_vehicle(v.clone()).await;

        assert_eq!(service.current_km(v.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_current_km_uses_latest_inserted_reading() {
        let (store, service) = setup().await;
        let v = vehicle("ABT-05", None);
        let other = vehicle("ABT-06", None);
        store.insert_vehicle(v.clone()).await;
        store.insert_vehicle(other.clone()).await;

        store.insert_reading(reading(v.id, 12_000)).await.unwrap();
        store.insert_reading(reading(v.id, 12_450)).await.unwrap();
        store.insert_reading(reading(other.id, 99_000)).await.unwrap();

        assert_eq!(service.current_km(v.id).await.unwrap(), 12_450);
    }
}

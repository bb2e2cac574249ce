use crate::dto::vehicle_dto::{CurrentKmResponse, ReadingListQuery, VehicleListQuery};
use crate::models::{Vehicle, VehicleReading};
use crate::repositories::FleetStore;
use crate::services::{AvailabilityService, FleetStats, VehicleDetails, VehicleService};
use crate::utils::errors::{not_found_error, AppError};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct VehicleController {
    store: Arc<dyn FleetStore>,
    service: VehicleService,
    availability: AvailabilityService,
}

impl VehicleController {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self {
            service: VehicleService::new(store.clone()),
            availability: AvailabilityService::new(store.clone()),
            store,
        }
    }

    async fn require_vehicle(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.store
            .find_vehicle(id)
            .await?
            .ok_or_else(|| not_found_error("Viatura", &id.to_string()))
    }

    pub async fn list(&self, query: VehicleListQuery) -> Result<Vec<VehicleDetails>, AppError> {
        self.service.list_details(query.into()).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleDetails, AppError> {
        self.service
            .get_details(id)
            .await?
            .ok_or_else(|| not_found_error("Viatura", &id.to_string()))
    }

    pub async fn stats(&self) -> Result<FleetStats, AppError> {
        self.service.fleet_stats().await
    }

    pub async fn readings(&self, id: Uuid, query: ReadingListQuery) -> Result<Vec<VehicleReading>, AppError> {
        query.validate()?;
        self.require_vehicle(id).await?;
        self.store.list_readings(id, query.limit).await
    }

    pub async fn latest_reading(&self, id: Uuid) -> Result<Option<VehicleReading>, AppError> {
        self.require_vehicle(id).await?;
        self.store.latest_reading(id).await
    }

    pub async fn current_km(&self, id: Uuid) -> Result<CurrentKmResponse, AppError> {
        self.require_vehicle(id).await?;
        let current_km = self.availability.current_km(id).await?;

        Ok(CurrentKmResponse {
            vehicle_id: id,
            current_km,
        })
    }
}

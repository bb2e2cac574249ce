use crate::dto::reading_dto::CreateReadingRequest;
use crate::dto::ApiResponse;
use crate::models::{NewVehicleReading, VehicleReading};
use crate::repositories::FleetStore;
use crate::utils::errors::{not_found_error, AppError};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct ReadingController {
    store: Arc<dyn FleetStore>,
}

impl ReadingController {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        request: CreateReadingRequest,
    ) -> Result<ApiResponse<VehicleReading>, AppError> {
        request.validate()?;

        self.store
            .find_vehicle(request.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Viatura", &request.vehicle_id.to_string()))?;

        // El almacén rechaza lecturas que retroceden el odómetro
        let reading = self
            .store
            .insert_reading(NewVehicleReading {
                vehicle_id: request.vehicle_id,
                km_reading: request.km_reading,
                reading_date: request.reading_date.unwrap_or_else(Utc::now),
                recorded_by: request.recorded_by,
                notes: request.notes,
            })
            .await?;

        info!("📏 Leitura registrada: viatura {} em {} km", reading.vehicle_id, reading.km_reading);

        Ok(ApiResponse::success_with_message(reading, "Leitura registrada com sucesso"))
    }
}

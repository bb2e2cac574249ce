use crate::dto::maintenance_dto::{CreateMaintenanceRequest, UpdateMaintenanceStatusRequest};
use crate::dto::ApiResponse;
use crate::models::MaintenanceRecord;
use crate::repositories::FleetStore;
use crate::utils::errors::{not_found_error, AppError};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

pub struct MaintenanceController {
    store: Arc<dyn FleetStore>,
}

impl MaintenanceController {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<MaintenanceRecord, AppError> {
        self.store
            .find_maintenance(id)
            .await?
            .ok_or_else(|| not_found_error("Manutenção", &id.to_string()))
    }

    pub async fn create(
        &self,
        request: CreateMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceRecord>, AppError> {
        request.validate()?;

        self.store
            .find_vehicle(request.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Viatura", &request.vehicle_id.to_string()))?;

        // Un solo registro `in_progress` por viatura; lo garantiza el almacén
        let vehicle_id = request.vehicle_id;
        let record = self
            .store
            .insert_maintenance(request.into())
            .await
            .map_err(|err| log_rejected_activation(vehicle_id, err))?;

        info!("🔧 Manutenção {} criada para viatura {}", record.id, record.vehicle_id);

        Ok(ApiResponse::success_with_message(record, "Manutenção registrada com sucesso"))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateMaintenanceStatusRequest,
    ) -> Result<ApiResponse<MaintenanceRecord>, AppError> {
        let record = self
            .store
            .update_maintenance_status(id, request.status, Utc::now())
            .await
            .map_err(|err| log_rejected_activation(id, err))?;

        info!("🔧 Manutenção {} agora em {:?}", record.id, record.status);

        Ok(ApiResponse::success(record))
    }
}

fn log_rejected_activation(id: Uuid, err: AppError) -> AppError {
    if matches!(err, AppError::Conflict(_)) {
        warn!("🚫 Manutenção recusada para {}: já existe outra em andamento", id);
    }
    err
}

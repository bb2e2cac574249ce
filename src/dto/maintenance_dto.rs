use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::{MaintenanceKind, MaintenanceStatus, NewMaintenanceRecord};

// Request para crear un registro de mantenimiento
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    pub vehicle_id: Uuid,
    pub kind: MaintenanceKind,
    pub status: MaintenanceStatus,
    pub sei_process_number: Option<String>,
    pub sent_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
    pub location: Option<String>,

    #[validate(range(min = 0))]
    pub km_at_maintenance: i64,

    #[validate(length(min = 1))]
    pub description: String,

    pub notes: Option<String>,
}

impl From<CreateMaintenanceRequest> for NewMaintenanceRecord {
    fn from(request: CreateMaintenanceRequest) -> Self {
        Self {
            vehicle_id: request.vehicle_id,
            kind: request.kind,
            status: request.status,
            sei_process_number: request.sei_process_number,
            sent_date: request.sent_date,
            return_date: request.return_date,
            location: request.location,
            km_at_maintenance: request.km_at_maintenance,
            description: request.description,
            notes: request.notes,
        }
    }
}

// Request para cambiar el estado
#[derive(Debug, Deserialize)]
pub struct UpdateMaintenanceStatusRequest {
    pub status: MaintenanceStatus,
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ServiceKind;
use crate::services::VehicleFilter;

// Query del listado de viaturas
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VehicleListQuery {
    pub service: Option<ServiceKind>,
    pub in_maintenance: Option<bool>,
}

impl From<VehicleListQuery> for VehicleFilter {
    fn from(query: VehicleListQuery) -> Self {
        Self {
            service: query.service,
            in_maintenance: query.in_maintenance,
        }
    }
}

// Query del historial de lecturas
#[derive(Debug, Deserialize, Validate, Default)]
pub struct ReadingListQuery {
    #[validate(range(min = 0))]
    pub limit: Option<i64>,
}

// Response del kilometraje actual
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentKmResponse {
    pub vehicle_id: Uuid,
    pub current_km: i64,
}

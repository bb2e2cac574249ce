use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

// Request para registrar una lectura de odómetro
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReadingRequest {
    pub vehicle_id: Uuid,

    #[validate(range(min = 0))]
    pub km_reading: i64,

    pub reading_date: Option<DateTime<Utc>>,

    #[validate(length(max = 120))]
    pub recorded_by: Option<String>,

    pub notes: Option<String>,
}

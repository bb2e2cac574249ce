//! Modelo de MaintenanceRecord
//!
//! Registros de mantenimiento preventivo y correctivo. Solo el estado
//! `in_progress` deja una viatura indisponible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de mantenimiento - mapea al ENUM maintenance_kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "maintenance_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceKind {
    Preventive,
    Corrective,
}

/// Estado del mantenimiento - mapea al ENUM maintenance_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "maintenance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    /// Esperando piezas o papeleo en el CEMAN; la viatura sigue disponible
    AwaitingCeman,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub kind: MaintenanceKind,
    pub status: MaintenanceStatus,
    pub sei_process_number: Option<String>,
    pub sent_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub km_at_maintenance: i64,
    pub description: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos para insertar un registro de mantenimiento
#[derive(Debug, Clone)]
pub struct NewMaintenanceRecord {
    pub vehicle_id: Uuid,
    pub kind: MaintenanceKind,
    pub status: MaintenanceStatus,
    pub sei_process_number: Option<String>,
    pub sent_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub km_at_maintenance: i64,
    pub description: String,
    pub notes: Option<String>,
}

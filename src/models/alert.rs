//! Modelo de Alert
//!
//! Alertas derivadas: se calculan en cada consulta y nunca se persisten.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    MaintenanceOverdue,
    MaintenanceSoon,
    InMaintenanceTooLong,
}

/// Severidad de una alerta.
///
/// Las variantes están declaradas en orden de prioridad, así que el `Ord`
/// derivado es exactamente critical < high < medium < low.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    High,
    Medium,
    /// Ninguna regla actual la emite
    Low,
}

impl AlertSeverity {
    pub fn rank(self) -> u8 {
        match self {
            AlertSeverity::Critical => 0,
            AlertSeverity::High => 1,
            AlertSeverity::Medium => 2,
            AlertSeverity::Low => 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub vehicle_id: Uuid,
    pub vehicle_prefix: String,
    pub vehicle_plate: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub message: String,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_km: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_maintenance_km: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_in_maintenance: Option<i64>,
}

/// Conteo de alertas por severidad para el dashboard
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlertSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub has_alerts: bool,
}

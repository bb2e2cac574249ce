//! Motor de alertas de mantenimiento
//!
//! Recorre toda la frota en cada consulta y genera las alertas ordenadas por
//! severidad. Evalúa una única foto del almacén (`FleetSnapshot`), así que una
//! escritura concurrente no puede quedar a medias dentro de la lista. No guarda
//! estado ni escribe nada: dos llamadas con la misma base y el mismo `now`
//! devuelven exactamente la misma lista.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{
    Alert, AlertKind, AlertSeverity, AlertSummary, MaintenanceRecord, Vehicle, VehicleReading,
};
use crate::repositories::FleetStore;
use crate::utils::errors::AppResult;

pub const MS_PER_DAY: i64 = 86_400_000;

/// Días en mantenimiento a partir de los cuales se alerta (estrictamente mayor)
pub const MAX_DAYS_IN_MAINTENANCE: i64 = 30;

/// Distancia que separa "vencida" de "muy atrasada" y ventana de "próxima"
pub const KM_MARGIN: i64 = 1_000;

/// Días completos transcurridos desde el envío a mantenimiento
pub fn days_in_maintenance(sent_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - sent_date).num_milliseconds().div_euclid(MS_PER_DAY)
}

/// Clasifica los km restantes hasta la revisión.
///
/// Umbrales disjuntos evaluados en orden; más de 1000 km restantes no alerta.
pub fn classify_km_distance(km_until_maintenance: i64) -> Option<(AlertKind, AlertSeverity)> {
    if km_until_maintenance < -KM_MARGIN {
        Some((AlertKind::MaintenanceOverdue, AlertSeverity::Critical))
    } else if km_until_maintenance < 0 {
        Some((AlertKind::MaintenanceOverdue, AlertSeverity::High))
    } else if km_until_maintenance <= KM_MARGIN {
        Some((AlertKind::MaintenanceSoon, AlertSeverity::Medium))
    } else {
        None
    }
}

fn base_alert(vehicle: &Vehicle, kind: AlertKind, severity: AlertSeverity) -> Alert {
    Alert {
        vehicle_id: vehicle.id,
        vehicle_prefix: vehicle.operational_prefix.clone(),
        vehicle_plate: vehicle.plate.clone(),
        kind,
        severity,
        message: String::new(),
        details: String::new(),
        current_km: None,
        next_maintenance_km: None,
        days_in_maintenance: None,
    }
}

fn too_long_alert(vehicle: &Vehicle, active: &MaintenanceRecord, now: DateTime<Utc>) -> Option<Alert> {
    let sent_date = active.sent_date?;
    let days = days_in_maintenance(sent_date, now);
    if days <= MAX_DAYS_IN_MAINTENANCE {
        return None;
    }

    let mut alert = base_alert(vehicle, AlertKind::InMaintenanceTooLong, AlertSeverity::High);
    alert.message = "Viatura em manutenção há muito tempo".to_string();
    alert.details = format!("Em manutenção há {} dias", days);
    alert.days_in_maintenance = Some(days);
    Some(alert)
}

fn distance_alert(vehicle: &Vehicle, next_maintenance_km: i64, current_km: i64) -> Option<Alert> {
    let km_until = next_maintenance_km - current_km;
    let (kind, severity) = classify_km_distance(km_until)?;

    let mut alert = base_alert(vehicle, kind, severity);
    alert.message = match severity {
        AlertSeverity::Critical => "Manutenção preventiva muito atrasada",
        AlertSeverity::High => "Manutenção preventiva vencida",
        _ => "Manutenção preventiva próxima",
    }
    .to_string();
    alert.details = if km_until < 0 {
        format!("{} km acima da próxima revisão", km_until.abs())
    } else {
        format!("Faltam {} km para a próxima revisão", km_until)
    };
    alert.current_km = Some(current_km);
    alert.next_maintenance_km = Some(next_maintenance_km);
    Some(alert)
}

/// Alertas de una viatura a partir de los datos ya resueltos.
///
/// Ambos chequeos son independientes: una viatura puede generar los dos.
pub fn evaluate_vehicle(
    vehicle: &Vehicle,
    active_maintenance: Option<&MaintenanceRecord>,
    latest_reading: Option<&VehicleReading>,
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if let Some(alert) = active_maintenance.and_then(|record| too_long_alert(vehicle, record, now)) {
        alerts.push(alert);
    }

    if let (Some(next_km), Some(reading)) = (vehicle.maintenance_threshold(), latest_reading) {
        if let Some(alert) = distance_alert(vehicle, next_km, reading.km_reading) {
            alerts.push(alert);
        }
    }

    alerts
}

/// Orden estable por severidad: los empates conservan el orden de inserción
pub fn sort_by_severity(alerts: &mut [Alert]) {
    alerts.sort_by_key(|alert| alert.severity);
}

pub fn summarize(alerts: &[Alert]) -> AlertSummary {
    let count = |severity: AlertSeverity| alerts.iter().filter(|a| a.severity == severity).count();

    AlertSummary {
        total: alerts.len(),
        critical: count(AlertSeverity::Critical),
        high: count(AlertSeverity::High),
        medium: count(AlertSeverity::Medium),
        has_alerts: !alerts.is_empty(),
    }
}

#[derive(Clone)]
pub struct AlertService {
    store: Arc<dyn FleetStore>,
}

impl AlertService {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    pub async fn maintenance_alerts(&self, now: DateTime<Utc>) -> AppResult<Vec<Alert>> {
        let snapshot = self.store.snapshot().await?;
        let mut alerts = Vec::new();

        for vehicle in &snapshot.vehicles {
            alerts.extend(evaluate_vehicle(
                vehicle,
                snapshot.active_maintenance(vehicle.id),
                snapshot.latest_reading(vehicle.id),
                now,
            ));
        }

        sort_by_severity(&mut alerts);

        debug!(
            "🔔 {} alertas calculadas sobre {} viaturas",
            alerts.len(),
            snapshot.vehicles.len()
        );

        Ok(alerts)
    }

    pub async fn alerts_summary(&self, now: DateTime<Utc>) -> AppResult<AlertSummary> {
        let alerts = self.maintenance_alerts(now).await?;
        Ok(summarize(&alerts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MaintenanceStatus;
    use crate::repositories::MemoryFleetStore;
    use crate::test_support::{fixed_now, maintenance, reading, vehicle, InterleavingStore};
    use chrono::Duration;

    async fn setup() -> (Arc<MemoryFleetStore>, AlertService) {
        let store = Arc::new(MemoryFleetStore::new());
        let service = AlertService::new(store.clone());
        (store, service)
    }

    /// Viatura con umbral y una lectura tal que faltan `km_until` km
    async fn vehicle_with_distance(store: &MemoryFleetStore, prefix: &str, km_until: i64) -> Vehicle {
        let v = vehicle(prefix, Some(50_000));
        store.insert_vehicle(v.clone()).await;
        store
            .insert_reading(reading(v.id, 50_000 - km_until))
            .await
            .unwrap();
        v
    }

    #[test]
    fn test_classification_boundaries() {
        use AlertKind::*;
        use AlertSeverity::*;

        assert_eq!(classify_km_distance(-1001), Some((MaintenanceOverdue, Critical)));
        assert_eq!(classify_km_distance(-1000), Some((MaintenanceOverdue, High)));
        assert_eq!(classify_km_distance(-1), Some((MaintenanceOverdue, High)));
        assert_eq!(classify_km_distance(0), Some((MaintenanceSoon, Medium)));
        assert_eq!(classify_km_distance(1000), Some((MaintenanceSoon, Medium)));
        assert_eq!(classify_km_distance(1001), None);
    }

    #[test]
    fn test_days_in_maintenance_floors() {
        let now = fixed_now();
        assert_eq!(days_in_maintenance(now - Duration::days(40), now), 40);
        assert_eq!(
            days_in_maintenance(now - Duration::days(31) + Duration::seconds(1), now),
            30
        );
        assert_eq!(days_in_maintenance(now + Duration::hours(1), now), -1);
    }

    #[tokio::test]
    async fn test_maintenance_soon_scenario() {
        let (store, service) = setup().await;
        let v = vehicle("ABT-10", Some(50_000));
        store.insert_vehicle(v.clone()).await;
        store.insert_reading(reading(v.id, 49_500)).await.unwrap();

        let alerts = service.maintenance_alerts(fixed_now()).await.unwrap();

        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.kind, AlertKind::MaintenanceSoon);
        assert_eq!(alert.severity, AlertSeverity::Medium);
        assert_eq!(alert.details, "Faltam 500 km para a próxima revisão");
        assert_eq!(alert.current_km, Some(49_500));
        assert_eq!(alert.next_maintenance_km, Some(50_000));
        assert_eq!(alert.vehicle_prefix, "ABT-10");
    }

    #[tokio::test]
    async fn test_in_maintenance_too_long_scenario() {
        let (store, service) = setup().await;
        let now = fixed_now();
        let v = vehicle("ABT-11", None);
        store.insert_vehicle(v.clone()).await;
        store
            .insert_maintenance(maintenance(
                v.id,
                MaintenanceStatus::InProgress,
                Some(now - Duration::days(40)),
                Some("CEMAN"),
            ))
            .await
            .unwrap();

        let alerts = service.maintenance_alerts(now).await.unwrap();

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::InMaintenanceTooLong);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
        assert_eq!(alerts[0].days_in_maintenance, Some(40));
        assert_eq!(alerts[0].details, "Em manutenção há 40 dias");
    }

    #[tokio::test]
    async fn test_thirty_days_is_not_too_long() {
        let (store, service) = setup().await;
        let now = fixed_now();
        let v = vehicle("ABT-12", None);
        store.insert_vehicle(v.clone()).await;
        store
            .insert_maintenance(maintenance(
                v.id,
                MaintenanceStatus::InProgress,
                Some(now - Duration::days(30)),
                None,
            ))
            .await
            .unwrap();

        assert!(service.maintenance_alerts(now).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_awaiting_ceman_does_not_count_as_too_long() {
        let (store, service) = setup().await;
        let now = fixed_now();
        let v = vehicle("ABT-13", None);
        store.insert_vehicle(v.clone()).await;
        store
            .insert_maintenance(maintenance(
                v.id,
                MaintenanceStatus::AwaitingCeman,
                Some(now - Duration::days(90)),
                None,
            ))
            .await
            .unwrap();

        assert!(service.maintenance_alerts(now).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_active_maintenance_without_sent_date_is_skipped() {
        let (store, service) = setup().await;
        let v = vehicle("ABT-14", None);
        store.insert_vehicle(v.clone()).await;
        store
            .insert_maintenance(maintenance(v.id, MaintenanceStatus::InProgress, None, None))
            .await
            .unwrap();

        assert!(service.maintenance_alerts(fixed_now()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_threshold_without_readings_emits_nothing() {
        let (store, service) = setup().await;
        store.insert_vehicle(vehicle("ABT-15", Some(1_000))).await;

        assert!(service.maintenance_alerts(fixed_now()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_readings_without_threshold_emit_nothing() {
        let (store, service) = setup().await;
        let v = vehicle("ABT-16", None);
        store.insert_vehicle(v.clone()).await;
        store.insert_reading(reading(v.id, 250_000)).await.unwrap();

        assert!(service.maintenance_alerts(fixed_now()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_vehicle_can_raise_both_alert_kinds() {
        let (store, service) = setup().await;
        let now = fixed_now();
        let v = vehicle_with_distance(&store, "ABT-17", -200).await;
        store
            .insert_maintenance(maintenance(
                v.id,
                MaintenanceStatus::InProgress,
                Some(now - Duration::days(45)),
                None,
            ))
            .await
            .unwrap();

        let alerts = service.maintenance_alerts(now).await.unwrap();
        let kinds: Vec<AlertKind> = alerts.iter().map(|a| a.kind).collect();

        assert_eq!(
            kinds,
            vec![AlertKind::InMaintenanceTooLong, AlertKind::MaintenanceOverdue]
        );
        assert_eq!(alerts[1].details, "200 km acima da próxima revisão");
    }

    #[tokio::test]
    async fn test_alerts_sorted_by_severity_with_stable_ties() {
        let (store, service) = setup().await;
        let soon_a = vehicle_with_distance(&store, "ABT-20", 800).await;
        let overdue = vehicle_with_distance(&store, "ABT-21", -10).await;
        let critical = vehicle_with_distance(&store, "ABT-22", -5_000).await;
        let soon_b = vehicle_with_distance(&store, "ABT-23", 100).await;
        vehicle_with_distance(&store, "ABT-24", 5_000).await;

        let alerts = service.maintenance_alerts(fixed_now()).await.unwrap();
        let ids: Vec<_> = alerts.iter().map(|a| a.vehicle_id).collect();

        assert_eq!(ids, vec![critical.id, overdue.id, soon_a.id, soon_b.id]);
        assert!(alerts
            .windows(2)
            .all(|pair| pair[0].severity.rank() <= pair[1].severity.rank()));
    }

    #[tokio::test]
    async fn test_repeated_calls_are_identical() {
        let (store, service) = setup().await;
        for (i, km_until) in [300, -50, -3_000, 700, 999].into_iter().enumerate() {
            vehicle_with_distance(&store, &format!("ABT-3{}", i), km_until).await;
        }

        let first = service.maintenance_alerts(fixed_now()).await.unwrap();
        let second = service.maintenance_alerts(fixed_now()).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_summary_matches_alert_list() {
        let (store, service) = setup().await;
        vehicle_with_distance(&store, "ABT-40", -2_000).await;
        vehicle_with_distance(&store, "ABT-41", -1).await;
        vehicle_with_distance(&store, "ABT-42", 0).await;
        vehicle_with_distance(&store, "ABT-43", 1_000).await;

        let now = fixed_now();
        let alerts = service.maintenance_alerts(now).await.unwrap();
        let summary = service.alerts_summary(now).await.unwrap();

        assert_eq!(summary.total, alerts.len());
        assert_eq!(
            summary,
            AlertSummary {
                total: 4,
                critical: 1,
                high: 1,
                medium: 2,
                has_alerts: true,
            }
        );
    }

    #[tokio::test]
    async fn test_empty_fleet_has_no_alerts() {
        let (_store, service) = setup().await;
        let summary = service.alerts_summary(fixed_now()).await.unwrap();

        assert_eq!(summary, AlertSummary::default());
        assert!(!summary.has_alerts);
    }

    #[test]
    fn test_summary_excludes_low_from_named_counts() {
        let v = vehicle("ABT-50", None);
        let mut low = base_alert(&v, AlertKind::MaintenanceSoon, AlertSeverity::Low);
        low.message = "baixa".to_string();
        let high = base_alert(&v, AlertKind::MaintenanceOverdue, AlertSeverity::High);

        let summary = summarize(&[low, high]);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.critical + summary.high + summary.medium, 1);
    }

    #[tokio::test]
    async fn test_alerts_come_from_a_single_snapshot() {
        let store = Arc::new(InterleavingStore::new());
        let now = fixed_now();
        let v = vehicle_with_distance(&store.inner, "ABT-40", -1_500).await;
        store
            .inner
            .insert_maintenance(maintenance(
                v.id,
                MaintenanceStatus::InProgress,
                Some(now - Duration::days(35)),
                None,
            ))
            .await
            .unwrap();
        let service = AlertService::new(store.clone());

        let alerts = service.maintenance_alerts(now).await.unwrap();

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
        assert_eq!(store.point_reads(), 0);
    }
}

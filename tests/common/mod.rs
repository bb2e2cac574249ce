#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use giro::config::{EnvironmentConfig, StoreBackend};
use giro::models::{OwnershipKind, Personnel, ServiceKind, Vehicle, VehicleType};
use giro::repositories::MemoryFleetStore;
use giro::{create_app_router, AppState};

pub struct TestApp {
    pub store: Arc<MemoryFleetStore>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(EnvironmentConfig {
            store_backend: StoreBackend::Memory,
            ..EnvironmentConfig::default()
        })
    }

    pub fn with_config(config: EnvironmentConfig) -> Self {
        let store = Arc::new(MemoryFleetStore::new());
        let router = create_app_router(AppState::new(store.clone(), config));
        Self { store, router }
    }

    /// Petición cruda; devuelve la respuesta completa para inspeccionar cabeceras
    pub async fn raw(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn seed_type(&self) -> VehicleType {
        let vehicle_type = VehicleType {
            id: Uuid::new_v4(),
            name: "ABT".to_string(),
            description: "Auto Bomba Tanque".to_string(),
            km_interval: Some(10_000),
            time_interval_days: Some(180),
        };
        self.store.insert_vehicle_type(vehicle_type.clone()).await;
        vehicle_type
    }

    pub async fn seed_vehicle(
        &self,
        prefix: &str,
        type_id: Uuid,
        service: ServiceKind,
        next_maintenance_km: Option<i64>,
    ) -> Vehicle {
        let created = Utc::now() - Duration::days(365);
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            plate: format!("PLT-{}", prefix),
            chassis_number: format!("CHS-{}", prefix),
            renavam: format!("REN-{}", prefix),
            operational_prefix: prefix.to_string(),
            brand: "Mercedes-Benz".to_string(),
            model: "Atego 1729".to_string(),
            year: 2020,
            type_id,
            ownership: OwnershipKind::Owned,
            service,
            next_maintenance_km,
            created_at: created,
            updated_at: created,
        };
        self.store.insert_vehicle(vehicle.clone()).await;
        vehicle
    }

    pub async fn seed_personnel(&self, name: &str) -> Personnel {
        let created = Utc::now() - Duration::days(30);
        let personnel = Personnel {
            id: Uuid::new_v4(),
            rank: "Cb".to_string(),
            rg: 45_678,
            name: name.to_string(),
            active: true,
            created_at: created,
            updated_at: created,
        };
        self.store.insert_personnel(personnel.clone()).await;
        personnel
    }

    /// Registra una lectura por la API y verifica que fue aceptada
    pub async fn record_km(&self, vehicle_id: Uuid, km: i64) {
        let (status, body) = self
            .post(
                "/api/readings",
                serde_json::json!({ "vehicleId": vehicle_id, "kmReading": km }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
    }
}

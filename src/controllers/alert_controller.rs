use crate::models::{Alert, AlertSummary};
use crate::repositories::FleetStore;
use crate::services::AlertService;
use crate::utils::errors::AppError;
use chrono::Utc;
use std::sync::Arc;

pub struct AlertController {
    service: AlertService,
}

impl AlertController {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self {
            service: AlertService::new(store),
        }
    }

    pub async fn maintenance_alerts(&self) -> Result<Vec<Alert>, AppError> {
        self.service.maintenance_alerts(Utc::now()).await
    }

    pub async fn alerts_summary(&self) -> Result<AlertSummary, AppError> {
        self.service.alerts_summary(Utc::now()).await
    }
}

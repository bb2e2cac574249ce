use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use giro::config::{DatabaseConfig, EnvironmentConfig, StoreBackend};
use giro::repositories::{FleetStore, MemoryFleetStore, PgFleetStore};
use giro::{create_app_router, database, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("giro=debug,tower_http=info")),
        )
        .init();

    info!("🚒 GIRO - Controle de Frota");
    info!("==========================");

    let config = EnvironmentConfig::from_env()?;
    info!("⚙️ Entorno: {}", config.environment);

    let store: Arc<dyn FleetStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = match database::connect(&db_config).await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {:#}", e);
                    return Err(e);
                }
            };
            Arc::new(PgFleetStore::new(pool))
        }
        StoreBackend::Memory => {
            info!("🧪 Usando almacén en memoria (los datos se pierden al reiniciar)");
            Arc::new(MemoryFleetStore::new())
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app_router(AppState::new(store, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET   /health");
    info!("🚨 Alertas:");
    info!("   GET   /api/alerts");
    info!("   GET   /api/alerts/summary");
    info!("🚗 Viaturas:");
    info!("   GET   /api/vehicles");
    info!("   GET   /api/vehicles/stats");
    info!("   GET   /api/vehicles/:id");
    info!("   GET   /api/vehicles/:id/readings");
    info!("   GET   /api/vehicles/:id/readings/latest");
    info!("   GET   /api/vehicles/:id/current-km");
    info!("📏 Leituras / Guarita / Manutenção:");
    info!("   POST  /api/readings");
    info!("   POST  /api/movements");
    info!("   POST  /api/movements/:id/arrival");
    info!("   GET   /api/movements/in-transit");
    info!("   POST  /api/maintenance");
    info!("   PATCH /api/maintenance/:id/status");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}

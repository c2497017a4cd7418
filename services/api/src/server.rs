use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredStore};
use crate::routes::with_operations_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use horeca_ops::config::AppConfig;
use horeca_ops::error::AppError;
use horeca_ops::telemetry;
use horeca_ops::workflows::OperationsService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(ConfiguredStore::from_config(&config.store));
    let store_label = store.describe();
    let service = Arc::new(OperationsService::new(
        store,
        config.pricing,
        config.notify.clone(),
    ));

    let app = with_operations_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, store = %store_label, "horeca operations service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

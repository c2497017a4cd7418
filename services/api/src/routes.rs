use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use horeca_ops::store::RowStore;
use horeca_ops::workflows::haccp::Equipment;
use horeca_ops::workflows::shifts::ShiftRole;
use horeca_ops::workflows::{operations_router, OperationsService};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct EquipmentOption {
    pub(crate) key: Equipment,
    pub(crate) label: &'static str,
    pub(crate) max_safe_celsius: Decimal,
}

#[derive(Debug, Serialize)]
pub(crate) struct RoleOption {
    pub(crate) key: ShiftRole,
    pub(crate) label: &'static str,
}

/// Choices the entry forms offer, in display order.
#[derive(Debug, Serialize)]
pub(crate) struct FormReference {
    pub(crate) equipment: Vec<EquipmentOption>,
    pub(crate) roles: Vec<RoleOption>,
}

pub(crate) fn with_operations_routes<S>(service: Arc<OperationsService<S>>) -> axum::Router
where
    S: RowStore + 'static,
{
    operations_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/reference", axum::routing::get(reference_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn reference_endpoint() -> Json<FormReference> {
    let equipment = Equipment::ordered()
        .into_iter()
        .map(|key| EquipmentOption {
            key,
            label: key.label(),
            max_safe_celsius: key.max_safe_celsius(),
        })
        .collect();
    let roles = ShiftRole::ordered()
        .into_iter()
        .map(|key| RoleOption {
            key,
            label: key.label(),
        })
        .collect();

    Json(FormReference { equipment, roles })
}

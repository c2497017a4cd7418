use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use super::cash::{CashClosing, Outflow};
use super::haccp::TemperatureSubmission;
use super::records::{Table, TableSnapshot};
use super::service::{CashClosingReceipt, OperationsService, ShiftReceipt, TemperatureReceipt};
use super::shifts::{ShiftAssignment, ShiftRole};
use super::wine::{WineMarginInput, WineMarginReport};
use crate::error::AppError;
use crate::store::RowStore;

pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Router builder exposing the four operations forms over JSON.
pub fn operations_router<S>(service: Arc<OperationsService<S>>) -> Router
where
    S: RowStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/haccp/readings",
            post(record_temperature_handler::<S>).get(recent_temperatures_handler::<S>),
        )
        .route(
            "/api/v1/haccp/session",
            get(session_handler::<S>).delete(clear_session_handler::<S>),
        )
        .route(
            "/api/v1/cash/closings",
            post(close_cash_handler::<S>).get(recent_closings_handler::<S>),
        )
        .route("/api/v1/wine/margin", post(wine_margin_handler::<S>))
        .route(
            "/api/v1/shifts",
            post(assign_shift_handler::<S>).get(recent_shifts_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

impl RecentQuery {
    fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_RECENT_LIMIT)
    }
}

/// Cash closing form; the date defaults to today.
#[derive(Debug, Clone, Deserialize)]
pub struct CashClosingRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub responsible: String,
    pub cash_income: Decimal,
    pub pos_income: Decimal,
    #[serde(default)]
    pub outflows: Vec<Outflow>,
    #[serde(default)]
    pub notes: String,
}

impl CashClosingRequest {
    pub fn into_closing(self, today: NaiveDate) -> CashClosing {
        CashClosing {
            date: self.date.unwrap_or(today),
            responsible: self.responsible,
            cash_income: self.cash_income,
            pos_income: self.pos_income,
            outflows: self.outflows,
            notes: self.notes,
        }
    }
}

/// Shift planner form; the date defaults to today.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub employee_name: String,
    pub role: ShiftRole,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub phone_number: String,
}

impl ShiftRequest {
    pub fn into_assignment(self, today: NaiveDate) -> ShiftAssignment {
        ShiftAssignment {
            date: self.date.unwrap_or(today),
            employee_name: self.employee_name,
            role: self.role,
            start_time: self.start_time,
            end_time: self.end_time,
            phone_number: self.phone_number,
        }
    }
}

pub(crate) async fn record_temperature_handler<S>(
    State(service): State<Arc<OperationsService<S>>>,
    Json(submission): Json<TemperatureSubmission>,
) -> Result<(StatusCode, Json<TemperatureReceipt>), AppError>
where
    S: RowStore + 'static,
{
    let receipt = service.record_temperature(submission, Local::now().naive_local())?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub(crate) async fn session_handler<S>(
    State(service): State<Arc<OperationsService<S>>>,
) -> Json<serde_json::Value>
where
    S: RowStore + 'static,
{
    let readings = service.session_readings();
    Json(json!({ "readings": readings }))
}

pub(crate) async fn clear_session_handler<S>(
    State(service): State<Arc<OperationsService<S>>>,
) -> Json<serde_json::Value>
where
    S: RowStore + 'static,
{
    let cleared = service.clear_session();
    Json(json!({ "cleared": cleared }))
}

pub(crate) async fn close_cash_handler<S>(
    State(service): State<Arc<OperationsService<S>>>,
    Json(request): Json<CashClosingRequest>,
) -> Result<(StatusCode, Json<CashClosingReceipt>), AppError>
where
    S: RowStore + 'static,
{
    let closing = request.into_closing(Local::now().date_naive());
    let receipt = service.close_cash(closing)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub(crate) async fn wine_margin_handler<S>(
    State(service): State<Arc<OperationsService<S>>>,
    Json(input): Json<WineMarginInput>,
) -> Json<WineMarginReport>
where
    S: RowStore + 'static,
{
    Json(service.evaluate_wine(input))
}

pub(crate) async fn assign_shift_handler<S>(
    State(service): State<Arc<OperationsService<S>>>,
    Json(request): Json<ShiftRequest>,
) -> Result<(StatusCode, Json<ShiftReceipt>), AppError>
where
    S: RowStore + 'static,
{
    let shift = request.into_assignment(Local::now().date_naive());
    let receipt = service.assign_shift(shift)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub(crate) async fn recent_temperatures_handler<S>(
    State(service): State<Arc<OperationsService<S>>>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<TableSnapshot>, AppError>
where
    S: RowStore + 'static,
{
    recent_snapshot(&service, Table::TemperatureLog, &query)
}

pub(crate) async fn recent_closings_handler<S>(
    State(service): State<Arc<OperationsService<S>>>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<TableSnapshot>, AppError>
where
    S: RowStore + 'static,
{
    recent_snapshot(&service, Table::CashClosings, &query)
}

pub(crate) async fn recent_shifts_handler<S>(
    State(service): State<Arc<OperationsService<S>>>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<TableSnapshot>, AppError>
where
    S: RowStore + 'static,
{
    recent_snapshot(&service, Table::Shifts, &query)
}

fn recent_snapshot<S>(
    service: &OperationsService<S>,
    table: Table,
    query: &RecentQuery,
) -> Result<Json<TableSnapshot>, AppError>
where
    S: RowStore + 'static,
{
    let snapshot = service.recent(table, query.limit())?;
    Ok(Json(snapshot))
}

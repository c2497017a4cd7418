use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::config::{NotifyConfig, PricingConfig};
use crate::store::{MemoryRowStore, RowStore, StoreError};
use crate::workflows::cash::{CashClosing, Outflow, OutflowCategory};
use crate::workflows::haccp::{Equipment, TemperatureSubmission};
use crate::workflows::records::{Row, RowSchema};
use crate::workflows::shifts::{ShiftAssignment, ShiftRole};
use crate::workflows::{operations_router, OperationsService};

/// Memory store that counts append attempts, including rejected ones.
#[derive(Default)]
pub(super) struct CountingStore {
    inner: MemoryRowStore,
    appends: AtomicUsize,
}

impl CountingStore {
    pub(super) fn appends(&self) -> usize {
        self.appends.load(Ordering::SeqCst)
    }
}

impl RowStore for CountingStore {
    fn append(&self, schema: &'static RowSchema, row: Row) -> Result<(), StoreError> {
        self.appends.fetch_add(1, Ordering::SeqCst);
        self.inner.append(schema, row)
    }

    fn recent(&self, schema: &'static RowSchema, limit: usize) -> Result<Vec<Row>, StoreError> {
        self.inner.recent(schema, limit)
    }
}

pub(super) struct UnavailableStore;

impl RowStore for UnavailableStore {
    fn append(&self, _schema: &'static RowSchema, _row: Row) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("spreadsheet offline".to_string()))
    }

    fn recent(&self, _schema: &'static RowSchema, _limit: usize) -> Result<Vec<Row>, StoreError> {
        Err(StoreError::Unavailable("spreadsheet offline".to_string()))
    }
}

pub(super) fn notify_config() -> NotifyConfig {
    NotifyConfig {
        messaging_uri: "https://wa.me/".to_string(),
        phone: Some("+39 333 765 4321".to_string()),
    }
}

pub(super) fn build_service() -> (OperationsService<CountingStore>, Arc<CountingStore>) {
    let store = Arc::new(CountingStore::default());
    let service = OperationsService::new(store.clone(), PricingConfig::default(), notify_config());
    (service, store)
}

pub(super) fn unavailable_service() -> OperationsService<UnavailableStore> {
    OperationsService::new(
        Arc::new(UnavailableStore),
        PricingConfig::default(),
        notify_config(),
    )
}

pub(super) fn service_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 14).expect("valid date")
}

pub(super) fn recorded_at(hour: u32, minute: u32) -> NaiveDateTime {
    service_day()
        .and_hms_opt(hour, minute, 0)
        .expect("valid timestamp")
}

pub(super) fn temperature(
    equipment: Equipment,
    celsius: &str,
    signature: &str,
) -> TemperatureSubmission {
    TemperatureSubmission {
        equipment,
        celsius: celsius.parse().expect("valid decimal"),
        operator_signature: signature.to_string(),
    }
}

pub(super) fn closing() -> CashClosing {
    CashClosing {
        date: service_day(),
        responsible: "Sara".to_string(),
        cash_income: Decimal::from(100),
        pos_income: Decimal::from(50),
        outflows: vec![
            Outflow::new(OutflowCategory::Spend, Decimal::from(10)),
            Outflow::new(OutflowCategory::Invoices, Decimal::from(5)),
            Outflow::new(OutflowCategory::Extra, Decimal::from(5)),
        ],
        notes: "fondo cassa 150".to_string(),
    }
}

pub(super) fn shift() -> ShiftAssignment {
    ShiftAssignment {
        date: service_day(),
        employee_name: "Davide".to_string(),
        role: ShiftRole::Bar,
        start_time: "18:00".to_string(),
        end_time: "02:00".to_string(),
        phone_number: "347 111 2222".to_string(),
    }
}

pub(super) fn router_with_service<S>(service: OperationsService<S>) -> axum::Router
where
    S: RowStore + 'static,
{
    operations_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

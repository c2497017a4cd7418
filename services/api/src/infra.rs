use chrono::NaiveDate;
use horeca_ops::config::StoreConfig;
use horeca_ops::store::{CsvRowStore, MemoryRowStore, RowStore, StoreError};
use horeca_ops::workflows::haccp::Equipment;
use horeca_ops::workflows::records::{Row, RowSchema};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Store chosen at startup from `HORECA_STORE_DIR`.
pub(crate) enum ConfiguredStore {
    Memory(MemoryRowStore),
    Csv(CsvRowStore),
}

impl ConfiguredStore {
    pub(crate) fn from_config(config: &StoreConfig) -> Self {
        match &config.directory {
            Some(directory) => Self::Csv(CsvRowStore::new(directory.clone())),
            None => Self::Memory(MemoryRowStore::new()),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Memory(_) => "in-memory".to_string(),
            Self::Csv(store) => format!("csv:{}", store.directory().display()),
        }
    }
}

impl RowStore for ConfiguredStore {
    fn append(&self, schema: &'static RowSchema, row: Row) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.append(schema, row),
            Self::Csv(store) => store.append(schema, row),
        }
    }

    fn recent(&self, schema: &'static RowSchema, limit: usize) -> Result<Vec<Row>, StoreError> {
        match self {
            Self::Memory(store) => store.recent(schema, limit),
            Self::Csv(store) => store.recent(schema, limit),
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_equipment(raw: &str) -> Result<Equipment, String> {
    let wanted = raw.trim().to_ascii_lowercase().replace('-', "_");
    Equipment::ordered()
        .into_iter()
        .find(|equipment| {
            serde_json::to_value(equipment)
                .ok()
                .and_then(|value| value.as_str().map(|name| name == wanted))
                .unwrap_or(false)
                || equipment.label().eq_ignore_ascii_case(raw.trim())
        })
        .ok_or_else(|| {
            format!(
                "unknown equipment '{raw}' (expected one of: beverage_fridge, meat_fridge, fish_fridge, negative_cell, bar_counter)"
            )
        })
}

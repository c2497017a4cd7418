//! Row store boundary: the only place records leave the process.

mod csv_table;
mod memory;

pub use csv_table::CsvRowStore;
pub use memory::MemoryRowStore;

use crate::workflows::records::{Row, RowSchema, RowValue};

/// Append/read access to named tables. Implementations never retry; a failed append is
/// reported once and the row is not buffered.
pub trait RowStore: Send + Sync {
    fn append(&self, schema: &'static RowSchema, row: Row) -> Result<(), StoreError>;

    /// Up to `limit` most recent rows, oldest first.
    fn recent(&self, schema: &'static RowSchema, limit: usize) -> Result<Vec<Row>, StoreError>;
}

impl<S: RowStore + ?Sized> RowStore for std::sync::Arc<S> {
    fn append(&self, schema: &'static RowSchema, row: Row) -> Result<(), StoreError> {
        (**self).append(schema, row)
    }

    fn recent(&self, schema: &'static RowSchema, limit: usize) -> Result<Vec<Row>, StoreError> {
        (**self).recent(schema, limit)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("row store unavailable: {0}")]
    Unavailable(String),
    #[error("table '{table}' does not match schema v{version}: {detail}")]
    SchemaMismatch {
        table: &'static str,
        version: u16,
        detail: String,
    },
    #[error("i/o failure on table '{table}': {source}")]
    Io {
        table: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid csv data: {0}")]
    Csv(#[from] csv::Error),
}

impl StoreError {
    pub(crate) fn mismatch(schema: &RowSchema, detail: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            table: schema.table,
            version: schema.version,
            detail: detail.into(),
        }
    }
}

pub(crate) fn ensure_conforms(schema: &RowSchema, row: &[RowValue]) -> Result<(), StoreError> {
    if schema.conforms(row) {
        Ok(())
    } else {
        Err(StoreError::mismatch(
            schema,
            format!(
                "row has {} cells or mistyped cells for {} columns",
                row.len(),
                schema.width()
            ),
        ))
    }
}

pub(crate) fn tail(mut rows: Vec<Row>, limit: usize) -> Vec<Row> {
    let skip = rows.len().saturating_sub(limit);
    rows.drain(..skip);
    rows
}

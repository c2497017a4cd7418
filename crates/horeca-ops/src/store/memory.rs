use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::{ensure_conforms, tail, RowStore, StoreError};
use crate::workflows::records::{Row, RowSchema};

type TableKey = (&'static str, u16);

/// Process-local tables; contents vanish with the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryRowStore {
    tables: Arc<Mutex<HashMap<TableKey, Vec<Row>>>>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, schema: &RowSchema) -> usize {
        let guard = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        guard
            .get(&(schema.table, schema.version))
            .map_or(0, Vec::len)
    }
}

impl RowStore for MemoryRowStore {
    fn append(&self, schema: &'static RowSchema, row: Row) -> Result<(), StoreError> {
        ensure_conforms(schema, &row)?;
        let mut guard = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        guard
            .entry((schema.table, schema.version))
            .or_default()
            .push(row);
        Ok(())
    }

    fn recent(&self, schema: &'static RowSchema, limit: usize) -> Result<Vec<Row>, StoreError> {
        let guard = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        let rows = guard
            .get(&(schema.table, schema.version))
            .cloned()
            .unwrap_or_default();
        Ok(tail(rows, limit))
    }
}

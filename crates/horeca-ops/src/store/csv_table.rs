use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::{ensure_conforms, tail, RowStore, StoreError};
use crate::workflows::records::{Row, RowSchema};

/// One CSV file per table and schema version, e.g. `cash_closings.v1.csv`.
///
/// The first line of each file is the schema header. A file whose header disagrees with the
/// schema is never appended to.
#[derive(Debug)]
pub struct CsvRowStore {
    directory: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvRowStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn table_path(&self, schema: &RowSchema) -> PathBuf {
        self.directory
            .join(format!("{}.v{}.csv", schema.table, schema.version))
    }

    fn ensure_directory(&self) -> Result<(), StoreError> {
        if self.directory.is_dir() {
            Ok(())
        } else {
            Err(StoreError::Unavailable(format!(
                "table directory {} is missing",
                self.directory.display()
            )))
        }
    }

    fn check_header(schema: &RowSchema, reader: &mut csv::Reader<File>) -> Result<(), StoreError> {
        let headers = reader.headers()?;
        let expected = schema.header();
        if headers.iter().eq(expected.iter().copied()) {
            Ok(())
        } else {
            Err(StoreError::mismatch(
                schema,
                format!(
                    "header [{}] expected [{}]",
                    headers.iter().collect::<Vec<_>>().join(", "),
                    expected.join(", ")
                ),
            ))
        }
    }

    fn open_reader(&self, schema: &RowSchema) -> Result<Option<csv::Reader<File>>, StoreError> {
        let path = self.table_path(schema);
        match File::open(&path) {
            Ok(file) => Ok(Some(
                csv::ReaderBuilder::new()
                    .has_headers(true)
                    .from_reader(file),
            )),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                table: schema.table,
                source,
            }),
        }
    }
}

impl RowStore for CsvRowStore {
    fn append(&self, schema: &'static RowSchema, row: Row) -> Result<(), StoreError> {
        ensure_conforms(schema, &row)?;
        self.ensure_directory()?;
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let path = self.table_path(schema);
        let existing_len = match std::fs::metadata(&path) {
            Ok(metadata) => metadata.len(),
            Err(err) if err.kind() == ErrorKind::NotFound => 0,
            Err(source) => {
                return Err(StoreError::Io {
                    table: schema.table,
                    source,
                })
            }
        };

        if existing_len > 0 {
            if let Some(mut reader) = self.open_reader(schema)? {
                Self::check_header(schema, &mut reader)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StoreError::Io {
                table: schema.table,
                source,
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if existing_len == 0 {
            writer.write_record(schema.header())?;
        }
        writer.write_record(row.iter().map(ToString::to_string))?;
        writer.flush().map_err(|source| StoreError::Io {
            table: schema.table,
            source,
        })?;

        debug!(table = schema.table, path = %path.display(), "row appended");
        Ok(())
    }

    fn recent(&self, schema: &'static RowSchema, limit: usize) -> Result<Vec<Row>, StoreError> {
        let Some(mut reader) = self.open_reader(schema)? else {
            return Ok(Vec::new());
        };
        Self::check_header(schema, &mut reader)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row = schema
                .parse_cells(record.iter())
                .map_err(|err| StoreError::mismatch(schema, err.to_string()))?;
            rows.push(row);
        }

        Ok(tail(rows, limit))
    }
}

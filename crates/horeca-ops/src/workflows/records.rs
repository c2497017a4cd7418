//! Typed rows for the external table store.
//!
//! Every table has a fixed, versioned column layout. Records are mapped onto it here and
//! nowhere else, so the positional shape a spreadsheet expects is defined exactly once.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::cash::{CashClosing, OutflowCategory};
use super::haccp::{celsius_text, TemperatureReading};
use super::shifts::ShiftAssignment;

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// A single cell as it travels to and from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RowValue {
    Text(String),
    Number(Decimal),
}

impl RowValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    fn kind(&self) -> ColumnKind {
        match self {
            Self::Text(_) => ColumnKind::Text,
            Self::Number(_) => ColumnKind::Number,
        }
    }
}

impl fmt::Display for RowValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowValue::Text(value) => f.write_str(value),
            RowValue::Number(value) => write!(f, "{value}"),
        }
    }
}

pub type Row = Vec<RowValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn text(name: &'static str) -> Column {
    Column {
        name,
        kind: ColumnKind::Text,
    }
}

const fn number(name: &'static str) -> Column {
    Column {
        name,
        kind: ColumnKind::Number,
    }
}

/// Column layout of one table. Bump `version` whenever `columns` changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSchema {
    pub table: &'static str,
    pub version: u16,
    pub columns: &'static [Column],
}

impl RowSchema {
    pub fn header(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.name).collect()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// True when the row has one cell per column and every cell has the column's kind.
    pub fn conforms(&self, row: &[RowValue]) -> bool {
        row.len() == self.columns.len()
            && row
                .iter()
                .zip(self.columns)
                .all(|(value, column)| value.kind() == column.kind)
    }

    /// Rebuilds a typed row from raw text cells, e.g. when reading a CSV table back.
    pub fn parse_cells<'a, I>(&self, cells: I) -> Result<Row, CellParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let cells: Vec<&str> = cells.into_iter().collect();
        if cells.len() != self.columns.len() {
            return Err(CellParseError::Width {
                expected: self.columns.len(),
                found: cells.len(),
            });
        }

        cells
            .into_iter()
            .zip(self.columns)
            .map(|(raw, column)| match column.kind {
                ColumnKind::Text => Ok(RowValue::text(raw)),
                ColumnKind::Number => raw
                    .trim()
                    .parse::<Decimal>()
                    .map(RowValue::Number)
                    .map_err(|_| CellParseError::Number {
                        column: column.name,
                        value: raw.to_string(),
                    }),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CellParseError {
    #[error("expected {expected} cells, found {found}")]
    Width { expected: usize, found: usize },
    #[error("column '{column}' holds '{value}', which is not a number")]
    Number { column: &'static str, value: String },
}

pub const TEMPERATURE_LOG: RowSchema = RowSchema {
    table: "temperature_log",
    version: 1,
    columns: &[
        text("timestamp"),
        text("equipment"),
        text("celsius"),
        text("status"),
        text("signature"),
    ],
};

pub const CASH_CLOSINGS: RowSchema = RowSchema {
    table: "cash_closings",
    version: 1,
    columns: &[
        text("date"),
        text("responsible"),
        number("cash_income"),
        number("pos_income"),
        number("outflow_spend"),
        number("outflow_invoices"),
        number("outflow_extra"),
        number("net_cash"),
        text("notes"),
    ],
};

pub const SHIFTS: RowSchema = RowSchema {
    table: "shifts",
    version: 1,
    columns: &[
        text("date"),
        text("employee_name"),
        text("role"),
        text("start_time"),
        text("end_time"),
        text("phone_number"),
    ],
};

/// Tables the operations service writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    TemperatureLog,
    CashClosings,
    Shifts,
}

impl Table {
    pub const fn schema(self) -> &'static RowSchema {
        match self {
            Self::TemperatureLog => &TEMPERATURE_LOG,
            Self::CashClosings => &CASH_CLOSINGS,
            Self::Shifts => &SHIFTS,
        }
    }
}

/// A domain record with a fixed place in the table store.
pub trait TableRecord {
    const TABLE: Table;

    fn to_row(&self) -> Row;
}

impl TableRecord for TemperatureReading {
    const TABLE: Table = Table::TemperatureLog;

    fn to_row(&self) -> Row {
        vec![
            RowValue::text(self.recorded_at.format(TIMESTAMP_FORMAT).to_string()),
            RowValue::text(self.equipment.label()),
            RowValue::text(format!("{} °C", celsius_text(self.celsius))),
            RowValue::text(self.status().label()),
            RowValue::text(self.operator_signature.trim()),
        ]
    }
}

impl TableRecord for CashClosing {
    const TABLE: Table = Table::CashClosings;

    // Totals are range-checked by `Validate` before a row is built.
    fn to_row(&self) -> Row {
        let column_total = |category| self.outflow_total(category).unwrap_or_default();
        let net_cash = self
            .reconciliation()
            .map(|totals| totals.net_cash)
            .unwrap_or_default();
        vec![
            RowValue::text(self.date.format(DATE_FORMAT).to_string()),
            RowValue::text(self.responsible.trim()),
            RowValue::Number(self.cash_income),
            RowValue::Number(self.pos_income),
            RowValue::Number(column_total(OutflowCategory::Spend)),
            RowValue::Number(column_total(OutflowCategory::Invoices)),
            RowValue::Number(column_total(OutflowCategory::Extra)),
            RowValue::Number(net_cash),
            RowValue::text(self.notes.as_str()),
        ]
    }
}

impl TableRecord for ShiftAssignment {
    const TABLE: Table = Table::Shifts;

    fn to_row(&self) -> Row {
        vec![
            RowValue::text(self.date.format(DATE_FORMAT).to_string()),
            RowValue::text(self.employee_name.as_str()),
            RowValue::text(self.role.label()),
            RowValue::text(self.start_time.as_str()),
            RowValue::text(self.end_time.as_str()),
            RowValue::text(self.phone_number.as_str()),
        ]
    }
}

/// The most recent rows of a table, shaped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSnapshot {
    pub table: &'static str,
    pub version: u16,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Row>,
}

impl TableSnapshot {
    pub fn new(table: Table, rows: Vec<Row>) -> Self {
        let schema = table.schema();
        Self {
            table: schema.table,
            version: schema.version,
            columns: schema.header(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::cash::Outflow;
    use crate::workflows::haccp::{Equipment, TemperatureSubmission};
    use crate::workflows::shifts::ShiftRole;
    use chrono::NaiveDate;

    #[test]
    fn temperature_row_matches_log_layout() {
        let recorded_at = NaiveDate::from_ymd_opt(2025, 1, 9)
            .and_then(|date| date.and_hms_opt(6, 5, 42))
            .expect("valid timestamp");
        let reading = TemperatureSubmission {
            equipment: Equipment::NegativeCell,
            celsius: Decimal::from(-20),
            operator_signature: " Paolo ".to_string(),
        }
        .into_reading(recorded_at);

        let row = reading.to_row();
        assert!(TEMPERATURE_LOG.conforms(&row));
        assert_eq!(
            row,
            vec![
                RowValue::text("09/01/2025 06:05"),
                RowValue::text("Cella Negativa"),
                RowValue::text("-20.0 °C"),
                RowValue::text("OK"),
                RowValue::text("Paolo"),
            ]
        );
    }

    #[test]
    fn temperature_row_keeps_reading_as_entered() {
        let recorded_at = NaiveDate::from_ymd_opt(2025, 7, 21)
            .and_then(|date| date.and_hms_opt(14, 30, 0))
            .expect("valid timestamp");
        let reading = TemperatureSubmission {
            equipment: Equipment::MeatFridge,
            celsius: Decimal::new(504, 2),
            operator_signature: "Giulia".to_string(),
        }
        .into_reading(recorded_at);

        let row = reading.to_row();
        assert_eq!(row[2], RowValue::text("5.04 °C"));
        assert_eq!(row[3], RowValue::text("ALARM"));
    }

    #[test]
    fn cash_row_spreads_outflows_over_category_columns() {
        let closing = CashClosing {
            date: NaiveDate::from_ymd_opt(2025, 12, 31).expect("valid date"),
            responsible: "Elena".to_string(),
            cash_income: Decimal::from(100),
            pos_income: Decimal::from(50),
            outflows: vec![
                Outflow::new(OutflowCategory::Extra, Decimal::from(5)),
                Outflow::new(OutflowCategory::Spend, Decimal::from(10)),
                Outflow::new(OutflowCategory::Extra, Decimal::from(5)),
            ],
            notes: "cambio fondo cassa".to_string(),
        };

        let row = closing.to_row();
        assert!(CASH_CLOSINGS.conforms(&row));
        assert_eq!(row[0], RowValue::text("31/12/2025"));
        assert_eq!(row[4].as_number(), Some(Decimal::from(10)));
        assert_eq!(row[5].as_number(), Some(Decimal::ZERO));
        assert_eq!(row[6].as_number(), Some(Decimal::from(10)));
        assert_eq!(row[7].as_number(), Some(Decimal::from(80)));
        assert_eq!(row[8].as_text(), Some("cambio fondo cassa"));
    }

    #[test]
    fn shift_row_keeps_raw_fields() {
        let shift = ShiftAssignment {
            date: NaiveDate::from_ymd_opt(2025, 5, 2).expect("valid date"),
            employee_name: "Chiara".to_string(),
            role: ShiftRole::Lavaggio,
            start_time: "19:00".to_string(),
            end_time: "00:30".to_string(),
            phone_number: "3331234567".to_string(),
        };

        let cells: Vec<String> = shift.to_row().iter().map(ToString::to_string).collect();
        assert_eq!(
            cells,
            ["02/05/2025", "Chiara", "Lavaggio", "19:00", "00:30", "3331234567"]
        );
    }

    #[test]
    fn parse_cells_restores_number_columns() {
        let row = CASH_CLOSINGS
            .parse_cells([
                "01/02/2025",
                "Elena",
                "100",
                "50.5",
                "10",
                "0",
                "0",
                "90",
                "",
            ])
            .expect("row parses");
        assert_eq!(row[3], RowValue::Number(Decimal::new(505, 1)));
        assert!(CASH_CLOSINGS.conforms(&row));
    }

    #[test]
    fn parse_cells_rejects_misaligned_rows() {
        assert_eq!(
            SHIFTS.parse_cells(["01/02/2025", "Elena"]),
            Err(CellParseError::Width {
                expected: 6,
                found: 2
            })
        );

        match CASH_CLOSINGS.parse_cells([
            "01/02/2025",
            "Elena",
            "cento",
            "0",
            "0",
            "0",
            "0",
            "0",
            "",
        ]) {
            Err(CellParseError::Number { column, value }) => {
                assert_eq!(column, "cash_income");
                assert_eq!(value, "cento");
            }
            other => panic!("expected number error, got {other:?}"),
        }
    }
}

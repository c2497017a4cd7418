use std::sync::{Arc, Mutex, PoisonError};

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};

use super::cash::{CashClosing, CashReconciliation};
use super::haccp::{
    SessionRegister, TemperatureReading, TemperatureReadingView, TemperatureSubmission,
};
use super::notify::{self, Notification};
use super::records::{Row, Table, TableRecord, TableSnapshot};
use super::shifts::ShiftAssignment;
use super::validation::{Validate, ValidationError};
use super::wine::{WineMarginInput, WineMarginReport};
use crate::config::{NotifyConfig, PricingConfig};
use crate::store::{RowStore, StoreError};

/// Service composing validation, calculators, row building, and the row store.
///
/// One instance serves one operator session: it owns the register of temperature checks
/// accepted since the session started.
pub struct OperationsService<S> {
    store: Arc<S>,
    pricing: PricingConfig,
    notify: NotifyConfig,
    haccp_session: Mutex<SessionRegister<TemperatureReading>>,
}

impl<S> OperationsService<S>
where
    S: RowStore + 'static,
{
    pub fn new(store: Arc<S>, pricing: PricingConfig, notify: NotifyConfig) -> Self {
        Self {
            store,
            pricing,
            notify,
            haccp_session: Mutex::new(SessionRegister::new()),
        }
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// Validate, classify, and log a temperature check. Only ALARM readings come back with a
    /// notification.
    pub fn record_temperature(
        &self,
        submission: TemperatureSubmission,
        recorded_at: NaiveDateTime,
    ) -> Result<TemperatureReceipt, OperationsError> {
        let reading = submission.into_reading(recorded_at);
        let row = self.persist(&reading)?;
        let status = reading.status();

        let notification = if status.is_alarm() {
            warn!(
                equipment = reading.equipment.label(),
                celsius = %reading.celsius,
                "temperature above threshold"
            );
            Some(Notification::to_recipient(
                &self.notify,
                self.notify.phone.as_deref(),
                notify::temperature_alarm_message(&reading),
            ))
        } else {
            None
        };

        let view = reading.view();
        self.haccp_session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(reading);

        Ok(TemperatureReceipt {
            reading: view,
            row,
            notification,
        })
    }

    pub fn close_cash(&self, closing: CashClosing) -> Result<CashClosingReceipt, OperationsError> {
        let row = self.persist(&closing)?;
        let totals = closing.reconciliation()?;

        if totals.is_short() {
            warn!(
                date = %closing.date,
                net_cash = %totals.net_cash,
                "cash closing is short"
            );
        }

        let notification = Notification::to_recipient(
            &self.notify,
            self.notify.phone.as_deref(),
            notify::cash_closing_message(&closing, &totals),
        );

        Ok(CashClosingReceipt {
            totals,
            row,
            notification,
        })
    }

    /// Nothing is stored for wine margins; the report is recomputed on every request.
    pub fn evaluate_wine(&self, input: WineMarginInput) -> WineMarginReport {
        let report = WineMarginReport::evaluate(input, &self.pricing);
        if !report.healthy {
            warn!(
                margin_pct = %report.breakdown.margin_pct.round_dp(2),
                threshold_pct = %report.threshold_pct,
                "wine margin below threshold"
            );
        }
        report
    }

    pub fn assign_shift(&self, shift: ShiftAssignment) -> Result<ShiftReceipt, OperationsError> {
        let row = self.persist(&shift)?;
        let notification = Notification::to_recipient(
            &self.notify,
            Some(shift.phone_number.as_str()),
            notify::shift_message(&shift),
        );

        Ok(ShiftReceipt {
            shift,
            row,
            notification,
        })
    }

    pub fn recent(&self, table: Table, limit: usize) -> Result<TableSnapshot, OperationsError> {
        let rows = self.store.recent(table.schema(), limit)?;
        Ok(TableSnapshot::new(table, rows))
    }

    pub fn session_readings(&self) -> Vec<TemperatureReadingView> {
        self.haccp_session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries()
            .iter()
            .map(TemperatureReading::view)
            .collect()
    }

    pub fn clear_session(&self) -> usize {
        let cleared = self
            .haccp_session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        info!(cleared, "temperature session cleared");
        cleared
    }

    fn persist<R>(&self, record: &R) -> Result<Row, OperationsError>
    where
        R: TableRecord + Validate,
    {
        let schema = R::TABLE.schema();
        record.validate()?;

        let row = record.to_row();
        if let Err(err) = self.store.append(schema, row.clone()) {
            warn!(table = schema.table, error = %err, "row append failed");
            return Err(err.into());
        }

        info!(table = schema.table, version = schema.version, "row stored");
        Ok(row)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemperatureReceipt {
    pub reading: TemperatureReadingView,
    pub row: Row,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashClosingReceipt {
    pub totals: CashReconciliation,
    pub row: Row,
    pub notification: Notification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftReceipt {
    pub shift: ShiftAssignment,
    pub row: Row,
    pub notification: Notification,
}

/// Error raised by the operations service.
#[derive(Debug, thiserror::Error)]
pub enum OperationsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

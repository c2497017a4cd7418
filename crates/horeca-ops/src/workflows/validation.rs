use super::cash::{CashClosing, OutflowCategory};
use super::haccp::TemperatureReading;
use super::shifts::ShiftAssignment;

/// Reasons a submission is turned back to the operator before anything is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("the operator signature is required")]
    MissingSignature,
    #[error("the person responsible for the closing is required")]
    MissingResponsible,
    #[error("the amounts are too large to total")]
    AmountOutOfRange,
}

/// Field-presence checks run before a record is accepted.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl Validate for TemperatureReading {
    fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.operator_signature) {
            return Err(ValidationError::MissingSignature);
        }
        Ok(())
    }
}

impl Validate for CashClosing {
    fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.responsible) {
            return Err(ValidationError::MissingResponsible);
        }
        for category in OutflowCategory::ordered() {
            self.outflow_total(category)?;
        }
        self.reconciliation().map(|_| ())
    }
}

// No mandatory fields: an assignment without an employee name is still planned.
impl Validate for ShiftAssignment {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::cash::Outflow;
    use crate::workflows::haccp::{Equipment, TemperatureSubmission};
    use crate::workflows::shifts::ShiftRole;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn reading(signature: &str) -> TemperatureReading {
        let recorded_at = NaiveDate::from_ymd_opt(2025, 6, 14)
            .and_then(|date| date.and_hms_opt(8, 0, 0))
            .expect("valid timestamp");
        TemperatureSubmission {
            equipment: Equipment::BarCounter,
            celsius: Decimal::from(3),
            operator_signature: signature.to_string(),
        }
        .into_reading(recorded_at)
    }

    fn closing(responsible: &str) -> CashClosing {
        CashClosing {
            date: NaiveDate::from_ymd_opt(2025, 6, 14).expect("valid date"),
            responsible: responsible.to_string(),
            cash_income: Decimal::from(200),
            pos_income: Decimal::from(340),
            outflows: Vec::new(),
            notes: String::new(),
        }
    }

    #[test]
    fn reading_requires_signature() {
        assert_eq!(reading("").validate(), Err(ValidationError::MissingSignature));
        assert_eq!(
            reading("   ").validate(),
            Err(ValidationError::MissingSignature)
        );
        assert_eq!(reading("AR").validate(), Ok(()));
    }

    #[test]
    fn closing_requires_responsible() {
        assert_eq!(
            closing("").validate(),
            Err(ValidationError::MissingResponsible)
        );
        assert_eq!(closing("Sara").validate(), Ok(()));
    }

    #[test]
    fn closing_rejects_amounts_that_cannot_be_totalled() {
        let huge = Decimal::from_str_exact("70000000000000000000000000000")
            .expect("valid decimal");

        let mut overflowing_income = closing("Sara");
        overflowing_income.cash_income = huge;
        overflowing_income.pos_income = huge;
        assert_eq!(
            overflowing_income.validate(),
            Err(ValidationError::AmountOutOfRange)
        );

        // The running total stays in range; the spend column alone does not.
        let mut overflowing_category = closing("Sara");
        overflowing_category.outflows = vec![
            Outflow::new(OutflowCategory::Spend, huge),
            Outflow::new(OutflowCategory::Extra, -huge),
            Outflow::new(OutflowCategory::Spend, huge),
            Outflow::new(OutflowCategory::Extra, -huge),
        ];
        assert_eq!(
            overflowing_category.validate(),
            Err(ValidationError::AmountOutOfRange)
        );
    }

    #[test]
    fn shift_accepts_missing_employee_name() {
        let shift = ShiftAssignment {
            date: NaiveDate::from_ymd_opt(2025, 6, 14).expect("valid date"),
            employee_name: String::new(),
            role: ShiftRole::Extra,
            start_time: String::new(),
            end_time: String::new(),
            phone_number: String::new(),
        };
        assert_eq!(shift.validate(), Ok(()));
    }
}

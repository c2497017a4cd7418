use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::workflows::validation::ValidationError;

/// Buckets an end-of-day outflow is booked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutflowCategory {
    Spend,
    Invoices,
    Extra,
}

impl OutflowCategory {
    pub const fn ordered() -> [Self; 3] {
        [Self::Spend, Self::Invoices, Self::Extra]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Spend => "spesa",
            Self::Invoices => "fatture",
            Self::Extra => "extra",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outflow {
    pub category: OutflowCategory,
    pub amount: Decimal,
}

impl Outflow {
    pub fn new(category: OutflowCategory, amount: Decimal) -> Self {
        Self { category, amount }
    }
}

/// End-of-day cash report as filled in by the person closing the till.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashClosing {
    pub date: NaiveDate,
    pub responsible: String,
    pub cash_income: Decimal,
    pub pos_income: Decimal,
    #[serde(default)]
    pub outflows: Vec<Outflow>,
    #[serde(default)]
    pub notes: String,
}

impl CashClosing {
    pub fn reconciliation(&self) -> Result<CashReconciliation, ValidationError> {
        let amounts: Vec<Decimal> = self.outflows.iter().map(|outflow| outflow.amount).collect();
        reconcile_cash(self.cash_income, self.pos_income, &amounts)
    }

    pub fn outflow_total(&self, category: OutflowCategory) -> Result<Decimal, ValidationError> {
        checked_total(
            self.outflows
                .iter()
                .filter(|outflow| outflow.category == category)
                .map(|outflow| outflow.amount),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CashReconciliation {
    pub total_income: Decimal,
    pub total_outflow: Decimal,
    /// Negative when outflows exceed cash taken in; never clamped.
    pub net_cash: Decimal,
}

impl CashReconciliation {
    pub fn is_short(&self) -> bool {
        self.net_cash.is_sign_negative() && !self.net_cash.is_zero()
    }
}

fn checked_total(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal, ValidationError> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
        .ok_or(ValidationError::AmountOutOfRange)
}

/// Net cash is what stays in the drawer: POS takings never offset outflows paid in cash.
pub fn reconcile_cash(
    cash_income: Decimal,
    pos_income: Decimal,
    outflows: &[Decimal],
) -> Result<CashReconciliation, ValidationError> {
    let total_outflow = checked_total(outflows.iter().copied())?;
    let total_income = checked_total([cash_income, pos_income])?;
    let net_cash = cash_income
        .checked_sub(total_outflow)
        .ok_or(ValidationError::AmountOutOfRange)?;

    Ok(CashReconciliation {
        total_income,
        total_outflow,
        net_cash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconcile_sums_income_and_subtracts_outflows_from_cash() {
        let outcome = reconcile_cash(
            Decimal::from(100),
            Decimal::from(50),
            &[Decimal::from(10), Decimal::from(5), Decimal::from(5)],
        )
        .expect("amounts in range");

        assert_eq!(outcome.total_income, Decimal::from(150));
        assert_eq!(outcome.total_outflow, Decimal::from(20));
        assert_eq!(outcome.net_cash, Decimal::from(80));
        assert!(!outcome.is_short());
    }

    #[test]
    fn pos_income_does_not_offset_cash_shortage() {
        let outcome = reconcile_cash(
            Decimal::from(40),
            Decimal::from(900),
            &[Decimal::new(6550, 2)],
        )
        .expect("amounts in range");

        assert_eq!(outcome.net_cash, Decimal::new(-2550, 2));
        assert!(outcome.is_short());
    }

    #[test]
    fn outflow_totals_group_repeated_categories() {
        let closing = CashClosing {
            date: NaiveDate::from_ymd_opt(2025, 3, 8).expect("valid date"),
            responsible: "Marco".to_string(),
            cash_income: Decimal::new(48050, 2),
            pos_income: Decimal::new(123000, 2),
            outflows: vec![
                Outflow::new(OutflowCategory::Spend, Decimal::new(2200, 2)),
                Outflow::new(OutflowCategory::Invoices, Decimal::from(150)),
                Outflow::new(OutflowCategory::Spend, Decimal::new(850, 2)),
            ],
            notes: String::new(),
        };

        assert_eq!(
            closing.outflow_total(OutflowCategory::Spend),
            Ok(Decimal::new(3050, 2))
        );
        assert_eq!(closing.outflow_total(OutflowCategory::Extra), Ok(Decimal::ZERO));
        assert_eq!(
            closing.reconciliation().map(|totals| totals.net_cash),
            Ok(Decimal::new(30000, 2))
        );
    }

    #[test]
    fn amounts_beyond_decimal_range_are_rejected() {
        let huge = Decimal::from_str_exact("70000000000000000000000000000")
            .expect("valid decimal");

        assert_eq!(
            reconcile_cash(huge, huge, &[]),
            Err(ValidationError::AmountOutOfRange)
        );
        assert_eq!(
            reconcile_cash(Decimal::ZERO, Decimal::ZERO, &[huge, huge]),
            Err(ValidationError::AmountOutOfRange)
        );
        assert_eq!(
            reconcile_cash(-huge, Decimal::ZERO, &[huge]),
            Err(ValidationError::AmountOutOfRange)
        );
    }
}

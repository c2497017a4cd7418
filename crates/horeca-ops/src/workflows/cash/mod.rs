pub mod domain;

pub use domain::{reconcile_cash, CashClosing, CashReconciliation, Outflow, OutflowCategory};

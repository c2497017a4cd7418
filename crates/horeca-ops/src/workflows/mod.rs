pub mod cash;
pub mod haccp;
pub mod notify;
pub mod records;
pub mod router;
pub mod service;
pub mod shifts;
pub mod validation;
pub mod wine;

#[cfg(test)]
mod tests;

pub use router::operations_router;
pub use service::{
    CashClosingReceipt, OperationsError, OperationsService, ShiftReceipt, TemperatureReceipt,
};
pub use validation::{Validate, ValidationError};

//! HACCP temperature log: equipment thresholds and the per-session register of checks.

pub mod domain;
mod session;

pub use domain::{
    celsius_text, classify_temperature, Equipment, TemperatureReading, TemperatureReadingView,
    TemperatureStatus, TemperatureSubmission,
};
pub use session::SessionRegister;

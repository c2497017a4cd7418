pub mod domain;

pub use domain::{ShiftAssignment, ShiftRole};

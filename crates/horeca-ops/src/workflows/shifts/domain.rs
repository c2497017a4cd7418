use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftRole {
    Sala,
    Cucina,
    Bar,
    Lavaggio,
    Extra,
}

impl ShiftRole {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Sala,
            Self::Cucina,
            Self::Bar,
            Self::Lavaggio,
            Self::Extra,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sala => "Sala",
            Self::Cucina => "Cucina",
            Self::Bar => "Bar",
            Self::Lavaggio => "Lavaggio",
            Self::Extra => "Extra",
        }
    }
}

/// One planned shift. Times are kept exactly as entered ("HH:MM"); overlapping or
/// repeated assignments for the same person are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub date: NaiveDate,
    #[serde(default)]
    pub employee_name: String,
    pub role: ShiftRole,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub phone_number: String,
}

impl ShiftAssignment {
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}

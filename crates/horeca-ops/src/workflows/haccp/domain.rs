use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Equipment whose temperature is checked during HACCP rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    BeverageFridge,
    MeatFridge,
    FishFridge,
    NegativeCell,
    BarCounter,
}

impl Equipment {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::BeverageFridge,
            Self::MeatFridge,
            Self::FishFridge,
            Self::NegativeCell,
            Self::BarCounter,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BeverageFridge => "Frigo Bevande",
            Self::MeatFridge => "Frigo Carne",
            Self::FishFridge => "Frigo Pesce",
            Self::NegativeCell => "Cella Negativa",
            Self::BarCounter => "Banco Bar",
        }
    }

    /// Highest temperature, inclusive, still considered safe.
    pub fn max_safe_celsius(self) -> Decimal {
        match self {
            Self::NegativeCell => Decimal::from(-18),
            _ => Decimal::from(5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemperatureStatus {
    Ok,
    Alarm,
}

impl TemperatureStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Alarm => "ALARM",
        }
    }

    pub const fn is_alarm(self) -> bool {
        matches!(self, Self::Alarm)
    }
}

pub fn classify_temperature(equipment: Equipment, celsius: Decimal) -> TemperatureStatus {
    if celsius <= equipment.max_safe_celsius() {
        TemperatureStatus::Ok
    } else {
        TemperatureStatus::Alarm
    }
}

/// The reading as entered, padded to one decimal place: `4` is `4.0`, `5.04` stays `5.04`.
pub fn celsius_text(celsius: Decimal) -> String {
    let value = celsius.normalize();
    if value.scale() == 0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Raw values collected by the temperature form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureSubmission {
    pub equipment: Equipment,
    pub celsius: Decimal,
    #[serde(default)]
    pub operator_signature: String,
}

impl TemperatureSubmission {
    pub fn into_reading(self, recorded_at: NaiveDateTime) -> TemperatureReading {
        TemperatureReading {
            equipment: self.equipment,
            celsius: self.celsius,
            operator_signature: self.operator_signature,
            recorded_at,
        }
    }
}

/// A temperature check as it is logged. The status is always derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub equipment: Equipment,
    pub celsius: Decimal,
    pub operator_signature: String,
    pub recorded_at: NaiveDateTime,
}

impl TemperatureReading {
    pub fn status(&self) -> TemperatureStatus {
        classify_temperature(self.equipment, self.celsius)
    }

    pub fn view(&self) -> TemperatureReadingView {
        TemperatureReadingView {
            equipment: self.equipment,
            equipment_label: self.equipment.label(),
            celsius: self.celsius,
            operator_signature: self.operator_signature.clone(),
            recorded_at: self.recorded_at,
            status: self.status(),
        }
    }
}

/// Reading plus its derived status, shaped for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemperatureReadingView {
    pub equipment: Equipment,
    pub equipment_label: &'static str,
    pub celsius: Decimal,
    pub operator_signature: String,
    pub recorded_at: NaiveDateTime,
    pub status: TemperatureStatus,
}

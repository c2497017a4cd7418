//! Share-ready message texts and the deep link used to hand them to a messaging app.

use serde::Serialize;

use super::cash::{CashClosing, CashReconciliation};
use super::haccp::{celsius_text, TemperatureReading};
use super::records::{DATE_FORMAT, TIMESTAMP_FORMAT};
use super::shifts::ShiftAssignment;
use crate::config::NotifyConfig;

pub fn cash_closing_message(closing: &CashClosing, totals: &CashReconciliation) -> String {
    format!(
        "*CHIUSURA HORECA*\n\
         Data: {}\n\
         ---\n\
         💰 Incasso Tot: €{:.2}\n\
         💸 Uscite Tot: €{:.2}\n\
         💵 *Netto Cassa: €{:.2}*",
        closing.date.format(DATE_FORMAT),
        totals.total_income,
        totals.total_outflow,
        totals.net_cash,
    )
}

pub fn temperature_alarm_message(reading: &TemperatureReading) -> String {
    format!(
        "*ALLARME HACCP*\n\
         Data: {}\n\
         ---\n\
         🌡️ {}: {} °C (soglia {} °C)\n\
         ✍️ Firma: {}",
        reading.recorded_at.format(TIMESTAMP_FORMAT),
        reading.equipment.label(),
        celsius_text(reading.celsius),
        reading.equipment.max_safe_celsius(),
        reading.operator_signature.trim(),
    )
}

pub fn shift_message(shift: &ShiftAssignment) -> String {
    format!(
        "*TURNO HORECA*\n\
         Data: {}\n\
         ---\n\
         👤 {} ({})\n\
         🕒 {}",
        shift.date.format(DATE_FORMAT),
        shift.employee_name.trim(),
        shift.role.label(),
        shift.time_range(),
    )
}

/// `<messaging-uri><digits>?text=<encoded>`; a missing or digit-less phone leaves the
/// recipient for the operator to pick.
pub fn share_link(messaging_uri: &str, phone: Option<&str>, text: &str) -> String {
    let digits: String = phone
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    format!(
        "{messaging_uri}{digits}?text={}",
        urlencoding::encode(text)
    )
}

/// A formatted message and, when a recipient is known, its deep link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_link: Option<String>,
}

impl Notification {
    pub fn to_recipient(config: &NotifyConfig, phone: Option<&str>, text: String) -> Self {
        let share_link = phone
            .filter(|value| value.chars().any(|c| c.is_ascii_digit()))
            .map(|value| share_link(&config.messaging_uri, Some(value), &text));

        Self { text, share_link }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::cash::{Outflow, OutflowCategory};
    use crate::workflows::haccp::{Equipment, TemperatureSubmission};
    use crate::workflows::shifts::ShiftRole;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn closing() -> CashClosing {
        CashClosing {
            date: NaiveDate::from_ymd_opt(2025, 4, 12).expect("valid date"),
            responsible: "Sara".to_string(),
            cash_income: Decimal::from(100),
            pos_income: Decimal::from(50),
            outflows: vec![
                Outflow::new(OutflowCategory::Spend, Decimal::from(10)),
                Outflow::new(OutflowCategory::Invoices, Decimal::from(5)),
                Outflow::new(OutflowCategory::Extra, Decimal::from(5)),
            ],
            notes: String::new(),
        }
    }

    #[test]
    fn cash_message_follows_closing_template() {
        let closing = closing();
        let totals = closing.reconciliation().expect("amounts in range");
        let message = cash_closing_message(&closing, &totals);

        assert_eq!(
            message,
            "*CHIUSURA HORECA*\nData: 12/04/2025\n---\n💰 Incasso Tot: €150.00\n💸 Uscite Tot: €20.00\n💵 *Netto Cassa: €80.00*"
        );
    }

    #[test]
    fn alarm_message_names_threshold() {
        let recorded_at = NaiveDate::from_ymd_opt(2025, 4, 12)
            .and_then(|date| date.and_hms_opt(22, 40, 0))
            .expect("valid timestamp");
        let reading = TemperatureSubmission {
            equipment: Equipment::NegativeCell,
            celsius: Decimal::new(-125, 1),
            operator_signature: "Tommaso".to_string(),
        }
        .into_reading(recorded_at);

        let message = temperature_alarm_message(&reading);
        assert!(message.starts_with("*ALLARME HACCP*\nData: 12/04/2025 22:40\n---\n"));
        assert!(message.contains("Cella Negativa: -12.5 °C (soglia -18 °C)"));
        assert!(message.ends_with("Firma: Tommaso"));
    }

    #[test]
    fn shift_message_lists_role_and_times() {
        let shift = ShiftAssignment {
            date: NaiveDate::from_ymd_opt(2025, 8, 15).expect("valid date"),
            employee_name: "Anna".to_string(),
            role: ShiftRole::Sala,
            start_time: "11:30".to_string(),
            end_time: "15:00".to_string(),
            phone_number: "+39 347 000 1111".to_string(),
        };

        assert_eq!(
            shift_message(&shift),
            "*TURNO HORECA*\nData: 15/08/2025\n---\n👤 Anna (Sala)\n🕒 11:30 - 15:00"
        );
    }

    #[test]
    fn share_link_strips_phone_formatting_and_encodes_text() {
        let link = share_link("https://wa.me/", Some("+39 333-123 4567"), "Netto: €90 & ok");
        assert_eq!(
            link,
            "https://wa.me/393331234567?text=Netto%3A%20%E2%82%AC90%20%26%20ok"
        );
    }

    #[test]
    fn notification_skips_link_without_recipient() {
        let config = NotifyConfig::default();
        let plain = Notification::to_recipient(&config, None, "ciao".to_string());
        assert!(plain.share_link.is_none());

        let blank = Notification::to_recipient(&config, Some("  "), "ciao".to_string());
        assert!(blank.share_link.is_none());

        let linked = Notification::to_recipient(&config, Some("333 1234567"), "ciao".to_string());
        assert_eq!(
            linked.share_link.as_deref(),
            Some("https://wa.me/3331234567?text=ciao")
        );
    }
}

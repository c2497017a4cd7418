use crate::infra::{parse_date, parse_equipment};
use chrono::{Local, NaiveDate};
use clap::Args;
use horeca_ops::config::{AppConfig, PricingConfig};
use horeca_ops::error::AppError;
use horeca_ops::workflows::cash::{CashClosing, Outflow, OutflowCategory};
use horeca_ops::workflows::haccp::{celsius_text, classify_temperature, Equipment};
use horeca_ops::workflows::notify;
use horeca_ops::workflows::OperationsError;
use horeca_ops::workflows::wine::{WineMarginInput, WineMarginReport};
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub(crate) struct MarginArgs {
    /// Purchase cost of the bottle, VAT excluded
    #[arg(long)]
    pub(crate) cost: Decimal,
    /// List price of the bottle, VAT included
    #[arg(long)]
    pub(crate) price: Decimal,
    /// VAT rate as a fraction (defaults to HORECA_VAT_RATE)
    #[arg(long)]
    pub(crate) vat: Option<Decimal>,
    /// Healthy margin percentage (defaults to HORECA_MARGIN_THRESHOLD)
    #[arg(long)]
    pub(crate) threshold: Option<Decimal>,
}

#[derive(Args, Debug)]
pub(crate) struct CashArgs {
    /// Cash taken in the till
    #[arg(long)]
    pub(crate) cash: Decimal,
    /// Card/POS takings
    #[arg(long)]
    pub(crate) pos: Decimal,
    /// Shopping paid from the till
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub(crate) spend: Decimal,
    /// Supplier invoices paid from the till
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub(crate) invoices: Decimal,
    /// Any other outflow
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub(crate) extra: Decimal,
    /// Closing date (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct TemperatureArgs {
    /// beverage_fridge, meat_fridge, fish_fridge, negative_cell or bar_counter
    #[arg(long, value_parser = parse_equipment)]
    pub(crate) equipment: Equipment,
    /// Measured temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) celsius: Decimal,
}

pub(crate) fn run_margin(args: MarginArgs) -> Result<(), AppError> {
    let configured = AppConfig::load()?.pricing;

    let pricing = PricingConfig {
        vat_rate: args.vat.unwrap_or(configured.vat_rate),
        healthy_margin_pct: args.threshold.unwrap_or(configured.healthy_margin_pct),
    };

    let report = WineMarginReport::evaluate(
        WineMarginInput {
            purchase_cost_excl_vat: args.cost,
            list_price_incl_vat: args.price,
        },
        &pricing,
    );
    render_margin(&report);
    Ok(())
}

fn render_margin(report: &WineMarginReport) {
    match report.vat_rate.checked_mul(Decimal::ONE_HUNDRED) {
        Some(vat_pct) => println!("Wine margin (VAT {vat_pct}%)"),
        None => println!("Wine margin (VAT rate {})", report.vat_rate),
    }
    println!("- net sale price: €{:.2}", report.breakdown.net_sale_price);
    println!("- profit: €{:.2}", report.breakdown.profit);
    println!("- margin: {:.1}%", report.breakdown.margin_pct);
    println!("- multiplier: x{:.2}", report.breakdown.multiplier);
    println!("{}", report.summary());
}

pub(crate) fn run_cash(args: CashArgs) -> Result<(), AppError> {
    let closing = CashClosing {
        date: args.date.unwrap_or_else(|| Local::now().date_naive()),
        responsible: String::new(),
        cash_income: args.cash,
        pos_income: args.pos,
        outflows: vec![
            Outflow::new(OutflowCategory::Spend, args.spend),
            Outflow::new(OutflowCategory::Invoices, args.invoices),
            Outflow::new(OutflowCategory::Extra, args.extra),
        ],
        notes: String::new(),
    };

    let totals = closing.reconciliation().map_err(OperationsError::from)?;
    println!("{}", notify::cash_closing_message(&closing, &totals));
    if totals.is_short() {
        println!("\nWarning: outflows exceed cash income by €{:.2}", -totals.net_cash);
    }
    Ok(())
}

pub(crate) fn run_temperature(args: TemperatureArgs) -> Result<(), AppError> {
    let status = classify_temperature(args.equipment, args.celsius);
    println!(
        "{}: {} °C -> {} (max {} °C)",
        args.equipment.label(),
        celsius_text(args.celsius),
        status.label(),
        args.equipment.max_safe_celsius()
    );
    Ok(())
}

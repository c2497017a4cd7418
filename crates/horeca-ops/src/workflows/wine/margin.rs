use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PricingConfig;

/// Bottle figures as typed into the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WineMarginInput {
    pub purchase_cost_excl_vat: Decimal,
    pub list_price_incl_vat: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarginBreakdown {
    pub net_sale_price: Decimal,
    pub profit: Decimal,
    pub margin_pct: Decimal,
    /// List price over VAT-inclusive cost, the "times cost" figure quoted on the floor.
    pub multiplier: Decimal,
}

/// Every step is checked: a division by zero or a result outside the decimal range yields 0.
pub fn compute_margin(
    cost_excl_vat: Decimal,
    price_incl_vat: Decimal,
    vat_rate: Decimal,
) -> MarginBreakdown {
    let vat_factor = Decimal::ONE.checked_add(vat_rate).unwrap_or(Decimal::MAX);
    let net_sale_price = price_incl_vat
        .checked_div(vat_factor)
        .unwrap_or(Decimal::ZERO);
    let profit = net_sale_price
        .checked_sub(cost_excl_vat)
        .unwrap_or(Decimal::ZERO);

    let margin_pct = if net_sale_price > Decimal::ZERO {
        profit
            .checked_div(net_sale_price)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    let multiplier = if cost_excl_vat > Decimal::ZERO {
        cost_excl_vat
            .checked_mul(vat_factor)
            .and_then(|cost_incl_vat| price_incl_vat.checked_div(cost_incl_vat))
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    MarginBreakdown {
        net_sale_price,
        profit,
        margin_pct,
        multiplier,
    }
}

/// Margin figures plus the verdict against the deployment's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WineMarginReport {
    pub input: WineMarginInput,
    pub vat_rate: Decimal,
    pub threshold_pct: Decimal,
    #[serde(flatten)]
    pub breakdown: MarginBreakdown,
    pub healthy: bool,
}

impl WineMarginReport {
    pub fn evaluate(input: WineMarginInput, pricing: &PricingConfig) -> Self {
        let breakdown = compute_margin(
            input.purchase_cost_excl_vat,
            input.list_price_incl_vat,
            pricing.vat_rate,
        );

        Self {
            input,
            vat_rate: pricing.vat_rate,
            threshold_pct: pricing.healthy_margin_pct,
            healthy: breakdown.margin_pct >= pricing.healthy_margin_pct,
            breakdown,
        }
    }

    pub fn summary(&self) -> String {
        let verdict = if self.healthy {
            "healthy"
        } else {
            "below threshold"
        };
        format!(
            "margin {:.1}% ({verdict}, threshold {:.1}%), profit €{:.2}, x{:.2} on cost",
            self.breakdown.margin_pct,
            self.threshold_pct,
            self.breakdown.profit,
            self.breakdown.multiplier
        )
    }
}

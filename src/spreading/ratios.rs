// 📈 Financial ratios derived from category totals
//
// A zero denominator yields the neutral display value ("0.00" or "0.0%")
// instead of an infinite or undefined result.

use serde::Serialize;

use super::totals::{calculate_total, net_income};
use super::worksheet::{CategoryKind, PeriodValues, Worksheet};
use crate::format::to_fixed;

pub const NEUTRAL_RATIO: &str = "0.00";
pub const NEUTRAL_PERCENT: &str = "0.0%";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioReport {
    pub current_ratio: PeriodValues<String>,
    pub debt_to_equity: PeriodValues<String>,
    pub net_income: PeriodValues<f64>,
    pub profit_margin: PeriodValues<String>,
    pub return_on_assets: PeriodValues<String>,
}

impl RatioReport {
    /// Labelled rows in display order.
    pub fn rows(&self) -> [(&'static str, &PeriodValues<String>); 4] {
        [
            ("Current Ratio", &self.current_ratio),
            ("Debt-to-Equity", &self.debt_to_equity),
            ("Profit Margin", &self.profit_margin),
            ("Return on Assets", &self.return_on_assets),
        ]
    }
}

pub fn calculate_ratios(worksheet: &Worksheet) -> RatioReport {
    let assets = calculate_total(worksheet.category(CategoryKind::Assets));
    let liabilities = calculate_total(worksheet.category(CategoryKind::Liabilities));
    let equity = calculate_total(worksheet.category(CategoryKind::Equity));
    let revenue = calculate_total(worksheet.category(CategoryKind::Revenue));
    let net_income = net_income(worksheet);

    RatioReport {
        current_ratio: std::array::from_fn(|i| ratio(assets[i], liabilities[i])),
        debt_to_equity: std::array::from_fn(|i| ratio(liabilities[i], equity[i])),
        net_income,
        profit_margin: std::array::from_fn(|i| percentage(net_income[i], revenue[i])),
        return_on_assets: std::array::from_fn(|i| percentage(net_income[i], assets[i])),
    }
}

/// `numerator / denominator` with two decimals.
pub fn ratio(numerator: f64, denominator: f64) -> String {
    if denominator == 0.0 {
        return NEUTRAL_RATIO.to_string();
    }
    to_fixed(numerator / denominator, 2)
}

/// `numerator / denominator * 100` with one decimal and a `%` suffix.
pub fn percentage(numerator: f64, denominator: f64) -> String {
    if denominator == 0.0 {
        return NEUTRAL_PERCENT.to_string();
    }
    format!("{}%", to_fixed(numerator / denominator * 100.0, 1))
}

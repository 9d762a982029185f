// Per-period totals. Always computed from current data, never cached.

use super::worksheet::{Category, CategoryKind, PeriodValues, Worksheet, PERIOD_COUNT};

/// Sum of every item in the category, one sum per period. Blank counts as zero.
pub fn calculate_total(category: &Category) -> PeriodValues<f64> {
    let mut totals = [0.0; PERIOD_COUNT];
    for (_, item) in category.iter() {
        for (total, value) in totals.iter_mut().zip(item.values.iter()) {
            *total += value.amount();
        }
    }
    totals
}

pub fn category_total(worksheet: &Worksheet, kind: CategoryKind) -> PeriodValues<f64> {
    calculate_total(worksheet.category(kind))
}

/// Total assets minus total liabilities.
pub fn net_worth(worksheet: &Worksheet) -> PeriodValues<f64> {
    difference(
        category_total(worksheet, CategoryKind::Assets),
        category_total(worksheet, CategoryKind::Liabilities),
    )
}

/// Total revenue minus total expenses.
pub fn net_income(worksheet: &Worksheet) -> PeriodValues<f64> {
    difference(
        category_total(worksheet, CategoryKind::Revenue),
        category_total(worksheet, CategoryKind::Expenses),
    )
}

fn difference(a: PeriodValues<f64>, b: PeriodValues<f64>) -> PeriodValues<f64> {
    std::array::from_fn(|i| a[i] - b[i])
}

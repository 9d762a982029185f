// Financial spreading: worksheet model, editable grid, totals and ratios.

pub mod cell;
pub mod grid;
pub mod ratios;
pub mod totals;
pub mod worksheet;

pub use cell::{parse_lenient, CellValue};
pub use grid::SpreadingGrid;
pub use ratios::{calculate_ratios, RatioReport};
pub use totals::{calculate_total, category_total, net_income, net_worth};
pub use worksheet::{
    BalanceSheet, Category, CategoryKind, IncomeStatement, LineItem, Period, PeriodValues,
    StatementKind, Worksheet, PERIODS, PERIOD_COUNT,
};

// 📊 Spreading Worksheet - statements, categories and line items
//
// Shape:
//   Worksheet
//   ├── BalanceSheet      (assets, liabilities, equity)
//   └── IncomeStatement   (revenue, expenses)
//
// Every container sits behind an Arc. An edit rebuilds only the path from the
// root to the edited line item; all other containers are shared with the
// previous worksheet.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::cell::CellValue;
use crate::error::SpreadingError;

// ============================================================================
// PERIODS
// ============================================================================

pub const PERIOD_COUNT: usize = 3;

/// One value per fiscal year, positionally aligned with [`PERIODS`].
pub type PeriodValues<T> = [T; PERIOD_COUNT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub fiscal_year: u16,
}

impl Period {
    pub const fn new(fiscal_year: u16) -> Self {
        Period { fiscal_year }
    }

    /// Column header, e.g. `FY 2023`
    pub fn label(&self) -> String {
        format!("FY {}", self.fiscal_year)
    }
}

pub const PERIODS: PeriodValues<Period> = [Period::new(2022), Period::new(2023), Period::new(2024)];

// ============================================================================
// STATEMENT & CATEGORY KINDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatementKind {
    BalanceSheet,
    IncomeStatement,
}

impl StatementKind {
    pub const ALL: [StatementKind; 2] = [StatementKind::BalanceSheet, StatementKind::IncomeStatement];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::BalanceSheet => "balanceSheet",
            StatementKind::IncomeStatement => "incomeStatement",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StatementKind::BalanceSheet => "Balance Sheet",
            StatementKind::IncomeStatement => "Income Statement",
        }
    }

    pub fn categories(&self) -> &'static [CategoryKind] {
        match self {
            StatementKind::BalanceSheet => &[
                CategoryKind::Assets,
                CategoryKind::Liabilities,
                CategoryKind::Equity,
            ],
            StatementKind::IncomeStatement => &[CategoryKind::Revenue, CategoryKind::Expenses],
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for StatementKind {
    type Err = SpreadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SpreadingError::UnknownStatement(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryKind {
    Assets,
    Liabilities,
    Equity,
    Revenue,
    Expenses,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 5] = [
        CategoryKind::Assets,
        CategoryKind::Liabilities,
        CategoryKind::Equity,
        CategoryKind::Revenue,
        CategoryKind::Expenses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Assets => "assets",
            CategoryKind::Liabilities => "liabilities",
            CategoryKind::Equity => "equity",
            CategoryKind::Revenue => "revenue",
            CategoryKind::Expenses => "expenses",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CategoryKind::Assets => "Assets",
            CategoryKind::Liabilities => "Liabilities",
            CategoryKind::Equity => "Equity",
            CategoryKind::Revenue => "Revenue",
            CategoryKind::Expenses => "Expenses",
        }
    }

    pub fn statement(&self) -> StatementKind {
        match self {
            CategoryKind::Assets | CategoryKind::Liabilities | CategoryKind::Equity => {
                StatementKind::BalanceSheet
            }
            CategoryKind::Revenue | CategoryKind::Expenses => StatementKind::IncomeStatement,
        }
    }

    /// Line items a fresh worksheet starts with, in display order.
    pub fn default_items(&self) -> &'static [&'static str] {
        match self {
            CategoryKind::Assets => &[
                "Cash & Equivalents",
                "Accounts Receivable",
                "Inventory",
                "Prepaid Expenses",
                "Property & Equipment",
                "Accumulated Depreciation",
                "Intangible Assets",
            ],
            CategoryKind::Liabilities => &[
                "Accounts Payable",
                "Short-term Debt",
                "Current Portion LTD",
                "Long-term Debt",
                "Deferred Revenue",
            ],
            CategoryKind::Equity => &["Common Stock", "Retained Earnings"],
            CategoryKind::Revenue => &["Product Sales", "Service Revenue", "Other Income"],
            CategoryKind::Expenses => &[
                "Cost of Goods Sold",
                "Operating Expenses",
                "Interest Expense",
                "Depreciation",
                "Income Tax",
            ],
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for CategoryKind {
    type Err = SpreadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SpreadingError::UnknownCategory(s.to_string()))
    }
}

// ============================================================================
// LINE ITEM
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItem {
    pub values: PeriodValues<CellValue>,
}

impl LineItem {
    pub fn empty() -> Self {
        LineItem::default()
    }

    pub fn value(&self, period_index: usize) -> Option<&CellValue> {
        self.values.get(period_index)
    }

    /// Copy of this item with one period replaced.
    fn with_value(&self, period_index: usize, value: CellValue) -> LineItem {
        let mut values = self.values.clone();
        values[period_index] = value;
        LineItem { values }
    }
}

// ============================================================================
// CATEGORY
// ============================================================================

/// Ordered line items. Names are unique; insertion order is display order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Category {
    items: Vec<(String, Arc<LineItem>)>,
}

impl Category {
    pub fn new() -> Self {
        Category::default()
    }

    /// Category pre-loaded with its default line items, all blank.
    pub fn with_defaults(kind: CategoryKind) -> Self {
        let mut category = Category::new();
        for name in kind.default_items() {
            category.insert(name.to_string(), LineItem::empty());
        }
        category
    }

    /// Insert or replace an item, keeping its original position on replace.
    pub fn insert(&mut self, name: String, item: LineItem) {
        match self.items.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = Arc::new(item),
            None => self.items.push((name, Arc::new(item))),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<LineItem>> {
        self.items
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, item)| item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<LineItem>)> {
        self.items.iter().map(|(name, item)| (name.as_str(), item))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy of this category with one cell replaced. Untouched items are shared.
    fn with_value(
        &self,
        kind: CategoryKind,
        item: &str,
        period_index: usize,
        value: CellValue,
    ) -> Result<Category, SpreadingError> {
        let position = self
            .items
            .iter()
            .position(|(name, _)| name == item)
            .ok_or_else(|| SpreadingError::UnknownLineItem {
                category: kind,
                item: item.to_string(),
            })?;

        let mut items = self.items.clone();
        let updated = items[position].1.with_value(period_index, value);
        items[position].1 = Arc::new(updated);
        Ok(Category { items })
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (name, item) in &self.items {
            map.serialize_entry(name, item.as_ref())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoryVisitor;

        impl<'de> Visitor<'de> for CategoryVisitor {
            type Value = Category;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of line item names to per-period values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Category, A::Error> {
                let mut category = Category::new();
                while let Some((name, item)) = access.next_entry::<String, LineItem>()? {
                    if category.get(&name).is_some() {
                        return Err(de::Error::custom(format!("duplicate line item '{}'", name)));
                    }
                    category.items.push((name, Arc::new(item)));
                }
                Ok(category)
            }
        }

        deserializer.deserialize_map(CategoryVisitor)
    }
}

// ============================================================================
// STATEMENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BalanceSheet {
    pub assets: Arc<Category>,
    pub liabilities: Arc<Category>,
    pub equity: Arc<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncomeStatement {
    pub revenue: Arc<Category>,
    pub expenses: Arc<Category>,
}

impl Default for BalanceSheet {
    fn default() -> Self {
        BalanceSheet {
            assets: Arc::new(Category::with_defaults(CategoryKind::Assets)),
            liabilities: Arc::new(Category::with_defaults(CategoryKind::Liabilities)),
            equity: Arc::new(Category::with_defaults(CategoryKind::Equity)),
        }
    }
}

impl Default for IncomeStatement {
    fn default() -> Self {
        IncomeStatement {
            revenue: Arc::new(Category::with_defaults(CategoryKind::Revenue)),
            expenses: Arc::new(Category::with_defaults(CategoryKind::Expenses)),
        }
    }
}

// ============================================================================
// WORKSHEET
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Worksheet {
    pub balance_sheet: Arc<BalanceSheet>,
    pub income_statement: Arc<IncomeStatement>,
}

impl Worksheet {
    /// Default categories, every value blank.
    pub fn with_defaults() -> Self {
        Worksheet::default()
    }

    pub fn category(&self, kind: CategoryKind) -> &Arc<Category> {
        match kind {
            CategoryKind::Assets => &self.balance_sheet.assets,
            CategoryKind::Liabilities => &self.balance_sheet.liabilities,
            CategoryKind::Equity => &self.balance_sheet.equity,
            CategoryKind::Revenue => &self.income_statement.revenue,
            CategoryKind::Expenses => &self.income_statement.expenses,
        }
    }

    pub fn value(&self, kind: CategoryKind, item: &str, period_index: usize) -> Option<&CellValue> {
        self.category(kind).get(item)?.value(period_index)
    }

    /// New worksheet with a single cell replaced.
    ///
    /// The returned worksheet's statement, category and line item on the edited
    /// path are fresh; everything else is shared with `self`.
    pub fn with_value(
        &self,
        statement: StatementKind,
        category: CategoryKind,
        item: &str,
        period_index: usize,
        value: CellValue,
    ) -> Result<Worksheet, SpreadingError> {
        if category.statement() != statement {
            return Err(SpreadingError::CategoryNotInStatement { statement, category });
        }
        if period_index >= PERIOD_COUNT {
            return Err(SpreadingError::PeriodOutOfRange(period_index));
        }

        let updated = Arc::new(self.category(category).with_value(category, item, period_index, value)?);

        let worksheet = match category {
            CategoryKind::Assets => self.replace_balance_sheet(BalanceSheet {
                assets: updated,
                ..self.balance_sheet.as_ref().clone()
            }),
            CategoryKind::Liabilities => self.replace_balance_sheet(BalanceSheet {
                liabilities: updated,
                ..self.balance_sheet.as_ref().clone()
            }),
            CategoryKind::Equity => self.replace_balance_sheet(BalanceSheet {
                equity: updated,
                ..self.balance_sheet.as_ref().clone()
            }),
            CategoryKind::Revenue => self.replace_income_statement(IncomeStatement {
                revenue: updated,
                ..self.income_statement.as_ref().clone()
            }),
            CategoryKind::Expenses => self.replace_income_statement(IncomeStatement {
                expenses: updated,
                ..self.income_statement.as_ref().clone()
            }),
        };

        Ok(worksheet)
    }

    fn replace_balance_sheet(&self, balance_sheet: BalanceSheet) -> Worksheet {
        Worksheet {
            balance_sheet: Arc::new(balance_sheet),
            income_statement: Arc::clone(&self.income_statement),
        }
    }

    fn replace_income_statement(&self, income_statement: IncomeStatement) -> Worksheet {
        Worksheet {
            balance_sheet: Arc::clone(&self.balance_sheet),
            income_statement: Arc::new(income_statement),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_worksheet_layout() {
        let worksheet = Worksheet::with_defaults();

        assert_eq!(worksheet.category(CategoryKind::Assets).len(), 7);
        assert_eq!(worksheet.category(CategoryKind::Liabilities).len(), 5);
        assert_eq!(worksheet.category(CategoryKind::Equity).len(), 2);
        assert_eq!(worksheet.category(CategoryKind::Revenue).len(), 3);
        assert_eq!(worksheet.category(CategoryKind::Expenses).len(), 5);

        let first: Vec<&str> = worksheet.category(CategoryKind::Assets).names().take(2).collect();
        assert_eq!(first, vec!["Cash & Equivalents", "Accounts Receivable"]);

        for kind in CategoryKind::ALL {
            for (_, item) in worksheet.category(kind).iter() {
                assert!(item.values.iter().all(CellValue::is_empty));
            }
        }
    }

    #[test]
    fn test_periods() {
        let labels: Vec<String> = PERIODS.iter().map(Period::label).collect();
        assert_eq!(labels, vec!["FY 2022", "FY 2023", "FY 2024"]);
    }

    #[test]
    fn test_category_statement_membership() {
        for statement in StatementKind::ALL {
            for category in statement.categories() {
                assert_eq!(category.statement(), statement);
            }
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("balanceSheet".parse::<StatementKind>().unwrap(), StatementKind::BalanceSheet);
        assert_eq!("Expenses".parse::<CategoryKind>().unwrap(), CategoryKind::Expenses);
        assert!("cashflow".parse::<StatementKind>().is_err());
        assert!("goodwill".parse::<CategoryKind>().is_err());
    }

    #[test]
    fn test_with_value_shares_untouched_containers() {
        let before = Worksheet::with_defaults();
        let after = before
            .with_value(
                StatementKind::BalanceSheet,
                CategoryKind::Assets,
                "Inventory",
                1,
                CellValue::Number(500.0),
            )
            .unwrap();

        assert!(!Arc::ptr_eq(&before.balance_sheet, &after.balance_sheet));
        assert!(!Arc::ptr_eq(&before.balance_sheet.assets, &after.balance_sheet.assets));
        assert!(Arc::ptr_eq(&before.income_statement, &after.income_statement));
        assert!(Arc::ptr_eq(&before.balance_sheet.liabilities, &after.balance_sheet.liabilities));
        assert!(Arc::ptr_eq(&before.balance_sheet.equity, &after.balance_sheet.equity));

        let old_cash = before.balance_sheet.assets.get("Cash & Equivalents").unwrap();
        let new_cash = after.balance_sheet.assets.get("Cash & Equivalents").unwrap();
        assert!(Arc::ptr_eq(old_cash, new_cash));

        assert_eq!(
            after.value(CategoryKind::Assets, "Inventory", 1),
            Some(&CellValue::Number(500.0))
        );
        assert_eq!(before.value(CategoryKind::Assets, "Inventory", 1), Some(&CellValue::Empty));
    }

    #[test]
    fn test_with_value_rejects_bad_addresses() {
        let worksheet = Worksheet::with_defaults();

        let err = worksheet
            .with_value(StatementKind::IncomeStatement, CategoryKind::Assets, "Inventory", 0, CellValue::Empty)
            .unwrap_err();
        assert!(matches!(err, SpreadingError::CategoryNotInStatement { .. }));

        let err = worksheet
            .with_value(StatementKind::BalanceSheet, CategoryKind::Assets, "Goodwill", 0, CellValue::Empty)
            .unwrap_err();
        assert!(matches!(err, SpreadingError::UnknownLineItem { .. }));

        let err = worksheet
            .with_value(StatementKind::BalanceSheet, CategoryKind::Assets, "Inventory", 3, CellValue::Empty)
            .unwrap_err();
        assert_eq!(err, SpreadingError::PeriodOutOfRange(3));
    }

    #[test]
    fn test_json_preserves_order_and_shape() {
        let json = r#"{
            "balanceSheet": {
                "assets": {"Zeta": [1, "", "2"], "Alpha": ["", "", ""]},
                "liabilities": {},
                "equity": {}
            },
            "incomeStatement": {"revenue": {}, "expenses": {}}
        }"#;

        let worksheet: Worksheet = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = worksheet.category(CategoryKind::Assets).names().collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);

        let out = serde_json::to_string(&worksheet).unwrap();
        assert!(out.find("Zeta").unwrap() < out.find("Alpha").unwrap());
    }

    #[test]
    fn test_json_rejects_wrong_period_count() {
        let json = r#"{
            "balanceSheet": {"assets": {"Cash": [1, 2]}, "liabilities": {}, "equity": {}},
            "incomeStatement": {"revenue": {}, "expenses": {}}
        }"#;
        assert!(serde_json::from_str::<Worksheet>(json).is_err());
    }

    #[test]
    fn test_json_rejects_duplicates_and_unknown_categories() {
        let duplicate = r#"{
            "balanceSheet": {"assets": {"Cash": [1, 2, 3], "Cash": [4, 5, 6]}, "liabilities": {}, "equity": {}},
            "incomeStatement": {"revenue": {}, "expenses": {}}
        }"#;
        assert!(serde_json::from_str::<Worksheet>(duplicate).is_err());

        let unknown = r#"{
            "balanceSheet": {"assets": {}, "liabilities": {}, "equity": {}, "goodwill": {}},
            "incomeStatement": {"revenue": {}, "expenses": {}}
        }"#;
        assert!(serde_json::from_str::<Worksheet>(unknown).is_err());
    }
}

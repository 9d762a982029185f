// Editable grid state for the Financial Spreading screen.

use std::sync::Arc;
use tracing::debug;

use super::cell::CellValue;
use super::worksheet::{CategoryKind, StatementKind, Worksheet};
use crate::error::SpreadingError;

/// State container owned by the spreading screen.
///
/// Starts with the default categories and blank values. Each edit swaps in a
/// new worksheet root; snapshots taken earlier keep seeing the old values.
#[derive(Debug, Clone, Default)]
pub struct SpreadingGrid {
    worksheet: Arc<Worksheet>,
}

impl SpreadingGrid {
    pub fn new() -> Self {
        SpreadingGrid {
            worksheet: Arc::new(Worksheet::with_defaults()),
        }
    }

    pub fn from_worksheet(worksheet: Worksheet) -> Self {
        SpreadingGrid {
            worksheet: Arc::new(worksheet),
        }
    }

    pub fn worksheet(&self) -> &Worksheet {
        &self.worksheet
    }

    pub fn snapshot(&self) -> Arc<Worksheet> {
        Arc::clone(&self.worksheet)
    }

    /// Write one cell from raw user input.
    ///
    /// `""` keeps the cell blank; non-numeric input is stored as zero.
    pub fn update_value(
        &mut self,
        statement: StatementKind,
        category: CategoryKind,
        item: &str,
        period_index: usize,
        raw_input: &str,
    ) -> Result<(), SpreadingError> {
        let value = CellValue::from_input(raw_input);
        debug!(%category, item, period_index, ?value, "updating cell");

        let updated = self
            .worksheet
            .with_value(statement, category, item, period_index, value)?;
        self.worksheet = Arc::new(updated);
        Ok(())
    }
}

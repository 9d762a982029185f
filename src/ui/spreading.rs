use loan_desk::spreading::{
    calculate_ratios, calculate_total, net_income, net_worth, CategoryKind, SpreadingGrid,
    StatementKind, PERIODS, PERIOD_COUNT,
};
use loan_desk::{display_cell, edit_text, format_currency, strip_separators};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadingTab {
    BalanceSheet,
    IncomeStatement,
    Ratios,
}

impl SpreadingTab {
    pub const ALL: [SpreadingTab; 3] = [
        SpreadingTab::BalanceSheet,
        SpreadingTab::IncomeStatement,
        SpreadingTab::Ratios,
    ];

    pub fn next(&self) -> Self {
        match self {
            SpreadingTab::BalanceSheet => SpreadingTab::IncomeStatement,
            SpreadingTab::IncomeStatement => SpreadingTab::Ratios,
            SpreadingTab::Ratios => SpreadingTab::BalanceSheet,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            SpreadingTab::BalanceSheet => SpreadingTab::Ratios,
            SpreadingTab::IncomeStatement => SpreadingTab::BalanceSheet,
            SpreadingTab::Ratios => SpreadingTab::IncomeStatement,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            SpreadingTab::BalanceSheet => "Balance Sheet",
            SpreadingTab::IncomeStatement => "Income Statement",
            SpreadingTab::Ratios => "Financial Ratios",
        }
    }

    /// The statement edited on this tab; the ratios tab is read-only.
    pub fn statement(&self) -> Option<StatementKind> {
        match self {
            SpreadingTab::BalanceSheet => Some(StatementKind::BalanceSheet),
            SpreadingTab::IncomeStatement => Some(StatementKind::IncomeStatement),
            SpreadingTab::Ratios => None,
        }
    }
}

/// Financial Spreading screen: the editable grid plus cursor and edit buffer.
pub struct SpreadingScreen {
    pub grid: SpreadingGrid,
    pub tab: SpreadingTab,
    /// Index into `rows()` for the active tab
    pub row: usize,
    pub period: usize,
    /// Raw text of the cell being edited, without separators
    pub editing: Option<String>,
}

impl SpreadingScreen {
    pub fn new() -> Self {
        Self {
            grid: SpreadingGrid::new(),
            tab: SpreadingTab::BalanceSheet,
            row: 0,
            period: 0,
            editing: None,
        }
    }

    /// Editable rows of the active tab, in display order.
    pub fn rows(&self) -> Vec<(CategoryKind, String)> {
        let Some(statement) = self.tab.statement() else {
            return Vec::new();
        };

        let worksheet = self.grid.worksheet();
        statement
            .categories()
            .iter()
            .flat_map(|kind| {
                worksheet
                    .category(*kind)
                    .names()
                    .map(|name| (*kind, name.to_string()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    pub fn selected_cell(&self) -> Option<(CategoryKind, String, usize)> {
        self.rows()
            .into_iter()
            .nth(self.row)
            .map(|(kind, item)| (kind, item, self.period))
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn next_tab(&mut self) {
        self.switch_tab(self.tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.switch_tab(self.tab.previous());
    }

    fn switch_tab(&mut self, tab: SpreadingTab) {
        self.editing = None;
        self.tab = tab;
        self.row = 0;
    }

    pub fn move_down(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        self.row = if self.row >= len - 1 { 0 } else { self.row + 1 };
    }

    pub fn move_up(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        self.row = if self.row == 0 { len - 1 } else { self.row - 1 };
    }

    pub fn move_right(&mut self) {
        self.period = (self.period + 1) % PERIOD_COUNT;
    }

    pub fn move_left(&mut self) {
        self.period = (self.period + PERIOD_COUNT - 1) % PERIOD_COUNT;
    }

    /// Focus the selected cell for editing, seeded with its full stored value.
    pub fn begin_edit(&mut self) {
        let Some((kind, item, period)) = self.selected_cell() else {
            return;
        };
        let current = self
            .grid
            .worksheet()
            .value(kind, &item, period)
            .map(edit_text)
            .unwrap_or_default();
        self.editing = Some(current);
    }

    /// Start editing with an empty buffer and the typed character.
    pub fn begin_edit_with(&mut self, ch: char) {
        if self.selected_cell().is_none() {
            return;
        }
        self.editing = Some(String::new());
        self.type_char(ch);
    }

    pub fn type_char(&mut self, ch: char) {
        if let Some(buffer) = self.editing.as_mut() {
            buffer.push(ch);
            self.apply_buffer();
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buffer) = self.editing.as_mut() {
            buffer.pop();
            self.apply_buffer();
        }
    }

    pub fn finish_edit(&mut self) {
        self.editing = None;
    }

    pub fn clear_cell(&mut self) {
        self.write_selected("");
        if let Some(buffer) = self.editing.as_mut() {
            buffer.clear();
        }
    }

    /// Every keystroke goes straight into the grid so totals stay current.
    fn apply_buffer(&mut self) {
        let raw = self.editing.as_deref().map(strip_separators).unwrap_or_default();
        self.write_selected(&raw);
    }

    fn write_selected(&mut self, raw: &str) {
        let (Some(statement), Some((kind, item, period))) = (self.tab.statement(), self.selected_cell()) else {
            return;
        };
        if let Err(e) = self.grid.update_value(statement, kind, &item, period, raw) {
            warn!("cell update rejected: {}", e);
        }
    }
}

impl Default for SpreadingScreen {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_spreading(f: &mut Frame, area: Rect, screen: &SpreadingScreen) {
    match screen.tab {
        SpreadingTab::BalanceSheet | SpreadingTab::IncomeStatement => render_statement(f, area, screen),
        SpreadingTab::Ratios => render_ratios(f, area, screen),
    }
}

fn period_header(first: &str) -> Row<'static> {
    let mut cells = vec![Cell::from(first.to_string())];
    cells.extend(PERIODS.iter().map(|p| Cell::from(format!("{:>14}", p.label()))));
    Row::new(cells)
        .style(
            Style::default()
                .fg(Color::Yellow)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .height(1)
}

fn column_widths() -> [Constraint; 4] {
    [
        Constraint::Length(30),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
    ]
}

fn render_statement(f: &mut Frame, area: Rect, screen: &SpreadingScreen) {
    let Some(statement) = screen.tab.statement() else {
        return;
    };
    let worksheet = screen.grid.worksheet();

    let mut rows: Vec<Row> = Vec::new();
    let mut selected_table_row = None;
    let mut editable_index = 0;

    for kind in statement.categories() {
        let category = worksheet.category(*kind);

        rows.push(Row::new(vec![Cell::from(kind.title()).style(
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]));

        for (name, item) in category.iter() {
            let is_selected_row = editable_index == screen.row;
            if is_selected_row {
                selected_table_row = Some(rows.len());
            }

            let mut cells = vec![Cell::from(format!("  {}", name))];
            for (period, value) in item.values.iter().enumerate() {
                let focused = is_selected_row && period == screen.period;
                let (text, style) = match (&screen.editing, focused) {
                    (Some(buffer), true) => (
                        format!("{:>13}▏", buffer),
                        Style::default().fg(Color::Black).bg(Color::Cyan),
                    ),
                    (None, true) => (
                        format!("{:>14}", display_cell(value)),
                        Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
                    ),
                    _ => (format!("{:>14}", display_cell(value)), Style::default()),
                };
                cells.push(Cell::from(text).style(style));
            }
            rows.push(Row::new(cells));
            editable_index += 1;
        }

        let totals = calculate_total(category);
        let mut total_cells = vec![Cell::from(format!("Total {}", kind.title()))];
        total_cells.extend(totals.iter().map(|t| Cell::from(format!("{:>14}", format_currency(*t)))));
        rows.push(
            Row::new(total_cells).style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        );
        rows.push(Row::new(vec![Cell::from("")]));
    }

    let (label, derived) = match statement {
        StatementKind::BalanceSheet => ("Net Worth", net_worth(worksheet)),
        StatementKind::IncomeStatement => ("Net Income", net_income(worksheet)),
    };
    let mut derived_cells = vec![Cell::from(label)];
    derived_cells.extend(derived.iter().map(|v| {
        let color = if *v < 0.0 { Color::Red } else { Color::Cyan };
        Cell::from(format!("{:>14}", format_currency(*v))).style(Style::default().fg(color))
    }));
    rows.push(Row::new(derived_cells).style(Style::default().add_modifier(Modifier::BOLD)));

    let table = Table::new(rows, column_widths())
        .header(period_header("Line Item"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", statement.title())),
        );

    let mut state = TableState::default();
    state.select(selected_table_row);
    f.render_stateful_widget(table, area, &mut state);
}

fn render_ratios(f: &mut Frame, area: Rect, screen: &SpreadingScreen) {
    let report = calculate_ratios(screen.grid.worksheet());

    let rows = report.rows().into_iter().map(|(label, values)| {
        let mut cells = vec![Cell::from(label)];
        cells.extend(values.iter().map(|v| {
            Cell::from(format!("{:>14}", v)).style(Style::default().fg(Color::Cyan))
        }));
        Row::new(cells).height(1)
    });

    let table = Table::new(rows, column_widths())
        .header(period_header("Metric"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(Line::from(vec![Span::styled(
                    " Key Financial Ratios & Metrics ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )])),
        );

    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_desk::spreading::CellValue;

    #[test]
    fn test_rows_follow_active_tab() {
        let mut screen = SpreadingScreen::new();
        assert_eq!(screen.rows().len(), 14);
        assert_eq!(screen.rows()[0], (CategoryKind::Assets, "Cash & Equivalents".to_string()));

        screen.next_tab();
        assert_eq!(screen.tab, SpreadingTab::IncomeStatement);
        assert_eq!(screen.rows().len(), 8);

        screen.next_tab();
        assert!(screen.rows().is_empty());
        assert!(screen.selected_cell().is_none());
    }

    #[test]
    fn test_cursor_wraps() {
        let mut screen = SpreadingScreen::new();
        screen.move_up();
        assert_eq!(screen.row, 13);
        screen.move_down();
        assert_eq!(screen.row, 0);

        screen.move_left();
        assert_eq!(screen.period, 2);
        screen.move_right();
        assert_eq!(screen.period, 0);
    }

    #[test]
    fn test_typing_updates_grid_on_every_keystroke() {
        let mut screen = SpreadingScreen::new();
        screen.begin_edit_with('1');
        assert_eq!(
            screen.grid.worksheet().value(CategoryKind::Assets, "Cash & Equivalents", 0),
            Some(&CellValue::Number(1.0))
        );

        screen.type_char('2');
        screen.type_char('5');
        assert_eq!(screen.editing.as_deref(), Some("125"));
        assert_eq!(
            screen.grid.worksheet().value(CategoryKind::Assets, "Cash & Equivalents", 0),
            Some(&CellValue::Number(125.0))
        );

        screen.backspace();
        screen.backspace();
        screen.backspace();
        assert_eq!(
            screen.grid.worksheet().value(CategoryKind::Assets, "Cash & Equivalents", 0),
            Some(&CellValue::Empty)
        );
    }

    #[test]
    fn test_begin_edit_has_no_separators() {
        let mut screen = SpreadingScreen::new();
        screen.begin_edit_with('1');
        for ch in "234567".chars() {
            screen.type_char(ch);
        }
        screen.finish_edit();

        screen.begin_edit();
        assert_eq!(screen.editing.as_deref(), Some("1234567"));
    }

    #[test]
    fn test_reedit_keeps_full_precision() {
        let mut screen = SpreadingScreen::new();
        screen.begin_edit_with('1');
        for ch in "234.5678".chars() {
            screen.type_char(ch);
        }
        screen.finish_edit();

        screen.begin_edit();
        assert_eq!(screen.editing.as_deref(), Some("1234.5678"));

        screen.backspace();
        assert_eq!(
            screen.grid.worksheet().value(CategoryKind::Assets, "Cash & Equivalents", 0),
            Some(&CellValue::Number(1234.567))
        );
    }

    #[test]
    fn test_clear_cell() {
        let mut screen = SpreadingScreen::new();
        screen.begin_edit_with('9');
        screen.finish_edit();
        screen.clear_cell();

        assert_eq!(
            screen.grid.worksheet().value(CategoryKind::Assets, "Cash & Equivalents", 0),
            Some(&CellValue::Empty)
        );
    }

    #[test]
    fn test_ratios_tab_is_read_only() {
        let mut screen = SpreadingScreen::new();
        screen.previous_tab();
        assert_eq!(screen.tab, SpreadingTab::Ratios);

        let before = screen.grid.snapshot();
        screen.begin_edit_with('5');
        assert!(!screen.is_editing());
        assert!(std::sync::Arc::ptr_eq(&before, &screen.grid.snapshot()));
    }
}

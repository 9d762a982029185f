mod overview;
mod spreading;

use spreading::{SpreadingScreen, SpreadingTab};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use loan_desk::loans::{LoanCatalog, LoanOverview};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Overview,
    Spreading,
}

pub struct App {
    pub overview: LoanOverview,
    pub spreading: SpreadingScreen,
    pub screen: Screen,
    pub should_quit: bool,
    rng: StdRng,
}

impl App {
    pub fn new(catalog: Arc<LoanCatalog>) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }

    pub fn with_rng(catalog: Arc<LoanCatalog>, mut rng: StdRng) -> Self {
        let overview = LoanOverview::new(catalog, &mut rng);
        Self {
            overview,
            spreading: SpreadingScreen::new(),
            screen: Screen::Overview,
            should_quit: false,
            rng,
        }
    }

    pub fn regenerate(&mut self) {
        self.overview.regenerate(&mut self.rng);
        info!(
            "showing application {}",
            self.overview.current().application.application_id
        );
    }

    /// A fresh grid on every visit; the previous analysis is discarded.
    pub fn open_spreading(&mut self) {
        self.spreading = SpreadingScreen::new();
        self.screen = Screen::Spreading;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Overview => self.handle_overview_key(key),
            Screen::Spreading => self.handle_spreading_key(key),
        }
    }

    fn handle_overview_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('r') => self.regenerate(),
            KeyCode::Char('a') => {
                let state = self.overview.open_attachments();
                debug!("attachments viewer: {:?}", state);
            }
            KeyCode::Char('x') => {
                self.overview.close_attachments();
            }
            KeyCode::Esc => {
                self.overview.dismiss_attachments();
            }
            KeyCode::Enter | KeyCode::Char('p') if !self.overview.is_viewer_open() => {
                self.open_spreading();
            }
            _ => {}
        }
    }

    fn handle_spreading_key(&mut self, key: KeyEvent) {
        let screen = &mut self.spreading;

        if screen.is_editing() {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => screen.finish_edit(),
                KeyCode::Backspace => screen.backspace(),
                KeyCode::Delete => screen.clear_cell(),
                KeyCode::Char(ch) => screen.type_char(ch),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('b') => self.screen = Screen::Overview,
            KeyCode::Tab => screen.next_tab(),
            KeyCode::BackTab => screen.previous_tab(),
            KeyCode::Down | KeyCode::Char('j') => screen.move_down(),
            KeyCode::Up | KeyCode::Char('k') => screen.move_up(),
            KeyCode::Left | KeyCode::Char('h') => screen.move_left(),
            KeyCode::Right | KeyCode::Char('l') => screen.move_right(),
            KeyCode::Enter => screen.begin_edit(),
            KeyCode::Delete => screen.clear_cell(),
            KeyCode::Char(ch) if ch.is_ascii_digit() || ch == '-' || ch == '.' => {
                screen.begin_edit_with(ch)
            }
            _ => {}
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Windows reports releases too
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.screen {
        Screen::Overview => overview::render_overview(f, chunks[1], &app.overview),
        Screen::Spreading => spreading::render_spreading(f, chunks[1], &app.spreading),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " Loan Desk ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::raw(" │ "));

    match app.screen {
        Screen::Overview => {
            spans.push(Span::styled(
                "Loan Application Overview",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        }
        Screen::Spreading => {
            for (i, tab) in SpreadingTab::ALL.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" │ "));
                }
                let style = if *tab == app.spreading.tab {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                spans.push(Span::styled(tab.title().to_string(), style));
            }

            // Labels only, nothing is exported or saved
            spans.push(Span::raw("  |  "));
            spans.push(Span::styled("[Export]", Style::default().fg(Color::DarkGray)));
            spans.push(Span::raw(" "));
            spans.push(Span::styled("[Save Analysis]", Style::default().fg(Color::DarkGray)));
        }
    }

    let header = Paragraph::new(vec![Line::from(spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn key_hint(spans: &mut Vec<Span<'static>>, key: &'static str, action: &'static str) {
    if !spans.is_empty() {
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(action));
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    match app.screen {
        Screen::Overview if app.overview.is_viewer_open() => {
            key_hint(&mut spans, " Esc/x", " Close attachments");
        }
        Screen::Overview => {
            key_hint(&mut spans, " r", " New application");
            if app.overview.can_open_attachments() {
                key_hint(&mut spans, "a", " Attachments");
            }
            key_hint(&mut spans, "Enter", " Spreading");
        }
        Screen::Spreading if app.spreading.is_editing() => {
            key_hint(&mut spans, " Enter/Esc", " Done");
            key_hint(&mut spans, "Backspace", " Delete");
            key_hint(&mut spans, "Del", " Clear");
        }
        Screen::Spreading => {
            key_hint(&mut spans, " Tab", " Statement");
            key_hint(&mut spans, "↑/↓/←/→", " Nav");
            key_hint(&mut spans, "Enter/0-9", " Edit");
            key_hint(&mut spans, "Del", " Clear");
            key_hint(&mut spans, "b", " Back");
        }
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

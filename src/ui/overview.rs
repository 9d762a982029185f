use loan_desk::loans::{FileKind, LoanOverview, LoanRecord, LoanStatus};
use loan_desk::{format_currency, format_file_size, format_long_date, format_short_date};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn status_color(status: &LoanStatus) -> Color {
    match status {
        LoanStatus::PendingApproval => Color::Yellow,
        LoanStatus::UnderReview => Color::Blue,
        LoanStatus::DocumentCollection => Color::LightRed,
        LoanStatus::Other(_) => Color::Gray,
    }
}

fn file_style(kind: &FileKind) -> Style {
    let color = match kind {
        FileKind::Pdf => Color::Red,
        FileKind::Excel => Color::Green,
        FileKind::Image => Color::Blue,
        FileKind::Other(_) => Color::Gray,
    };
    Style::default().fg(color)
}

fn label(text: &str) -> Span<'static> {
    Span::styled(
        format!("  {}: ", text),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )
}

pub fn render_overview(f: &mut Frame, area: Rect, overview: &LoanOverview) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Application details
            Constraint::Percentage(40), // Documents & next steps
        ])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Application overview
            Constraint::Length(6),  // Contact
            Constraint::Min(0),     // Financial summary
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(6)])
        .split(columns[1]);

    let record = overview.current();
    render_application(f, left[0], record);
    render_contact(f, left[1], record);
    render_financial_summary(f, left[2], record);
    render_documents(f, right[0], record);
    render_next_steps(f, right[1]);

    if overview.is_viewer_open() {
        render_attachments_modal(f, area, overview);
    }
}

fn render_application(f: &mut Frame, area: Rect, record: &LoanRecord) {
    let loan = &record.application;

    let content = vec![
        Line::from(vec![
            Span::styled(
                format!("  {}  ", loan.company_name),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("[{}]", loan.status),
                Style::default().fg(status_color(&loan.status)),
            ),
        ]),
        Line::from(Span::styled(
            format!("  Application ID: {}", loan.application_id),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            label("Loan Amount"),
            Span::styled(format_currency(loan.loan_amount), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![label("Submitted Date"), Span::raw(format_long_date(loan.submitted_date))]),
        Line::from(vec![label("Industry"), Span::raw(loan.industry.clone())]),
        Line::from(vec![label("Purpose"), Span::raw(loan.loan_purpose.clone())]),
        Line::from(vec![label("Term"), Span::raw(loan.requested_term.clone())]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Application Overview "),
    );
    f.render_widget(paragraph, area);
}

fn render_contact(f: &mut Frame, area: Rect, record: &LoanRecord) {
    let contact = &record.application.contact_info;

    let content = vec![
        Line::from(vec![label("Primary Contact"), Span::raw(contact.primary_contact.clone())]),
        Line::from(vec![label("Email"), Span::raw(contact.email.clone())]),
        Line::from(vec![label("Phone"), Span::raw(contact.phone.clone())]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Contact Information "),
    );
    f.render_widget(paragraph, area);
}

fn render_financial_summary(f: &mut Frame, area: Rect, record: &LoanRecord) {
    let summary = &record.application.financial_summary;

    let content = vec![
        Line::from(vec![
            label("Annual Revenue"),
            Span::styled(format_currency(summary.annual_revenue), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            label("Total Assets"),
            Span::styled(format_currency(summary.total_assets), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            label("Total Liabilities"),
            Span::styled(format_currency(summary.total_liabilities), Style::default().fg(Color::LightRed)),
        ]),
        Line::from(vec![
            label("Net Worth"),
            Span::styled(format_currency(summary.net_worth), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![label("Debt-to-Equity"), Span::raw(summary.debt_to_equity.to_string())]),
        Line::from(vec![label("Current Ratio"), Span::raw(summary.current_ratio.to_string())]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Financial Summary "),
    );
    f.render_widget(paragraph, area);
}

fn render_documents(f: &mut Frame, area: Rect, record: &LoanRecord) {
    let documents = &record.application.documents;

    let mut content = vec![Line::from(Span::styled(
        format!("  Uploaded Documents ({})", documents.uploaded.len()),
        Style::default().fg(Color::DarkGray),
    ))];
    for doc in &documents.uploaded {
        content.push(Line::from(vec![
            Span::styled("   ✓ ", Style::default().fg(Color::Green)),
            Span::raw(doc.clone()),
        ]));
    }

    if !documents.missing.is_empty() {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            format!("  Missing Documents ({})", documents.missing.len()),
            Style::default().fg(Color::DarkGray),
        )));
        for doc in &documents.missing {
            content.push(Line::from(vec![
                Span::styled("   ✗ ", Style::default().fg(Color::LightRed)),
                Span::raw(doc.clone()),
            ]));
        }
    }

    if record.has_attachments() {
        content.push(Line::from(""));
        content.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("a", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!(" to view all attachments ({})", record.attachments.len()),
                Style::default().fg(Color::Cyan),
            ),
        ]));
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Document Status "),
        );
    f.render_widget(paragraph, area);
}

fn render_next_steps(f: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            "  Review the application, then spread the balance sheet and income statement.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::styled(
                " Proceed to Financial Spreading →",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Next Steps "),
        );
    f.render_widget(paragraph, area);
}

fn render_attachments_modal(f: &mut Frame, area: Rect, overview: &LoanOverview) {
    let record = overview.current();
    let modal = centered_rect(80, 80, area);

    let mut content = vec![
        Line::from(Span::styled(
            format!(
                "  {} - {} files",
                record.application.company_name,
                record.attachments.len()
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    for group in overview.grouped_attachments() {
        content.push(Line::from(vec![
            Span::styled("  ▌ ", Style::default().fg(Color::Cyan)),
            Span::styled(
                group.category.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]));
        for file in group.files {
            content.push(Line::from(vec![
                Span::styled("     ■ ", file_style(&file.kind)),
                Span::raw(file.name.clone()),
            ]));
            content.push(Line::from(Span::styled(
                format!(
                    "       {} • {} • {}",
                    file.kind.label(),
                    format_file_size(file.size),
                    format_short_date(file.upload_date)
                ),
                Style::default().fg(Color::DarkGray),
            )));
        }
        content.push(Line::from(""));
    }

    content.push(Line::from(vec![
        Span::styled(
            format!("  Total: {} files", record.attachments.len()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("    "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Close"),
    ]));

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Attachments "),
    );

    f.render_widget(Clear, modal);
    f.render_widget(paragraph, modal);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

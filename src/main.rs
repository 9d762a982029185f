// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;

use loan_desk::loans::{LoanCatalog, LoanOverview};
use loan_desk::{format_currency, format_file_size, format_long_date, format_short_date, logging, Settings};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let settings = Settings::load().context("failed to load settings")?;

    if args.len() > 1 && args[1] == "show" {
        // Print one application and exit
        run_show(&settings)?;
    } else {
        // UI mode (default)
        run_ui_mode(&settings)?;
    }

    Ok(())
}

fn load_catalog(settings: &Settings) -> Result<Arc<LoanCatalog>> {
    let catalog = LoanCatalog::load(&settings.data).context("failed to load loan catalog")?;
    Ok(Arc::new(catalog))
}

fn run_show(settings: &Settings) -> Result<()> {
    logging::init_stderr(&settings.logging);

    let catalog = load_catalog(settings)?;
    let overview = LoanOverview::new(catalog, &mut rand::thread_rng());
    let record = overview.current();
    let loan = &record.application;

    println!("🏦 {} [{}]", loan.company_name, loan.status);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Application ID:  {}", loan.application_id);
    println!("Loan Amount:     {}", format_currency(loan.loan_amount));
    println!("Submitted Date:  {}", format_long_date(loan.submitted_date));
    println!("Industry:        {}", loan.industry);
    println!("Purpose:         {}", loan.loan_purpose);
    println!("Term:            {}", loan.requested_term);

    let contact = &loan.contact_info;
    println!("\n📇 Contact");
    println!("  {} <{}> {}", contact.primary_contact, contact.email, contact.phone);

    let summary = &loan.financial_summary;
    println!("\n📊 Financial Summary");
    println!("  Annual Revenue:    {}", format_currency(summary.annual_revenue));
    println!("  Total Assets:      {}", format_currency(summary.total_assets));
    println!("  Total Liabilities: {}", format_currency(summary.total_liabilities));
    println!("  Net Worth:         {}", format_currency(summary.net_worth));
    println!("  Debt-to-Equity:    {}", summary.debt_to_equity);
    println!("  Current Ratio:     {}", summary.current_ratio);

    let documents = &loan.documents;
    println!("\n📄 Documents");
    for doc in &documents.uploaded {
        println!("  ✓ {}", doc);
    }
    for doc in &documents.missing {
        println!("  ✗ {}", doc);
    }

    if record.has_attachments() {
        println!("\n📎 Attachments ({})", record.attachments.len());
        for group in overview.grouped_attachments() {
            println!("  {}", group.category);
            for file in group.files {
                println!(
                    "    {} ({} • {} • {})",
                    file.name,
                    file.kind.label(),
                    format_file_size(file.size),
                    format_short_date(file.upload_date)
                );
            }
        }
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(settings: &Settings) -> Result<()> {
    // The terminal is ours; logs only go to a file when one is configured
    logging::init_file(&settings.logging).context("failed to open log file")?;

    let catalog = load_catalog(settings)?;
    tracing::info!("starting terminal UI with {} applications", catalog.len());

    let mut app = ui::App::new(catalog);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_settings: &Settings) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or print one application: loan-desk show");
    std::process::exit(1);
}

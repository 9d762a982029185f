// Loan Desk - Web Server
// JSON API over the sample loans and the spreading calculator

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use loan_desk::api::{build_router, AppState};
use loan_desk::{logging, LoanCatalog, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("failed to load settings")?;
    logging::init_stderr(&settings.logging);

    info!("Loan Desk - Web Server v{}", loan_desk::VERSION);

    let catalog = LoanCatalog::load(&settings.data).context("failed to load loan catalog")?;
    let state = AppState {
        catalog: Arc::new(catalog),
    };

    let app = build_router(state);

    // Start server
    let addr = settings.server.bind_addr.as_str();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    info!("Server running on http://{}", addr);
    info!("   Loans:  http://{}/api/loans", addr);
    info!("   Random: http://{}/api/loans/random", addr);

    axum::serve(listener, app)
        .await
        .context("server terminated")?;

    Ok(())
}

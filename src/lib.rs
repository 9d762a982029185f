// Loan Desk - Core Library
// Exposes all modules for use in the terminal UI, API server, and tests

pub mod config;
pub mod error;
pub mod format;
pub mod loans;
pub mod logging;
pub mod spreading;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::{DataConfig, LoggingConfig, ServerConfig, Settings};
pub use error::{LoanDeskError, Result, SpreadingError};
pub use format::{
    display_cell, edit_text, format_currency, format_file_size, format_long_date, format_number,
    format_short_date, strip_separators,
};
pub use loans::{
    group_by_category, Attachment, AttachmentGroup, AttachmentsViewer, LoanApplication,
    LoanCatalog, LoanOverview, LoanRecord, LoanStatus, ViewerEvent, ViewerState,
};
pub use spreading::{
    calculate_ratios, calculate_total, net_income, net_worth, CategoryKind, CellValue,
    RatioReport, SpreadingGrid, StatementKind, Worksheet, PERIODS, PERIOD_COUNT,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

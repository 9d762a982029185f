// Loan applications: sample catalog, random selection and the attachments viewer.

pub mod attachments;
pub mod catalog;
pub mod model;
pub mod overview;

pub use attachments::{group_by_category, AttachmentGroup, AttachmentsViewer, ViewerEvent, ViewerState};
pub use catalog::LoanCatalog;
pub use model::{
    Attachment, ContactInfo, DocumentStatus, FileKind, FinancialSummary, LoanApplication,
    LoanRecord, LoanStatus,
};
pub use overview::LoanOverview;

// 🏦 Loan Application Records
//
// Read-only sample data: loan applications and their file attachments.
// Field names follow the camelCase JSON the sample files are written in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// STATUS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoanStatus {
    PendingApproval,
    UnderReview,
    DocumentCollection,

    /// Any other label, kept verbatim.
    Other(String),
}

impl LoanStatus {
    pub fn label(&self) -> &str {
        match self {
            LoanStatus::PendingApproval => "Pending Approval",
            LoanStatus::UnderReview => "Under Review",
            LoanStatus::DocumentCollection => "Document Collection",
            LoanStatus::Other(label) => label,
        }
    }
}

impl From<String> for LoanStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Pending Approval" => LoanStatus::PendingApproval,
            "Under Review" => LoanStatus::UnderReview,
            "Document Collection" => LoanStatus::DocumentCollection,
            _ => LoanStatus::Other(label),
        }
    }
}

impl From<LoanStatus> for String {
    fn from(status: LoanStatus) -> Self {
        status.label().to_string()
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// LOAN APPLICATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub primary_contact: String,
    pub email: String,
    pub phone: String,
}

/// Figures as reported on the application, not derived from a worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub annual_revenue: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    pub debt_to_equity: f64,
    pub current_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentStatus {
    #[serde(default)]
    pub uploaded: Vec<String>,
    #[serde(default)]
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub application_id: String,
    pub company_name: String,
    pub status: LoanStatus,
    pub loan_amount: f64,
    pub submitted_date: NaiveDate,
    pub industry: String,
    pub loan_purpose: String,
    pub requested_term: String,
    pub contact_info: ContactInfo,
    pub financial_summary: FinancialSummary,
    #[serde(default)]
    pub documents: DocumentStatus,
}

// ============================================================================
// ATTACHMENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileKind {
    Pdf,
    Excel,
    Image,
    Other(String),
}

impl FileKind {
    pub fn label(&self) -> &str {
        match self {
            FileKind::Pdf => "PDF",
            FileKind::Excel => "Excel",
            FileKind::Image => "Image",
            FileKind::Other(tag) => tag,
        }
    }
}

impl From<String> for FileKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "PDF" => FileKind::Pdf,
            "Excel" => FileKind::Excel,
            "Image" => FileKind::Image,
            _ => FileKind::Other(tag),
        }
    }
}

impl From<FileKind> for String {
    fn from(kind: FileKind) -> Self {
        kind.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Size in bytes
    pub size: u64,
    pub upload_date: NaiveDate,
}

/// A loan application merged with the attachments filed under its id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    #[serde(flatten)]
    pub application: LoanApplication,
    pub attachments: Vec<Attachment>,
}

impl LoanRecord {
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_keeps_unknown_labels() {
        assert_eq!(LoanStatus::from("Under Review".to_string()), LoanStatus::UnderReview);

        let other = LoanStatus::from("Withdrawn".to_string());
        assert_eq!(other, LoanStatus::Other("Withdrawn".to_string()));
        assert_eq!(other.label(), "Withdrawn");

        let json = serde_json::to_string(&LoanStatus::PendingApproval).unwrap();
        assert_eq!(json, "\"Pending Approval\"");
    }

    #[test]
    fn test_attachment_deserializes_type_tag() {
        let json = r#"{"name": "scan.png", "category": "Collateral", "type": "Image",
                       "size": 2048, "uploadDate": "2024-03-01"}"#;
        let attachment: Attachment = serde_json::from_str(json).unwrap();

        assert_eq!(attachment.kind, FileKind::Image);
        assert_eq!(attachment.size, 2048);
        assert_eq!(attachment.upload_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_unknown_file_kind() {
        let kind = FileKind::from("Word".to_string());
        assert_eq!(kind, FileKind::Other("Word".to_string()));
        assert_eq!(kind.label(), "Word");
    }
}

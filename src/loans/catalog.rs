// Loan catalog - the static sample set plus attachment lookup by application id.

use rand::Rng;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::model::{Attachment, LoanApplication, LoanRecord};
use crate::config::DataConfig;
use crate::error::{LoanDeskError, Result};

const SAMPLE_LOANS: &str = include_str!("../../data/loans.json");
const SAMPLE_ATTACHMENTS: &str = include_str!("../../data/attachments.json");

#[derive(Debug, Clone)]
pub struct LoanCatalog {
    loans: Vec<LoanApplication>,
    attachments: HashMap<String, Vec<Attachment>>,
}

impl LoanCatalog {
    /// Build a catalog. An empty loan list is rejected.
    pub fn new(
        loans: Vec<LoanApplication>,
        attachments: HashMap<String, Vec<Attachment>>,
    ) -> Result<Self> {
        if loans.is_empty() {
            return Err(LoanDeskError::EmptyCatalog);
        }
        Ok(LoanCatalog { loans, attachments })
    }

    /// Sample set compiled into the binary.
    pub fn sample() -> Result<Self> {
        Self::from_json(SAMPLE_LOANS, "loans.json", SAMPLE_ATTACHMENTS, "attachments.json")
    }

    /// Load from configured files, falling back to the embedded sample for
    /// whichever path is not set.
    pub fn load(config: &DataConfig) -> Result<Self> {
        let (loans_json, loans_name) = match &config.loans_path {
            Some(path) => (read_file(path)?, path.display().to_string()),
            None => (SAMPLE_LOANS.to_string(), "loans.json".to_string()),
        };
        let (attachments_json, attachments_name) = match &config.attachments_path {
            Some(path) => (read_file(path)?, path.display().to_string()),
            None => (SAMPLE_ATTACHMENTS.to_string(), "attachments.json".to_string()),
        };

        let catalog = Self::from_json(&loans_json, &loans_name, &attachments_json, &attachments_name)?;
        info!(
            loans = catalog.len(),
            attachment_sets = catalog.attachments.len(),
            "loan catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_json(
        loans_json: &str,
        loans_name: &str,
        attachments_json: &str,
        attachments_name: &str,
    ) -> Result<Self> {
        let loans: Vec<LoanApplication> =
            serde_json::from_str(loans_json).map_err(|error| LoanDeskError::Json {
                source_name: loans_name.to_string(),
                error,
            })?;
        let attachments: HashMap<String, Vec<Attachment>> = serde_json::from_str(attachments_json)
            .map_err(|error| LoanDeskError::Json {
                source_name: attachments_name.to_string(),
                error,
            })?;

        Self::new(loans, attachments)
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    pub fn loans(&self) -> &[LoanApplication] {
        &self.loans
    }

    /// Attachments filed under an application id. Unknown ids have none.
    pub fn attachments_for(&self, application_id: &str) -> &[Attachment] {
        self.attachments
            .get(application_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn merge(&self, application: &LoanApplication) -> LoanRecord {
        LoanRecord {
            application: application.clone(),
            attachments: self.attachments_for(&application.application_id).to_vec(),
        }
    }

    /// Merged record for an application id.
    pub fn find(&self, application_id: &str) -> Result<LoanRecord> {
        self.loans
            .iter()
            .find(|loan| loan.application_id == application_id)
            .map(|loan| self.merge(loan))
            .ok_or_else(|| LoanDeskError::UnknownApplication(application_id.to_string()))
    }

    /// Pick one loan uniformly at random.
    ///
    /// Each call is independent; the same loan may come up twice in a row.
    pub fn select_random<R: Rng + ?Sized>(&self, rng: &mut R) -> LoanRecord {
        let index = rng.gen_range(0..self.loans.len());
        debug!(index, "selected loan");
        self.merge(&self.loans[index])
    }
}

fn read_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_sample_catalog_loads() {
        let catalog = LoanCatalog::sample().unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.loans()[0].application_id, "LA-2024-0142");
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = LoanCatalog::from_json("[]", "loans.json", "{}", "attachments.json");
        assert!(matches!(result, Err(LoanDeskError::EmptyCatalog)));
    }

    #[test]
    fn test_bad_json_names_its_source() {
        let err = LoanCatalog::from_json("{", "custom-loans.json", "{}", "attachments.json").unwrap_err();
        assert!(err.to_string().contains("custom-loans.json"));
    }

    #[test]
    fn test_missing_attachment_entry_is_empty() {
        let catalog = LoanCatalog::sample().unwrap();
        let record = catalog.find("LA-2024-0194").unwrap();

        assert!(record.attachments.is_empty());
        assert!(!record.has_attachments());
        assert!(catalog.attachments_for("no-such-id").is_empty());
    }

    #[test]
    fn test_find_unknown_application() {
        let catalog = LoanCatalog::sample().unwrap();
        assert!(matches!(
            catalog.find("LA-0000-0000"),
            Err(LoanDeskError::UnknownApplication(_))
        ));
    }

    #[test]
    fn test_random_selection_reaches_every_loan() {
        let catalog = LoanCatalog::sample().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();

        for _ in 0..500 {
            let record = catalog.select_random(&mut rng);
            seen.insert(record.application.application_id.clone());
        }

        assert_eq!(seen.len(), catalog.len());
    }

    #[test]
    fn test_selected_record_carries_its_own_attachments() {
        let catalog = LoanCatalog::sample().unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let record = catalog.select_random(&mut rng);
            assert_eq!(
                record.attachments.as_slice(),
                catalog.attachments_for(&record.application.application_id)
            );
        }
    }
}

// Loan Overview screen state.

use rand::Rng;
use std::sync::Arc;
use tracing::info;

use super::attachments::{group_by_category, AttachmentGroup, AttachmentsViewer, ViewerEvent, ViewerState};
use super::catalog::LoanCatalog;
use super::model::LoanRecord;

/// Owns the current loan and the attachments viewer for the overview screen.
#[derive(Debug, Clone)]
pub struct LoanOverview {
    catalog: Arc<LoanCatalog>,
    current: LoanRecord,
    viewer: AttachmentsViewer,
}

impl LoanOverview {
    /// Start with a randomly selected loan.
    pub fn new<R: Rng + ?Sized>(catalog: Arc<LoanCatalog>, rng: &mut R) -> Self {
        let current = catalog.select_random(rng);
        LoanOverview {
            catalog,
            current,
            viewer: AttachmentsViewer::new(),
        }
    }

    pub fn current(&self) -> &LoanRecord {
        &self.current
    }

    pub fn catalog(&self) -> &LoanCatalog {
        &self.catalog
    }

    /// Replace the current loan with a fresh random pick. Closes the viewer.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.current = self.catalog.select_random(rng);
        self.viewer.reset();
        info!(
            application_id = %self.current.application.application_id,
            company = %self.current.application.company_name,
            "regenerated loan"
        );
    }

    pub fn grouped_attachments(&self) -> Vec<AttachmentGroup<'_>> {
        group_by_category(&self.current.attachments)
    }

    pub fn viewer_state(&self) -> ViewerState {
        self.viewer.state()
    }

    pub fn is_viewer_open(&self) -> bool {
        self.viewer.is_open()
    }

    pub fn can_open_attachments(&self) -> bool {
        self.current.has_attachments()
    }

    pub fn open_attachments(&mut self) -> ViewerState {
        self.viewer.handle(ViewerEvent::Open, self.current.attachments.len())
    }

    pub fn close_attachments(&mut self) -> ViewerState {
        self.viewer.handle(ViewerEvent::Close, self.current.attachments.len())
    }

    pub fn dismiss_attachments(&mut self) -> ViewerState {
        self.viewer.handle(ViewerEvent::DismissBackdrop, self.current.attachments.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn overview_for(application_id: &str) -> LoanOverview {
        let catalog = Arc::new(LoanCatalog::sample().unwrap());
        let mut rng = StdRng::seed_from_u64(1);
        let mut overview = LoanOverview::new(Arc::clone(&catalog), &mut rng);
        // pin a specific loan for deterministic viewer tests
        overview.current = catalog.find(application_id).unwrap();
        overview
    }

    #[test]
    fn test_viewer_cannot_open_without_attachments() {
        let mut overview = overview_for("LA-2024-0194");

        assert!(!overview.can_open_attachments());
        assert_eq!(overview.open_attachments(), ViewerState::Closed);
    }

    #[test]
    fn test_viewer_shows_current_loan_groups() {
        let mut overview = overview_for("LA-2024-0142");

        assert_eq!(overview.open_attachments(), ViewerState::Open);
        let groups = overview.grouped_attachments();
        let categories: Vec<&str> = groups.iter().map(|g| g.category).collect();
        assert_eq!(categories, vec!["Tax Returns", "Financial Statements", "Equipment", "Collateral"]);
        assert_eq!(groups[0].files.len(), 3);

        assert_eq!(overview.dismiss_attachments(), ViewerState::Closed);
    }

    #[test]
    fn test_regenerate_closes_viewer() {
        let mut overview = overview_for("LA-2024-0142");
        overview.open_attachments();

        let mut rng = StdRng::seed_from_u64(99);
        overview.regenerate(&mut rng);

        assert!(!overview.is_viewer_open());
        let id = overview.current().application.application_id.clone();
        assert_eq!(
            overview.current().attachments.as_slice(),
            overview.catalog().attachments_for(&id)
        );
    }
}

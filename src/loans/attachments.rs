// Attachment grouping and the attachments viewer.

use serde::Serialize;

use super::model::Attachment;

/// Attachments sharing a category, in the order they were listed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachmentGroup<'a> {
    pub category: &'a str,
    pub files: Vec<&'a Attachment>,
}

/// Group by category. Groups appear in order of each category's first occurrence.
pub fn group_by_category(attachments: &[Attachment]) -> Vec<AttachmentGroup<'_>> {
    let mut groups: Vec<AttachmentGroup<'_>> = Vec::new();

    for attachment in attachments {
        match groups
            .iter_mut()
            .find(|group| group.category == attachment.category)
        {
            Some(group) => group.files.push(attachment),
            None => groups.push(AttachmentGroup {
                category: &attachment.category,
                files: vec![attachment],
            }),
        }
    }

    groups
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    Open,
    Close,
    DismissBackdrop,
}

/// Modal viewer for the current loan's attachments.
///
/// Closed -> Open only when there is something to show; Open -> Closed on
/// close or backdrop dismissal. Every other event is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttachmentsViewer {
    state: ViewerState,
}

impl AttachmentsViewer {
    pub fn new() -> Self {
        AttachmentsViewer::default()
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ViewerState::Open
    }

    /// Apply an event; returns the resulting state.
    pub fn handle(&mut self, event: ViewerEvent, attachment_count: usize) -> ViewerState {
        self.state = match (self.state, event) {
            (ViewerState::Closed, ViewerEvent::Open) if attachment_count > 0 => ViewerState::Open,
            (ViewerState::Open, ViewerEvent::Close | ViewerEvent::DismissBackdrop) => {
                ViewerState::Closed
            }
            (state, _) => state,
        };
        self.state
    }

    /// Force the viewer closed, e.g. when the loan it showed is replaced.
    pub fn reset(&mut self) {
        self.state = ViewerState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loans::model::FileKind;
    use chrono::NaiveDate;

    fn attachment(name: &str, category: &str) -> Attachment {
        Attachment {
            name: name.to_string(),
            category: category.to_string(),
            kind: FileKind::Pdf,
            size: 1024,
            upload_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[test]
    fn test_grouping_keeps_first_seen_order() {
        let attachments = vec![
            attachment("2023.pdf", "Tax"),
            attachment("statement.pdf", "Bank"),
            attachment("2022.pdf", "Tax"),
        ];

        let groups = group_by_category(&attachments);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Tax");
        assert_eq!(groups[0].files.len(), 2);
        assert_eq!(groups[0].files[1].name, "2022.pdf");
        assert_eq!(groups[1].category, "Bank");
        assert_eq!(groups[1].files.len(), 1);
    }

    #[test]
    fn test_grouping_empty() {
        assert!(group_by_category(&[]).is_empty());
    }

    #[test]
    fn test_viewer_opens_only_with_attachments() {
        let mut viewer = AttachmentsViewer::new();

        assert_eq!(viewer.handle(ViewerEvent::Open, 0), ViewerState::Closed);
        assert_eq!(viewer.handle(ViewerEvent::Open, 3), ViewerState::Open);
        assert!(viewer.is_open());
    }

    #[test]
    fn test_viewer_closes_on_close_or_backdrop() {
        let mut viewer = AttachmentsViewer::new();

        viewer.handle(ViewerEvent::Open, 1);
        assert_eq!(viewer.handle(ViewerEvent::Close, 1), ViewerState::Closed);

        viewer.handle(ViewerEvent::Open, 1);
        assert_eq!(viewer.handle(ViewerEvent::DismissBackdrop, 1), ViewerState::Closed);
    }

    #[test]
    fn test_viewer_ignores_other_events() {
        let mut viewer = AttachmentsViewer::new();
        assert_eq!(viewer.handle(ViewerEvent::Close, 2), ViewerState::Closed);

        viewer.handle(ViewerEvent::Open, 2);
        assert_eq!(viewer.handle(ViewerEvent::Open, 2), ViewerState::Open);
    }
}

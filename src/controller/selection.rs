//! Selection slice: the chosen document and summary style.

use crate::document::Document;
use crate::service::SummaryRequest;
use crate::style::SummaryStyle;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    document: Option<Document>,
    style: SummaryStyle,
}

impl SelectionState {
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn style(&self) -> SummaryStyle {
        self.style
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    /// Replace the selected document. Any file is accepted.
    pub fn select_document(&mut self, document: Document) {
        self.document = Some(document);
    }

    /// Returns false when there was nothing to clear
    pub fn clear_document(&mut self) -> bool {
        self.document.take().is_some()
    }

    pub fn select_style(&mut self, style: SummaryStyle) {
        self.style = style;
    }

    /// Request built from the current selection, if a document is chosen
    pub fn snapshot(&self) -> Option<SummaryRequest> {
        self.document.as_ref().map(|document| SummaryRequest {
            document: document.clone(),
            style: self.style,
        })
    }
}

//! Result slice: the returned summary/quiz and how they are presented.

use crate::export::ExportArtifact;
use crate::service::SummaryResult;

/// Which half of the result is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultView {
    #[default]
    Summary,
    Quiz,
}

impl ResultView {
    pub fn toggled(self) -> Self {
        match self {
            Self::Summary => Self::Quiz,
            Self::Quiz => Self::Summary,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Quiz => "Quiz",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultState {
    result: Option<SummaryResult>,
    open: bool,
    view: ResultView,
}

impl ResultState {
    pub fn summary_text(&self) -> Option<&str> {
        self.result.as_ref().map(|r| r.summary.as_str())
    }

    pub fn quiz_text(&self) -> Option<&str> {
        self.result.as_ref().map(|r| r.quiz.as_str())
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn view(&self) -> ResultView {
        self.view
    }

    /// Store a fresh result and open it on the summary view
    pub fn show(&mut self, result: SummaryResult) {
        self.result = Some(result);
        self.open = true;
        self.view = ResultView::Summary;
    }

    /// Returns false when the result surface is closed
    pub fn toggle_view(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.view = self.view.toggled();
        true
    }

    /// Hide the result surface. The texts stay.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Text for the active view while the surface is open
    pub fn displayed_text(&self) -> Option<&str> {
        if !self.open {
            return None;
        }
        match self.view {
            ResultView::Summary => self.summary_text(),
            ResultView::Quiz => self.quiz_text(),
        }
    }

    /// Always the summary, whatever the active view
    pub fn export(&self) -> Option<ExportArtifact> {
        self.summary_text().map(ExportArtifact::summary)
    }
}

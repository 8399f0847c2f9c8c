//! Workflow controller.
//!
//! Owns the three state slices of one session and is the only place they change:
//! - `selection.rs` - chosen document and style
//! - `submission.rs` - lifecycle of the request to the service
//! - `result.rs` - returned summary/quiz and how they are shown
//!
//! Every mutation publishes a fresh [`SessionState`] on a watch channel so views
//! can redraw from it.

mod result;
mod selection;
mod submission;

pub use result::{ResultState, ResultView};
pub use selection::SelectionState;
pub use submission::SubmissionPhase;

use crate::document::Document;
use crate::export::ExportArtifact;
use crate::service::{ServiceError, SummarizationService, SummaryRequest, SummaryResult};
use crate::style::SummaryStyle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Everything the user can see, as one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub selection: SelectionState,
    pub submission: SubmissionPhase,
    pub result: ResultState,
}

impl SessionState {
    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.selection.has_document() && !self.submission.is_submitting()
    }
}

pub struct Controller {
    state: SessionState,
    notifier: watch::Sender<SessionState>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        let (notifier, _) = watch::channel(SessionState::default());
        Self {
            state: SessionState::default(),
            notifier,
        }
    }

    /// Receive a new state after every mutation
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.notifier.subscribe()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selected_document(&self) -> Option<&Document> {
        self.state.selection.document()
    }

    pub fn style(&self) -> SummaryStyle {
        self.state.selection.style()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.submission.is_submitting()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.state.submission.last_error()
    }

    pub fn is_result_open(&self) -> bool {
        self.state.result.is_open()
    }

    pub fn active_view(&self) -> ResultView {
        self.state.result.view()
    }

    pub fn summary_text(&self) -> Option<&str> {
        self.state.result.summary_text()
    }

    pub fn quiz_text(&self) -> Option<&str> {
        self.state.result.quiz_text()
    }

    pub fn displayed_text(&self) -> Option<&str> {
        self.state.result.displayed_text()
    }

    pub fn can_submit(&self) -> bool {
        self.state.can_submit()
    }

    fn notify(&self) {
        self.notifier.send_replace(self.state.clone());
    }

    pub fn select_document(&mut self, document: Document) {
        debug!(file = document.name(), bytes = document.size(), "document selected");
        self.state.selection.select_document(document);
        self.notify();
    }

    pub fn clear_document(&mut self) {
        if self.state.selection.clear_document() {
            debug!("document cleared");
            self.notify();
        }
    }

    pub fn select_style(&mut self, style: SummaryStyle) {
        debug!(%style, "style selected");
        self.state.selection.select_style(style);
        self.notify();
    }

    /// Mark a submission as in flight and return the request to send.
    ///
    /// Returns `None`, changing nothing, when no document is selected or a
    /// submission is already pending.
    pub fn begin_submission(&mut self) -> Option<SummaryRequest> {
        if self.is_submitting() {
            debug!("submit ignored: a submission is already in flight");
            return None;
        }
        let Some(request) = self.state.selection.snapshot() else {
            debug!("submit ignored: no document selected");
            return None;
        };

        self.state.submission = SubmissionPhase::Pending;
        self.notify();
        info!(file = request.document.name(), style = %request.style, "submission dispatched");
        Some(request)
    }

    /// Apply the outcome of the in-flight submission.
    ///
    /// Failures only touch the error slot; any earlier result stays as it was.
    pub fn finish_submission(&mut self, outcome: Result<SummaryResult, ServiceError>) {
        if !self.is_submitting() {
            warn!("submission outcome arrived with nothing in flight; ignoring");
            return;
        }

        match outcome {
            Ok(result) => {
                info!(
                    summary_chars = result.summary.len(),
                    quiz_chars = result.quiz.len(),
                    "submission succeeded"
                );
                self.state.result.show(result);
                self.state.submission = SubmissionPhase::Succeeded;
            }
            Err(error) => {
                warn!(%error, "submission failed");
                self.state.submission = SubmissionPhase::Failed {
                    message: error.user_message(),
                };
            }
        }
        self.notify();
    }

    /// Run one submission to completion against `service`.
    ///
    /// Returns false when the preconditions were not met and nothing was sent.
    pub async fn submit<S>(&mut self, service: &S) -> bool
    where
        S: SummarizationService + ?Sized,
    {
        let Some(request) = self.begin_submission() else {
            return false;
        };
        let outcome = service.summarize(&request).await;
        self.finish_submission(outcome);
        true
    }

    pub fn toggle_view(&mut self) {
        if self.state.result.toggle_view() {
            debug!(view = self.active_view().label(), "view toggled");
            self.notify();
        }
    }

    pub fn close_result(&mut self) {
        if self.state.result.close() {
            debug!("result closed");
            self.notify();
        }
    }

    /// Artifact holding the current summary, or `None` before the first result
    pub fn export_summary(&self) -> Option<ExportArtifact> {
        self.state.result.export()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedService {
        outcomes: Mutex<VecDeque<Result<SummaryResult, ServiceError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedService {
        fn push(&self, outcome: Result<SummaryResult, ServiceError>) {
            self.outcomes.lock().unwrap().push_back(outcome);
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SummarizationService for ScriptedService {
        async fn summarize(
            &self,
            _request: &SummaryRequest,
        ) -> Result<SummaryResult, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ServiceError::Malformed("no scripted outcome".into())))
        }
    }

    fn rejected(message: &str) -> ServiceError {
        ServiceError::Rejected {
            status: 400,
            message: Some(message.to_string()),
        }
    }

    fn with_document() -> Controller {
        let mut controller = Controller::new();
        controller.select_document(Document::new("report.pdf", vec![0u8; 16]));
        controller
    }

    #[tokio::test]
    async fn submit_without_document_does_nothing() {
        let service = ScriptedService::default();
        let mut controller = Controller::new();
        let before = controller.state().clone();

        assert!(!controller.submit(&service).await);
        assert_eq!(service.calls(), 0);
        assert_eq!(controller.state(), &before);
    }

    #[tokio::test]
    async fn submit_while_pending_does_nothing() {
        let service = ScriptedService::default();
        let mut controller = with_document();
        controller.begin_submission().unwrap();
        let before = controller.state().clone();

        assert!(!controller.submit(&service).await);
        assert_eq!(service.calls(), 0);
        assert_eq!(controller.state(), &before);
    }

    #[tokio::test]
    async fn success_opens_summary_view() {
        let service = ScriptedService::default();
        service.push(Ok(SummaryResult::new("first", "q1")));
        service.push(Ok(SummaryResult::new("second", "q2")));
        let mut controller = with_document();

        assert!(controller.submit(&service).await);
        controller.toggle_view();
        assert_eq!(controller.active_view(), ResultView::Quiz);

        assert!(controller.submit(&service).await);
        assert!(controller.is_result_open());
        assert_eq!(controller.active_view(), ResultView::Summary);
        assert_eq!(controller.displayed_text(), Some("second"));
        assert!(!controller.is_submitting());
        assert_eq!(controller.state().submission, SubmissionPhase::Succeeded);
    }

    #[tokio::test]
    async fn failure_keeps_previous_result() {
        let service = ScriptedService::default();
        service.push(Ok(SummaryResult::new("kept", "kept quiz")));
        service.push(Err(rejected("file too large")));
        let mut controller = with_document();

        controller.submit(&service).await;
        controller.toggle_view();
        let before = controller.state().result.clone();

        controller.submit(&service).await;
        assert_eq!(controller.state().result, before);
        assert_eq!(controller.last_error(), Some("file too large"));
        assert!(!controller.is_submitting());
    }

    #[tokio::test]
    async fn failure_leaves_result_closed() {
        let service = ScriptedService::default();
        service.push(Err(ServiceError::Malformed("bad json".into())));
        let mut controller = with_document();

        controller.submit(&service).await;
        assert!(!controller.is_result_open());
        assert!(controller.summary_text().is_none());
        assert!(controller.last_error().is_some());
    }

    #[tokio::test]
    async fn new_attempt_clears_error_before_resolution() {
        let service = ScriptedService::default();
        service.push(Err(rejected("boom")));
        let mut controller = with_document();
        controller.submit(&service).await;
        assert_eq!(controller.last_error(), Some("boom"));

        controller.begin_submission().unwrap();
        assert_eq!(controller.last_error(), None);
        assert!(controller.is_submitting());
    }

    #[test]
    fn selection_stays_mutable_while_pending() {
        let mut controller = with_document();
        controller.select_style(SummaryStyle::Detailed);
        let request = controller.begin_submission().unwrap();

        controller.select_style(SummaryStyle::Brief);
        controller.clear_document();

        assert_eq!(request.style, SummaryStyle::Detailed);
        assert_eq!(request.document.name(), "report.pdf");
        assert!(controller.is_submitting());
        assert!(controller.selected_document().is_none());
    }

    #[test]
    fn stray_outcome_is_ignored() {
        let mut controller = with_document();
        let before = controller.state().clone();
        controller.finish_submission(Ok(SummaryResult::new("late", "late")));
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn export_is_none_before_any_result() {
        assert!(Controller::new().export_summary().is_none());
    }

    #[test]
    fn observers_see_every_mutation() {
        let mut controller = Controller::new();
        let mut rx = controller.subscribe();

        controller.select_style(SummaryStyle::Brief);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().selection.style(), SummaryStyle::Brief);

        controller.clear_document();
        assert!(!rx.has_changed().unwrap());

        controller.select_document(Document::new("a.txt", b"hi".to_vec()));
        assert!(rx.borrow_and_update().can_submit());

        controller.begin_submission();
        assert!(rx.borrow_and_update().submission.is_submitting());
    }
}

mod common;

use common::{MockResponse, MockService};
use notes_crunch::{
    Controller, Document, FileExporter, HttpService, ResultView, SubmissionPhase,
    SummarizationService, SummaryStyle,
};

const TWO_MB: usize = 2 * 1024 * 1024;

#[tokio::test]
async fn detailed_report_round_trip() {
    let mock = MockService::start().await;
    mock.respond_with(MockResponse::summary("# Key Points...", "1. What is..."))
        .await;
    let service = HttpService::new(mock.service_config()).unwrap();
    let export_dir = tempfile::tempdir().unwrap();

    let mut controller = Controller::new();
    controller.select_document(Document::new("report.pdf", vec![0x25; TWO_MB]));
    controller.select_style(SummaryStyle::Detailed);
    assert!(controller.submit(&service).await);

    assert!(controller.is_result_open());
    assert_eq!(controller.active_view(), ResultView::Summary);
    assert_eq!(controller.displayed_text(), Some("# Key Points..."));
    assert_eq!(controller.last_error(), None);

    controller.toggle_view();
    assert_eq!(controller.displayed_text(), Some("1. What is..."));

    let artifact = controller.export_summary().unwrap();
    let path = FileExporter::new(export_dir.path()).save(&artifact).unwrap();
    assert_eq!(path, export_dir.path().join("summary.txt"));
    assert_eq!(std::fs::read(&path).unwrap(), b"# Key Points...");

    let upload = &mock.requests().await[0];
    assert!(upload.body.len() > TWO_MB);
    assert!(upload.body_text().contains("\r\n\r\ndetailed\r\n"));
}

#[tokio::test]
async fn service_error_lands_in_error_slot() {
    let mock = MockService::start().await;
    mock.respond_with(MockResponse::error(413, "file too large"))
        .await;
    let service = HttpService::new(mock.service_config()).unwrap();

    let mut controller = Controller::new();
    controller.select_document(Document::new("huge.pdf", vec![1; 64]));
    controller.submit(&service).await;

    assert_eq!(controller.last_error(), Some("file too large"));
    assert!(!controller.is_result_open());
    assert!(!controller.is_submitting());
    assert!(controller.export_summary().is_none());
}

#[tokio::test]
async fn failed_resubmission_keeps_open_result() {
    let mock = MockService::start().await;
    mock.respond_with(MockResponse::summary("first summary", "first quiz"))
        .await;
    mock.respond_with(MockResponse::raw(500, "not json")).await;
    let service = HttpService::new(mock.service_config()).unwrap();

    let mut controller = Controller::new();
    controller.select_document(Document::new("a.pdf", vec![1]));
    controller.submit(&service).await;
    let before = controller.state().result.clone();

    controller.select_style(SummaryStyle::Brief);
    controller.submit(&service).await;

    assert_eq!(controller.state().result, before);
    assert!(controller.is_result_open());
    assert_eq!(controller.summary_text(), Some("first summary"));
    assert!(controller.last_error().unwrap().contains("500"));
}

#[tokio::test]
async fn no_request_without_document_or_while_pending() {
    let mock = MockService::start().await;
    let service = HttpService::new(mock.service_config()).unwrap();

    let mut controller = Controller::new();
    assert!(!controller.submit(&service).await);

    controller.select_document(Document::new("a.pdf", vec![1]));
    let pending = controller.begin_submission().unwrap();
    assert!(!controller.submit(&service).await);

    assert_eq!(pending.document.name(), "a.pdf");
    assert!(mock.requests().await.is_empty());
    assert_eq!(controller.state().submission, SubmissionPhase::Pending);
}

#[tokio::test]
async fn observers_track_the_whole_submission() {
    let mock = MockService::start().await;
    mock.respond_with(MockResponse::summary("s", "q")).await;
    let service = HttpService::new(mock.service_config()).unwrap();

    let mut controller = Controller::new();
    let mut observer = controller.subscribe();
    controller.select_document(Document::new("a.pdf", vec![1]));

    let request = controller.begin_submission().unwrap();
    assert!(observer.borrow_and_update().submission.is_submitting());

    let outcome = service.summarize(&request).await;
    controller.finish_submission(outcome);

    let seen = observer.borrow_and_update().clone();
    assert_eq!(seen.submission, SubmissionPhase::Succeeded);
    assert!(seen.result.is_open());
    assert_eq!(seen.result.displayed_text(), Some("s"));
}

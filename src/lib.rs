//! # Notes Crunch
//!
//! A TUI for turning documents into summaries and quizzes with a remote summarization service.
//!
//! ## Features
//!
//! - **One workflow**: pick a document, pick a style, submit, read the summary or the quiz
//! - **Single flight**: at most one submission is in flight, and failures never wipe a shown result
//! - **Export**: save the summary as `summary.txt`

pub mod config;
pub mod controller;
pub mod document;
pub mod export;
pub mod logging;
pub mod markdown;
pub mod service;
pub mod style;
pub mod ui;

pub use config::Config;
pub use controller::{Controller, ResultView, SessionState, SubmissionPhase};
pub use document::Document;
pub use export::{ExportArtifact, FileExporter};
pub use service::{HttpService, SummarizationService, SummaryRequest, SummaryResult};
pub use style::SummaryStyle;

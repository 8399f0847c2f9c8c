//! Client for the remote summarization service.
//!
//! Uses reqwest to upload the document as multipart form data and parses the
//! summary/quiz pair out of the JSON response.

use crate::config::ServiceConfig;
use crate::document::Document;
use crate::style::SummaryStyle;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("crunch/", env!("CARGO_PKG_VERSION"));

const TRANSPORT_MESSAGE: &str = "Could not reach the summarization service.";
const MALFORMED_MESSAGE: &str = "The summarization service returned an unreadable response.";

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service responded with HTTP {status}")]
    Rejected { status: u16, message: Option<String> },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ServiceError {
    /// Message suitable for the error banner.
    ///
    /// A message supplied by the service wins; everything else gets a generic description.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => TRANSPORT_MESSAGE.to_string(),
            Self::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Rejected {
                status,
                message: None,
            } => format!(
                "The summarization service returned an error (HTTP {}).",
                status
            ),
            Self::Malformed(_) => MALFORMED_MESSAGE.to_string(),
        }
    }
}

/// Snapshot of the selection taken when a submission is dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub document: Document,
    pub style: SummaryStyle,
}

/// Summary and quiz generated from one response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    pub summary: String,
    pub quiz: String,
}

impl SummaryResult {
    pub fn new(summary: impl Into<String>, quiz: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            quiz: quiz.into(),
        }
    }
}

/// Anything that can turn a document and a style into a summary and quiz.
#[async_trait]
pub trait SummarizationService: Send + Sync {
    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult, ServiceError>;
}

/// Summarization service reached over HTTP
pub struct HttpService {
    client: Client,
    config: ServiceConfig,
}

impl HttpService {
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    fn build_form(&self, request: &SummaryRequest) -> Result<Form, ServiceError> {
        let document = &request.document;
        let file = Part::bytes(document.content().to_vec())
            .file_name(document.name().to_string())
            .mime_str(document.content_type())?;

        Ok(Form::new()
            .part(self.config.file_field.clone(), file)
            .text(self.config.style_field.clone(), request.style.as_str()))
    }
}

#[async_trait]
impl SummarizationService for HttpService {
    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult, ServiceError> {
        let form = self.build_form(request)?;

        tracing::info!(
            url = %self.config.url,
            file = request.document.name(),
            bytes = request.document.size(),
            style = %request.style,
            "uploading document"
        );

        let response = self
            .client
            .post(&self.config.url)
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = parse_error_message(&body, &self.config.error_key);
            tracing::warn!(status = status.as_u16(), ?message, "service rejected request");
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        parse_success(&body, &self.config)
    }
}

/// Extract summary and quiz text from a success payload
pub fn parse_success(body: &str, config: &ServiceConfig) -> Result<SummaryResult, ServiceError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ServiceError::Malformed(e.to_string()))?;

    let field = |key: &str| -> Result<String, ServiceError> {
        value
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ServiceError::Malformed(format!("missing text field `{}`", key)))
    };

    Ok(SummaryResult {
        summary: field(&config.summary_key)?,
        quiz: field(&config.quiz_key)?,
    })
}

/// Pull an error message out of a failure payload, if there is a usable one
pub fn parse_error_message(body: &str, key: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = value.get(key)?.as_str()?;
    (!message.trim().is_empty()).then(|| message.to_string())
}

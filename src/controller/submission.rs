//! Submission slice: lifecycle of the request to the summarization service.

/// Phase of the most recent submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    /// Nothing submitted yet.
    #[default]
    Idle,

    /// Request dispatched, waiting for the service.
    Pending,

    /// The last submission produced a result.
    Succeeded,

    /// The last submission failed.
    Failed {
        /// Message shown in the error banner.
        message: String,
    },
}

impl SubmissionPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn last_error(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}

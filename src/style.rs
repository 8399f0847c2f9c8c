//! Summary style selection.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much detail the service should put into the summary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    Brief,
    #[default]
    Normal,
    Detailed,
}

impl SummaryStyle {
    /// All styles in picker order
    pub const ALL: [SummaryStyle; 3] = [Self::Brief, Self::Normal, Self::Detailed];

    /// The literal tag sent to the summarization service
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brief => "brief",
            Self::Normal => "normal",
            Self::Detailed => "detailed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Brief => "Brief",
            Self::Normal => "Normal",
            Self::Detailed => "Detailed",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Brief => "Perfect for quick insights",
            Self::Normal => "Ideal for most needs",
            Self::Detailed => "Deep dive into content",
        }
    }

    /// Next style to the right, wrapping around
    pub fn next(self) -> Self {
        match self {
            Self::Brief => Self::Normal,
            Self::Normal => Self::Detailed,
            Self::Detailed => Self::Brief,
        }
    }

    /// Previous style to the left, wrapping around
    pub fn prev(self) -> Self {
        match self {
            Self::Brief => Self::Detailed,
            Self::Normal => Self::Brief,
            Self::Detailed => Self::Normal,
        }
    }
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Error types for the Analyzer

use thiserror::Error;

/// Message shown to operators when an analysis call fails
pub const RETRY_MESSAGE: &str = "Failed to get analysis from AI. Please try again.";

/// Errors that can occur during analysis
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Description is empty or whitespace-only
    #[error("Please enter a description of the issue.")]
    EmptyDescription,

    /// Description exceeds the configured maximum length
    #[error("Description too long: {0} chars (max: {1})")]
    DescriptionTooLong(usize, usize),

    /// LLM provider error (network, HTTP status, envelope)
    #[error("LLM error: {0}")]
    Provider(String),

    /// Analysis did not finish within the configured timeout
    #[error("Analysis timeout")]
    Timeout,

    /// Response text is not valid JSON
    #[error("JSON parse error: {0}")]
    InvalidJson(String),
}

impl AnalysisError {
    /// Message suitable for showing to an operator
    ///
    /// Service-side failures collapse into a single retry prompt; input
    /// problems keep their specific message.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::EmptyDescription | AnalysisError::DescriptionTooLong(..) => {
                self.to_string()
            }
            AnalysisError::Provider(_) | AnalysisError::Timeout | AnalysisError::InvalidJson(_) => {
                RETRY_MESSAGE.to_string()
            }
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(e: serde_json::Error) -> Self {
        AnalysisError::InvalidJson(e.to_string())
    }
}

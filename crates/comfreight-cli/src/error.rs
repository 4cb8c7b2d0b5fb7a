//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store error (validation, unknown shipment)
    #[error("{0}")]
    Store(#[from] comfreight_store::StoreError),

    /// Analysis error
    #[error("Analysis error: {0}")]
    Analysis(#[from] comfreight_analyzer::AnalysisError),

    /// Exception form error
    #[error("{0}")]
    Draft(#[from] comfreight_analyzer::DraftError),

    /// LLM provider setup error
    #[error("LLM error: {0}")]
    Llm(#[from] comfreight_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line editor error
    #[error("Editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// AI analysis requested in a session started without an analyzer
    #[error("AI analysis is disabled for this session (no API key configured)")]
    AnalysisDisabled,

    /// AI analysis requested but no API key is available
    #[error("AI analysis unavailable: environment variable {0} is not set")]
    MissingApiKey(String),
}

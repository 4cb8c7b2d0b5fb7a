//! ComFreight Exception Analyzer
//!
//! Classifies free-text shipment exception descriptions with an LLM.
//!
//! # Overview
//!
//! An operator describes a problem ("crate was dropped during loading").
//! The analyzer asks an LLM, constrained by a fixed response schema, for a
//! category and a list of suggested actions. The result is optional
//! decoration: exceptions are logged with or without it.
//!
//! # Architecture
//!
//! ```text
//! Description → ExceptionAnalyzer → LLM → AiAnalysis? → ExceptionDraft → ShipmentStore
//! ```
//!
//! # Outcomes
//!
//! - `Ok(Some(analysis))`: the service answered in the expected shape
//! - `Ok(None)`: the service answered with JSON of the wrong shape
//! - `Err(AnalysisError)`: the call failed, timed out, or returned non-JSON
//!
//! Nothing is retried automatically.
//!
//! # Example Usage
//!
//! ```no_run
//! use comfreight_analyzer::{AnalyzerConfig, ExceptionAnalyzer};
//! use comfreight_llm::GeminiProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = GeminiProvider::default_model(std::env::var("GEMINI_API_KEY")?)?;
//! let analyzer = ExceptionAnalyzer::new(llm, AnalyzerConfig::default());
//!
//! match analyzer.analyze("Forklift punctured the crate").await? {
//!     Some(analysis) => println!("{}: {:?}", analysis.category, analysis.suggested_actions),
//!     None => println!("AI analysis returned an unexpected format."),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod draft;
mod error;
mod parser;
mod prompt;

#[cfg(test)]
mod tests;

pub use analyzer::ExceptionAnalyzer;
pub use config::AnalyzerConfig;
pub use draft::{
    AnalysisTicket, Applied, DraftError, ExceptionDraft, UNEXPECTED_FORMAT_MESSAGE,
};
pub use error::{AnalysisError, RETRY_MESSAGE};
pub use parser::parse_analysis_response;
pub use prompt::{response_schema, PromptBuilder};

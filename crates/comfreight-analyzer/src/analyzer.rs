//! Core Analyzer implementation

use crate::config::AnalyzerConfig;
use crate::draft::{Applied, DraftError, ExceptionDraft};
use crate::error::AnalysisError;
use crate::parser::parse_analysis_response;
use crate::prompt::{response_schema, PromptBuilder};
use comfreight_domain::traits::LlmProvider;
use comfreight_domain::AiAnalysis;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Analyzer turns an exception description into a category and
/// suggested actions
pub struct ExceptionAnalyzer<L>
where
    L: LlmProvider,
{
    llm_provider: L,
    config: AnalyzerConfig,
    schema: String,
}

impl<L> ExceptionAnalyzer<L>
where
    L: LlmProvider + Sync,
    L::Error: std::fmt::Display,
{
    /// Create a new Analyzer
    pub fn new(llm_provider: L, config: AnalyzerConfig) -> Self {
        Self {
            llm_provider,
            config,
            schema: response_schema(),
        }
    }

    /// The underlying LLM provider
    pub fn provider(&self) -> &L {
        &self.llm_provider
    }

    /// Active configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a description
    ///
    /// Makes exactly one service call for non-empty input. See the crate
    /// docs for the meaning of each outcome.
    pub async fn analyze(&self, description: &str) -> Result<Option<AiAnalysis>, AnalysisError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AnalysisError::EmptyDescription);
        }

        let length = description.chars().count();
        if length > self.config.max_description_length {
            return Err(AnalysisError::DescriptionTooLong(
                length,
                self.config.max_description_length,
            ));
        }

        info!("Starting analysis, description length {}", length);

        let prompt = PromptBuilder::new(description).build();
        debug!("Built prompt with {} chars", prompt.len());

        let response = timeout(
            self.config.timeout(),
            self.llm_provider.generate_structured(&prompt, &self.schema),
        )
        .await
        .map_err(|_| {
            warn!("Analysis timed out after {}s", self.config.timeout_secs);
            AnalysisError::Timeout
        })?
        .map_err(|e| {
            warn!("Analysis request failed: {}", e);
            AnalysisError::Provider(e.to_string())
        })?;

        debug!("LLM response length: {} chars", response.len());

        let analysis = parse_analysis_response(&response)?;
        if let Some(analysis) = &analysis {
            info!(
                "Analysis complete: category '{}', {} suggested actions",
                analysis.category,
                analysis.suggested_actions.len()
            );
        }

        Ok(analysis)
    }

    /// Run one analysis round for a draft
    ///
    /// Convenience for callers that hold the draft for the whole request.
    /// Callers that let the draft change meanwhile should drive
    /// `begin_analysis`/`finish_analysis` themselves.
    pub async fn analyze_draft(&self, draft: &mut ExceptionDraft) -> Result<Applied, DraftError> {
        let ticket = draft.begin_analysis()?;
        let result = self.analyze(ticket.description()).await;
        Ok(draft.finish_analysis(ticket, result))
    }
}

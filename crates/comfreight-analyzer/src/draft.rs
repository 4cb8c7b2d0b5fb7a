//! In-progress exception form
//!
//! An operator types a description, optionally asks for an analysis, and
//! submits. Analysis is asynchronous, so the description may change (or
//! the form may be reset) while a request is pending. Every change bumps a
//! generation counter; results carrying an older generation are dropped.

use crate::error::AnalysisError;
use chrono::{DateTime, Utc};
use comfreight_domain::{AiAnalysis, ExceptionRecord};
use thiserror::Error;
use tracing::debug;

/// Message shown when the service answered in the wrong shape
pub const UNEXPECTED_FORMAT_MESSAGE: &str = "AI analysis returned an unexpected format.";

/// Errors from draft operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    /// Description is empty or whitespace-only
    #[error("Please enter a description of the issue.")]
    EmptyDescription,

    /// An analysis request is already pending
    #[error("An analysis is already in progress")]
    AnalysisInFlight,
}

/// Handle for one pending analysis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    generation: u64,
    description: String,
}

impl AnalysisTicket {
    /// The description snapshot to send for analysis
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// What `finish_analysis` did with a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Analysis stored on the draft
    Analysis,
    /// Service answered in the wrong shape; message set
    Unavailable,
    /// Request failed; retry message set
    Failed,
    /// Draft changed since the request began; result dropped
    Discarded,
}

/// The exception form for one shipment
#[derive(Debug, Clone, Default)]
pub struct ExceptionDraft {
    description: String,
    analysis: Option<AiAnalysis>,
    error: Option<String>,
    in_flight: bool,
    generation: u64,
}

impl ExceptionDraft {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Current description text
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Analysis in hand, if any
    pub fn analysis(&self) -> Option<&AiAnalysis> {
        self.analysis.as_ref()
    }

    /// Last error message, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether an analysis request is pending
    pub fn is_analyzing(&self) -> bool {
        self.in_flight
    }

    /// Replace the description
    ///
    /// Drops any analysis and error that belonged to the old text, and
    /// invalidates a pending request.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.analysis = None;
        self.error = None;
        self.invalidate();
    }

    /// Clear the form
    pub fn reset(&mut self) {
        self.description.clear();
        self.analysis = None;
        self.error = None;
        self.invalidate();
    }

    /// Start an analysis request
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, DraftError> {
        if self.in_flight {
            return Err(DraftError::AnalysisInFlight);
        }
        if self.description.trim().is_empty() {
            self.error = Some(DraftError::EmptyDescription.to_string());
            return Err(DraftError::EmptyDescription);
        }

        self.in_flight = true;
        self.analysis = None;
        self.error = None;

        Ok(AnalysisTicket {
            generation: self.generation,
            description: self.description.clone(),
        })
    }

    /// Apply the result of the request identified by `ticket`
    pub fn finish_analysis(
        &mut self,
        ticket: AnalysisTicket,
        result: Result<Option<AiAnalysis>, AnalysisError>,
    ) -> Applied {
        if ticket.generation != self.generation {
            debug!(
                "Discarding analysis for generation {} (current {})",
                ticket.generation, self.generation
            );
            return Applied::Discarded;
        }

        self.in_flight = false;
        match result {
            Ok(Some(analysis)) => {
                self.analysis = Some(analysis);
                Applied::Analysis
            }
            Ok(None) => {
                self.error = Some(UNEXPECTED_FORMAT_MESSAGE.to_string());
                Applied::Unavailable
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Applied::Failed
            }
        }
    }

    /// Turn the draft into an exception record and clear it
    ///
    /// Uses whatever analysis is in hand; a pending request is abandoned.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<ExceptionRecord, DraftError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(DraftError::EmptyDescription);
        }

        let mut record = ExceptionRecord::new(now, description);
        if let Some(analysis) = self.analysis.take() {
            record = record.with_analysis(analysis);
        }

        self.reset();
        Ok(record)
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = false;
    }
}

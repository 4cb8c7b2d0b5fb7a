//! Exceptions logged against shipments and their AI analysis
//!
//! "Exception" is a domain term here: a problem with a shipment (damage,
//! delay, customs hold, ...), not a language-level error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories the analysis service is asked to choose from
///
/// The service is not forced to comply, so [`AiAnalysis::category`] stays a
/// free string and is mapped onto this enum on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionCategory {
    /// Physical damage to goods or packaging
    Damage,
    /// Late pickup, transit, or delivery
    Delay,
    /// Held or rejected at customs
    CustomsIssue,
    /// Shipment cannot be located
    LostShipment,
    /// Wrong, incomplete, or undeliverable address
    AddressProblem,
    /// Anything else
    Other,
}

impl ExceptionCategory {
    /// All categories, in the order they are presented to the service
    pub const ALL: [ExceptionCategory; 6] = [
        ExceptionCategory::Damage,
        ExceptionCategory::Delay,
        ExceptionCategory::CustomsIssue,
        ExceptionCategory::LostShipment,
        ExceptionCategory::AddressProblem,
        ExceptionCategory::Other,
    ];

    /// Get the category label as the service returns it
    pub fn as_str(&self) -> &'static str {
        match self {
            ExceptionCategory::Damage => "Damage",
            ExceptionCategory::Delay => "Delay",
            ExceptionCategory::CustomsIssue => "Customs Issue",
            ExceptionCategory::LostShipment => "Lost Shipment",
            ExceptionCategory::AddressProblem => "Address Problem",
            ExceptionCategory::Other => "Other",
        }
    }

    /// Parse a category label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for ExceptionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured categorization produced by the analysis service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    /// Category label, expected to be one of [`ExceptionCategory`]
    pub category: String,

    /// Short actionable steps for the operations team, in order
    pub suggested_actions: Vec<String>,
}

impl AiAnalysis {
    /// Create a new analysis
    pub fn new(category: impl Into<String>, suggested_actions: Vec<String>) -> Self {
        Self {
            category: category.into(),
            suggested_actions,
        }
    }

    /// Map the free-form category onto a known one
    pub fn known_category(&self) -> Option<ExceptionCategory> {
        ExceptionCategory::parse(&self.category)
    }
}

/// A problem logged against a shipment
///
/// Records are immutable once appended to a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionRecord {
    /// When the problem was logged
    pub timestamp: DateTime<Utc>,

    /// Operator's description of the problem
    pub description: String,

    /// Analysis attached if one succeeded before logging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
}

impl ExceptionRecord {
    /// Create a record without analysis
    pub fn new(timestamp: DateTime<Utc>, description: impl Into<String>) -> Self {
        Self {
            timestamp,
            description: description.into(),
            ai_analysis: None,
        }
    }

    /// Attach an analysis
    pub fn with_analysis(mut self, analysis: AiAnalysis) -> Self {
        self.ai_analysis = Some(analysis);
        self
    }
}

//! LLM prompt and response schema for exception analysis

use comfreight_domain::ExceptionCategory;
use serde_json::json;

/// Builds the analysis prompt for one description
pub struct PromptBuilder {
    description: String,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// Build the complete analysis prompt
    pub fn build(&self) -> String {
        format!(
            "{}\n\nDescription: \"{}\"",
            ANALYSIS_INSTRUCTIONS,
            self.description.trim()
        )
    }
}

const ANALYSIS_INSTRUCTIONS: &str = "You are a logistics and supply chain expert. Analyze the following shipment issue description and provide a structured JSON response according to the defined schema.";

/// Response schema sent with every analysis request
///
/// Uses the Gemini schema dialect: an OBJECT with a required STRING
/// `category` and a required ARRAY of STRING `suggestedActions`.
pub fn response_schema() -> String {
    let categories = ExceptionCategory::ALL
        .iter()
        .map(|category| format!("'{}'", category.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    json!({
        "type": "OBJECT",
        "properties": {
            "category": {
                "type": "STRING",
                "description": format!("A category for the issue. Must be one of: {}.", categories),
            },
            "suggestedActions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "An array of short, actionable steps for an operations team to resolve the issue.",
            },
        },
        "required": ["category", "suggestedActions"],
    })
    .to_string()
}

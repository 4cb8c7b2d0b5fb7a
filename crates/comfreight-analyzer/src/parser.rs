//! Parse LLM output into an analysis

use crate::error::AnalysisError;
use comfreight_domain::AiAnalysis;
use serde_json::Value;
use tracing::warn;

/// Parse the LLM response text
///
/// Returns `Err(AnalysisError::InvalidJson)` when the text is not JSON and
/// `Ok(None)` when it is JSON of the wrong shape: `category` must be a
/// non-empty string and `suggestedActions` an array of strings.
pub fn parse_analysis_response(response: &str) -> Result<Option<AiAnalysis>, AnalysisError> {
    // LLMs sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)?;

    let analysis = match_shape(&json);
    if analysis.is_none() {
        warn!("Parsed JSON does not match the analysis schema: {}", json);
    }
    Ok(analysis)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, AnalysisError> {
    let trimmed = response.trim();

    if !trimmed.starts_with("```") {
        return Ok(trimmed.to_string());
    }

    // Skip the opening fence line (```json or ```) and the closing fence
    let body = trimmed
        .split_once('\n')
        .map(|(_, rest)| rest)
        .ok_or_else(|| AnalysisError::InvalidJson("Empty code block".to_string()))?;

    Ok(body.trim_end().trim_end_matches("```").trim().to_string())
}

fn match_shape(json: &Value) -> Option<AiAnalysis> {
    let obj = json.as_object()?;

    let category = obj
        .get("category")
        .and_then(Value::as_str)
        .filter(|c| !c.trim().is_empty())?;

    let suggested_actions = obj
        .get("suggestedActions")
        .and_then(Value::as_array)?
        .iter()
        .map(|action| action.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()?;

    Some(AiAnalysis::new(category, suggested_actions))
}

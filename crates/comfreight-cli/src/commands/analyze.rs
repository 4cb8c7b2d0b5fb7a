//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::error::Result;
use crate::output::Formatter;
use comfreight_analyzer::{ExceptionAnalyzer, UNEXPECTED_FORMAT_MESSAGE};
use comfreight_domain::traits::LlmProvider;
use comfreight_domain::AiAnalysis;

/// Execute the analyze command.
pub async fn execute_analyze<L>(
    args: AnalyzeArgs,
    analyzer: &ExceptionAnalyzer<L>,
    formatter: &Formatter,
) -> Result<Option<AiAnalysis>>
where
    L: LlmProvider + Sync,
    L::Error: std::fmt::Display,
{
    let analysis = analyzer.analyze(&args.description).await?;

    match &analysis {
        Some(analysis) => println!("{}", formatter.format_analysis(analysis)?),
        None => eprintln!("{}", formatter.warning(UNEXPECTED_FORMAT_MESSAGE)),
    }

    Ok(analysis)
}

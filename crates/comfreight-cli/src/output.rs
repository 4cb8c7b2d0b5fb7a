//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use chrono::{DateTime, Utc};
use colored::*;
use comfreight_domain::{AiAnalysis, Shipment, ShipmentStatus, TrackingId};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
    now: DateTime<Utc>,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
            now: Utc::now(),
        }
    }

    /// Reference time for overdue marks.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Format a shipment list.
    pub fn format_shipments(&self, shipments: &[Shipment]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(shipments)?),
            OutputFormat::Table => Ok(self.format_shipments_table(shipments)),
            OutputFormat::Quiet => Ok(Self::ids(shipments)),
        }
    }

    /// Format one shipment with its history and exceptions.
    pub fn format_shipment(&self, shipment: &Shipment) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(shipment)?),
            OutputFormat::Table => Ok(self.format_shipment_detail(shipment)),
            OutputFormat::Quiet => Ok(shipment.id.to_string()),
        }
    }

    /// Format an analysis result.
    pub fn format_analysis(&self, analysis: &AiAnalysis) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(analysis)?),
            OutputFormat::Table => Ok(self.format_analysis_text(analysis, "")),
            OutputFormat::Quiet => Ok(analysis.category.clone()),
        }
    }

    /// Whether human-oriented chatter should be printed.
    pub fn is_verbose(&self) -> bool {
        self.format == OutputFormat::Table
    }

    fn format_shipments_table(&self, shipments: &[Shipment]) -> String {
        if shipments.is_empty() {
            return self.colorize("No shipments found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record([
            "Tracking ID",
            "Origin",
            "Destination",
            "Carrier",
            "Status",
            "Est. Delivery",
            "Last Update",
        ]);

        for shipment in shipments {
            builder.push_record([
                shipment.id.to_string(),
                shipment.origin.clone(),
                shipment.destination.clone(),
                shipment.carrier.clone(),
                shipment.status.to_string(),
                self.eta(shipment),
                shipment.last_update.format(TIMESTAMP_FORMAT).to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    fn format_shipment_detail(&self, shipment: &Shipment) -> String {
        let mut out = format!(
            "{}  {}\n",
            self.colorize(&shipment.id.to_string(), "cyan"),
            self.status(shipment.status)
        );

        let mut summary = Builder::default();
        summary.push_record(["Origin", shipment.origin.as_str()]);
        summary.push_record(["Destination", shipment.destination.as_str()]);
        summary.push_record(["Carrier", shipment.carrier.as_str()]);
        summary.push_record([
            "Created".to_string(),
            shipment.created_date.format(TIMESTAMP_FORMAT).to_string(),
        ]);
        summary.push_record(["Est. Delivery".to_string(), self.eta(shipment)]);
        summary.push_record([
            "Last Update".to_string(),
            shipment.last_update.format(TIMESTAMP_FORMAT).to_string(),
        ]);
        if let Some(event) = shipment.latest_event() {
            summary.push_record([
                "Latest Event".to_string(),
                format!("{}: {}", event.location, event.details),
            ]);
        }
        let mut summary = summary.build();
        summary.with(Style::rounded());
        out.push_str(&summary.to_string());
        out.push_str("\n\n");

        out.push_str(&self.colorize("History", "blue"));
        out.push('\n');
        let mut history = Builder::default();
        history.push_record(["Timestamp", "Location", "Details"]);
        // Newest event first
        let mut events: Vec<_> = shipment.history.iter().collect();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        for event in events {
            history.push_record([
                event.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                event.location.clone(),
                event.details.clone(),
            ]);
        }
        let mut history = history.build();
        history
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        out.push_str(&history.to_string());

        out.push_str("\n\n");
        out.push_str(&self.colorize("Exceptions", "blue"));
        out.push('\n');
        if shipment.exceptions.is_empty() {
            out.push_str("  No exceptions logged.");
        }
        for (i, exception) in shipment.exceptions.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!(
                "  {}  {}\n",
                exception.timestamp.format(TIMESTAMP_FORMAT),
                exception.description
            ));
            if let Some(analysis) = &exception.ai_analysis {
                out.push_str(&self.format_analysis_text(analysis, "    "));
            }
        }

        out.trim_end().to_string()
    }

    fn format_analysis_text(&self, analysis: &AiAnalysis, indent: &str) -> String {
        let category = match analysis.known_category() {
            Some(known) => known.as_str().to_string(),
            None => format!("{} (unrecognized)", analysis.category),
        };
        let mut out = format!(
            "{}{} {}\n",
            indent,
            self.colorize("AI category:", "magenta"),
            category
        );
        if analysis.suggested_actions.is_empty() {
            out.push_str(&format!("{}No suggested actions.\n", indent));
        }
        for (i, action) in analysis.suggested_actions.iter().enumerate() {
            out.push_str(&format!("{}  {}. {}\n", indent, i + 1, action));
        }
        out
    }

    fn eta(&self, shipment: &Shipment) -> String {
        let date = shipment.estimated_delivery.format(DATE_FORMAT).to_string();
        if shipment.is_overdue(self.now) {
            format!("{} (overdue)", date)
        } else {
            date
        }
    }

    fn ids(shipments: &[Shipment]) -> String {
        let ids: Vec<String> = shipments.iter().map(|s| s.id.to_string()).collect();
        ids.join("\n")
    }

    /// Format a status label.
    pub fn status(&self, status: ShipmentStatus) -> String {
        self.colorize(status.as_str(), status_color(status))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format shipment creation result.
    pub fn shipment_created(&self, id: &TrackingId) -> String {
        self.success(&format!("Shipment created: {}", id))
    }

    /// Format exception logging result.
    pub fn exception_logged(&self, id: &TrackingId) -> String {
        self.success(&format!("Exception logged for {}", id))
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn status_color(status: ShipmentStatus) -> &'static str {
    match status {
        ShipmentStatus::Exception => "red",
        s if s.needs_attention() => "yellow",
        ShipmentStatus::InTransit => "blue",
        s if s.is_terminal() => "green",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use comfreight_domain::ExceptionRecord;
    use comfreight_store::seed_shipments;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn formatter(format: OutputFormat) -> Formatter {
        Formatter::new(format, false).with_now(at(2024, 7, 26))
    }

    fn with_exception() -> Shipment {
        let mut shipment = seed_shipments().remove(0);
        shipment.record_exception(
            ExceptionRecord::new(at(2024, 7, 26), "Crate dropped").with_analysis(AiAnalysis::new(
                "Damage",
                vec!["Inspect crate".to_string(), "File claim".to_string()],
            )),
            at(2024, 7, 26),
        );
        shipment
    }

    #[test]
    fn test_json_format() {
        let output = formatter(OutputFormat::Json)
            .format_shipments(&seed_shipments())
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 4);
        assert!(output.contains("estimatedDelivery"));
        assert!(output.contains("\"In Transit\""));
    }

    #[test]
    fn test_quiet_format() {
        let output = formatter(OutputFormat::Quiet)
            .format_shipments(&seed_shipments())
            .unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.starts_with("CFT-")));
    }

    #[test]
    fn test_table_format() {
        let output = formatter(OutputFormat::Table)
            .format_shipments(&seed_shipments())
            .unwrap();
        assert!(output.contains("Tracking ID"));
        assert!(output.contains("CFT-84620"));
        assert!(output.contains("In Transit"));
    }

    #[test]
    fn test_overdue_mark() {
        let shipments = seed_shipments();
        let late = Formatter::new(OutputFormat::Table, false).with_now(at(2100, 1, 1));
        let output = late.format_shipments(&shipments).unwrap();
        assert!(output.contains("(overdue)"));

        // Delivered shipments are never overdue
        let delivered: Vec<_> = shipments
            .into_iter()
            .filter(|s| s.status == ShipmentStatus::Delivered)
            .collect();
        let output = late.format_shipments(&delivered).unwrap();
        assert!(!output.contains("(overdue)"));
    }

    #[test]
    fn test_empty_shipments() {
        let output = formatter(OutputFormat::Table).format_shipments(&[]).unwrap();
        assert!(output.contains("No shipments found"));
    }

    #[test]
    fn test_detail_view() {
        let output = formatter(OutputFormat::Table)
            .format_shipment(&with_exception())
            .unwrap();
        assert!(output.starts_with("CFT-84620  Exception"));
        assert!(output.contains("History"));
        assert!(output.contains("Crate dropped"));
        assert!(output.contains("AI category: Damage"));
        assert!(output.contains("2. File claim"));
        assert!(output.contains("Latest Event"));
        assert!(output.contains("Omaha, NE: Departed from facility"));
    }

    #[test]
    fn test_detail_view_without_history() {
        let mut shipment = seed_shipments().remove(0);
        shipment.history.clear();
        let output = formatter(OutputFormat::Table).format_shipment(&shipment).unwrap();
        assert!(!output.contains("Latest Event"));
    }

    #[test]
    fn test_detail_view_without_exceptions() {
        let shipment = seed_shipments()
            .into_iter()
            .find(|s| s.exceptions.is_empty())
            .unwrap();
        let output = formatter(OutputFormat::Table).format_shipment(&shipment).unwrap();
        assert!(output.contains("No exceptions logged."));
    }

    #[test]
    fn test_analysis_formats() {
        let analysis = AiAnalysis::new("Delay", vec!["Notify customer".to_string()]);

        let text = formatter(OutputFormat::Table).format_analysis(&analysis).unwrap();
        assert!(text.contains("AI category: Delay"));
        assert!(text.contains("1. Notify customer"));

        let quiet = formatter(OutputFormat::Quiet).format_analysis(&analysis).unwrap();
        assert_eq!(quiet, "Delay");

        let json = formatter(OutputFormat::Json).format_analysis(&analysis).unwrap();
        assert!(json.contains("suggestedActions"));
    }

    #[test]
    fn test_analysis_category_normalized() {
        let formatter = formatter(OutputFormat::Table);

        let analysis = AiAnalysis::new("customs issue", vec![]);
        let text = formatter.format_analysis(&analysis).unwrap();
        assert!(text.contains("AI category: Customs Issue\n"));

        let analysis = AiAnalysis::new("Weather", vec![]);
        let text = formatter.format_analysis(&analysis).unwrap();
        assert!(text.contains("AI category: Weather (unrecognized)"));

        // Quiet output keeps the raw value
        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .format_analysis(&analysis)
            .unwrap();
        assert_eq!(quiet, "Weather");
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color(ShipmentStatus::Exception), "red");
        assert_eq!(status_color(ShipmentStatus::Delayed), "yellow");
        assert_eq!(status_color(ShipmentStatus::InTransit), "blue");
        assert_eq!(status_color(ShipmentStatus::Delivered), "green");
        assert_eq!(status_color(ShipmentStatus::Pending), "");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = formatter(OutputFormat::Table);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.status(ShipmentStatus::Exception), "Exception");
    }
}

//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use wikimeta_domain::{Entity, PropertyValue};
use wikimeta_extractor::Extraction;
use wikimeta_importer::{ImportReport, SkipReason};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format search results.
    pub fn format_entities(&self, entities: &[Entity]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let items: Vec<serde_json::Value> = entities
                    .iter()
                    .map(|e| {
                        json!({
                            "id": e.id().as_str(),
                            "label": e.label(),
                            "description": e.description(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&items)?)
            }
            OutputFormat::Table => {
                if entities.is_empty() {
                    return Ok(self.colorize("No entities found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Label", "Description"]);
                for entity in entities {
                    builder.push_record([
                        entity.id().as_str(),
                        entity.label().unwrap_or(""),
                        entity.description().unwrap_or(""),
                    ]);
                }
                Ok(self.render(builder))
            }
            OutputFormat::Quiet => Ok(entities
                .iter()
                .map(|e| e.id().to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the properties of one entity.
    pub fn format_extraction(&self, entity: &str, extraction: &Extraction) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "entity": entity,
                "description": extraction.description,
                "properties": extraction.properties,
            }))?),
            OutputFormat::Table => {
                if extraction.properties.is_empty() {
                    return Ok(self.colorize("No properties found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Property", "Value"]);
                for (name, values) in extraction.properties.iter() {
                    builder.push_record([name.to_string(), join_values(values)]);
                }

                let mut out = String::new();
                if let Some(description) = &extraction.description {
                    out.push_str(&self.info(&format!("{}: {}", entity, description)));
                    out.push('\n');
                }
                out.push_str(&self.render(builder));
                Ok(out)
            }
            OutputFormat::Quiet => Ok(extraction.properties.keys().collect::<Vec<_>>().join("\n")),
        }
    }

    /// Format the outcome of an import.
    pub fn format_import(&self, report: &ImportReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let skipped: Vec<serde_json::Value> = report
                    .skipped
                    .iter()
                    .map(|(key, reason)| json!({ "property": key, "reason": skip_reason(*reason) }))
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "document": report.document.path(),
                    "entity": report.entity.as_str(),
                    "description": report.description,
                    "written": report.written,
                    "skipped": skipped,
                }))?)
            }
            OutputFormat::Table => {
                let mut out = self.success(&format!(
                    "Imported {} into {} ({} written, {} skipped)",
                    report.entity,
                    report.document,
                    report.written.len(),
                    report.skipped.len()
                ));

                if !report.written.is_empty() || !report.skipped.is_empty() {
                    let mut builder = Builder::default();
                    builder.push_record(["Property", "Result"]);
                    for key in &report.written {
                        builder.push_record([key.as_str(), "written"]);
                    }
                    for (key, reason) in &report.skipped {
                        builder.push_record([key.as_str(), skip_reason(*reason)]);
                    }
                    out.push('\n');
                    out.push_str(&self.render(builder));
                }
                Ok(out)
            }
            OutputFormat::Quiet => Ok(report.document.path().to_string()),
        }
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

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
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
            _ => text.to_string(),
        }
    }
}

/// Values of one property, one per line.
fn join_values(values: &[PropertyValue]) -> String {
    values
        .iter()
        .map(PropertyValue::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Display text of a skip reason.
pub fn skip_reason(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::NotAllowed => "not in allow list",
        SkipReason::Blocked => "blocked",
        SkipReason::Exists => "kept existing",
    }
}

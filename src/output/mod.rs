//! Output formatting for reports.
//!
//! This module renders calculation results:
//! - [`csv`] - CSV output formatting
//! - [`terminal`] - Terminal output with colors
//! - JSON through `serde_json`

mod csv;
mod terminal;

use crate::batch::BatchItem;
use crate::processing::Report;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

pub use csv::{info_csv, split_csv, supernet_csv, vlsm_csv};
pub use terminal::{
    format_field, info_text, split_text, supernet_text, vlsm_partial_text, vlsm_text,
};

/// How reports are written to stdout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}', use text, csv or json")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Render one report.
pub fn render_report(report: &Report, format: OutputFormat) -> Result<String, Box<dyn Error>> {
    let out = match (format, report) {
        (OutputFormat::Json, report) => serde_json::to_string_pretty(report)?,
        (OutputFormat::Text, Report::Info(info)) => info_text(info)?,
        (OutputFormat::Text, Report::Vlsm(alloc)) => vlsm_text(alloc)?,
        (OutputFormat::Text, Report::VlsmPartial(partial)) => vlsm_partial_text(partial)?,
        (OutputFormat::Text, Report::Split(plan)) => split_text(plan)?,
        (OutputFormat::Text, Report::Supernet(s)) => supernet_text(s)?,
        (OutputFormat::Csv, Report::Info(info)) => info_csv(info)?,
        (OutputFormat::Csv, Report::Vlsm(alloc)) => vlsm_csv(alloc)?,
        (OutputFormat::Csv, Report::VlsmPartial(partial)) => vlsm_csv(&partial.allocation)?,
        (OutputFormat::Csv, Report::Split(plan)) => split_csv(plan)?,
        (OutputFormat::Csv, Report::Supernet(s)) => supernet_csv(s)?,
    };
    Ok(out)
}

/// Render batch results; failed requests become an error line or field.
pub fn render_batch(items: &[BatchItem], format: OutputFormat) -> Result<String, Box<dyn Error>> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(items)?);
    }

    let mut out = String::new();
    for item in items {
        out.push_str(&format!("# request {}\n", item.index + 1));
        match (&item.report, &item.error) {
            (Some(report), _) => out.push_str(&render_report(report, format)?),
            (None, Some(e)) => out.push_str(&format!("# {}: {}\n", e.kind, e.message)),
            (None, None) => {}
        }
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::run_batch;
    use crate::processing::{run, Request};

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(" CSV ".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "text");
    }

    #[test]
    fn test_render_report_json() {
        let report = run(&Request::Info {
            address: "192.168.1.130/24".to_string(),
            mask: None,
        })
        .unwrap();
        let json = render_report(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["op"], "info");
        assert_eq!(value["network"], "192.168.1.0/24");
        assert_eq!(value["usable_hosts"], 254);
        assert_eq!(value["class"], "C");
    }

    #[test]
    fn test_render_batch_text() {
        let items = run_batch(vec![
            Request::Split {
                network: "10.0.0.0/24".parse().unwrap(),
                count: 1,
            },
            Request::Split {
                network: "10.0.0.0/24".parse().unwrap(),
                count: 2,
            },
        ]);
        let text = render_batch(&items, OutputFormat::Csv).unwrap();
        assert!(text.contains("# request 1\n# InvalidCount: invalid subnet count 1"));
        assert!(text.contains(r#""10.0.0.128/25""#));
    }
}

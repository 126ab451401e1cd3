//! Batch mode: run a JSON file of requests.

use crate::error::CalcError;
use crate::processing::{run, Report, Request};
use serde::Serialize;
use std::error::Error;
use std::path::Path;

/// Outcome of one request in a batch.
#[derive(Debug, Serialize)]
pub struct BatchItem {
    pub index: usize,
    pub request: Request,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BatchError>,
}

#[derive(Debug, Serialize)]
pub struct BatchError {
    pub kind: &'static str,
    pub message: String,
}

impl From<&CalcError> for BatchError {
    fn from(e: &CalcError) -> Self {
        BatchError {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

/// Parse a JSON array of requests, reporting the path of a bad field.
pub fn requests_from_json(json: &str) -> Result<Vec<Request>, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let requests: Vec<Request> =
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
            format!(
                "Error parsing requests: path={} error={}",
                e.path(),
                e.inner()
            )
        })?;
    Ok(requests)
}

/// Read requests from a JSON file.
pub fn read_requests(file: &str) -> Result<Vec<Request>, Box<dyn Error>> {
    if !Path::new(file).exists() {
        return Err(format!("Request file does not exist: {file}").into());
    }
    log::info!("Reading requests from: {file}");
    let json =
        std::fs::read_to_string(file).map_err(|e| format!("Error reading {file}: {e}"))?;
    requests_from_json(&json)
}

/// Run every request; a failing request does not stop the rest.
pub fn run_batch(requests: Vec<Request>) -> Vec<BatchItem> {
    log::info!("#Start run_batch() with {} request(s)", requests.len());
    requests
        .into_iter()
        .enumerate()
        .map(|(index, request)| match run(&request) {
            Ok(report) => BatchItem {
                index,
                request,
                report: Some(report),
                error: None,
            },
            Err(e) => {
                log::warn!("request #{index} failed: {e}");
                BatchItem {
                    index,
                    request,
                    report: None,
                    error: Some(BatchError::from(&e)),
                }
            }
        })
        .collect()
}

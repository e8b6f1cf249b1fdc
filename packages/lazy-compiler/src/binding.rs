#![cfg(feature = "napi-bindings")]

use napi::{Error, Result, Status};
use napi_derive::napi;

use crate::config::options::TransformOptions;
use crate::lazy::logging::NullLogger;
use crate::lazy::transform::transform_module;

/// Runs the lazy component pass over one file. Returns the JSON form of
/// `{ code, report: { components, diagnostics } }`.
#[napi]
pub fn transform_lazy_component(
    source_code: String,
    filename: String,
    options_json: Option<String>,
) -> Result<String> {
    let options = match options_json.as_deref() {
        Some(json) if !json.trim().is_empty() => TransformOptions::from_json(json)
            .map_err(|e| Error::new(Status::InvalidArg, format!("Invalid options: {:#}", e)))?,
        _ => TransformOptions::default(),
    };

    let output = transform_module(&source_code, &filename, &options, &NullLogger)
        .map_err(|e| Error::new(Status::GenericFailure, e.to_string()))?;

    serde_json::to_string(&output).map_err(|e| Error::new(Status::GenericFailure, e.to_string()))
}

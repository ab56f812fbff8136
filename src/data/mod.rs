//! # Organisation Data
//!
//! Fetches the organisation dataset once at startup, either with a single
//! GraphQL POST or from a local JSON file holding the same response envelope.
//! The fetch is blocking and must finish before any window or GPU setup.

pub mod graphql;
pub mod organisation;

pub use graphql::{build_query, parse_response, GraphQlRequest};
pub use organisation::Organisation;

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Where organisation records come from (`[source]` in the config file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// GraphQL endpoint receiving the POST.
    pub endpoint: String,
    /// Maximum number of organisations requested.
    pub limit: u32,
    /// Whole-request timeout.
    pub timeout_secs: u64,
    /// Read this file instead of calling the endpoint.
    pub file: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:4000/graphql".to_string(),
            limit: 10,
            timeout_secs: 10,
            file: None,
        }
    }
}

impl SourceConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.limit == 0 {
            return Err("source.limit must be at least 1".to_string());
        }
        if self.file.is_none() && self.endpoint.trim().is_empty() {
            return Err("source.endpoint must be set when no file is given".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("source.timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Loads the organisation records described by `source`.
pub fn fetch_organisations(source: &SourceConfig) -> Result<Vec<Organisation>, DataError> {
    let organisations = match &source.file {
        Some(path) => {
            log::info!("Reading organisations from {}", path.display());
            let body = std::fs::read_to_string(path).map_err(|error| DataError::Io {
                path: path.clone(),
                source: error,
            })?;
            let mut organisations = parse_response(&body)?;
            organisations.truncate(source.limit as usize);
            organisations
        }
        None => fetch_remote(source)?,
    };

    log::info!("Loaded {} organisations", organisations.len());
    Ok(organisations)
}

fn fetch_remote(source: &SourceConfig) -> Result<Vec<Organisation>, DataError> {
    log::info!(
        "Querying {} for the top {} organisations",
        source.endpoint,
        source.limit
    );

    let body = serde_json::to_string(&build_query(source.limit))?;
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(source.timeout_secs)))
        .build()
        .into();

    let response = agent
        .post(source.endpoint.as_str())
        .header("Content-Type", "application/json")
        .header("Accept", "application/json")
        .send(body.as_str())
        .map_err(|error| http_error(&source.endpoint, error))?;

    let text = response
        .into_body()
        .read_to_string()
        .map_err(|error| http_error(&source.endpoint, error))?;
    log::debug!("Received {} bytes from {}", text.len(), source.endpoint);

    parse_response(&text)
}

fn http_error(endpoint: &str, error: ureq::Error) -> DataError {
    match error {
        ureq::Error::StatusCode(status) => DataError::Status {
            endpoint: endpoint.to_string(),
            status,
        },
        other => DataError::Http {
            endpoint: endpoint.to_string(),
            source: Box::new(other),
        },
    }
}

//! GraphQL request body and response envelope.

use serde::{Deserialize, Serialize};

use super::Organisation;
use crate::error::DataError;

/// Static query: the top organisations by score, highest first.
pub const ORGANISATIONS_QUERY: &str = "query Organisations($first: Int!) {
  organisations(first: $first, orderBy: score, orderDirection: desc) {
    ensName
    address
    score
    aum
    tokenCount
    activity
  }
}";

/// JSON body POSTed to the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    pub query: &'static str,
    pub variables: QueryVariables,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueryVariables {
    pub first: u32,
}

/// Builds the organisation query for at most `limit` records.
pub fn build_query(limit: u32) -> GraphQlRequest {
    GraphQlRequest {
        query: ORGANISATIONS_QUERY,
        variables: QueryVariables { first: limit },
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<OrganisationsData>,
    // Some servers send `"errors": null` alongside data.
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct OrganisationsData {
    organisations: Vec<Organisation>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Decodes a response body into organisation records.
///
/// Server-reported errors win over partial data: a response carrying both is
/// treated as a failure.
pub fn parse_response(body: &str) -> Result<Vec<Organisation>, DataError> {
    let envelope: Envelope = serde_json::from_str(body)?;

    let errors = envelope.errors.unwrap_or_default();
    if !errors.is_empty() {
        let messages: Vec<&str> = errors
            .iter()
            .map(|error| error.message.as_str())
            .collect();
        return Err(DataError::GraphQl(messages.join("; ")));
    }

    envelope
        .data
        .map(|data| data.organisations)
        .ok_or(DataError::MissingData)
}

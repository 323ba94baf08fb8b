//! Tally governance proposals.
//!
//! Tally nodes carry `start`/`end` as either a block or a blockless
//! timestamp; both expose a `timestamp` field which is all we keep.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use voyager_types::{Proposal, ProposalMetadata, ProposalStatus};

use crate::{FetchError, HttpJson, UpstreamConfig};

pub fn proposals_query(governor_id: &str) -> String {
    format!(
        r#"query Proposals {{ proposals(input: {{ filters: {{ governorId: "{governor_id}", includeArchived: false, isDraft: false }} }}) {{ nodes {{ ... on Proposal {{ id status metadata {{ title description }} end {{ ... on Block {{ timestamp }} ... on BlocklessTimestamp {{ timestamp }} }} start {{ ... on Block {{ timestamp }} ... on BlocklessTimestamp {{ timestamp }} }} }} }} }} }}"#
    )
}

#[derive(Debug, Deserialize)]
pub struct TallyResponse {
    pub data: Option<TallyData>,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct TallyData {
    pub proposals: Option<ProposalPage>,
}

#[derive(Debug, Deserialize)]
pub struct ProposalPage {
    #[serde(default)]
    pub nodes: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct NodeShape {
    id: String,
    status: ProposalStatus,
    #[serde(default)]
    metadata: ProposalMetadata,
    start: Option<Moment>,
    end: Option<Moment>,
}

#[derive(Debug, Deserialize)]
struct Moment {
    timestamp: Option<DateTime<Utc>>,
}

/// Parse each node independently; nodes of an unexpected shape are skipped.
pub fn parse_proposals(response: TallyResponse) -> Result<Vec<Proposal>, FetchError> {
    if let Some(error) = response.errors.first() {
        return Err(FetchError::InvalidResponse(format!("tally error: {error}")));
    }
    let nodes = response
        .data
        .and_then(|d| d.proposals)
        .map(|p| p.nodes)
        .ok_or_else(|| FetchError::InvalidResponse("missing data.proposals".into()))?;

    Ok(nodes
        .into_iter()
        .filter_map(|node| match serde_json::from_value::<NodeShape>(node) {
            Ok(shape) => Some(Proposal {
                id: shape.id,
                status: shape.status,
                metadata: shape.metadata,
                start: shape.start.and_then(|m| m.timestamp),
                end: shape.end.and_then(|m| m.timestamp),
            }),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed proposal node");
                None
            }
        })
        .collect())
}

/// Every proposal of the configured governor, any status.
pub async fn fetch_proposals(
    client: &HttpJson,
    config: &UpstreamConfig,
) -> Result<Vec<Proposal>, FetchError> {
    let key = config
        .tally_api_key
        .as_deref()
        .ok_or(FetchError::MissingKey("Tally"))?;
    let body = json!({ "query": proposals_query(&config.tally_governor_id) });
    let response: TallyResponse = client
        .post_json(&config.tally_url, &body, &[("Api-Key", key)])
        .await?;
    parse_proposals(response)
}

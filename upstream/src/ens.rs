//! ENS names from the Linea ENS subgraph.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use voyager_types::UserAddress;

use crate::{FetchError, HttpJson, UpstreamConfig};

/// Namehash of `addr.reverse`; reverse records are not user-facing names.
pub const REVERSE_PARENT_NODE: &str =
    "0x91d1777781884d03a6757a803996e38de2a42967fb37eeaca72729271025a9e2";

/// Candidate names fetched per lookup; the most recent one wins.
pub const NAMES_PAGE: usize = 10;

const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

#[derive(Debug, Deserialize)]
pub struct SubgraphResponse {
    pub data: Option<DomainsData>,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct DomainsData {
    #[serde(default)]
    pub domains: Vec<Domain>,
}

#[derive(Debug, Deserialize)]
pub struct Domain {
    pub name: Option<String>,
}

/// Names owned, registered or wrapped by `address`, unexpired at `now`.
pub fn names_query(address: &UserAddress, now: DateTime<Utc>) -> String {
    let owner = address.to_lowercase();
    format!(
        r#"query getNamesForAddress {{ domains(first: {NAMES_PAGE}, where: {{ and: [
  {{ or: [{{ owner: "{owner}" }}, {{ registrant: "{owner}" }}, {{ wrappedOwner: "{owner}" }}] }},
  {{ parent_not: "{REVERSE_PARENT_NODE}" }},
  {{ or: [{{ expiryDate_gt: "{expiry}" }}, {{ expiryDate: null }}] }},
  {{ or: [{{ owner_not: "{ZERO_ADDRESS}" }}, {{ resolver_not: null }}, {{ and: [{{ registrant_not: "{ZERO_ADDRESS}" }}, {{ registrant_not: null }}] }}] }}
] }}) {{ name }} }}"#,
        expiry = now.timestamp()
    )
}

/// Last named domain of the page.
pub fn latest_name(response: SubgraphResponse) -> Result<Option<String>, FetchError> {
    if let Some(error) = response.errors.first() {
        return Err(FetchError::InvalidResponse(format!("subgraph error: {error}")));
    }
    Ok(response
        .data
        .and_then(|data| data.domains.into_iter().rev().find_map(|d| d.name)))
}

pub async fn fetch_ens_name(
    client: &HttpJson,
    config: &UpstreamConfig,
    address: &UserAddress,
    now: DateTime<Utc>,
) -> Result<Option<String>, FetchError> {
    let body = json!({ "query": names_query(address, now) });
    let response: SubgraphResponse = client.post_json(&config.ens_url(), &body, &[]).await?;
    latest_name(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn query_uses_lowercase_owner_and_now() {
        let addr = UserAddress::parse("0xABCDEFabcdef0000000000000000000000000001").unwrap();
        let now = Utc.with_ymd_and_hms(2024, 7, 15, 8, 58, 32).unwrap();
        let query = names_query(&addr, now);
        assert!(query.contains(r#"owner: "0xabcdefabcdef0000000000000000000000000001""#));
        assert!(query.contains(r#"expiryDate_gt: "1721033912""#));
        assert!(query.contains(REVERSE_PARENT_NODE));
        assert!(query.contains("domains(first: 10,"));
    }

    #[test]
    fn takes_last_named_domain() {
        let resp: SubgraphResponse = serde_json::from_str(
            r#"{"data":{"domains":[{"name":"old.linea.eth"},{"name":"new.linea.eth"}]}}"#,
        )
        .unwrap();
        assert_eq!(latest_name(resp).unwrap().as_deref(), Some("new.linea.eth"));

        let resp: SubgraphResponse = serde_json::from_str(
            r#"{"data":{"domains":[{"name":"alice.linea.eth"},{"name":null}]}}"#,
        )
        .unwrap();
        assert_eq!(latest_name(resp).unwrap().as_deref(), Some("alice.linea.eth"));
    }

    #[test]
    fn no_domains_is_none() {
        let resp: SubgraphResponse = serde_json::from_str(r#"{"data":{"domains":[]}}"#).unwrap();
        assert_eq!(latest_name(resp).unwrap(), None);
    }

    #[test]
    fn graphql_errors_surface() {
        let resp: SubgraphResponse =
            serde_json::from_str(r#"{"errors":[{"message":"bad indexer"}]}"#).unwrap();
        assert!(latest_name(resp).is_err());
    }
}

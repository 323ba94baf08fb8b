//! OpenBlock XP score.

use serde::Deserialize;
use voyager_types::UserAddress;

use crate::{FetchError, HttpJson, UpstreamConfig};

#[derive(Debug, Deserialize)]
pub struct PointsEntry {
    #[serde(default)]
    pub xp: Option<f64>,
}

/// Score of the first entry; an empty result set is an error so the caller
/// falls back to its default.
pub fn score_of(entries: &[PointsEntry]) -> Result<u64, FetchError> {
    let xp = entries
        .first()
        .and_then(|entry| entry.xp)
        .ok_or_else(|| FetchError::InvalidResponse("no OpenBlock entry for user".into()))?;
    if !xp.is_finite() || xp < 0.0 {
        return Err(FetchError::InvalidResponse(format!("bad xp value {xp}")));
    }
    Ok(xp as u64)
}

pub async fn fetch_open_block_score(
    client: &HttpJson,
    config: &UpstreamConfig,
    address: &UserAddress,
) -> Result<u64, FetchError> {
    let url = format!("{}?user={}", config.openblock_url, address.to_lowercase());
    let entries: Vec<PointsEntry> = client
        .get_json(&url, &[("Origin", config.openblock_origin.as_str())])
        .await?;
    score_of(&entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Vec<PointsEntry> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn first_entry_wins() {
        assert_eq!(score_of(&parse(r#"[{"xp": 1250}, {"xp": 3}]"#)).unwrap(), 1250);
        assert_eq!(score_of(&parse(r#"[{"xp": 12.9}]"#)).unwrap(), 12);
    }

    #[test]
    fn empty_or_negative_is_error() {
        assert!(score_of(&parse("[]")).is_err());
        assert!(score_of(&parse(r#"[{"xp": -1}]"#)).is_err());
        assert!(score_of(&parse(r#"[{}]"#)).is_err());
    }
}

//! Contentful activation cards.
//!
//! Entries carry localized fields (`{"en-US": value}`); tags are link
//! objects (`{"sys": {"id": ...}}`). Entries missing a title, url, or a
//! parsable end date are dropped.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use voyager_types::Activation;

use crate::{FetchError, HttpJson, UpstreamConfig};

const LOCALE: &str = "en-US";

type Localized<T> = HashMap<String, T>;

#[derive(Debug, Deserialize)]
pub struct EntriesResponse {
    #[serde(default)]
    pub items: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub fields: EntryFields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryFields {
    pub title: Option<Localized<String>>,
    pub url: Option<Localized<String>>,
    pub end_date: Option<Localized<String>>,
    pub tags: Option<Localized<Vec<TagLink>>>,
}

#[derive(Debug, Deserialize)]
pub struct TagLink {
    pub sys: Option<LinkSys>,
}

#[derive(Debug, Deserialize)]
pub struct LinkSys {
    pub id: Option<String>,
}

impl Entry {
    /// Normalize into an [`Activation`], or `None` when a required field is absent.
    pub fn into_activation(self) -> Option<Activation> {
        let mut fields = self.fields;
        let title = fields.title.as_mut()?.remove(LOCALE)?;
        let url = fields.url.as_mut()?.remove(LOCALE)?;
        let end_date = parse_end_date(fields.end_date.as_ref()?.get(LOCALE)?)?;
        let tags = fields
            .tags
            .and_then(|mut t| t.remove(LOCALE))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|link| link.sys.and_then(|sys| sys.id))
            .collect();

        Some(Activation {
            title,
            url,
            end_date,
            tags,
        })
    }
}

/// Contentful date fields: full RFC 3339, minute precision with offset, or a bare date.
pub fn parse_end_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn parse_entries(response: EntriesResponse) -> Vec<Activation> {
    response
        .items
        .into_iter()
        .filter_map(Entry::into_activation)
        .collect()
}

/// Fetch every activation card.
pub async fn fetch_activations(
    client: &HttpJson,
    config: &UpstreamConfig,
) -> Result<Vec<Activation>, FetchError> {
    let key = config
        .contentful_api_key
        .as_deref()
        .ok_or(FetchError::MissingKey("Contentful"))?;
    let response: EntriesResponse = client
        .get_json(&config.contentful_url, &[("Authorization", key)])
        .await?;
    Ok(parse_entries(response))
}

//! Promotional campaigns ("activations") that award experience points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag id that marks an activation as awarding LXP.
pub const GET_XP_TAG: &str = "4WJBpV24ju4wlbr6Kvi2pt";

/// A time-boxed campaign, read-only to this system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    pub title: String,
    pub url: String,
    pub end_date: DateTime<Utc>,
    /// Tag ids attached to the campaign.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Activation {
    /// An activation is current while its end date lies strictly in the future.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.end_date > now
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Keep the activations that are both current and carry `tag`.
pub fn filter_current_activations(
    activations: impl IntoIterator<Item = Activation>,
    now: DateTime<Utc>,
    tag: &str,
) -> Vec<Activation> {
    activations
        .into_iter()
        .filter(|a| a.is_current(now) && a.has_tag(tag))
        .collect()
}

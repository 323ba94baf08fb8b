//! Governance proposals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status reported by the governance API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Active,
    Canceled,
    Executed,
    Queued,
    /// Any status this system does not act on (pending, defeated, ...).
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalMetadata {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A governance item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    pub status: ProposalStatus,
    pub metadata: ProposalMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

impl Proposal {
    pub fn is_active(&self) -> bool {
        self.status == ProposalStatus::Active
    }
}

/// Keep active proposals only.
pub fn filter_active_proposals(proposals: impl IntoIterator<Item = Proposal>) -> Vec<Proposal> {
    proposals.into_iter().filter(Proposal::is_active).collect()
}

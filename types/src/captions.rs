//! Localized UI labels.
//!
//! A caption bundle is loaded once per locale (or on a forced reload) and is
//! immutable for the rest of the session.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Captions {
    pub locale: String,
    pub address: String,
    pub balance: String,
    pub balance_lxp_l: String,
    pub pending_balance_lxp_l: String,
    pub poh_status: String,
    pub ens_name: String,
    pub poh: PohCaptions,
    pub activations: CountCaptions,
    pub proposals: CountCaptions,
    pub no_address: NoAddressCaptions,
    pub help: String,
    pub view_balance: String,
    pub view_lxp_l_balance: String,
    #[serde(rename = "completePOH")]
    pub complete_poh: String,
    pub explore_all: String,
    pub lxp_address: DialogCaptions,
    pub next_steps: NextStepsCaptions,
    pub errors: ErrorCaptions,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PohCaptions {
    pub verified: String,
    pub not_verified: String,
}

/// Pluralized count templates; `{count}` is substituted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountCaptions {
    pub none: String,
    pub one: String,
    pub number: String,
}

impl CountCaptions {
    /// Pick the template for `count` and substitute it.
    pub fn format(&self, count: usize) -> String {
        let template = match count {
            0 => &self.none,
            1 => &self.one,
            _ => &self.number,
        };
        template.replace("{count}", &count.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoAddressCaptions {
    pub to_set_text: String,
    pub to_set_link: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogCaptions {
    pub heading: String,
    pub prompt: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextStepsCaptions {
    pub heading: String,
    pub body: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCaptions {
    pub heading: String,
    /// Template with an `{address}` placeholder.
    pub invalid_lxp_address: String,
}

impl ErrorCaptions {
    pub fn invalid_address(&self, address: &str) -> String {
        self.invalid_lxp_address.replace("{address}", address)
    }
}

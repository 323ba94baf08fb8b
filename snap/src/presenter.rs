//! State → UI.

use voyager_types::{Captions, SnapState, LXP_CONTRACT_ADDRESS, LXP_L_CONTRACT_ADDRESS};

use crate::ui::{address, divider, heading, image, panel, row, text};
use crate::{Component, Dialog};

const BANNER: &str = include_str!("../img/banner.svg");

pub const COMPANION_SITE_URL: &str = "https://voyager-snap.linea.build";
pub const EXPLORER_TOKEN_URL: &str = "https://lineascan.build/token";
pub const POH_URL: &str = "https://poh.linea.build";
pub const ACTIVATIONS_URL: &str = "https://linea.build/activations";

pub const ADDRESS_PLACEHOLDER: &str = "0x123...";

/// Longest activation title shown before truncation.
pub const TITLE_MAX_CHARS: usize = 30;

/// Cut `s` to `max` characters, appending `...` when anything was dropped.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head: String = s.chars().take(max).collect();
    format!("{head}...")
}

/// Home page for the stored state.
pub fn render_home(state: &SnapState) -> Component {
    let fallback = Captions::default();
    let captions = state.captions.as_ref().unwrap_or(&fallback);

    let mut children = vec![image(BANNER)];

    match state.lxp_address.as_deref() {
        Some(account) => children.extend(account_rows(state, captions, account)),
        None => children.push(text(format!(
            "{} [{}]({COMPANION_SITE_URL}).",
            captions.no_address.to_set_text, captions.no_address.to_set_link
        ))),
    }

    let activations = state.activations.as_deref().unwrap_or_default();
    children.push(divider());
    children.push(text(format!("**{}**", captions.activations.format(activations.len()))));
    for activation in activations {
        children.push(text(format!(
            "&bull; [{}]({})",
            truncate(&activation.title, TITLE_MAX_CHARS),
            activation.url
        )));
    }

    let proposals = state.proposals.as_deref().unwrap_or_default();
    if !proposals.is_empty() {
        children.push(divider());
        children.push(text(format!("**{}**", captions.proposals.format(proposals.len()))));
        for proposal in proposals {
            children.push(text(format!("&bull; {}", proposal.metadata.title)));
        }
    }

    children.push(divider());
    children.push(text(format!("_{}_", captions.help)));
    if let Some(account) = state.lxp_address.as_deref() {
        children.push(text(format!(
            "&bull; [{}]({EXPLORER_TOKEN_URL}/{LXP_CONTRACT_ADDRESS}?a={account})",
            captions.view_balance
        )));
        children.push(text(format!(
            "&bull; [{}]({EXPLORER_TOKEN_URL}/{LXP_L_CONTRACT_ADDRESS}?a={account})",
            captions.view_lxp_l_balance
        )));
    }
    if !state.poh_status.unwrap_or(false) {
        children.push(text(format!("&bull; [{}]({POH_URL})", captions.complete_poh)));
    }
    children.push(text(format!("&bull; [{}]({ACTIVATIONS_URL})", captions.explore_all)));

    panel(children)
}

fn account_rows(state: &SnapState, captions: &Captions, account: &str) -> Vec<Component> {
    let poh = if state.poh_status.unwrap_or(false) {
        format!("✅ {}", captions.poh.verified)
    } else {
        format!("❌ {}", captions.poh.not_verified)
    };

    let mut rows = vec![row(&captions.address, address(account))];
    if let Some(name) = &state.ens_name {
        rows.push(row(&captions.ens_name, text(name)));
    }
    rows.push(row(&captions.balance, text(state.lxp_balance.unwrap_or_default().to_string())));
    rows.push(row(
        &captions.balance_lxp_l,
        text(state.lxp_l_balance.unwrap_or_default().to_string()),
    ));
    rows.push(row(
        &captions.pending_balance_lxp_l,
        text(state.pending_lxp_l().to_string()),
    ));
    rows.push(row(&captions.poh_status, text(poh)));
    rows
}

/// Install / watch prompt for the LXP address.
pub fn prompt_lxp_address(captions: &Captions) -> Dialog {
    Dialog::Prompt {
        content: panel(vec![
            heading(&captions.lxp_address.heading),
            text(&captions.lxp_address.prompt),
        ]),
        placeholder: ADDRESS_PLACEHOLDER.to_string(),
    }
}

pub fn invalid_address_alert(captions: &Captions, candidate: &str) -> Dialog {
    Dialog::Alert {
        content: panel(vec![
            heading(&captions.errors.heading),
            text(captions.errors.invalid_address(candidate)),
        ]),
    }
}

pub fn next_steps_alert(captions: &Captions) -> Dialog {
    Dialog::Alert {
        content: panel(vec![
            heading(&captions.next_steps.heading),
            text(&captions.next_steps.body),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundled_captions;
    use chrono::{TimeZone, Utc};
    use voyager_types::{Activation, U256};

    const ACCOUNT: &str = "0x1234567890abcdef1234567890abcdef12345678";

    fn state() -> SnapState {
        SnapState {
            captions: Some(bundled_captions("en").unwrap()),
            ..Default::default()
        }
    }

    fn activation(title: &str) -> Activation {
        Activation {
            title: title.into(),
            url: "https://linea.build/a".into(),
            end_date: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
            tags: vec![],
        }
    }

    #[test]
    fn no_address_prompts_instead_of_rows() {
        let lines = render_home(&state()).lines();
        assert!(lines[0].starts_with("No LXP address set yet."));
        assert!(lines[0].contains(COMPANION_SITE_URL));
        assert!(!lines.iter().any(|l| l.starts_with("LXP:")));
        assert!(!lines.iter().any(|l| l.contains(EXPLORER_TOKEN_URL)));
    }

    #[test]
    fn account_rows_render() {
        let mut s = state();
        s.lxp_address = Some(ACCOUNT.into());
        s.lxp_balance = Some(U256::from(1200));
        s.lxp_l_balance = Some(U256::from(30));
        s.open_block_score = Some(50);
        s.poh_status = Some(true);
        s.ens_name = Some("voyager.linea.eth".into());

        let lines = render_home(&s).lines();
        assert_eq!(lines[0], format!("Address: {ACCOUNT}"));
        assert_eq!(lines[1], "Linea name: voyager.linea.eth");
        assert_eq!(lines[2], "LXP: 1200");
        assert_eq!(lines[3], "LXP-L: 30");
        assert_eq!(lines[4], "Pending LXP-L: 20");
        assert_eq!(lines[5], "POH status: ✅ Verified");
        assert!(!lines.iter().any(|l| l.contains(POH_URL)));
    }

    #[test]
    fn unverified_shows_cross_and_poh_link() {
        let mut s = state();
        s.lxp_address = Some(ACCOUNT.into());
        let lines = render_home(&s).lines();
        assert!(lines.contains(&"POH status: ❌ Not verified".to_string()));
        assert!(lines.iter().any(|l| l.contains(POH_URL)));
    }

    #[test]
    fn activation_count_pluralizes() {
        let mut s = state();
        assert!(render_home(&s).lines().contains(&"**No ongoing activations**".to_string()));

        s.lxp_address = Some(ACCOUNT.into());
        s.activations = Some(vec![]);
        assert!(render_home(&s).lines().contains(&"**No ongoing activations**".to_string()));

        s.activations = Some(vec![activation("Bridge")]);
        assert!(render_home(&s).lines().contains(&"**1 ongoing activation**".to_string()));

        s.activations = Some(vec![activation("Bridge"), activation("Swap")]);
        assert!(render_home(&s).lines().contains(&"**2 ongoing activations**".to_string()));
    }

    #[test]
    fn long_titles_are_truncated() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(
            truncate("A very long activation title that goes on", 30),
            "A very long activation title t..."
        );
        assert_eq!(truncate("ééé", 2), "éé...");
    }

    #[test]
    fn dialogs_carry_captions() {
        let captions = bundled_captions("en").unwrap();
        match prompt_lxp_address(&captions) {
            Dialog::Prompt { placeholder, content } => {
                assert_eq!(placeholder, "0x123...");
                assert_eq!(content.lines()[0], "# Your LXP address");
            }
            other => panic!("unexpected dialog {other:?}"),
        }
        let alert = invalid_address_alert(&captions, "0xABC");
        assert!(alert.content().lines()[1].starts_with("0xABC is not a valid address"));
    }
}

//! Caption bundles.

use tracing::debug;
use voyager_store::StateStore;
use voyager_types::Captions;

use crate::{Host, SnapError};

const EN: &str = include_str!("../locales/en.json");
const FR: &str = include_str!("../locales/fr.json");

pub const DEFAULT_LANGUAGE: &str = "en";

/// Language of a host locale (`fr-FR` → `fr`), limited to bundled languages.
pub fn resolve_language(locale: &str) -> &'static str {
    let prefix = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match prefix.as_str() {
        "fr" => "fr",
        _ => DEFAULT_LANGUAGE,
    }
}

pub fn bundled_captions(language: &str) -> Result<Captions, SnapError> {
    let raw = match language {
        "fr" => FR,
        _ => EN,
    };
    serde_json::from_str(raw).map_err(|e| SnapError::Captions(format!("{language}: {e}")))
}

/// Captions for the host locale. Reloads and persists the bundle when
/// `force` is set or the stored bundle is for another language.
pub async fn load_captions(
    host: &dyn Host,
    store: &dyn StateStore,
    force: bool,
) -> Result<Captions, SnapError> {
    let language = resolve_language(&host.locale().await?);
    let stored = store.read()?.captions;

    if let Some(captions) = stored {
        if !force && captions.locale == language {
            return Ok(captions);
        }
    }

    debug!(language, force, "loading captions");
    let captions = bundled_captions(language)?;
    store.write(voyager_types::SnapState::with_captions(captions.clone()))?;
    Ok(captions)
}

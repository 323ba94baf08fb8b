//! Request dispatcher.

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use voyager_registration::Registrar;
use voyager_store::StateStore;
use voyager_types::{RegistrationPayload, SignedRegistration, SnapState, UserAddress};
use voyager_upstream::{Aggregator, BalanceSource};

use crate::presenter::{invalid_address_alert, next_steps_alert, prompt_lxp_address};
use crate::{load_captions, render_home, Component, Host, HostChain, SnapError};

pub struct SnapHandler {
    host: Arc<dyn Host>,
    store: Arc<dyn StateStore>,
    aggregator: Aggregator,
    registrar: Option<Arc<dyn Registrar>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetAddressParams {
    lxp_address: Option<String>,
}

#[derive(Deserialize)]
struct PersonalSignParams {
    signature: Option<String>,
    payload: RegistrationPayload,
}

impl SnapHandler {
    pub fn new(host: Arc<dyn Host>, store: Arc<dyn StateStore>, aggregator: Aggregator) -> Self {
        Self {
            host,
            store,
            aggregator,
            registrar: None,
        }
    }

    pub fn with_registrar(mut self, registrar: Arc<dyn Registrar>) -> Self {
        self.registrar = Some(registrar);
        self
    }

    /// Load captions, then ask for the address to watch.
    pub async fn on_install(&self) -> Result<(), SnapError> {
        let captions = load_captions(self.host.as_ref(), self.store.as_ref(), true).await?;
        let Some(entered) = self.host.show_dialog(&prompt_lxp_address(&captions)).await? else {
            info!("address prompt dismissed on install");
            return Ok(());
        };

        let entered = entered.trim();
        if UserAddress::is_valid(entered) {
            self.store.write(SnapState::with_address(entered))?;
            self.host.show_dialog(&next_steps_alert(&captions)).await?;
        } else {
            warn!(candidate = %entered, "invalid address entered on install");
            self.host
                .show_dialog(&invalid_address_alert(&captions, entered))
                .await?;
        }
        Ok(())
    }

    pub async fn on_update(&self) -> Result<(), SnapError> {
        load_captions(self.host.as_ref(), self.store.as_ref(), true).await?;
        Ok(())
    }

    /// Refresh the stored state for the watched address and render it.
    pub async fn on_home_page(&self) -> Result<Component, SnapError> {
        load_captions(self.host.as_ref(), self.store.as_ref(), false).await?;
        let state = self.store.read()?;

        let address = state
            .lxp_address
            .as_deref()
            .and_then(|raw| UserAddress::parse(raw).ok());
        let Some(address) = address else {
            return Ok(render_home(&state));
        };

        let chain_id = self.host.chain_id().await?;
        debug!(address = %address, chain = %chain_id.as_str(), "refreshing home page");
        let chain = HostChain(self.host.as_ref());
        let source = if chain_id.is_production() {
            BalanceSource::Chain(&chain)
        } else {
            BalanceSource::Explorer
        };

        let state = self
            .aggregator
            .refresh(self.store.as_ref(), &address, source)
            .await?;
        Ok(render_home(&state))
    }

    /// Remote-procedure entry point.
    pub async fn on_rpc_request(&self, method: &str, params: Value) -> Result<Value, SnapError> {
        debug!(method, "rpc request");
        match method {
            "getLxpAddress" => Ok(self.lxp_address()?.map(Value::String).unwrap_or(Value::Null)),
            "setLxpAddress" => {
                let params: SetAddressParams = parse_params(method, params)?;
                let candidate = params.lxp_address.unwrap_or_default();
                Ok(self.set_lxp_address(&candidate)?.map(Value::String).unwrap_or(Value::Null))
            }
            "watchLxpAddress" => Ok(self
                .watch_lxp_address()
                .await?
                .map(Value::String)
                .unwrap_or(Value::Null)),
            "personalSign" => {
                self.ensure_address()?;
                let params: PersonalSignParams = parse_params(method, params)?;
                let status = self
                    .personal_sign(SignedRegistration {
                        signature: params.signature,
                        payload: params.payload,
                    })
                    .await?;
                serde_json::to_value(status).map_err(|e| SnapError::Host(e.to_string()))
            }
            other => Err(SnapError::MethodNotFound(other.to_string())),
        }
    }

    pub fn lxp_address(&self) -> Result<Option<String>, SnapError> {
        Ok(self.store.read()?.lxp_address)
    }

    /// Persist `candidate` when it is a well-formed address; `None` otherwise.
    pub fn set_lxp_address(&self, candidate: &str) -> Result<Option<String>, SnapError> {
        if !UserAddress::is_valid(candidate) {
            warn!(candidate = %candidate, "rejected invalid LXP address");
            return Ok(None);
        }
        self.store.write(SnapState::with_address(candidate))?;
        info!(address = %candidate, "LXP address set");
        Ok(Some(candidate.to_string()))
    }

    /// Prompt for an address; persist it or explain why it was refused.
    pub async fn watch_lxp_address(&self) -> Result<Option<String>, SnapError> {
        let captions = load_captions(self.host.as_ref(), self.store.as_ref(), false).await?;
        let Some(entered) = self.host.show_dialog(&prompt_lxp_address(&captions)).await? else {
            return Ok(None);
        };
        let entered = entered.trim();
        if UserAddress::is_valid(entered) {
            self.store.write(SnapState::with_address(entered))?;
            Ok(Some(entered.to_string()))
        } else {
            self.host
                .show_dialog(&invalid_address_alert(&captions, entered))
                .await?;
            Ok(None)
        }
    }

    pub async fn personal_sign(
        &self,
        request: SignedRegistration,
    ) -> Result<voyager_registration::RegistrationStatus, SnapError> {
        self.ensure_address()?;
        let registrar = self
            .registrar
            .as_ref()
            .ok_or(SnapError::RegistrarUnavailable)?;
        Ok(registrar.submit(&request).await?)
    }

    fn ensure_address(&self) -> Result<(), SnapError> {
        match self.store.read()?.lxp_address {
            Some(_) => Ok(()),
            None => Err(SnapError::NoAddress),
        }
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(method: &str, params: Value) -> Result<T, SnapError> {
    serde_json::from_value(params).map_err(|e| SnapError::InvalidParams {
        method: method.to_string(),
        reason: e.to_string(),
    })
}

//! Nullable wallet host: queued prompt answers, recorded dialogs.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use voyager_snap::{Dialog, Host, SnapError};
use voyager_types::ChainId;
use voyager_upstream::ChainReader;

use crate::NullChain;

pub struct NullHost {
    chain_id: Mutex<ChainId>,
    locale: Mutex<String>,
    chain: NullChain,
    prompt_answers: Mutex<VecDeque<Option<String>>>,
    dialogs: Mutex<Vec<Dialog>>,
}

impl NullHost {
    /// English host on Linea mainnet.
    pub fn new() -> Self {
        Self::with_chain(NullChain::new())
    }

    pub fn with_chain(chain: NullChain) -> Self {
        Self {
            chain_id: Mutex::new(ChainId::linea_mainnet()),
            locale: Mutex::new("en-US".to_string()),
            chain,
            prompt_answers: Mutex::new(VecDeque::new()),
            dialogs: Mutex::new(Vec::new()),
        }
    }

    pub fn set_chain_id(&self, chain_id: &str) {
        *self.chain_id.lock().unwrap() = ChainId::new(chain_id);
    }

    pub fn set_locale(&self, locale: &str) {
        *self.locale.lock().unwrap() = locale.to_string();
    }

    /// Queue the answer to the next prompt; `None` dismisses it.
    pub fn answer_prompt(&self, answer: Option<&str>) {
        self.prompt_answers
            .lock()
            .unwrap()
            .push_back(answer.map(str::to_string));
    }

    /// Every dialog shown so far.
    pub fn dialogs(&self) -> Vec<Dialog> {
        self.dialogs.lock().unwrap().clone()
    }

    pub fn chain(&self) -> &NullChain {
        &self.chain
    }
}

impl Default for NullHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Host for NullHost {
    async fn chain_id(&self) -> Result<ChainId, SnapError> {
        Ok(self.chain_id.lock().unwrap().clone())
    }

    async fn locale(&self) -> Result<String, SnapError> {
        Ok(self.locale.lock().unwrap().clone())
    }

    async fn eth_call(&self, to: &str, data: &str) -> Result<String, SnapError> {
        self.chain
            .eth_call(to, data)
            .await
            .map_err(|e| SnapError::Host(e.to_string()))
    }

    async fn show_dialog(&self, dialog: &Dialog) -> Result<Option<String>, SnapError> {
        self.dialogs.lock().unwrap().push(dialog.clone());
        match dialog {
            Dialog::Prompt { .. } => Ok(self.prompt_answers.lock().unwrap().pop_front().flatten()),
            Dialog::Alert { .. } => Ok(None),
        }
    }
}

//! Terminal stand-in for the wallet host.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use voyager_snap::{Dialog, Host, PlainText, SnapError};
use voyager_types::ChainId;
use voyager_upstream::{ChainReader, JsonRpcChain};

/// Dialogs go to stdout, prompt answers come from stdin, `eth_call` goes
/// to a JSON-RPC endpoint.
pub struct LocalHost {
    chain_id: ChainId,
    locale: String,
    chain: JsonRpcChain,
    stdin: Mutex<BufReader<tokio::io::Stdin>>,
}

impl LocalHost {
    pub fn new(chain_id: ChainId, locale: String, chain: JsonRpcChain) -> Self {
        Self {
            chain_id,
            locale,
            chain,
            stdin: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }

    async fn print(&self, text: &str) -> Result<(), SnapError> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("{text}\n").as_bytes())
            .await
            .map_err(|e| SnapError::Host(e.to_string()))?;
        stdout.flush().await.map_err(|e| SnapError::Host(e.to_string()))
    }
}

#[async_trait]
impl Host for LocalHost {
    async fn chain_id(&self) -> Result<ChainId, SnapError> {
        Ok(self.chain_id.clone())
    }

    async fn locale(&self) -> Result<String, SnapError> {
        Ok(self.locale.clone())
    }

    async fn eth_call(&self, to: &str, data: &str) -> Result<String, SnapError> {
        self.chain
            .eth_call(to, data)
            .await
            .map_err(|e| SnapError::Host(e.to_string()))
    }

    async fn show_dialog(&self, dialog: &Dialog) -> Result<Option<String>, SnapError> {
        self.print(&PlainText::render(dialog.content())).await?;
        let Dialog::Prompt { placeholder, .. } = dialog else {
            return Ok(None);
        };

        self.print(&format!("[{placeholder}] > ")).await?;
        let mut line = String::new();
        let read = self
            .stdin
            .lock()
            .await
            .read_line(&mut line)
            .await
            .map_err(|e| SnapError::Host(e.to_string()))?;
        let answer = line.trim();
        if read == 0 || answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer.to_string()))
        }
    }
}

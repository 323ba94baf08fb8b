//! Google Sheets ledger (`spreadsheets.values.append`).

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{Ledger, LedgerError, LedgerRow, RegistrationError};

pub const DEFAULT_SHEETS_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_RANGE: &str = "Sheet1!A:E";

pub struct SheetsLedger {
    http: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    access_token: String,
    range: String,
}

impl SheetsLedger {
    pub fn new(
        spreadsheet_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, RegistrationError> {
        let spreadsheet_id = spreadsheet_id.into();
        let access_token = access_token.into();
        if spreadsheet_id.is_empty() || access_token.is_empty() {
            return Err(RegistrationError::MissingSecret("Spreadsheet credentials"));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RegistrationError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: DEFAULT_SHEETS_URL.to_string(),
            spreadsheet_id,
            access_token,
            range: DEFAULT_RANGE.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }

    pub fn append_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
            self.base_url.trim_end_matches('/'),
            self.spreadsheet_id,
            self.range
        )
    }
}

#[async_trait]
impl Ledger for SheetsLedger {
    async fn append_row(&self, row: &LedgerRow) -> Result<(), LedgerError> {
        let body = json!({ "values": [row.values()] });
        let response = self
            .http
            .post(self.append_url())
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| LedgerError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "sheets append rejected");
            return Err(LedgerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        debug!(address = %row.address, "registration row appended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_are_required() {
        assert!(matches!(
            SheetsLedger::new("", "token"),
            Err(RegistrationError::MissingSecret(_))
        ));
        assert!(SheetsLedger::new("sheet", "").is_err());
    }

    #[test]
    fn append_url_targets_range() {
        let ledger = SheetsLedger::new("abc123", "token")
            .unwrap()
            .with_base_url("http://localhost:9000/")
            .with_range("Registrations!A:E");
        assert_eq!(
            ledger.append_url(),
            "http://localhost:9000/v4/spreadsheets/abc123/values/Registrations!A:E:append\
             ?valueInputOption=RAW&insertDataOption=INSERT_ROWS"
        );
    }
}

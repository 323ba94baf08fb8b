//! Client side: forwards a signed registration to the registration endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use voyager_types::SignedRegistration;

use crate::RegistrationError;

pub const STATUS_OK: &str = "ok";
pub const STATUS_ERROR: &str = "error";

/// Outcome reported back to the caller, whatever the HTTP status.
///
/// `status` is `"ok"` for any 2xx answer and `"error"` otherwise; `code`
/// keeps the HTTP status itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationStatus {
    pub status: String,
    pub code: u16,
    pub message: String,
}

impl RegistrationStatus {
    pub fn from_http(code: u16, message: impl Into<String>) -> Self {
        let status = if (200..300).contains(&code) {
            STATUS_OK
        } else {
            STATUS_ERROR
        };
        Self {
            status: status.to_string(),
            code,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

#[async_trait]
pub trait Registrar: Send + Sync {
    async fn submit(&self, request: &SignedRegistration)
        -> Result<RegistrationStatus, RegistrationError>;
}

pub struct RegistrationClient {
    http: reqwest::Client,
    url: String,
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: String,
}

impl RegistrationClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RegistrationError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RegistrationError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Registrar for RegistrationClient {
    async fn submit(
        &self,
        request: &SignedRegistration,
    ) -> Result<RegistrationStatus, RegistrationError> {
        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| RegistrationError::Transport(e.to_string()))?;

        let code = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| RegistrationError::Transport(e.to_string()))?;
        Ok(RegistrationStatus::from_http(code, message_of(&text)))
    }
}

/// `message` of a JSON body, or the raw text when the body is not JSON.
fn message_of(body: &str) -> String {
    serde_json::from_str::<MessageBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_extraction() {
        assert_eq!(message_of(r#"{"message":"Invalid signature"}"#), "Invalid signature");
        assert_eq!(message_of("Bad Gateway"), "Bad Gateway");
        assert_eq!(message_of("{}"), "");
    }

    #[test]
    fn http_codes_map_to_ok_or_error() {
        let created = RegistrationStatus::from_http(201, "Address registered");
        assert_eq!(created.status, "ok");
        assert!(created.is_ok());

        let rejected = RegistrationStatus::from_http(400, "Invalid signature");
        assert_eq!(rejected.status, "error");
        assert_eq!(rejected.code, 400);
        assert!(!RegistrationStatus::from_http(500, "").is_ok());
    }
}

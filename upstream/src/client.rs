//! Thin JSON-over-HTTP client shared by every fetcher.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::FetchError;

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Wraps `reqwest::Client` (reusable connection pool) with JSON helpers.
#[derive(Clone)]
pub struct HttpJson {
    http: reqwest::Client,
}

impl HttpJson {
    /// Create a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Unreachable(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http })
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// `GET url` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let mut request = self
            .http
            .get(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        self.send(request, url).await
    }

    /// `POST url` with a JSON body and decode the JSON response.
    pub async fn post_json<B, T>(
        &self,
        url: &str,
        body: &B,
        headers: &[(&str, &str)],
    ) -> Result<T, FetchError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        self.send(request, url).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T, FetchError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Unreachable(format!("request timed out: {e}"))
            } else if e.is_connect() {
                FetchError::Unreachable(format!("connection failed: {e}"))
            } else {
                FetchError::Unreachable(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %redact_query(url), status = status.as_u16(), "upstream call failed");
            return Err(FetchError::Status {
                url: redact_query(url),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::InvalidResponse(format!("{}: {e}", redact_query(url))))
    }
}

/// Drop the query string, which may carry API keys.
fn redact_query(url: &str) -> String {
    url.split('?').next().unwrap_or(url).to_string()
}

//! Function handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use voyager_registration::RegistrationError;
use voyager_types::{SignedRegistration, UserAddress};
use voyager_upstream::BalanceSource;

use crate::cors::json_response;
use crate::{FunctionError, FunctionsState};

/// Count the call and turn the outcome into a response.
fn finish(state: &FunctionsState, function: &str, result: Result<Response, FunctionError>) -> Response {
    let response = result.unwrap_or_else(IntoResponse::into_response);
    state.metrics.observe(function, response.status().as_u16());
    response
}

pub async fn method_not_allowed() -> Response {
    FunctionError::MethodNotAllowed.into_response()
}

/// `GET /activations` → `{ lxpActivations }`.
pub async fn activations(State(state): State<FunctionsState>) -> Response {
    let result = async {
        state.secrets.require_contentful()?;
        let activations = state.aggregator.current_activations().await;
        debug!(count = activations.len(), "serving activations");
        Ok::<_, FunctionError>(json_response(
            StatusCode::OK,
            &json!({ "lxpActivations": activations }),
        ))
    }
    .await;
    finish(&state, "activations", result)
}

/// `POST /registration` with `{ signature, payload }`.
pub async fn registration(State(state): State<FunctionsState>, body: String) -> Response {
    let result = async {
        let request: SignedRegistration = serde_json::from_str(&body)
            .map_err(|e| FunctionError::BadRequest(format!("Invalid request body: {e}")))?;
        let service = state
            .registration
            .as_ref()
            .ok_or(RegistrationError::MissingSecret("Spreadsheet credentials"))?;
        let receipt = service.register(request).await?;
        state.metrics.registrations.inc();
        Ok::<_, FunctionError>(json_response(
            StatusCode::CREATED,
            &json!({ "message": receipt.message }),
        ))
    }
    .await;
    finish(&state, "registration", result)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalQuery {
    pub address: Option<String>,
    pub is_lineascan: Option<String>,
}

/// `true`/`1` (any case) enable explorer lookups; anything else disables them.
pub fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|s| s.trim().to_ascii_lowercase()).as_deref(),
        Some("true") | Some("1")
    )
}

/// `GET /global?address=..&isLineascan=..` → aggregated user data.
pub async fn global(State(state): State<FunctionsState>, Query(query): Query<GlobalQuery>) -> Response {
    let result = async {
        state.secrets.require_lineascan()?;
        state.secrets.require_tally()?;
        state.secrets.require_contentful()?;

        let raw = query
            .address
            .as_deref()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| FunctionError::BadRequest("Missing address parameter".into()))?;
        let address = UserAddress::parse(raw)
            .map_err(|_| FunctionError::BadRequest("Invalid address parameter".into()))?;

        let source = if parse_flag(query.is_lineascan.as_deref()) {
            BalanceSource::Explorer
        } else {
            BalanceSource::Skip
        };
        let data = state.aggregator.collect(&address, source).await;
        info!(address = %address, "served global data");

        let body = serde_json::to_value(&data).map_err(|e| FunctionError::Internal(e.to_string()))?;
        Ok::<_, FunctionError>(json_response(StatusCode::OK, &body))
    }
    .await;
    finish(&state, "global", result)
}

pub async fn health() -> Response {
    json_response(StatusCode::OK, &json!({ "status": "ok" }))
}

pub async fn metrics(State(state): State<FunctionsState>) -> Response {
    match state.metrics.encode() {
        Ok(text) => (StatusCode::OK, text).into_response(),
        Err(e) => e.into_response(),
    }
}

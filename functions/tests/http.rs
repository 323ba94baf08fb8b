use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use voyager_crypto::{address_of, keypair_from_seed, sign_personal_message};
use voyager_functions::{router, FunctionsState, Secrets};
use voyager_nullables::upstream::{ENS, EXPLORER, POH};
use voyager_nullables::{NullClock, NullLedger, NullUpstream};
use voyager_registration::RegistrationService;
use voyager_types::{
    Activation, Proposal, ProposalMetadata, ProposalStatus, RegistrationPayload,
    SignedRegistration, GET_XP_TAG, LXP_CONTRACT_ADDRESS,
};

const ACCOUNT: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

fn all_secrets() -> Secrets {
    Secrets {
        contentful_api_key: Some("cf".into()),
        lineascan_api_key: Some("ls".into()),
        tally_api_key: Some("ta".into()),
    }
}

fn clock() -> Arc<NullClock> {
    Arc::new(NullClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()))
}

fn app(secrets: Secrets, upstream: Arc<NullUpstream>, ledger: Option<Arc<NullLedger>>) -> Router {
    let registration =
        ledger.map(|l| Arc::new(RegistrationService::new(l, clock())));
    let state = FunctionsState::new(secrets, upstream, clock(), registration).unwrap();
    router(state)
}

fn app_with_ledger() -> Router {
    app(all_secrets(), Arc::new(NullUpstream::new()), Some(Arc::new(NullLedger::new())))
}

async fn send(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn json_of(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

fn activation(title: &str, days_left: i64, tagged: bool) -> Activation {
    Activation {
        title: title.into(),
        url: format!("https://linea.build/{title}"),
        end_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() + Duration::days(days_left),
        tags: if tagged { vec![GET_XP_TAG.into()] } else { vec![] },
    }
}

#[tokio::test]
async fn options_is_an_empty_204_with_cors() {
    for path in ["/activations", "/registration", "/global"] {
        let app = app(Secrets::default(), Arc::new(NullUpstream::new()), None);
        let (status, headers, body) = send(app, Method::OPTIONS, path, "").await;

        assert_eq!(status, StatusCode::NO_CONTENT, "{path}");
        assert!(body.is_empty());
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
        assert_eq!(headers["content-type"], "application/json");
    }
}

#[tokio::test]
async fn unsupported_method_is_405() {
    let app = app(all_secrets(), Arc::new(NullUpstream::new()), None);
    let (status, headers, body) = send(app, Method::DELETE, "/activations", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(json_of(&body), json!({ "message": "Method not allowed" }));

    let with_ledger = app_with_ledger();
    let (status, _, _) = send(with_ledger, Method::GET, "/registration", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn activations_are_filtered_to_current_and_tagged() {
    let upstream = NullUpstream::new().with_activations(vec![
        activation("expired-tagged", -1, true),
        activation("current-untagged", 5, false),
        activation("current-tagged", 5, true),
    ]);
    let app = app(all_secrets(), Arc::new(upstream), None);

    let (status, _, body) = send(app, Method::GET, "/activations", "").await;
    assert_eq!(status, StatusCode::OK);
    let list = json_of(&body)["lxpActivations"].as_array().cloned().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "current-tagged");
}

#[tokio::test]
async fn activations_need_the_cms_key() {
    let app = app(Secrets::default(), Arc::new(NullUpstream::new()), None);
    let (status, _, body) = send(app, Method::GET, "/activations", "").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_of(&body)["message"], "Contentful API key not set");
}

#[tokio::test]
async fn global_checks_keys_then_address() {
    let upstream = Arc::new(NullUpstream::new());

    let (status, _, body) = send(app(Secrets::default(), upstream.clone(), None), Method::GET, "/global", "").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_of(&body)["message"], "Lineascan API key not set");

    let only_lineascan = Secrets {
        lineascan_api_key: Some("ls".into()),
        ..Secrets::default()
    };
    let (_, _, body) = send(app(only_lineascan, upstream.clone(), None), Method::GET, "/global", "").await;
    assert_eq!(json_of(&body)["message"], "Tally API key not set");

    let (status, _, body) = send(app(all_secrets(), upstream.clone(), None), Method::GET, "/global", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&body)["message"], "Missing address parameter");

    let (status, _, _) = send(app(all_secrets(), upstream.clone(), None), Method::GET, "/global?address=", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn global_aggregates_with_explorer() {
    let upstream = Arc::new(
        NullUpstream::new()
            .with_activations(vec![activation("live", 2, true)])
            .with_poh(true)
            .with_score(1234)
            .with_balance(LXP_CONTRACT_ADDRESS, "5000000000000000000")
            .with_ens("vitalik.linea.eth")
            .with_proposals(vec![
                Proposal {
                    id: "7".into(),
                    status: ProposalStatus::Active,
                    metadata: ProposalMetadata {
                        title: "Upgrade".into(),
                        description: String::new(),
                    },
                    start: None,
                    end: None,
                },
                Proposal {
                    id: "8".into(),
                    status: ProposalStatus::Executed,
                    metadata: ProposalMetadata::default(),
                    start: None,
                    end: None,
                },
            ]),
    );
    let uri = format!("/global?address={ACCOUNT}&isLineascan=true");
    let (status, _, body) = send(app(all_secrets(), upstream.clone(), None), Method::GET, &uri, "").await;

    assert_eq!(status, StatusCode::OK);
    let data = json_of(&body);
    assert_eq!(data["pohStatus"], true);
    assert_eq!(data["openBlockScore"], 1234);
    assert_eq!(data["lxpBalance"], "5000000000000000000");
    assert_eq!(data["lxpLBalance"], "0");
    assert_eq!(data["name"], "vitalik.linea.eth");
    assert_eq!(data["activations"].as_array().unwrap().len(), 1);
    assert_eq!(data["proposals"].as_array().unwrap().len(), 1);
    assert_eq!(upstream.call_count(EXPLORER), 2);
}

#[tokio::test]
async fn global_without_flag_skips_explorer_and_names() {
    let upstream = Arc::new(NullUpstream::new().with_ens("ignored.linea.eth"));
    let uri = format!("/global?address={ACCOUNT}&isLineascan=false");
    let (status, _, body) = send(app(all_secrets(), upstream.clone(), None), Method::GET, &uri, "").await;

    assert_eq!(status, StatusCode::OK);
    let data = json_of(&body);
    assert_eq!(data["lxpBalance"], "0");
    assert!(data.get("name").is_none());
    assert_eq!(upstream.call_count(EXPLORER), 0);
    assert_eq!(upstream.call_count(ENS), 0);
}

#[tokio::test]
async fn global_degrades_a_failing_lookup() {
    let upstream = Arc::new(NullUpstream::new().with_score(99).fail(POH));
    let uri = format!("/global?address={ACCOUNT}&isLineascan=1");
    let (status, _, body) = send(app(all_secrets(), upstream, None), Method::GET, &uri, "").await;

    assert_eq!(status, StatusCode::OK);
    let data = json_of(&body);
    assert_eq!(data["pohStatus"], false);
    assert_eq!(data["openBlockScore"], 99);
}

fn signed_request(seed: u8, claimed: Option<&str>) -> SignedRegistration {
    let key = keypair_from_seed(&[seed; 32]).unwrap();
    let signer = address_of(key.verifying_key()).to_checksum(None);
    let payload = RegistrationPayload {
        address: claimed.map(str::to_string).unwrap_or(signer),
        signed_on: "2024-06-01T00:00:00.000Z".into(),
        subject: "linea-voyager".into(),
    };
    let signature = sign_personal_message(payload.message().unwrap().as_bytes(), &key).unwrap();
    SignedRegistration {
        signature: Some(signature),
        payload,
    }
}

#[tokio::test]
async fn registration_appends_a_row() {
    let ledger = Arc::new(NullLedger::new());
    let app = app(all_secrets(), Arc::new(NullUpstream::new()), Some(ledger.clone()));
    let request = signed_request(21, None);
    let body = serde_json::to_string(&request).unwrap();

    let (status, headers, response) = send(app, Method::POST, "/registration", &body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert!(json_of(&response)["message"].as_str().unwrap().contains("registered"));
    let rows = ledger.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].address, request.payload.address);
    assert_eq!(rows[0].signed_on, "2024-06-01T00:00:00.000Z");
}

#[tokio::test]
async fn registration_accepts_millisecond_signed_on() {
    let ledger = Arc::new(NullLedger::new());
    let app = app(all_secrets(), Arc::new(NullUpstream::new()), Some(ledger.clone()));
    let key = keypair_from_seed(&[22; 32]).unwrap();
    let signer = address_of(key.verifying_key()).to_checksum(None);
    let message = format!(
        r#"{{"address":"{signer}","signedOn":1721033912000,"subject":"linea-voyager"}}"#
    );
    let signature = sign_personal_message(message.as_bytes(), &key).unwrap();
    let body = format!(r#"{{"signature":"{signature}","payload":{message}}}"#);

    let (status, _, response) = send(app, Method::POST, "/registration", &body).await;

    assert_eq!(status, StatusCode::CREATED, "{response}");
    let rows = ledger.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].signed_on, "1721033912000");
}

#[tokio::test]
async fn registration_with_foreign_signature_is_400_without_write() {
    let ledger = Arc::new(NullLedger::new());
    let app = app(all_secrets(), Arc::new(NullUpstream::new()), Some(ledger.clone()));
    let request = signed_request(21, Some(ACCOUNT));
    let body = serde_json::to_string(&request).unwrap();

    let (status, _, response) = send(app, Method::POST, "/registration", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&response)["message"], "Invalid signature");
    assert!(ledger.rows().is_empty());
}

#[tokio::test]
async fn registration_rejects_bad_bodies() {
    let ledger = Arc::new(NullLedger::new());

    let (status, _, _) = send(app_with_ledger(), Method::POST, "/registration", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut request = signed_request(4, None);
    request.signature = None;
    let body = serde_json::to_string(&request).unwrap();
    let app = app(all_secrets(), Arc::new(NullUpstream::new()), Some(ledger.clone()));
    let (status, _, response) = send(app, Method::POST, "/registration", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&response)["message"], "Missing signature");
    assert!(ledger.rows().is_empty());
}

#[tokio::test]
async fn registration_ledger_fault_is_500() {
    let ledger = Arc::new(NullLedger::failing());
    let app = app(all_secrets(), Arc::new(NullUpstream::new()), Some(ledger));
    let body = serde_json::to_string(&signed_request(5, None)).unwrap();

    let (status, _, response) = send(app, Method::POST, "/registration", &body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json_of(&response)["message"].as_str().unwrap().contains("ledger offline"));
}

#[tokio::test]
async fn registration_without_ledger_is_500() {
    let app = app(all_secrets(), Arc::new(NullUpstream::new()), None);
    let body = serde_json::to_string(&signed_request(6, None)).unwrap();
    let (status, _, response) = send(app, Method::POST, "/registration", &body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_of(&response)["message"], "Spreadsheet credentials not set");
}

#[tokio::test]
async fn health_and_metrics() {
    let app = app_with_ledger();
    let (status, _, body) = send(app.clone(), Method::GET, "/health", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body), json!({ "status": "ok" }));

    let _ = send(app.clone(), Method::GET, "/activations", "").await;
    let (status, _, text) = send(app, Method::GET, "/metrics", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains(r#"voyager_requests_total{function="activations",status="2xx"} 1"#));
}

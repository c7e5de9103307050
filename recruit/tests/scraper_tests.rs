//! Integration tests for the Apify client against an in-process stub

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use recruit::scraper::{ApifyClient, ApifyConfig, LeadSource, ScraperError};
use recruit::{CandidateQuery, LeadFilter};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Recorded {
    actor: Arc<Mutex<Option<String>>>,
    auth: Arc<Mutex<Option<String>>>,
    body: Arc<Mutex<Option<Value>>>,
}

struct Stub {
    addr: SocketAddr,
    recorded: Recorded,
}

/// Start a stub Apify API answering every run with `status` and `reply`
async fn start_stub(status: StatusCode, reply: &'static str) -> Stub {
    let recorded = Recorded::default();

    let handler = move |State(rec): State<Recorded>,
                        Path(actor): Path<String>,
                        headers: HeaderMap,
                        Json(body): Json<Value>| async move {
        *rec.actor.lock().unwrap() = Some(actor);
        *rec.auth.lock().unwrap() = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        *rec.body.lock().unwrap() = Some(body);
        let response: Response = (status, reply).into_response();
        response
    };

    let app = Router::new()
        .route("/v2/acts/:actor/run-sync-get-dataset-items", post(handler))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Stub { addr, recorded }
}

fn client_for(stub: &Stub) -> ApifyClient {
    ApifyClient::new(ApifyConfig {
        token: Some("test-token".to_string()),
        actor_id: "acme~leads".to_string(),
        base_url: format!("http://{}", stub.addr),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_scrape_sends_filter_and_parses_leads() {
    let stub = start_stub(
        StatusCode::OK,
        r#"[
            {"fullName": "Rosa Diaz", "position": "VP Sales", "seniority": "VP",
             "email": "rosa@example.com", "city": "Miami", "state": "FL",
             "functional": "Sales", "orgIndustry": "Software", "linkedinUrl": "x"},
            {"fullName": "Sam Park", "phone": 5550199}
        ]"#,
    )
    .await;
    let client = client_for(&stub);

    let query = CandidateQuery::from_arguments(&json!({
        "seniority": ["VP"],
        "hasEmail": true,
        "totalResults": 10
    }))
    .unwrap();

    let leads = client.scrape_leads(&query.filter).await.unwrap();
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0].full_name.as_deref(), Some("Rosa Diaz"));
    assert_eq!(leads[0].org_industry.as_deref(), Some("Software"));
    assert_eq!(leads[1].phone.as_deref(), Some("5550199"));
    assert_eq!(leads[1].email, None);

    let recorded = &stub.recorded;
    assert_eq!(recorded.actor.lock().unwrap().as_deref(), Some("acme~leads"));
    assert_eq!(
        recorded.auth.lock().unwrap().as_deref(),
        Some("Bearer test-token")
    );
    assert_eq!(
        recorded.body.lock().unwrap().clone().unwrap(),
        json!({"seniority": ["VP"], "hasEmail": true, "totalResults": 10})
    );
}

#[tokio::test]
async fn test_empty_filter_sends_empty_object() {
    let stub = start_stub(StatusCode::OK, "[]").await;
    let client = client_for(&stub);

    let leads = client.scrape_leads(&LeadFilter::default()).await.unwrap();
    assert!(leads.is_empty());
    assert_eq!(stub.recorded.body.lock().unwrap().clone().unwrap(), json!({}));
}

#[tokio::test]
async fn test_http_error_status() {
    let stub = start_stub(StatusCode::PAYMENT_REQUIRED, "monthly usage exceeded").await;
    let client = client_for(&stub);

    let err = client.scrape_leads(&LeadFilter::default()).await.unwrap_err();
    assert_eq!(
        err,
        ScraperError::Status {
            status: 402,
            body: "monthly usage exceeded".to_string()
        }
    );
}

#[tokio::test]
async fn test_non_list_body_is_decode_error() {
    let stub = start_stub(StatusCode::OK, r#"{"error": "not a list"}"#).await;
    let client = client_for(&stub);

    let err = client.scrape_leads(&LeadFilter::default()).await.unwrap_err();
    assert!(matches!(err, ScraperError::Decode(_)));
}

#[tokio::test]
async fn test_non_object_item_is_decode_error() {
    let stub = start_stub(StatusCode::OK, r#"[{"fullName": "Ok"}, "oops"]"#).await;
    let client = client_for(&stub);

    let err = client.scrape_leads(&LeadFilter::default()).await.unwrap_err();
    assert!(matches!(err, ScraperError::Decode(_)));
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApifyClient::new(ApifyConfig {
        token: Some("test-token".to_string()),
        base_url: format!("http://{}", addr),
        timeout_secs: 5,
        ..Default::default()
    })
    .unwrap();

    let err = client.scrape_leads(&LeadFilter::default()).await.unwrap_err();
    assert!(matches!(err, ScraperError::Request(_)));
}

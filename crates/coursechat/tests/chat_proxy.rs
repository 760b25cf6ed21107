//! End-to-end tests for the HTTP surface, with both upstreams mocked.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coursechat::catalog::Catalog;
use coursechat::gateway::{GatewayClient, GatewayConfig};
use coursechat::server::create_router;
use coursechat::soc::{SocClient, SocConfig};
use coursechat::types::AppState;

const SSE_BODY: &str = "data: {\"choices\":[{\"delta\":{\"content\":\"CS 111 is\"}}]}\n\n\
                        data: [DONE]\n\n";

fn app(soc_url: &str, gateway_url: &str, api_key: Option<&str>) -> axum::Router {
    let state = AppState {
        catalog: Catalog::embedded(),
        soc: SocClient::new(
            reqwest::Client::new(),
            SocConfig {
                base_url: soc_url.to_string(),
            },
        ),
        gateway: GatewayClient::new(
            reqwest::Client::new(),
            GatewayConfig {
                base_url: gateway_url.to_string(),
                model: "test-model".to_string(),
                api_key: api_key.map(str::to_string),
            },
        ),
    };
    create_router(Arc::new(state))
}

fn chat_request(campus: &str, content: &str) -> Request<Body> {
    let body = json!({
        "messages": [{ "role": "user", "content": content }],
        "campus": campus,
    });
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn chat_relays_stream_with_live_course_data() {
    let soc = MockServer::start().await;
    let gateway = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses.json"))
        .and(query_param("campus", "NK"))
        .and(query_param("subject", "CS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "title": "INTRO COMPUTER SCI",
            "courseNumber": "111",
            "subject": "198",
            "creditsText": "4",
            "sections": [{
                "number": "01",
                "instructorsText": "SMITH",
                "meetingTimes": [{
                    "meetingDay": "M",
                    "startTime": "10:20",
                    "endTime": "11:40",
                    "campusName": "BUSCH"
                }],
                "openStatus": true
            }]
        }])))
        .mount(&soc)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("LIVE COURSE DATA FROM RUTGERS SOC"))
        .and(body_string_contains("COURSE: 198:111 - INTRO COMPUTER SCI"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(SSE_BODY.as_bytes().to_vec(), "text/event-stream"),
        )
        .mount(&gateway)
        .await;

    let response = app(&soc.uri(), &gateway.uri(), Some("test-key"))
        .oneshot(chat_request("Newark", "CS 111"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/event-stream"
    );

    // Upstream bytes are relayed verbatim.
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], SSE_BODY.as_bytes());
}

#[tokio::test]
async fn chat_degrades_gracefully_when_catalog_fails() {
    let soc = MockServer::start().await;
    let gateway = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&soc)
        .await;

    // The prompt must carry the explicit no-live-data notice.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("NO LIVE DATA AVAILABLE"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(SSE_BODY.as_bytes().to_vec(), "text/event-stream"),
        )
        .mount(&gateway)
        .await;

    let response = app(&soc.uri(), &gateway.uri(), Some("test-key"))
        .oneshot(chat_request("all", "CS 111"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn chat_treats_non_array_catalog_payload_as_empty() {
    let soc = MockServer::start().await;
    let gateway = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "courses": [] })))
        .mount(&soc)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("NO LIVE DATA AVAILABLE"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(SSE_BODY.as_bytes().to_vec(), "text/event-stream"),
        )
        .mount(&gateway)
        .await;

    let response = app(&soc.uri(), &gateway.uri(), Some("test-key"))
        .oneshot(chat_request("all", "CS 111"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn chat_passes_through_rate_limit() {
    let soc = MockServer::start().await;
    let gateway = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&soc)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&gateway)
        .await;

    let response = app(&soc.uri(), &gateway.uri(), Some("test-key"))
        .oneshot(chat_request("all", "CS 111"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Rate limit exceeded. Please try again in a moment." })
    );
}

#[tokio::test]
async fn chat_passes_through_quota_exhaustion() {
    let soc = MockServer::start().await;
    let gateway = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&soc)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(402))
        .mount(&gateway)
        .await;

    let response = app(&soc.uri(), &gateway.uri(), Some("test-key"))
        .oneshot(chat_request("all", "CS 111"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Service temporarily unavailable. Please try again later." })
    );
}

#[tokio::test]
async fn chat_surfaces_other_upstream_failures_as_500() {
    let soc = MockServer::start().await;
    let gateway = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/courses.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&soc)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&gateway)
        .await;

    let response = app(&soc.uri(), &gateway.uri(), Some("test-key"))
        .oneshot(chat_request("all", "CS 111"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Failed to generate response" })
    );
}

#[tokio::test]
async fn chat_requires_configured_credential() {
    // No upstream calls are made; unreachable URLs prove it.
    let response = app("http://127.0.0.1:9", "http://127.0.0.1:9", None)
        .oneshot(chat_request("all", "CS 111"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "AI_GATEWAY_API_KEY is not configured" })
    );
}

#[tokio::test]
async fn respond_endpoint_answers_from_static_table() {
    let request = Request::builder()
        .method("POST")
        .uri("/respond")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "message": "What is CS 111?", "campus": "all" }).to_string(),
        ))
        .unwrap();

    let response = app("http://127.0.0.1:9", "http://127.0.0.1:9", None)
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let reply = body["reply"].as_str().unwrap();
    assert!(reply.contains("CS 111"));
    assert!(reply.contains("Introduction to Computer Science"));
    assert!(reply.contains("Credits: 4"));
}

#[tokio::test]
async fn courses_endpoints_serve_the_catalog() {
    let router = app("http://127.0.0.1:9", "http://127.0.0.1:9", None);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/courses?campus=Newark")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listing = body_json(response).await;
    let codes: Vec<&str> = listing
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["code"].as_str().unwrap())
        .collect();
    assert!(codes.contains(&"CS 111"));
    assert!(!codes.contains(&"CS 214"));

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/courses/CS%20111")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["title"],
        "Introduction to Computer Science"
    );

    let response = router
        .oneshot(
            Request::builder()
                .uri("/courses/CS%20999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("CS 999"));
}

#[tokio::test]
async fn health_and_suggestions() {
    let router = app("http://127.0.0.1:9", "http://127.0.0.1:9", None);

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/suggestions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let suggestions = body_json(response).await;
    assert_eq!(suggestions.as_array().unwrap().len(), 4);
    assert_eq!(suggestions[0], "What is CS 111?");
}

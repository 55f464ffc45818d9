//! Progress delivery over real HTTP against a wiremock collector.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{visible, DOCUMENT_ID, SECTION_ID};
use readmark::adapters::{HttpProgressTransport, ReqwestHttpClient};
use readmark::domain::ReportPayload;
use readmark::error::DeliveryError;
use readmark::startup::TrackerConfig;
use readmark::tracker::{create_delivery_channel, DeliveryEvent, TrackingSession};
use readmark::traits::ProgressTransport;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> HttpProgressTransport<ReqwestHttpClient> {
    let client = ReqwestHttpClient::with_timeout(Duration::from_secs(5)).unwrap();
    HttpProgressTransport::new(client, server.uri())
}

#[tokio::test]
async fn test_post_progress_wire_contract() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/progress"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({
            "manga_id": 7,
            "chapter_id": 42,
            "page_number": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let delivery = transport
        .send("/progress", &ReportPayload::new(7, 42, 3))
        .await
        .unwrap();

    assert_eq!(delivery.status, 200);
}

#[tokio::test]
async fn test_error_status_is_delivery_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/progress"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let result = transport_for(&server)
        .send("/progress", &ReportPayload::new(7, 42, 3))
        .await;

    assert_eq!(result, Err(DeliveryError::HttpStatus { status: 400 }));
}

#[tokio::test]
async fn test_session_posts_each_distinct_page_once() {
    let server = MockServer::start().await;
    for page in [1, 2] {
        Mock::given(method("POST"))
            .and(path("/progress"))
            .and(body_json(serde_json::json!({
                "manga_id": DOCUMENT_ID,
                "chapter_id": SECTION_ID,
                "page_number": page
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }

    let mut session = TrackingSession::start(
        &common::reader_document(&["1", "2", "3"]),
        &TrackerConfig::default(),
        Arc::new(transport_for(&server)),
    )
    .unwrap();

    session.on_visibility_batch(&[visible(1, 1.0)]);
    session.on_visibility_batch(&[visible(1, 0.9)]);
    session.on_visibility_batch(&[visible(2, 0.6)]);
    session.on_visibility_batch(&[visible(2, 1.0)]);
    session.reporter().wait_idle().await;

    // Expectations are verified when the server drops.
    assert_eq!(session.reporter().dispatched(), 2);
}

#[tokio::test]
async fn test_server_error_is_reported_as_event() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/progress"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let transport = Arc::new(transport_for(&server));
    let (tx, mut events) = create_delivery_channel(4);
    let mut session = TrackingSession::start(
        &common::reader_document(&["1"]),
        &TrackerConfig::default(),
        transport,
    )
    .unwrap()
    .with_events(tx);

    session.on_visibility_batch(&[visible(1, 1.0)]);
    let event = events.recv().await.unwrap();

    assert_eq!(
        event,
        DeliveryEvent::Failed {
            page_number: 1,
            error: DeliveryError::HttpStatus { status: 503 }
        }
    );
    assert_eq!(session.reporter().last_sent_page(), Some(1));
}

#[tokio::test]
async fn test_unreachable_collector_does_not_surface() {
    let client = ReqwestHttpClient::with_timeout(Duration::from_secs(2)).unwrap();
    // Port unlikely to be in use
    let transport = HttpProgressTransport::new(client, "http://127.0.0.1:59998");
    let (tx, mut events) = create_delivery_channel(4);

    let document = common::reader_document(&["1", "2"]);
    let mut session =
        TrackingSession::start(&document, &TrackerConfig::default(), Arc::new(transport))
            .unwrap()
            .with_events(tx);

    session.on_visibility_batch(&[visible(1, 1.0)]);
    assert!(!events.recv().await.unwrap().is_delivered());

    session.on_visibility_batch(&[visible(2, 1.0)]);
    assert_eq!(events.recv().await.unwrap().page_number(), 2);
    assert_eq!(session.reporter().last_sent_page(), Some(2));
}


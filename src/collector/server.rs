//! Collector HTTP server.
//!
//! Routes:
//! - `POST /progress` - record a report (`{"manga_id", "chapter_id", "page_number"}`)
//! - `GET /progress/:manga_id/:chapter_id` - last recorded page for that chapter

use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};

use super::store::ProgressStore;
use crate::error::ReadmarkResult;
use crate::startup::CollectorConfig;

/// Shared state for the collector handlers.
#[derive(Debug, Clone)]
pub struct CollectorState {
    pub store: ProgressStore,
    /// Reader all incoming progress is attributed to
    pub reader_id: u64,
}

/// Validated body of a progress report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressReport {
    pub document_id: u64,
    pub section_id: u64,
    pub page_number: u32,
}

/// Response body for a progress lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressView {
    pub manga_id: u64,
    pub chapter_id: u64,
    pub last_page_number: u32,
}

/// Build the collector router.
pub fn router(state: CollectorState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/progress", post(save_progress_handler))
        .route("/progress/:manga_id/:chapter_id", get(get_progress_handler))
        .layer(cors)
        .with_state(state)
}

/// Start the collector on the configured address.
///
/// Returns the server task and the address actually bound (useful with
/// port 0).
pub async fn start_collector(
    config: &CollectorConfig,
    store: ProgressStore,
) -> ReadmarkResult<(JoinHandle<()>, SocketAddr)> {
    let app = router(CollectorState {
        store,
        reader_id: config.reader_id,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    let actual_addr = listener.local_addr()?;

    tracing::info!("Progress collector listening on http://{}", actual_addr);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Progress collector error: {}", e);
        }
    });

    Ok((handle, actual_addr))
}

/// Parse and validate a report body.
///
/// Each field may be a JSON integer or a numeric string; missing, zero, or
/// non-numeric values are rejected.
pub fn parse_report(body: &[u8]) -> Result<ProgressReport, String> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| format!("invalid JSON body: {}", e))?;

    let document_id = positive_field(&value, "manga_id")?;
    let section_id = positive_field(&value, "chapter_id")?;
    let page_number = positive_field(&value, "page_number")?;
    let page_number =
        u32::try_from(page_number).map_err(|_| "page_number out of range".to_string())?;

    Ok(ProgressReport {
        document_id,
        section_id,
        page_number,
    })
}

fn positive_field(value: &Value, name: &str) -> Result<u64, String> {
    let parsed = match value.get(name) {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("missing or invalid {}", name))
}

async fn save_progress_handler(State(state): State<CollectorState>, body: Bytes) -> Response {
    let report = match parse_report(&body) {
        Ok(report) => report,
        Err(message) => {
            tracing::debug!("Rejected progress report: {}", message);
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": message })),
            )
                .into_response();
        }
    };

    state
        .store
        .save_progress(
            state.reader_id,
            report.document_id,
            report.section_id,
            report.page_number,
        )
        .await;
    tracing::debug!(
        "Recorded page {} for document {} section {}",
        report.page_number,
        report.document_id,
        report.section_id
    );

    Json(serde_json::json!({ "status": "ok" })).into_response()
}

async fn get_progress_handler(
    State(state): State<CollectorState>,
    Path((manga_id, chapter_id)): Path<(u64, u64)>,
) -> Response {
    match state
        .store
        .get_progress(state.reader_id, manga_id, chapter_id)
        .await
    {
        Some(record) => Json(ProgressView {
            manga_id: record.document_id,
            chapter_id: record.section_id,
            last_page_number: record.last_page_number,
        })
        .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_integers() {
        let report = parse_report(br#"{"manga_id": 3, "chapter_id": 40, "page_number": 7}"#).unwrap();
        assert_eq!(
            report,
            ProgressReport {
                document_id: 3,
                section_id: 40,
                page_number: 7
            }
        );
    }

    #[test]
    fn test_parse_report_numeric_strings() {
        let report =
            parse_report(br#"{"manga_id": "3", "chapter_id": " 40 ", "page_number": "7"}"#).unwrap();
        assert_eq!(report.section_id, 40);
    }

    #[test]
    fn test_parse_report_rejects_missing_field() {
        let err = parse_report(br#"{"manga_id": 3, "chapter_id": 40}"#).unwrap_err();
        assert!(err.contains("page_number"));
    }

    #[test]
    fn test_parse_report_rejects_zero_and_garbage() {
        assert!(parse_report(br#"{"manga_id": 0, "chapter_id": 1, "page_number": 1}"#).is_err());
        assert!(parse_report(br#"{"manga_id": 1, "chapter_id": "x", "page_number": 1}"#).is_err());
        assert!(parse_report(br#"{"manga_id": 1, "chapter_id": 1, "page_number": -2}"#).is_err());
        assert!(parse_report(br#"{"manga_id": 1, "chapter_id": 1, "page_number": 1.5}"#).is_err());
        assert!(parse_report(b"not json").is_err());
    }

    #[test]
    fn test_parse_report_rejects_page_overflow() {
        let err =
            parse_report(br#"{"manga_id": 1, "chapter_id": 1, "page_number": 5000000000}"#).unwrap_err();
        assert_eq!(err, "page_number out of range");
    }
}

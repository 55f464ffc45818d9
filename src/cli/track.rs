//! `readmark track`: run a tracking session fed from a JSON-lines stream.
//!
//! Each input line is one observation batch: a JSON array of transitions.
//! Transitions that do not parse are dropped individually; the rest of the
//! line is still applied.

use std::path::Path;
use std::sync::Arc;

use color_eyre::Result;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;

use crate::adapters::{HttpProgressTransport, ReqwestHttpClient};
use crate::domain::{RawTransition, ReaderDocument, VisibilityBatch};
use crate::error::ResultExt;
use crate::startup::TrackerConfig;
use crate::tracker::{SessionSummary, TrackingSession};

/// Capacity of the batch channel between the reader and the session.
const BATCH_CHANNEL_CAPACITY: usize = 64;

/// Parse one input line into a batch.
///
/// Returns `None` when the line is not a JSON array at all.
pub fn parse_batch_line(line: &str) -> Option<VisibilityBatch> {
    let items: Vec<serde_json::Value> = serde_json::from_str(line).ok()?;
    let batch = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawTransition>(item) {
            Ok(transition) => Some(transition),
            Err(e) => {
                tracing::debug!("Skipping malformed transition: {}", e);
                None
            }
        })
        .collect();
    Some(batch)
}

/// Read batches from `input` and forward them to `tx` until EOF.
///
/// Lines that are not batches, including lines that are not valid UTF-8, are
/// skipped and counted. Returns that count.
pub async fn read_batches<R>(input: R, tx: mpsc::Sender<VisibilityBatch>) -> u64
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(input).lines();
    let mut malformed = 0;

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match parse_batch_line(line) {
                    Some(batch) => {
                        if tx.send(batch).await.is_err() {
                            break;
                        }
                    }
                    None => {
                        malformed += 1;
                        tracing::warn!("Skipping malformed batch line");
                    }
                }
            }
            Ok(None) => break,
            // The offending line has already been consumed.
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                malformed += 1;
                tracing::warn!("Skipping batch line that is not UTF-8: {}", e);
            }
            Err(e) => {
                tracing::warn!("Failed to read visibility batches: {}", e);
                break;
            }
        }
    }

    malformed
}

/// Run a session for `document_path`, reading batches from `input`.
///
/// Returns `None` if the document does not bootstrap a session.
pub async fn track<R>(
    document_path: &Path,
    config: &TrackerConfig,
    input: R,
) -> Result<Option<SessionSummary>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    config.validate()?;
    let document = ReaderDocument::from_path(document_path).context("loading reader document")?;

    let client = ReqwestHttpClient::with_timeout(config.request_timeout)?;
    let transport = Arc::new(HttpProgressTransport::new(
        client,
        config.endpoint_base.clone(),
    ));

    let mut session = match TrackingSession::start(&document, config, transport) {
        Ok(session) => session,
        Err(reason) => {
            tracing::debug!(
                code = reason.error_code(),
                "Tracking not started: {}",
                reason
            );
            return Ok(None);
        }
    };

    let (tx, rx) = mpsc::channel(BATCH_CHANNEL_CAPACITY);
    let reader = tokio::spawn(read_batches(input, tx));

    let summary = session.run(rx).await;
    let malformed = reader.await?;
    if malformed > 0 {
        tracing::warn!("{} input lines were not visibility batches", malformed);
    }

    session.reporter().wait_idle().await;
    Ok(Some(summary))
}

/// Entry point for `readmark track <document>` on stdin.
pub async fn handle_track_command(document_path: &Path, config: TrackerConfig) -> Result<()> {
    if let Some(summary) = track(document_path, &config, tokio::io::stdin()).await? {
        println!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}

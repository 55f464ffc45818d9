//! Progress collector: the remote sink the tracker reports to.
//!
//! Keeps the latest page per reader and document in memory and serves it
//! back for the reader view.

mod server;
mod store;

pub use server::{
    parse_report, router, start_collector, CollectorState, ProgressReport, ProgressView,
};
pub use store::{ProgressStore, ReadingProgress};

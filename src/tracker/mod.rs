//! Reading progress tracking.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │ Observation batches  │  (mpsc, single consumer)
//! └──────────┬───────────┘
//!            ▼
//! ┌──────────────────────┐
//! │ VisibilityAggregator │  page → visible, current = max visible
//! └──────────┬───────────┘
//!            ▼
//! ┌──────────────────────┐
//! │ ProgressReporter     │  dedup on last sent page
//! └──────────┬───────────┘
//!            ▼ (detached task)
//! ┌──────────────────────┐
//! │ ProgressTransport    │  POST /progress
//! └──────────────────────┘
//! ```

mod aggregator;
mod reporter;
mod session;

pub use aggregator::{ProgressSink, VisibilityAggregator};
pub use reporter::{
    create_delivery_channel, DeliveryEvent, DeliveryEventSender, ProgressReporter, PROGRESS_PATH,
};
pub use session::{SessionSummary, TrackingSession};

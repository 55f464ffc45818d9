//! Session startup: configuration and bootstrap from the reader document.

pub mod bootstrap;
pub mod config;

pub use bootstrap::{bootstrap_session, SessionContext};
pub use config::{CollectorConfig, TrackerConfig};

//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client returning a canned outcome
//! - [`MockTransport`] - Progress transport with failure injection and gating

pub mod http;
pub mod transport;

pub use http::{MockHttpClient, RecordedPost};
pub use transport::{MockTransport, SentReport};

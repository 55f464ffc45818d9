//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - JSON POST used by the HTTP transport
//! - [`ProgressTransport`] - Delivery of a single progress report

pub mod http;
pub mod transport;

pub use http::{HttpClient, HttpError, HttpResponse};
pub use transport::{Delivery, ProgressTransport};

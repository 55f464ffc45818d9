//! Concrete implementations of the traits in `crate::traits`.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`HttpProgressTransport`] - Progress transport posting JSON over any [`HttpClient`]
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Canned POST outcomes with a request log
//! - [`mock::MockTransport`] - Recording progress transport
//!
//! [`HttpClient`]: crate::traits::HttpClient

pub mod http_transport;
pub mod mock;
pub mod reqwest_http;

pub use http_transport::HttpProgressTransport;
pub use mock::{MockHttpClient, MockTransport};
pub use reqwest_http::ReqwestHttpClient;

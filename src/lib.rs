//! readmark - reading progress tracking.
//!
//! Derives the furthest visible page from a stream of page visibility
//! transitions and reports it to a progress collector once per distinct
//! value, without ever blocking on delivery.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod cli;
pub mod collector;
pub mod domain;
pub mod error;
pub mod startup;
pub mod tracker;
pub mod traits;

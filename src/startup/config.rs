//! Runtime configuration.
//!
//! Both configs follow the same pattern: sensible `Default`, `with_*`
//! builders, and `from_env` that falls back to defaults (with a warning) on
//! unparseable values.

use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::VISIBILITY_THRESHOLD;
use crate::error::{ReadmarkError, ReadmarkResult};
use crate::tracker::PROGRESS_PATH;

/// Collector base URL used by the tracker.
pub const ENDPOINT_ENV: &str = "READMARK_ENDPOINT";
/// Request timeout in seconds.
pub const TIMEOUT_ENV: &str = "READMARK_TIMEOUT_SECS";
/// Collector bind address.
pub const COLLECTOR_ADDR_ENV: &str = "READMARK_COLLECTOR_ADDR";

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_COLLECTOR_ADDR: &str = "127.0.0.1:5000";

/// Configuration for a tracking session.
///
/// # Example
///
/// ```ignore
/// use readmark::startup::TrackerConfig;
///
/// let config = TrackerConfig::default()
///     .with_endpoint_base("http://reader.local")
///     .with_request_timeout(Duration::from_secs(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Collector base URL, without the endpoint path
    pub endpoint_base: String,
    /// Endpoint path progress is posted to
    pub progress_path: String,
    /// Intersection ratio at which a page counts as visible
    pub visibility_threshold: f64,
    /// Per-request timeout for progress sends
    pub request_timeout: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            endpoint_base: DEFAULT_ENDPOINT.to_string(),
            progress_path: PROGRESS_PATH.to_string(),
            visibility_threshold: VISIBILITY_THRESHOLD,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TrackerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint_base(mut self, endpoint_base: impl Into<String>) -> Self {
        self.endpoint_base = endpoint_base.into();
        self
    }

    pub fn with_progress_path(mut self, path: impl Into<String>) -> Self {
        self.progress_path = path.into();
        self
    }

    pub fn with_visibility_threshold(mut self, threshold: f64) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read `READMARK_ENDPOINT` and `READMARK_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                config.endpoint_base = endpoint.trim().to_string();
            }
        }

        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(
                    "Ignoring invalid {}={:?}, using {}s",
                    TIMEOUT_ENV,
                    raw,
                    DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        config
    }

    /// Reject values a session cannot run with.
    pub fn validate(&self) -> ReadmarkResult<()> {
        if self.endpoint_base.trim().is_empty() {
            return Err(ReadmarkError::Config("endpoint base is empty".to_string()));
        }
        if !(0.0..=1.0).contains(&self.visibility_threshold) {
            return Err(ReadmarkError::Config(format!(
                "visibility threshold {} is outside [0, 1]",
                self.visibility_threshold
            )));
        }
        Ok(())
    }
}

/// Configuration for the progress collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Reader the collected progress is attributed to
    pub reader_id: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            reader_id: 1,
        }
    }
}

impl CollectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    /// Read `READMARK_COLLECTOR_ADDR`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(COLLECTOR_ADDR_ENV) {
            match raw.trim().parse::<SocketAddr>() {
                Ok(addr) => config.bind_addr = addr,
                Err(_) => tracing::warn!(
                    "Ignoring invalid {}={:?}, using {}",
                    COLLECTOR_ADDR_ENV,
                    raw,
                    DEFAULT_COLLECTOR_ADDR
                ),
            }
        }
        config
    }
}

// src/config.rs

use std::time::Duration;

/// Default root of the public export endpoint; the sheet ID is appended as a path segment.
pub const DEFAULT_EXPORT_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// Settings for the HTTP export source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    /// Endpoint root, without a trailing slash.
    pub export_base: String,
    pub user_agent: String,
    /// `None` leaves the transport's own default in place.
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            export_base: DEFAULT_EXPORT_BASE.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }
}

impl FetchConfig {
    pub fn with_export_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.export_base = base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// AWS region (default: "ap-southeast-1")
    pub region: String,
    /// Custom endpoint URL, e.g. a local DynamoDB (default: none)
    pub endpoint_url: Option<String>,
    /// Table holding the pieces (default: "Pieces")
    pub table_name: String,
    /// Deadline applied to each repository call in milliseconds (default: 5,000)
    pub request_timeout_ms: u64,
    /// Maximum items evaluated per scan page (default: none, DynamoDB's 1 MB limit)
    pub scan_page_size: Option<i32>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AWS_REGION` - AWS region (default: "ap-southeast-1")
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (default: none)
    /// - `PIECES_TABLE_NAME` - Table name (default: "Pieces")
    /// - `PIECES_TIMEOUT_MS` - Per-call deadline in milliseconds (default: 5,000)
    /// - `PIECES_SCAN_PAGE_SIZE` - Scan page limit (default: none)
    pub fn from_env() -> Self {
        Self {
            region: env::var("AWS_REGION").unwrap_or_else(|_| "ap-southeast-1".to_string()),
            endpoint_url: env::var("AWS_ENDPOINT_URL").ok().filter(|v| !v.is_empty()),
            table_name: env::var("PIECES_TABLE_NAME").unwrap_or_else(|_| "Pieces".to_string()),
            request_timeout_ms: env::var("PIECES_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5_000),
            scan_page_size: env::var("PIECES_SCAN_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

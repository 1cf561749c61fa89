//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default prediction endpoint, only edit this file.

/// Default prediction endpoint
///
/// This is the fallback URL when no environment variable or flag is set.
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:5000/predict";

/// Default transaction data file
pub const DEFAULT_DATA_PATH: &str = "Fraud.csv";

/// Rows per dispatch batch (also the concurrency cap)
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Rows rendered before the first Show Data
pub const DEFAULT_VISIBLE_COUNT: usize = 30;

/// Default show-more increment
pub const DEFAULT_SHOW_MORE: usize = 100;

/// HTTP request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Show-more debounce window (milliseconds)
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Artificial Show Data delay (milliseconds)
pub const DEFAULT_SHOW_DELAY_MS: u64 = 1000;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Fraud Dashboard";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get debounce window from environment or use default
pub fn get_debounce_ms() -> u64 {
    std::env::var("DASHBOARD_DEBOUNCE_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_DEBOUNCE_MS)
}

/// Get Show Data delay from environment or use default
pub fn get_show_delay_ms() -> u64 {
    std::env::var("DASHBOARD_SHOW_DELAY_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SHOW_DELAY_MS)
}

// =============================================================================
// PROMPT SERVICE
// =============================================================================

/// Base URL of the prompt service when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Per-request timeout applied by the HTTP client
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Content type sent on every request. The service switches its GET handlers
/// to JSON output when it sees this header.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Maximum response body length kept in error messages (bytes)
pub const ERROR_BODY_MAX_BYTES: usize = 200;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Overrides `base_url` from the config file
pub const ENV_BASE_URL: &str = "PCONSOLE_BASE_URL";

/// Overrides `timeout_secs` from the config file
pub const ENV_TIMEOUT_SECS: &str = "PCONSOLE_TIMEOUT_SECS";

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Directory for config, logs and crash reports
pub const STORE_DIR: &str = "./.prompt-console";

/// Config file name inside STORE_DIR
pub const CONFIG_FILE: &str = "config.yaml";

/// Log file name inside STORE_DIR
pub const LOG_FILE: &str = "console.log";

/// Crash reports subdirectory
pub const ERRORS_DIR: &str = "errors";

/// Default tracing filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "pconsole=info,pc_base=info";

// =============================================================================
// EVENT LOOP
// =============================================================================

/// Poll interval for terminal events in milliseconds
pub const EVENT_POLL_MS: u64 = 16;

/// Spinner frame interval while requests are in flight
pub const SPINNER_INTERVAL_MS: u64 = 100;

// =============================================================================
// SCROLLING
// =============================================================================

/// Lines scrolled by PageUp/PageDown in the response pane
pub const SCROLL_PAGE_AMOUNT: u16 = 10;

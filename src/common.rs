use std::time::Duration;

// Default URLs
pub static DEFAULT_BASE_URL: &str = "https://partner.api.bri.co.id";
pub static DEFAULT_SANDBOX_BASE_URL: &str = "https://sandbox.partner.api.bri.co.id";

// Header names
pub static AUTHORIZATION_HEADER: &str = "Authorization";
pub static BRI_TIMESTAMP_HEADER: &str = "BRI-Timestamp";
pub static BRI_SIGNATURE_HEADER: &str = "BRI-Signature";
pub static CONTENT_TYPE_HEADER: &str = "Content-Type";
pub static JSON_CONTENT_TYPE: &str = "application/json";

// Transport defaults
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3 * 60);
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_INTERVAL: Duration = Duration::from_millis(2);
pub const DEFAULT_MAX_JITTER_INTERVAL: Duration = Duration::from_millis(5);

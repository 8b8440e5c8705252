//! Static application configuration
//!
//! Compile-time constants; nothing here changes at runtime.

/// Base path of the serverless functions
pub const API_BASE_PATH: &str = "/.netlify/functions";

pub const GET_REPORT_PATH: &str = "/get-report";
pub const AI_SUMMARY_PATH: &str = "/get-ai-summary";
pub const EXPLANATION_PATH: &str = "/get-explanation";

/// Attempts per request, including the first one
pub const MAX_ATTEMPTS: u32 = 3;
/// Fixed pause between attempts
pub const RETRY_DELAY_MS: u32 = 300;
/// Ceiling for a single attempt; AI replies can be slow
pub const REQUEST_TIMEOUT_MS: u32 = 15_000;

pub const DEBOUNCE_DELAY_MS: u32 = 300;
pub const ERROR_DISPLAY_MS: u32 = 5_000;

/// Report shown when the page URL carries no `?vin=`
pub const DEFAULT_VEHICLE_ID: &str = "vin123";

//! Centralized tracing target constants for structured logging.
//!
//! Using consistent targets enables fine-grained control over log output
//! via tracing subscriber filters.

/// Service state construction and settings resolution at application start.
pub const TRACING_TARGET_SERVICE: &str = "nvisy_server::service";

/// Per-request extraction of the redis client.
pub const TRACING_TARGET_EXTRACT: &str = "nvisy_server::extract";

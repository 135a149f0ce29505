//! Structured exit codes so scripts can tell a partial run from a broken one.

/// Every requested query succeeded
pub const SUCCESS: i32 = 0;

/// General error (fallback for unknown errors)
pub const GENERAL_ERROR: i32 = 1;

/// CLI usage error (invalid arguments, unknown query ids)
pub const USAGE_ERROR: i32 = 2;

/// Configuration error (unreadable config file, invalid storage options)
pub const CONFIG_ERROR: i32 = 3;

/// Partial failure (the batch ran, at least one query failed)
pub const PARTIAL_FAILURE: i32 = 8;

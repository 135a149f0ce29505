//! # lakebench-error
//!
//! Unified error type for the lakebench TPC-H harness.
//!
//! Every error carries:
//! - a stable numeric code (LKB-XXXX) whose range names the failure category,
//! - optional structured context,
//! - an optional hint for fixing the input.
//!
//! The categories mirror the phases of a benchmark attempt: loading a table,
//! building a query pipeline, and materializing it.

mod code;
mod context;
mod convert;

pub use code::{ErrorCategory, ErrorCode};
pub use context::ErrorContext;
pub use convert::find_closest_match;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The unified error type for all lakebench operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchError {
    /// Numeric error code (e.g., "LKB-1001")
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Structured context for programmatic handling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    /// Suggestion for correcting the input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl BenchError {
    /// Create a new error with code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            hint: None,
        }
    }

    /// Add structured context
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Add a hint
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Prefix the message, keeping code, context and hint.
    pub fn wrap(mut self, prefix: impl fmt::Display) -> Self {
        self.message = format!("{}: {}", prefix, self.message);
        self
    }

    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    /// Shorthand for a table that could not be loaded.
    pub fn load(code: ErrorCode, table: &str, path: &str, message: impl Into<String>) -> Self {
        Self::new(code, message).with_context(ErrorContext::TableLoad {
            table: table.to_string(),
            path: path.to_string(),
        })
    }

    /// Serialize to JSON for machine-readable reports
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::warn!("Failed to serialize BenchError: {}", e);
            format!(
                r#"{{"code":"{}","message":"Serialization failed"}}"#,
                self.code
            )
        })
    }
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (Hint: {})", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for BenchError {}

/// Result type alias for lakebench operations
pub type Result<T> = std::result::Result<T, BenchError>;

//! # Error Contexts
//!
//! Structured metadata attached to errors so reports can be analysed without
//! parsing messages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorContext {
    /// Context for load errors (LKB-1xxx)
    TableLoad { table: String, path: String },

    /// Context for LKB-2002 (FieldNotFound)
    FieldNotFound {
        field: String,
        available_fields: Vec<String>,
    },

    /// Context for LKB-1003 (SchemaMismatch)
    SchemaMismatch {
        table: String,
        missing_columns: Vec<String>,
    },

    /// Context for LKB-3003 (Timeout)
    Timeout { query: u8, limit_secs: u64 },

    /// Context for configuration errors (LKB-4xxx)
    Config {
        file_path: Option<String>,
        field: Option<String>,
    },

    /// Generic key-value context for extensibility
    Generic {
        #[serde(flatten)]
        data: std::collections::HashMap<String, serde_json::Value>,
    },
}

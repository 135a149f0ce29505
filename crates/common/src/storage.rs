//! Storage options: the credential/config bag handed to the table loader.
//!
//! The options are opaque to the harness. They are read once from a JSON
//! object of strings and passed through unmodified; values are held as
//! secrets and never appear in `Debug` output or logs.

use lakebench_error::{BenchError, ErrorCode, ErrorContext, Result};
use secrecy::{ExposeSecret, SecretString};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

#[derive(Clone, Default)]
pub struct StorageOptions {
    values: BTreeMap<String, SecretString>,
}

impl StorageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .insert(key.into(), SecretString::from(value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Option keys, safe to log.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Key/value pairs with the secret exposed, for handing to the object store builder.
    pub fn exposed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.expose_secret()))
    }

    /// Parse a JSON object whose values are all strings.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
            BenchError::new(
                ErrorCode::InvalidStorageOptions,
                format!("Storage options are not valid JSON: {e}"),
            )
        })?;

        let object = value.as_object().ok_or_else(|| {
            BenchError::new(
                ErrorCode::InvalidStorageOptions,
                "Storage options must be a JSON object",
            )
        })?;

        let mut options = StorageOptions::new();
        for (key, value) in object {
            let value = value.as_str().ok_or_else(|| {
                BenchError::new(
                    ErrorCode::InvalidStorageOptions,
                    format!("Storage option '{key}' must be a string"),
                )
                .with_context(ErrorContext::Config {
                    file_path: None,
                    field: Some(key.clone()),
                })
            })?;
            options.insert(key.clone(), value);
        }
        Ok(options)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BenchError::new(
                ErrorCode::InvalidStorageOptions,
                format!("Failed to read storage options {}: {e}", path.display()),
            )
            .with_context(ErrorContext::Config {
                file_path: Some(path.display().to_string()),
                field: None,
            })
        })?;
        Self::from_json_str(&raw).map_err(|e| e.wrap(path.display()))
    }
}

impl fmt::Debug for StorageOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.values.keys().map(|k| (k, "[REDACTED]")))
            .finish()
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric error codes following LKB-XXXX format.
///
/// ## Code Ranges
/// - **1000-1999**: Load errors (table unreadable, missing, schema mismatch)
/// - **2000-2999**: Build errors (invalid pipeline construction)
/// - **3000-3999**: Evaluation errors (failures while materializing)
/// - **4000-4999**: Configuration errors
/// - **5000-5999**: Internal/System errors
///
/// Codes are stable across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
#[non_exhaustive]
pub enum ErrorCode {
    // === Load Errors (1000-1999) ===
    /// LKB-1001: Table directory missing or empty
    TableNotFound = 1001,
    /// LKB-1002: Table files could not be read
    TableUnreadable = 1002,
    /// LKB-1003: Stored schema differs from the TPC-H schema
    SchemaMismatch = 1003,
    /// LKB-1004: Object store could not be configured
    ObjectStore = 1004,
    /// LKB-1005: Name is not one of the eight logical tables
    UnknownTable = 1005,

    // === Build Errors (2000-2999) ===
    /// LKB-2001: Query id outside 1..=22
    UnknownQuery = 2001,
    /// LKB-2002: Field/column not found
    FieldNotFound = 2002,
    /// LKB-2003: Type mismatch in expression
    TypeMismatch = 2003,
    /// LKB-2004: Plan rejected by the engine
    InvalidPlan = 2004,

    // === Evaluation Errors (3000-3999) ===
    /// LKB-3001: Execution failed while materializing
    ExecutionFailed = 3001,
    /// LKB-3002: Memory or other resource limit reached
    ResourceExhausted = 3002,
    /// LKB-3003: Query exceeded its time limit
    Timeout = 3003,

    // === Configuration Errors (4000-4999) ===
    /// LKB-4001: Configuration could not be built or validated
    InvalidConfig = 4001,
    /// LKB-4002: Storage options file is not a JSON object of strings
    InvalidStorageOptions = 4002,

    // === Internal Errors (5000-5999) ===
    /// LKB-5001: Internal DataFusion error
    DataFusionInternal = 5001,
    /// LKB-5002: Filesystem or stream error
    Io = 5002,
    /// LKB-5003: Serialization/deserialization failed
    SerializationFailed = 5003,

    /// LKB-9999: Unknown/unclassified error
    Unknown = 9999,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Get the formatted code string (e.g., "LKB-2002")
    pub fn as_str(&self) -> String {
        format!("LKB-{:04}", self.as_u16())
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self.as_u16() {
            1000..=1999 => ErrorCategory::Load,
            2000..=2999 => ErrorCategory::Build,
            3000..=3999 => ErrorCategory::Evaluation,
            4000..=4999 => ErrorCategory::Config,
            _ => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> String {
        code.as_str()
    }
}

impl TryFrom<String> for ErrorCode {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        let num: u16 = s
            .strip_prefix("LKB-")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| "Invalid format".to_string())?;
        Self::try_from(num).map_err(|_| "Unknown code".to_string())
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(n: u16) -> std::result::Result<Self, Self::Error> {
        match n {
            1001 => Ok(Self::TableNotFound),
            1002 => Ok(Self::TableUnreadable),
            1003 => Ok(Self::SchemaMismatch),
            1004 => Ok(Self::ObjectStore),
            1005 => Ok(Self::UnknownTable),
            2001 => Ok(Self::UnknownQuery),
            2002 => Ok(Self::FieldNotFound),
            2003 => Ok(Self::TypeMismatch),
            2004 => Ok(Self::InvalidPlan),
            3001 => Ok(Self::ExecutionFailed),
            3002 => Ok(Self::ResourceExhausted),
            3003 => Ok(Self::Timeout),
            4001 => Ok(Self::InvalidConfig),
            4002 => Ok(Self::InvalidStorageOptions),
            5001 => Ok(Self::DataFusionInternal),
            5002 => Ok(Self::Io),
            5003 => Ok(Self::SerializationFailed),
            9999 => Ok(Self::Unknown),
            _ => Err(format!("Unknown error code: {}", n)),
        }
    }
}

/// High-level error category, one per benchmark phase plus config/internal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorCategory {
    Load,
    Build,
    Evaluation,
    Config,
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Load => "load",
            ErrorCategory::Build => "build",
            ErrorCategory::Evaluation => "evaluation",
            ErrorCategory::Config => "config",
            ErrorCategory::Internal => "internal",
        };
        f.write_str(name)
    }
}

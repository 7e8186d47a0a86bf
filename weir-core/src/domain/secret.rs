//! Secret string wrapper
//!
//! Connection strings and client secrets travel through the tool as
//! [`SecureString`]. Formatting never reveals the value; only the wire
//! representation inside a request body does.

use serde::{Deserialize, Serialize};
use std::fmt;

const REDACTED: &str = "[REDACTED]";

/// A secret value that is redacted from `Debug` and `Display` output
///
/// Serializes as the management API's typed secure string:
/// `{"type": "SecureString", "value": "..."}`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "SecureString")]
pub struct SecureString {
    value: String,
}

impl SecureString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Access the raw secret. Callers must not log the result.
    pub fn expose(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecureString").field(&REDACTED).finish()
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

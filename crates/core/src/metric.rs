//! Wire representation of an activity value.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ValidationErrorCode};

/// An activity value, used both as the record request body and as the
/// summary response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityMetric {
    #[serde(default)]
    pub value: i64,
}

impl ActivityMetric {
    pub fn new(value: i64) -> Self {
        Self { value }
    }

    /// Parse a request body. A missing `value` reads as 0; a present one must
    /// be an integer.
    pub fn parse(body: &[u8]) -> Result<Self> {
        if body.is_empty() {
            return Err(Error::validation_code(
                ValidationErrorCode::InvalidFormat,
                "Request body is required",
            ));
        }

        serde_json::from_slice(body).map_err(|e| {
            Error::validation_code(
                ValidationErrorCode::InvalidFormat,
                format!("Invalid activity payload: {}", e),
            )
        })
    }
}

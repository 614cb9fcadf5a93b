use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Shortest and longest decoded payloads across the supported symbologies
/// (EAN-8 up to Code128/GTIN-14 carriers). Anything outside is a misread or
/// an unsupported code and never reaches the lookup service.
pub const MIN_PAYLOAD_LEN: usize = 8;
pub const MAX_PAYLOAD_LEN: usize = 14;

/// A payload that passed the shape check. Lookup accepts only this type, so
/// the check cannot be skipped on any path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(as = String)]
pub struct ScanPayload(String);

impl ScanPayload {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        let len = value.chars().count();
        if len < MIN_PAYLOAD_LEN {
            return Err(ValidationError::TooShort { len });
        }
        if len > MAX_PAYLOAD_LEN {
            return Err(ValidationError::TooLong { len });
        }
        if !value.bytes().all(|byte| byte.is_ascii_graphic()) {
            return Err(ValidationError::NotAscii);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScanPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ScanPayload {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl<'de> Deserialize<'de> for ScanPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

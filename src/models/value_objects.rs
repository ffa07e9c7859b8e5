//! Self-validating wrappers around customer contact strings.

use crate::errors::ServiceError;
use serde::Serialize;
use std::fmt;

pub const PHONE_NUMBER_MAX_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(raw: &str) -> Result<Self, ServiceError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(ServiceError::validation(
                "phone_number",
                "Phone number is required",
            ));
        }
        if value.chars().count() > PHONE_NUMBER_MAX_LEN {
            return Err(ServiceError::validation(
                "phone_number",
                format!(
                    "Phone number must be at most {} characters",
                    PHONE_NUMBER_MAX_LEN
                ),
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(raw: &str) -> Result<Self, ServiceError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(ServiceError::validation("email", "Email is required"));
        }
        if !value.contains('@') {
            return Err(ServiceError::validation("email", "Email must contain '@'"));
        }
        Ok(Self(value.to_string()))
    }

    /// Absent or blank input means "no email".
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, ServiceError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Self::new(value).map(Some),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

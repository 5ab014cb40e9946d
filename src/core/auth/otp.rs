//! One-time passcodes

use super::AuthError;
use std::fmt;

/// A passcode that has the configured number of ASCII digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Parse user input, ignoring surrounding whitespace and inner spaces or dashes.
    ///
    /// # Errors
    /// Returns `InvalidOtp` unless exactly `length` digits remain.
    pub fn parse(input: &str, length: usize) -> Result<Self, AuthError> {
        let code: String = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if code.len() == length && code.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(code))
        } else {
            Err(AuthError::InvalidOtp)
        }
    }

    /// Digits as entered
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Logged-in session
//!
//! A [`Session`] is loaded once by the caller and passed to whatever needs the
//! identity. Nothing reads it implicitly.

use super::AuthError;
use crate::core::api::LoginResponse;
use crate::core::models::ClassSection;
use crate::warn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Student: owns a semester history and documents
    #[default]
    Student,
    /// Teacher: reviews leave requests
    Teacher,
    /// Administrator
    Admin,
}

impl Role {
    /// Whether this role may approve or deny leave requests
    #[must_use]
    pub const fn can_review_leave(self) -> bool {
        matches!(self, Self::Teacher | Self::Admin)
    }

    /// Whether this role may open class dashboards
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Teacher | Self::Admin)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" | "user" => Ok(Self::Student),
            "teacher" | "faculty" => Ok(Self::Teacher),
            "admin" | "administrator" => Ok(Self::Admin),
            _ => Err(format!("Unknown role: '{s}'")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => write!(f, "student"),
            Self::Teacher => write!(f, "teacher"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Identity of the logged-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token
    pub token: String,
    /// Registration number
    pub registration_id: String,
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Account role
    pub role: Role,
    /// Whether the email has been verified by passcode
    pub verified: bool,
    /// Class assigned to the account, for teachers and sectioned students
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<ClassSection>,
    /// When the login happened
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a login response.
    ///
    /// An unknown role name is treated as a student.
    #[must_use]
    pub fn from_login(response: &LoginResponse) -> Self {
        let role = if response.user.role.trim().is_empty() {
            Role::Student
        } else {
            response.user.role.parse().unwrap_or_else(|e| {
                warn!("{e}; treating account as a student");
                Role::Student
            })
        };
        Self {
            token: response.token.clone(),
            registration_id: response.user.registration_id.clone(),
            name: response.user.name.clone(),
            email: response.user.email.clone(),
            role,
            verified: response.user.verified,
            class: response.user.class(),
            logged_in_at: Utc::now(),
        }
    }

    /// Fail with [`AuthError::NotVerified`] unless the email is verified.
    ///
    /// # Errors
    /// Returns `NotVerified` for sessions that skipped passcode verification.
    pub fn require_verified(&self) -> Result<&Self, AuthError> {
        if self.verified {
            Ok(self)
        } else {
            Err(AuthError::NotVerified)
        }
    }

    /// Load a saved session. A missing file means nobody is logged in.
    ///
    /// # Errors
    /// Returns `Session` if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Option<Self>, AuthError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .map_err(|e| AuthError::Session(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| AuthError::Session(format!("cannot parse {}: {e}", path.display())))
    }

    /// Write the session to `path`, creating parent directories.
    ///
    /// # Errors
    /// Returns `Session` if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), AuthError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::Session(format!("cannot create {}: {e}", parent.display()))
            })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AuthError::Session(format!("cannot encode session: {e}")))?;
        fs::write(path, json)
            .map_err(|e| AuthError::Session(format!("cannot write {}: {e}", path.display())))
    }

    /// Remove a saved session. Returns `true` if a file was removed.
    ///
    /// # Errors
    /// Returns `Session` if the file exists but cannot be removed.
    pub fn clear(path: &Path) -> Result<bool, AuthError> {
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)
            .map(|()| true)
            .map_err(|e| AuthError::Session(format!("cannot remove {}: {e}", path.display())))
    }
}

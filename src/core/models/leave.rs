//! Leave request model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review state of a leave request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeaveStatus {
    /// Awaiting a teacher's decision
    #[default]
    Pending,
    /// Accepted by a teacher
    Approved,
    /// Rejected by a teacher
    Denied,
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Approved => write!(f, "Approved"),
            Self::Denied => write!(f, "Denied"),
        }
    }
}

impl FromStr for LeaveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" | "approve" => Ok(Self::Approved),
            "denied" | "deny" | "rejected" => Ok(Self::Denied),
            _ => Err(format!("Unknown leave status: '{s}'")),
        }
    }
}

/// A student's request for leave between two dates (inclusive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    /// Backend identifier, once stored
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Registration number of the requesting student
    #[serde(rename = "reg")]
    pub registration_id: String,

    /// Student name
    pub name: String,

    /// Contact email
    pub email: String,

    /// First day of leave
    pub from_date: NaiveDate,

    /// Last day of leave
    pub to_date: NaiveDate,

    /// Reason given by the student
    pub reason: String,

    /// Review state
    #[serde(default)]
    pub status: LeaveStatus,
}

impl LeaveRequest {
    /// Create a pending leave request.
    ///
    /// # Errors
    /// Returns an error if the date range is reversed, the reason is blank, or the email
    /// is not an address.
    pub fn new(
        registration_id: String,
        name: String,
        email: String,
        from_date: NaiveDate,
        to_date: NaiveDate,
        reason: String,
    ) -> Result<Self, String> {
        let request = Self {
            id: None,
            registration_id,
            name,
            email,
            from_date,
            to_date,
            reason: reason.trim().to_string(),
            status: LeaveStatus::Pending,
        };
        request.validate()?;
        Ok(request)
    }

    /// Validate fields of a request.
    ///
    /// # Errors
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.from_date > self.to_date {
            return Err(format!(
                "Leave starts ({}) after it ends ({})",
                self.from_date, self.to_date
            ));
        }
        if self.reason.trim().is_empty() {
            return Err("Leave reason must not be empty".to_string());
        }
        if !self.email.contains('@') {
            return Err(format!("Invalid email address: '{}'", self.email));
        }
        Ok(())
    }

    /// Number of calendar days covered, both ends included
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.to_date - self.from_date).num_days() + 1
    }

    /// Approve a pending request.
    ///
    /// # Errors
    /// Returns an error if the request was already decided.
    pub fn approve(&mut self) -> Result<(), String> {
        self.decide(LeaveStatus::Approved)
    }

    /// Deny a pending request.
    ///
    /// # Errors
    /// Returns an error if the request was already decided.
    pub fn deny(&mut self) -> Result<(), String> {
        self.decide(LeaveStatus::Denied)
    }

    fn decide(&mut self, status: LeaveStatus) -> Result<(), String> {
        if self.status != LeaveStatus::Pending {
            return Err(format!("Leave request is already {}", self.status));
        }
        self.status = status;
        Ok(())
    }
}

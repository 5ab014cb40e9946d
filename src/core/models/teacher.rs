//! Teacher accounts managed by administrators

use super::profile::ClassSection;
use super::registration::MIN_PASSWORD_LEN;
use super::semester::optional_number_or_text;
use serde::{Deserialize, Serialize};

/// A teacher as listed by the portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Backend record identifier
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Full name
    #[serde(default)]
    pub name: String,
    /// Account email
    #[serde(alias = "mail", default)]
    pub email: String,
    /// Date of birth as stored
    #[serde(default)]
    pub dob: String,
    /// Gender as entered
    #[serde(default)]
    pub gender: String,
    /// Year of the class the teacher is in charge of
    #[serde(default, deserialize_with = "optional_number_or_text")]
    pub year: Option<u8>,
    /// Section of the class the teacher is in charge of
    #[serde(default)]
    pub section: Option<String>,
}

impl Teacher {
    /// Class the teacher is in charge of, when fully recorded
    #[must_use]
    pub fn class(&self) -> Option<ClassSection> {
        match (self.year, self.section.as_deref()) {
            (Some(year), Some(section)) => ClassSection::new(year, section).ok(),
            _ => None,
        }
    }
}

/// Details an administrator enters to create a teacher account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeacherRegistration {
    /// Full name
    pub name: String,
    /// Account password
    pub password: String,
    /// Account email
    #[serde(rename = "mail")]
    pub email: String,
    /// Date of birth (YYYY-MM-DD)
    pub dob: String,
    /// Gender
    pub gender: String,
    /// Year of the assigned class
    pub year: u8,
    /// Section of the assigned class
    pub section: String,
}

impl TeacherRegistration {
    /// Validate the form before submitting it.
    ///
    /// # Errors
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name must not be empty".to_string());
        }
        if !self.email.contains('@') {
            return Err(format!("Invalid email address: '{}'", self.email));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            ));
        }
        self.class().map(|_| ())
    }

    /// The assigned class.
    ///
    /// # Errors
    /// Returns an error when year or section are out of range.
    pub fn class(&self) -> Result<ClassSection, String> {
        ClassSection::new(self.year, &self.section)
    }
}

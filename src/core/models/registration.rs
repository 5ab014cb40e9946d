//! Student registration form

use serde::Serialize;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Sign-up details sent to the authentication service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Institutional email address
    pub email: String,
    /// Registration number
    #[serde(rename = "Reg")]
    pub registration_id: String,
    /// Full name
    pub name: String,
    /// Date of birth as entered (YYYY-MM-DD)
    pub dob: String,
    /// Account password
    pub password: String,
    /// Semester the student is currently in
    #[serde(rename = "current_sem")]
    pub current_semester: u8,
    /// Gender as entered
    pub gender: String,
}

impl Registration {
    /// Validate the form before submitting it.
    ///
    /// `email_domain` restricts addresses to one institution when non-empty.
    ///
    /// # Errors
    /// Returns a description of the first invalid field.
    pub fn validate(&self, email_domain: &str, total_semesters: u8) -> Result<(), String> {
        if !self.email.contains('@') {
            return Err(format!("Invalid email address: '{}'", self.email));
        }
        if !email_domain.is_empty() {
            let suffix = format!("@{}", email_domain.trim_start_matches('@'));
            if !self.email.to_ascii_lowercase().ends_with(&suffix.to_ascii_lowercase()) {
                return Err(format!("Email must end with {suffix}"));
            }
        }
        if self.registration_id.trim().is_empty() {
            return Err("Registration number must not be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("Name must not be empty".to_string());
        }
        if self.current_semester == 0 || self.current_semester > total_semesters {
            return Err(format!(
                "Current semester must be between 1 and {total_semesters}"
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            ));
        }
        Ok(())
    }
}

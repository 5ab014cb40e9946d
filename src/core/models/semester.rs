//! Semester record model

use serde::{Deserialize, Deserializer, Serialize};

/// Default number of semesters in a programme.
pub const DEFAULT_TOTAL_SEMESTERS: u8 = 8;

/// A confirmed SGPA for one semester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterRecord {
    /// Backend record identifier, when the record has been stored
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Semester number (1-based)
    #[serde(deserialize_with = "number_or_text")]
    pub semester: u8,

    /// Semester grade point average
    #[serde(deserialize_with = "number_or_text")]
    pub sgpa: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

/// Backends written against form inputs send numbers as JSON strings ("3", "8.5").
pub(crate) fn number_or_text<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match NumberOrText::<T>::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Like [`number_or_text`], with `null` and blank strings read as `None`.
pub(crate) fn optional_number_or_text<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl SemesterRecord {
    /// Create a record that has not been stored yet
    #[must_use]
    pub const fn new(semester: u8, sgpa: f64) -> Self {
        Self {
            id: None,
            semester,
            sgpa,
        }
    }

    /// Attach a backend identifier
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Validate semester number and SGPA range.
    ///
    /// # Errors
    /// Returns an error if the semester is outside `[1, total_semesters]` or the SGPA is
    /// not a finite value in `[0, max_point]`.
    pub fn validate(&self, total_semesters: u8, max_point: f64) -> Result<(), String> {
        if self.semester == 0 || self.semester > total_semesters {
            return Err(format!(
                "Semester must be between 1 and {total_semesters}, got {}",
                self.semester
            ));
        }
        if !self.sgpa.is_finite() || self.sgpa < 0.0 || self.sgpa > max_point {
            return Err(format!(
                "SGPA must be between 0 and {max_point}, got {}",
                self.sgpa
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bounds() {
        assert!(SemesterRecord::new(1, 8.0).validate(8, 10.0).is_ok());
        assert!(SemesterRecord::new(8, 10.0).validate(8, 10.0).is_ok());
        assert!(SemesterRecord::new(0, 8.0).validate(8, 10.0).is_err());
        assert!(SemesterRecord::new(9, 8.0).validate(8, 10.0).is_err());
        assert!(SemesterRecord::new(2, 10.5).validate(8, 10.0).is_err());
        assert!(SemesterRecord::new(2, -0.1).validate(8, 10.0).is_err());
        assert!(SemesterRecord::new(2, f64::NAN).validate(8, 10.0).is_err());
    }

    #[test]
    fn test_id_roundtrips_as_underscore_id() {
        let record = SemesterRecord::new(3, 8.5).with_id("abc123");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["_id"], "abc123");

        let parsed: SemesterRecord =
            serde_json::from_str(r#"{"id":"x1","semester":2,"sgpa":9.1}"#).unwrap();
        assert_eq!(parsed.id.as_deref(), Some("x1"));
    }

    #[test]
    fn test_numbers_sent_as_strings() {
        let parsed: SemesterRecord =
            serde_json::from_str(r#"{"_id":"r1","semester":"4","sgpa":"8.25"}"#).unwrap();
        assert_eq!(parsed.semester, 4);
        assert!((parsed.sgpa - 8.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unsaved_record_omits_id() {
        let json = serde_json::to_value(SemesterRecord::new(1, 7.0)).unwrap();
        assert!(json.get("_id").is_none());
    }
}

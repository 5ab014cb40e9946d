//! Course record model

use crate::core::grades::GradeScale;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One course row entered for an SGPA computation.
///
/// The grade is kept as the raw label so that rows with an unknown grade can be
/// carried through and excluded during aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Credit hours (can be fractional)
    pub credits: f64,

    /// Letter grade label (e.g. "A+")
    pub grade: String,
}

/// Why a course row does not count toward an average
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidRow {
    /// Credits are NaN or infinite (e.g. non-numeric input)
    NonFiniteCredits,
    /// Credits are zero or negative
    NonPositiveCredits,
    /// Grade label is not part of the grade scale
    UnknownGrade(String),
}

impl fmt::Display for InvalidRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteCredits => write!(f, "credits are not a number"),
            Self::NonPositiveCredits => write!(f, "credits must be greater than zero"),
            Self::UnknownGrade(label) => write!(f, "unknown grade '{label}'"),
        }
    }
}

impl CourseRecord {
    /// Create a new course record
    ///
    /// # Arguments
    /// * `credits` - Credit hours
    /// * `grade` - Grade label
    #[must_use]
    pub fn new(credits: f64, grade: impl Into<String>) -> Self {
        Self {
            credits,
            grade: grade.into(),
        }
    }

    /// Build a record from raw text fields.
    ///
    /// Credits that do not parse as a number become `NaN`, so the row is excluded
    /// later instead of failing the whole computation.
    #[must_use]
    pub fn from_raw(credits: &str, grade: &str) -> Self {
        Self::new(
            credits.trim().parse::<f64>().unwrap_or(f64::NAN),
            grade.trim(),
        )
    }

    /// Parse a `CREDITS:GRADE` pair as given on the command line (e.g. `"3:O"`).
    ///
    /// # Errors
    /// Returns an error if the separator is missing.
    pub fn parse(pair: &str) -> Result<Self, String> {
        let (credits, grade) = pair
            .split_once(':')
            .ok_or_else(|| format!("Expected CREDITS:GRADE, got '{pair}'"))?;
        Ok(Self::from_raw(credits, grade))
    }

    /// Check the row against a grade scale.
    ///
    /// # Returns
    /// `(credits, grade_point)` for a row that counts.
    ///
    /// # Errors
    /// Returns the reason the row must be excluded.
    pub fn resolve(&self, scale: &GradeScale) -> Result<(f64, f64), InvalidRow> {
        if !self.credits.is_finite() {
            return Err(InvalidRow::NonFiniteCredits);
        }
        if self.credits <= 0.0 {
            return Err(InvalidRow::NonPositiveCredits);
        }
        let point = scale
            .point_of(&self.grade)
            .ok_or_else(|| InvalidRow::UnknownGrade(self.grade.clone()))?;
        Ok((self.credits, point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_creation() {
        let course = CourseRecord::new(4.0, "A+");
        assert!((course.credits - 4.0).abs() < f64::EPSILON);
        assert_eq!(course.grade, "A+");
    }

    #[test]
    fn test_parse_pair() {
        let course = CourseRecord::parse("3:O").unwrap();
        assert!((course.credits - 3.0).abs() < f64::EPSILON);
        assert_eq!(course.grade, "O");

        let fractional = CourseRecord::parse(" 1.5 : B+ ").unwrap();
        assert!((fractional.credits - 1.5).abs() < f64::EPSILON);
        assert_eq!(fractional.grade, "B+");
    }

    #[test]
    fn test_parse_requires_separator() {
        assert!(CourseRecord::parse("3O").is_err());
    }

    #[test]
    fn test_non_numeric_credits_become_nan() {
        let course = CourseRecord::parse("abc:A").unwrap();
        assert!(course.credits.is_nan());
        assert_eq!(
            course.resolve(&GradeScale::default()),
            Err(InvalidRow::NonFiniteCredits)
        );
    }

    #[test]
    fn test_resolve_rejects_invalid_rows() {
        let scale = GradeScale::default();
        assert_eq!(
            CourseRecord::new(0.0, "A").resolve(&scale),
            Err(InvalidRow::NonPositiveCredits)
        );
        assert_eq!(
            CourseRecord::new(-1.0, "A").resolve(&scale),
            Err(InvalidRow::NonPositiveCredits)
        );
        assert_eq!(
            CourseRecord::new(3.0, "D").resolve(&scale),
            Err(InvalidRow::UnknownGrade("D".to_string()))
        );
        assert_eq!(CourseRecord::new(3.0, "A").resolve(&scale), Ok((3.0, 8.0)));
    }
}

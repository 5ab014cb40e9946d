//! Grade scale: maps letter grades to grade points

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Highest grade point awarded by the default scale.
pub const DEFAULT_MAX_POINT: f64 = 10.0;

/// Letter grades accepted by the portal.
///
/// The set is closed: labels outside it never resolve to a point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GradePoint {
    /// Outstanding
    #[serde(rename = "O")]
    O,
    /// Excellent
    #[serde(rename = "A+")]
    APlus,
    /// Very good
    #[serde(rename = "A")]
    A,
    /// Good
    #[serde(rename = "B+")]
    BPlus,
    /// Above average
    #[serde(rename = "B")]
    B,
    /// Average
    #[serde(rename = "C")]
    C,
    /// Fail
    #[serde(rename = "F")]
    F,
}

impl GradePoint {
    /// Every grade, highest first.
    pub const ALL: [Self; 7] = [
        Self::O,
        Self::APlus,
        Self::A,
        Self::BPlus,
        Self::B,
        Self::C,
        Self::F,
    ];

    /// Display label (e.g. `"A+"`)
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::O => "O",
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::C => "C",
            Self::F => "F",
        }
    }

    /// Point value in the default scale.
    #[must_use]
    pub const fn default_point(self) -> f64 {
        match self {
            Self::O => 10.0,
            Self::APlus => 9.0,
            Self::A => 8.0,
            Self::BPlus => 7.0,
            Self::B => 6.0,
            Self::C => 5.0,
            Self::F => 0.0,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    /// Resolve a label, ignoring surrounding whitespace and ASCII case.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|grade| grade.label().eq_ignore_ascii_case(label))
    }
}

impl FromStr for GradePoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("Unknown grade: '{}'", s.trim()))
    }
}

impl fmt::Display for GradePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Point table for the closed grade set.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeScale {
    points: [f64; GradePoint::ALL.len()],
    max_point: f64,
}

impl GradeScale {
    /// Build a scale from the default table, replacing points for any labels in `overrides`.
    ///
    /// # Errors
    /// Returns an error if `max_point` is not positive, an override names a label outside
    /// the grade set, or a point value falls outside `[0, max_point]`.
    pub fn with_overrides(overrides: &BTreeMap<String, f64>, max_point: f64) -> Result<Self, String> {
        if !max_point.is_finite() || max_point <= 0.0 {
            return Err(format!("Invalid max point: {max_point}"));
        }

        let mut scale = Self {
            points: GradePoint::ALL.map(GradePoint::default_point),
            max_point,
        };

        for (label, point) in overrides {
            let grade = GradePoint::from_label(label)
                .ok_or_else(|| format!("Unknown grade in scale: '{label}'"))?;
            scale.points[grade.index()] = *point;
        }

        for grade in GradePoint::ALL {
            let point = scale.points[grade.index()];
            if !point.is_finite() || point < 0.0 || point > max_point {
                return Err(format!(
                    "Point for grade {grade} must be within [0, {max_point}], got {point}"
                ));
            }
        }

        Ok(scale)
    }

    /// Point value for a grade.
    #[must_use]
    pub const fn point(&self, grade: GradePoint) -> f64 {
        self.points[grade.index()]
    }

    /// Point value for a raw label, or `None` when the label is not a known grade.
    #[must_use]
    pub fn point_of(&self, label: &str) -> Option<f64> {
        GradePoint::from_label(label).map(|grade| self.point(grade))
    }

    /// Highest point any grade can earn.
    #[must_use]
    pub const fn max_point(&self) -> f64 {
        self.max_point
    }

    /// Iterate grades with their point values, highest grade first.
    pub fn entries(&self) -> impl Iterator<Item = (GradePoint, f64)> + '_ {
        GradePoint::ALL.into_iter().map(|grade| (grade, self.point(grade)))
    }
}

impl Default for GradeScale {
    fn default() -> Self {
        Self {
            points: GradePoint::ALL.map(GradePoint::default_point),
            max_point: DEFAULT_MAX_POINT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping() {
        let scale = GradeScale::default();
        let expected = [
            ("O", 10.0),
            ("A+", 9.0),
            ("A", 8.0),
            ("B+", 7.0),
            ("B", 6.0),
            ("C", 5.0),
            ("F", 0.0),
        ];
        for (label, point) in expected {
            assert_eq!(scale.point_of(label), Some(point), "grade {label}");
        }
        assert!((scale.max_point() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_labels_rejected() {
        let scale = GradeScale::default();
        assert_eq!(scale.point_of("D"), None);
        assert_eq!(scale.point_of(""), None);
        assert_eq!(scale.point_of("A++"), None);
        assert!("E".parse::<GradePoint>().is_err());
    }

    #[test]
    fn test_label_parsing_is_lenient_on_case_and_space() {
        assert_eq!(GradePoint::from_label(" a+ "), Some(GradePoint::APlus));
        assert_eq!(GradePoint::from_label("o"), Some(GradePoint::O));
        assert_eq!("b+".parse::<GradePoint>(), Ok(GradePoint::BPlus));
    }

    #[test]
    fn test_overrides_replace_single_grade() {
        let mut overrides = BTreeMap::new();
        overrides.insert("C".to_string(), 4.0);
        let scale = GradeScale::with_overrides(&overrides, 10.0).unwrap();
        assert_eq!(scale.point(GradePoint::C), 4.0);
        assert_eq!(scale.point(GradePoint::O), 10.0);
    }

    #[test]
    fn test_overrides_validated() {
        let mut overrides = BTreeMap::new();
        overrides.insert("O".to_string(), 11.0);
        assert!(GradeScale::with_overrides(&overrides, 10.0).is_err());

        let mut unknown = BTreeMap::new();
        unknown.insert("D".to_string(), 4.0);
        assert!(GradeScale::with_overrides(&unknown, 10.0).is_err());

        assert!(GradeScale::with_overrides(&BTreeMap::new(), 0.0).is_err());
    }

    #[test]
    fn test_entries_order() {
        let labels: Vec<&str> = GradeScale::default()
            .entries()
            .map(|(grade, _)| grade.label())
            .collect();
        assert_eq!(labels, vec!["O", "A+", "A", "B+", "B", "C", "F"]);
    }
}

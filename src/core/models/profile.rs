//! Student profiles and class groupings

use super::semester::optional_number_or_text;
use super::SemesterRecord;
use crate::core::aggregator::compute_cgpa;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest year of study a class can belong to
pub const MAX_YEAR: u8 = 4;

/// Number of students a top-CGPA ranking returns
pub const TOP_STUDENTS: usize = 4;

/// A year of study plus a section letter, e.g. year 3 section A
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSection {
    /// Year of study (1..=4)
    pub year: u8,
    /// Section letter (A..=Z)
    pub section: String,
}

impl ClassSection {
    /// Build a class, upper-casing the section letter.
    ///
    /// # Errors
    /// Returns an error for a year outside `1..=4` or a section that is not one letter.
    pub fn new(year: u8, section: &str) -> Result<Self, String> {
        if year == 0 || year > MAX_YEAR {
            return Err(format!("Year must be between 1 and {MAX_YEAR}, got {year}"));
        }
        let section = section.trim().to_ascii_uppercase();
        let mut chars = section.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => Ok(Self { year, section }),
            _ => Err(format!("Section must be a single letter A-Z, got '{section}'")),
        }
    }
}

impl fmt::Display for ClassSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "year {} section {}", self.year, self.section)
    }
}

/// Profile of one student as the portal stores it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Backend record identifier
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Registration number
    #[serde(rename = "Reg", alias = "reg", default)]
    pub registration_id: String,
    /// Full name
    #[serde(default)]
    pub name: String,
    /// Account email
    #[serde(default)]
    pub email: String,
    /// Date of birth as stored
    #[serde(default)]
    pub dob: String,
    /// Gender as entered
    #[serde(default)]
    pub gender: String,
    /// Semester the student is currently in
    #[serde(
        rename = "current_sem",
        default,
        deserialize_with = "optional_number_or_text"
    )]
    pub current_semester: Option<u8>,
    /// Contact number
    #[serde(rename = "mobileNo", default)]
    pub mobile: Option<String>,
    /// Postal address
    #[serde(default)]
    pub address: Option<String>,
    /// Parent's postal address
    #[serde(rename = "parentAddress", default)]
    pub parent_address: Option<String>,
    /// Year of study, when assigned to a class
    #[serde(default, deserialize_with = "optional_number_or_text")]
    pub year: Option<u8>,
    /// Section letter, when assigned to a class
    #[serde(default)]
    pub section: Option<String>,
    /// Semester records, when the backend embeds them
    #[serde(default)]
    pub sgpas: Vec<SemesterRecord>,
    /// CGPA as reported by the backend
    #[serde(rename = "cgpa", default, deserialize_with = "optional_number_or_text")]
    pub reported_cgpa: Option<f64>,
    /// Target CGPA, if set
    #[serde(
        rename = "targetCgpa",
        default,
        deserialize_with = "optional_number_or_text"
    )]
    pub target_cgpa: Option<f64>,
}

impl StudentProfile {
    /// CGPA derived from the embedded semester records, falling back to the reported
    /// value when the profile carries none.
    #[must_use]
    pub fn cgpa(&self) -> Option<f64> {
        if self.sgpas.is_empty() {
            self.reported_cgpa.filter(|v| v.is_finite())
        } else {
            compute_cgpa(&self.sgpas)
        }
    }

    /// Class the student belongs to, when both year and section are known
    #[must_use]
    pub fn class(&self) -> Option<ClassSection> {
        match (self.year, self.section.as_deref()) {
            (Some(year), Some(section)) => ClassSection::new(year, section).ok(),
            _ => None,
        }
    }
}

/// Fields a student may change on their own profile
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProfileUpdate {
    /// New current semester
    #[serde(rename = "current_sem", skip_serializing_if = "Option::is_none")]
    pub current_semester: Option<u8>,
    /// New contact number
    #[serde(rename = "mobileNo", skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    /// New postal address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// New parent's postal address
    #[serde(rename = "parentAddress", skip_serializing_if = "Option::is_none")]
    pub parent_address: Option<String>,
}

impl ProfileUpdate {
    /// Whether the update changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.current_semester.is_none()
            && self.mobile.is_none()
            && self.address.is_none()
            && self.parent_address.is_none()
    }

    /// Validate the changed fields.
    ///
    /// # Errors
    /// Returns a description of the first invalid field.
    pub fn validate(&self, total_semesters: u8) -> Result<(), String> {
        if let Some(semester) = self.current_semester {
            if semester == 0 || semester > total_semesters {
                return Err(format!(
                    "Current semester must be between 1 and {total_semesters}"
                ));
            }
        }
        if let Some(mobile) = &self.mobile {
            let digits = mobile.chars().filter(char::is_ascii_digit).count();
            let allowed = mobile
                .trim()
                .trim_start_matches('+')
                .chars()
                .all(|c| c.is_ascii_digit() || c == ' ' || c == '-');
            if !allowed || !(7..=15).contains(&digits) {
                return Err(format!("Invalid mobile number: '{mobile}'"));
            }
        }
        Ok(())
    }

    /// Copy the changed fields onto `profile`
    pub fn apply_to(&self, profile: &mut StudentProfile) {
        if let Some(semester) = self.current_semester {
            profile.current_semester = Some(semester);
        }
        if let Some(mobile) = &self.mobile {
            profile.mobile = Some(mobile.trim().to_string());
        }
        if let Some(address) = &self.address {
            profile.address = Some(address.trim().to_string());
        }
        if let Some(address) = &self.parent_address {
            profile.parent_address = Some(address.trim().to_string());
        }
    }
}

/// One student's place in a class ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentStanding {
    /// Student name
    #[serde(default)]
    pub name: String,
    /// Registration number
    #[serde(rename = "Reg", alias = "reg", default)]
    pub registration_id: String,
    /// CGPA, `None` before any semester is recorded
    #[serde(default, deserialize_with = "optional_number_or_text")]
    pub cgpa: Option<f64>,
}

impl From<&StudentProfile> for StudentStanding {
    fn from(profile: &StudentProfile) -> Self {
        Self {
            name: profile.name.clone(),
            registration_id: profile.registration_id.clone(),
            cgpa: profile.cgpa(),
        }
    }
}

/// Highest CGPAs first, students without one left out, at most `limit` entries.
#[must_use]
pub fn rank_top(standings: &[StudentStanding], limit: usize) -> Vec<StudentStanding> {
    let mut ranked: Vec<StudentStanding> = standings
        .iter()
        .filter(|s| s.cgpa.is_some_and(f64::is_finite))
        .cloned()
        .collect();
    ranked.sort_by(|a, b| {
        let (a, b) = (a.cgpa.unwrap_or(0.0), b.cgpa.unwrap_or(0.0));
        b.total_cmp(&a)
    });
    ranked.truncate(limit);
    ranked
}

/// CGPA of every student in a class, and the class average
#[derive(Debug, Clone, PartialEq)]
pub struct ClassCgpa {
    /// Students in the order the backend listed them
    pub students: Vec<StudentStanding>,
    /// Unweighted mean over students with a CGPA
    pub average_cgpa: Option<f64>,
}

impl ClassCgpa {
    /// Build the analysis, averaging over students that have a CGPA
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_standings(students: Vec<StudentStanding>) -> Self {
        let values: Vec<f64> = students
            .iter()
            .filter_map(|s| s.cgpa)
            .filter(|v| v.is_finite())
            .collect();
        let average_cgpa =
            (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64);
        Self {
            students,
            average_cgpa,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(name: &str, cgpa: Option<f64>) -> StudentStanding {
        StudentStanding {
            name: name.to_string(),
            registration_id: format!("R-{name}"),
            cgpa,
        }
    }

    #[test]
    fn test_class_section_rules() {
        assert_eq!(
            ClassSection::new(3, " a "),
            Ok(ClassSection {
                year: 3,
                section: "A".to_string()
            })
        );
        assert!(ClassSection::new(0, "A").is_err());
        assert!(ClassSection::new(5, "A").is_err());
        assert!(ClassSection::new(2, "AB").is_err());
        assert!(ClassSection::new(2, "1").is_err());
        assert_eq!(ClassSection::new(2, "c").unwrap().to_string(), "year 2 section C");
    }

    #[test]
    fn test_profile_from_backend_json() {
        let body = r#"{"_id":"p1","Reg":"RA1","name":"Asha","email":"a@x.edu","current_sem":"5",
            "mobileNo":"98400 12345","cgpa":"8.1","targetCgpa":null,"year":3,"section":"A",
            "sgpas":[{"semester":1,"sgpa":8.0},{"semester":2,"sgpa":"9.0"}]}"#;
        let profile: StudentProfile = serde_json::from_str(body).unwrap();
        assert_eq!(profile.current_semester, Some(5));
        assert_eq!(profile.reported_cgpa, Some(8.1));
        assert_eq!(profile.target_cgpa, None);
        assert_eq!(profile.cgpa(), Some(8.5));
        assert_eq!(profile.class(), ClassSection::new(3, "A").ok());
    }

    #[test]
    fn test_reported_cgpa_used_without_records() {
        let profile: StudentProfile = serde_json::from_str(r#"{"Reg":"RA1","cgpa":7.25}"#).unwrap();
        assert_eq!(profile.cgpa(), Some(7.25));
        assert!(profile.class().is_none());
    }

    #[test]
    fn test_update_validation_and_apply() {
        let update = ProfileUpdate {
            current_semester: Some(6),
            mobile: Some(" +91 98400-12345 ".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(update.validate(8).is_ok());
        let mut profile = StudentProfile::default();
        update.apply_to(&mut profile);
        assert_eq!(profile.current_semester, Some(6));
        assert_eq!(profile.mobile.as_deref(), Some("+91 98400-12345"));
        assert!(profile.address.is_none());

        let bad = ProfileUpdate {
            current_semester: Some(9),
            ..ProfileUpdate::default()
        };
        assert!(bad.validate(8).is_err());
        let bad = ProfileUpdate {
            mobile: Some("call me".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(bad.validate(8).is_err());
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn test_update_wire_names() {
        let update = ProfileUpdate {
            parent_address: Some("Chennai".to_string()),
            ..ProfileUpdate::default()
        };
        let json = serde_json::to_value(update).unwrap();
        assert_eq!(json["parentAddress"], "Chennai");
        assert!(json.get("mobileNo").is_none());
    }

    #[test]
    fn test_rank_top() {
        let standings = vec![
            standing("a", Some(7.0)),
            standing("b", None),
            standing("c", Some(9.5)),
            standing("d", Some(8.0)),
        ];
        let top = rank_top(&standings, 2);
        let names: Vec<&str> = top.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["c", "d"]);
    }

    #[test]
    fn test_class_average_skips_missing() {
        let analysis = ClassCgpa::from_standings(vec![
            standing("a", Some(8.0)),
            standing("b", None),
            standing("c", Some(9.0)),
        ]);
        assert_eq!(analysis.average_cgpa, Some(8.5));
        assert_eq!(analysis.students.len(), 3);
        assert_eq!(ClassCgpa::from_standings(Vec::new()).average_cgpa, None);
    }
}

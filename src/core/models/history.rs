//! Student academic history model

use super::SemesterRecord;
use serde::{Deserialize, Serialize};

/// Ordered semester records for one student, plus their declared target CGPA
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "StoredHistory")]
pub struct StudentAcademicHistory {
    /// Registration number of the owning student
    pub registration_id: String,

    /// Semester records sorted by semester number (unique, not necessarily contiguous)
    semesters: Vec<SemesterRecord>,

    /// Target CGPA, if the student has set one
    pub target_cgpa: Option<f64>,
}

/// Serialized form, checked through [`StudentAcademicHistory::from_records`] on the way in
#[derive(Deserialize)]
struct StoredHistory {
    registration_id: String,
    #[serde(default)]
    semesters: Vec<SemesterRecord>,
    #[serde(default)]
    target_cgpa: Option<f64>,
}

impl TryFrom<StoredHistory> for StudentAcademicHistory {
    type Error = String;

    fn try_from(stored: StoredHistory) -> Result<Self, Self::Error> {
        let mut history = Self::from_records(stored.registration_id, stored.semesters)?;
        history.target_cgpa = stored.target_cgpa;
        Ok(history)
    }
}

impl StudentAcademicHistory {
    /// Create an empty history
    #[must_use]
    pub const fn new(registration_id: String) -> Self {
        Self {
            registration_id,
            semesters: Vec::new(),
            target_cgpa: None,
        }
    }

    /// Build a history from fetched records.
    ///
    /// # Errors
    /// Returns an error if two records share a semester number.
    pub fn from_records(
        registration_id: String,
        records: Vec<SemesterRecord>,
    ) -> Result<Self, String> {
        let mut semesters = records;
        semesters.sort_by_key(|r| r.semester);
        if let Some(pair) = semesters.windows(2).find(|w| w[0].semester == w[1].semester) {
            return Err(format!(
                "Duplicate record for semester {} in history of {registration_id}",
                pair[0].semester
            ));
        }
        Ok(Self {
            registration_id,
            semesters,
            target_cgpa: None,
        })
    }

    /// Insert a record, replacing any existing record for the same semester.
    ///
    /// # Returns
    /// The record that was replaced, if any.
    pub fn upsert(&mut self, record: SemesterRecord) -> Option<SemesterRecord> {
        match self
            .semesters
            .binary_search_by_key(&record.semester, |r| r.semester)
        {
            Ok(pos) => Some(std::mem::replace(&mut self.semesters[pos], record)),
            Err(pos) => {
                self.semesters.insert(pos, record);
                None
            }
        }
    }

    /// Remove the record for a semester
    pub fn remove(&mut self, semester: u8) -> Option<SemesterRecord> {
        self.semesters
            .binary_search_by_key(&semester, |r| r.semester)
            .ok()
            .map(|pos| self.semesters.remove(pos))
    }

    /// Look up the record for a semester
    #[must_use]
    pub fn get(&self, semester: u8) -> Option<&SemesterRecord> {
        self.semesters
            .binary_search_by_key(&semester, |r| r.semester)
            .ok()
            .map(|pos| &self.semesters[pos])
    }

    /// All records, in semester order
    #[must_use]
    pub fn records(&self) -> &[SemesterRecord] {
        &self.semesters
    }

    /// SGPA values, in semester order
    #[must_use]
    pub fn sgpas(&self) -> Vec<f64> {
        self.semesters.iter().map(|r| r.sgpa).collect()
    }

    /// Number of semesters with a recorded SGPA
    #[must_use]
    pub fn completed(&self) -> usize {
        self.semesters.len()
    }

    /// Whether no semester has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.semesters.is_empty()
    }

    /// Set the target CGPA.
    ///
    /// # Errors
    /// Returns an error if the target is not a finite value in `[0, max_point]`.
    pub fn set_target(&mut self, target: f64, max_point: f64) -> Result<(), String> {
        validate_target(target, max_point)?;
        self.target_cgpa = Some(target);
        Ok(())
    }
}

/// Validate a target CGPA value.
///
/// # Errors
/// Returns an error if the target is not a finite value in `[0, max_point]`.
pub fn validate_target(target: f64, max_point: f64) -> Result<(), String> {
    if !target.is_finite() || target < 0.0 || target > max_point {
        return Err(format!(
            "Target CGPA must be between 0 and {max_point}, got {target}"
        ));
    }
    Ok(())
}

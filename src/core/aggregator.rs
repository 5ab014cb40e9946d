//! SGPA / CGPA aggregation
//!
//! All functions here are pure: they take course or semester data and return an
//! average, without I/O or hidden state. Invalid rows are excluded rather than
//! reported as errors, and an aggregate with no valid rows yields `None`.

use crate::core::grades::GradeScale;
use crate::core::models::{CourseRecord, InvalidRow, SemesterRecord};
use crate::core::projection::ProjectionPolicy;
use crate::debug;

/// Result of an SGPA computation together with the rows that were left out
#[derive(Debug, Clone, PartialEq)]
pub struct SgpaBreakdown {
    /// Semester grade point average, `None` when no row counted
    pub sgpa: Option<f64>,
    /// Sum of `credits * grade_point` over counted rows
    pub total_points: f64,
    /// Sum of credits over counted rows
    pub total_credits: f64,
    /// Number of rows that counted
    pub counted: usize,
    /// Excluded rows as `(index, reason)`
    pub excluded: Vec<(usize, InvalidRow)>,
}

/// Turns course and semester inputs into grade point averages
#[derive(Debug, Clone, Default)]
pub struct AcademicAggregator {
    scale: GradeScale,
}

impl AcademicAggregator {
    /// Create an aggregator over a grade scale
    #[must_use]
    pub const fn new(scale: GradeScale) -> Self {
        Self { scale }
    }

    /// Grade scale in use
    #[must_use]
    pub const fn scale(&self) -> &GradeScale {
        &self.scale
    }

    /// Credit-weighted SGPA for one semester's courses.
    ///
    /// Rows with non-finite or non-positive credits, or with a grade outside the scale,
    /// are excluded from both numerator and denominator. Returns `None` when no row
    /// counts.
    #[must_use]
    pub fn compute_sgpa(&self, courses: &[CourseRecord]) -> Option<f64> {
        self.sgpa_breakdown(courses).sgpa
    }

    /// Like [`compute_sgpa`](Self::compute_sgpa), but also reports totals and exclusions.
    #[must_use]
    pub fn sgpa_breakdown(&self, courses: &[CourseRecord]) -> SgpaBreakdown {
        let mut total_points = 0.0;
        let mut total_credits = 0.0;
        let mut counted = 0;
        let mut excluded = Vec::new();

        for (idx, course) in courses.iter().enumerate() {
            match course.resolve(&self.scale) {
                Ok((credits, point)) => {
                    total_points += credits * point;
                    total_credits += credits;
                    counted += 1;
                }
                Err(reason) => {
                    debug!("Excluding course row {}: {reason}", idx + 1);
                    excluded.push((idx, reason));
                }
            }
        }

        let sgpa = (total_credits > 0.0).then(|| total_points / total_credits);

        SgpaBreakdown {
            sgpa,
            total_points,
            total_credits,
            counted,
            excluded,
        }
    }

    /// CGPA as the unweighted mean of recorded SGPAs. See [`compute_cgpa`].
    #[must_use]
    pub fn compute_cgpa(&self, history: &[SemesterRecord]) -> Option<f64> {
        compute_cgpa(history)
    }

    /// Required SGPA for each remaining semester. See [`compute_required_sgpa`].
    #[must_use]
    pub fn compute_required_sgpa(
        &self,
        history: &[SemesterRecord],
        target_cgpa: f64,
        total_semesters: u8,
    ) -> Vec<f64> {
        compute_required_sgpa(history, target_cgpa, total_semesters)
    }
}

/// CGPA as the unweighted mean of recorded SGPAs.
///
/// Records with a non-finite SGPA are skipped. Returns `None` for an empty history.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_cgpa(history: &[SemesterRecord]) -> Option<f64> {
    let (sum, count) = sgpa_sum(history);
    (count > 0).then(|| sum / count as f64)
}

/// Required SGPA for each remaining semester, spread evenly.
///
/// The result has `total_semesters - history.len()` entries (empty when no semesters
/// remain). Values are not clamped to the maximum grade point; use
/// [`project_target`](crate::core::projection::project_target) to classify
/// feasibility.
#[must_use]
pub fn compute_required_sgpa(
    history: &[SemesterRecord],
    target_cgpa: f64,
    total_semesters: u8,
) -> Vec<f64> {
    compute_required_sgpa_with(
        ProjectionPolicy::Uniform,
        history,
        target_cgpa,
        total_semesters,
    )
}

/// Required SGPA for each remaining semester under a distribution policy.
#[must_use]
pub fn compute_required_sgpa_with(
    policy: ProjectionPolicy,
    history: &[SemesterRecord],
    target_cgpa: f64,
    total_semesters: u8,
) -> Vec<f64> {
    let remaining = usize::from(total_semesters).saturating_sub(history.len());
    if remaining == 0 {
        return Vec::new();
    }
    let total = required_total(history, target_cgpa, total_semesters);
    policy.distribute(total, remaining)
}

/// Grade points still needed across all remaining semesters to reach `target_cgpa`.
///
/// Equals `target * total_semesters - current_avg * completed`, written over the sum
/// so that an empty history needs no special case.
#[must_use]
pub fn required_total(history: &[SemesterRecord], target_cgpa: f64, total_semesters: u8) -> f64 {
    let (sum, _) = sgpa_sum(history);
    target_cgpa * f64::from(total_semesters) - sum
}

fn sgpa_sum(history: &[SemesterRecord]) -> (f64, usize) {
    history
        .iter()
        .filter(|record| {
            let finite = record.sgpa.is_finite();
            if !finite {
                debug!("Skipping semester {} with non-finite SGPA", record.semester);
            }
            finite
        })
        .fold((0.0, 0), |(sum, count), record| (sum + record.sgpa, count + 1))
}

/// Round for presentation (e.g. `round_to(8.857, 2) == 8.86`).
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    (value * factor).round() / factor
}

/// Format an optional average with two decimals, or `"no data"`.
///
/// Rounds with [`round_to`], so ties go away from zero (`8.125` shows as `8.13`).
#[must_use]
pub fn format_gpa(value: Option<f64>) -> String {
    value.map_or_else(|| "no data".to_string(), |v| format!("{:.2}", round_to(v, 2)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agg() -> AcademicAggregator {
        AcademicAggregator::default()
    }

    #[test]
    fn test_sgpa_weighted_by_credits() {
        let courses = vec![CourseRecord::new(3.0, "O"), CourseRecord::new(4.0, "A")];
        let result = agg().sgpa_breakdown(&courses);
        assert!((result.total_points - 62.0).abs() < 1e-9);
        assert!((result.total_credits - 7.0).abs() < 1e-9);
        assert_eq!(result.counted, 2);
        assert!((result.sgpa.unwrap() - 62.0 / 7.0).abs() < 1e-12);
        assert_eq!(format_gpa(result.sgpa), "8.86");
    }

    #[test]
    fn test_breakdown_lists_exclusions() {
        let courses = vec![
            CourseRecord::new(3.0, "O"),
            CourseRecord::new(-1.0, "A"),
            CourseRecord::new(2.0, "D"),
        ];
        let result = agg().sgpa_breakdown(&courses);
        assert_eq!(result.counted, 1);
        assert_eq!(
            result.excluded,
            vec![
                (1, InvalidRow::NonPositiveCredits),
                (2, InvalidRow::UnknownGrade("D".to_string())),
            ]
        );
    }

    #[test]
    fn test_zero_credit_rows_excluded() {
        let courses = vec![CourseRecord::new(0.0, "O"), CourseRecord::new(2.0, "B")];
        assert_eq!(agg().compute_sgpa(&courses), Some(6.0));
    }

    #[test]
    fn test_all_fail_grades_is_zero_not_none() {
        let courses = vec![CourseRecord::new(3.0, "F"), CourseRecord::new(4.0, "F")];
        assert_eq!(agg().compute_sgpa(&courses), Some(0.0));
    }

    #[test]
    fn test_cgpa_skips_non_finite() {
        let history = vec![
            SemesterRecord::new(1, 8.0),
            SemesterRecord::new(2, f64::NAN),
            SemesterRecord::new(3, 9.0),
        ];
        assert_eq!(compute_cgpa(&history), Some(8.5));
    }

    #[test]
    fn test_required_total_with_empty_history() {
        assert!((required_total(&[], 8.0, 8) - 64.0).abs() < 1e-9);
        assert_eq!(compute_required_sgpa(&[], 8.0, 8), vec![8.0; 8]);
    }

    #[test]
    fn test_required_sgpa_history_longer_than_programme() {
        let history: Vec<SemesterRecord> =
            (1..=9).map(|s| SemesterRecord::new(s, 8.0)).collect();
        assert!(compute_required_sgpa(&history, 9.0, 8).is_empty());
    }

    #[test]
    fn test_round_to() {
        assert!((round_to(8.857_142, 2) - 8.86).abs() < 1e-9);
        assert!((round_to(9.166_666, 2) - 9.17).abs() < 1e-9);
        assert!((round_to(7.0, 2) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_gpa_rounds_ties_like_round_to() {
        let courses = vec![
            CourseRecord::new(1.0, "O"),
            CourseRecord::new(3.0, "A+"),
            CourseRecord::new(4.0, "B+"),
        ];
        let sgpa = agg().compute_sgpa(&courses);
        assert_eq!(sgpa, Some(8.125));
        assert_eq!(format_gpa(sgpa), "8.13");
        assert!((round_to(8.125, 2) - 8.13).abs() < 1e-9);
        assert_eq!(format_gpa(Some(8.124_999)), "8.12");
    }

    #[test]
    fn test_format_gpa_no_data() {
        assert_eq!(format_gpa(None), "no data");
        assert_eq!(format_gpa(Some(10.0)), "10.00");
    }
}

//! Semester-by-semester progress tracking

use crate::core::aggregator::{compute_cgpa, AcademicAggregator};
use crate::core::models::{SemesterRecord, StudentAcademicHistory};
use crate::core::projection::{
    max_achievable_cgpa, project_target, ProjectionPolicy, TargetProjection,
};

/// One row of the tracker table
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerRow {
    /// A semester with a recorded SGPA
    Completed {
        /// Semester number
        semester: u8,
        /// Recorded SGPA
        sgpa: f64,
        /// CGPA over this and all earlier recorded semesters, `None` while none is finite
        running_cgpa: Option<f64>,
    },
    /// A future semester slot
    Remaining {
        /// 1-based position among the remaining semesters
        slot: usize,
        /// SGPA needed in this slot to reach the target, if one is set
        required_sgpa: Option<f64>,
    },
}

/// Everything the tracker view needs for one student
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSummary {
    /// Registration number
    pub registration_id: String,
    /// Table rows, completed semesters first
    pub rows: Vec<TrackerRow>,
    /// CGPA over all recorded semesters
    pub current_cgpa: Option<f64>,
    /// Highest SGPA as `(semester, sgpa)`
    pub best: Option<(u8, f64)>,
    /// Lowest SGPA as `(semester, sgpa)`
    pub worst: Option<(u8, f64)>,
    /// Target projection, when a target is set
    pub projection: Option<TargetProjection>,
    /// Programme length in semesters
    pub total_semesters: u8,
    /// Maximum grade point per semester
    pub max_point: f64,
    /// Best CGPA still reachable with full marks in every remaining semester
    pub max_achievable: Option<f64>,
}

/// Builds tracker summaries from academic histories
pub struct Tracker<'a> {
    aggregator: &'a AcademicAggregator,
    total_semesters: u8,
    policy: ProjectionPolicy,
}

impl<'a> Tracker<'a> {
    /// Create a tracker for a programme of `total_semesters`
    #[must_use]
    pub const fn new(
        aggregator: &'a AcademicAggregator,
        total_semesters: u8,
        policy: ProjectionPolicy,
    ) -> Self {
        Self {
            aggregator,
            total_semesters,
            policy,
        }
    }

    /// Build the summary for one history.
    #[must_use]
    pub fn build(&self, history: &StudentAcademicHistory) -> TrackerSummary {
        let records = history.records();
        let max_point = self.aggregator.scale().max_point();
        let projection = history.target_cgpa.map(|target| {
            project_target(
                records,
                target,
                self.total_semesters,
                self.policy,
                max_point,
            )
        });

        let mut rows: Vec<TrackerRow> = running_cgpa(records)
            .into_iter()
            .zip(records)
            .map(|(running, record)| TrackerRow::Completed {
                semester: record.semester,
                sgpa: record.sgpa,
                running_cgpa: running,
            })
            .collect();

        let remaining = usize::from(self.total_semesters).saturating_sub(records.len());
        rows.extend((0..remaining).map(|i| TrackerRow::Remaining {
            slot: i + 1,
            required_sgpa: projection
                .as_ref()
                .and_then(|p| p.required.get(i).copied()),
        }));

        TrackerSummary {
            registration_id: history.registration_id.clone(),
            rows,
            current_cgpa: self.aggregator.compute_cgpa(records),
            best: extreme(records, |a, b| a > b),
            worst: extreme(records, |a, b| a < b),
            projection,
            total_semesters: self.total_semesters,
            max_point,
            max_achievable: max_achievable_cgpa(records, self.total_semesters, max_point),
        }
    }
}

/// CGPA after each recorded semester, in semester order.
#[must_use]
pub fn running_cgpa(records: &[SemesterRecord]) -> Vec<Option<f64>> {
    (1..=records.len())
        .map(|n| compute_cgpa(&records[..n]))
        .collect()
}

fn extreme(records: &[SemesterRecord], better: impl Fn(f64, f64) -> bool) -> Option<(u8, f64)> {
    records
        .iter()
        .filter(|r| r.sgpa.is_finite())
        .fold(None, |acc: Option<(u8, f64)>, r| match acc {
            Some((_, value)) if !better(r.sgpa, value) => acc,
            _ => Some((r.semester, r.sgpa)),
        })
}

//! Tracker report generation
//!
//! Renders a [`TrackerSummary`] as a Markdown or HTML document. Numbers are formatted
//! once into a [`ReportView`] so every format shows identical values.

pub mod formats;

use crate::core::aggregator::format_gpa;
use crate::core::projection::Feasibility;
use crate::core::tracker::{TrackerRow, TrackerSummary};
use chrono::{DateTime, Local};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Tracker summary being reported
    pub summary: &'a TrackerSummary,
    /// Student display name, when known
    pub student_name: Option<&'a str>,
    /// Report timestamp
    pub generated_at: DateTime<Local>,
}

impl<'a> ReportContext<'a> {
    /// Create a context stamped with the current time
    #[must_use]
    pub fn new(summary: &'a TrackerSummary, student_name: Option<&'a str>) -> Self {
        Self {
            summary,
            student_name,
            generated_at: Local::now(),
        }
    }

    /// Format every value for display
    #[must_use]
    pub fn view(&self) -> ReportView {
        ReportView::from_context(self)
    }
}

/// One formatted tracker row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Semester label (`"3"` or `"+2"` for the second remaining slot)
    pub semester: String,
    /// `completed` or `remaining`
    pub status: &'static str,
    /// Recorded SGPA or `-`
    pub sgpa: String,
    /// Running CGPA or `-`
    pub running_cgpa: String,
    /// Required SGPA, `-` when not applicable
    pub required_sgpa: String,
    /// Whether the required SGPA exceeds the maximum grade point
    pub over_max: bool,
}

/// Display-ready report values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView {
    /// Registration number
    pub registration_id: String,
    /// Student display name (empty when unknown)
    pub student_name: String,
    /// Timestamp text
    pub generated_at: String,
    /// Programme length
    pub total_semesters: u8,
    /// Completed semester count
    pub completed: usize,
    /// Current CGPA
    pub current_cgpa: String,
    /// Best semester text
    pub best: String,
    /// Worst semester text
    pub worst: String,
    /// Highest reachable CGPA
    pub max_achievable: String,
    /// Whether a target is set
    pub has_target: bool,
    /// Target CGPA
    pub target_cgpa: String,
    /// Points still needed across remaining semesters
    pub required_total: String,
    /// Feasibility text
    pub feasibility: String,
    /// Whether the target can still be met
    pub feasible: bool,
    /// Projection policy name
    pub policy: String,
    /// Table rows
    pub rows: Vec<RowView>,
}

fn extreme_text(value: Option<(u8, f64)>) -> String {
    value.map_or_else(
        || "-".to_string(),
        |(semester, sgpa)| format!("{} (semester {semester})", format_gpa(Some(sgpa))),
    )
}

impl ReportView {
    fn from_context(ctx: &ReportContext) -> Self {
        let summary = ctx.summary;
        let max_point = summary.max_point;
        let rows = summary
            .rows
            .iter()
            .map(|row| match row {
                TrackerRow::Completed {
                    semester,
                    sgpa,
                    running_cgpa,
                } => RowView {
                    semester: semester.to_string(),
                    status: "completed",
                    sgpa: format_gpa(Some(*sgpa)),
                    running_cgpa: format_gpa(*running_cgpa),
                    required_sgpa: "-".to_string(),
                    over_max: false,
                },
                TrackerRow::Remaining {
                    slot,
                    required_sgpa,
                } => RowView {
                    semester: format!("+{slot}"),
                    status: "remaining",
                    sgpa: "-".to_string(),
                    running_cgpa: "-".to_string(),
                    required_sgpa: required_sgpa
                        .map_or_else(|| "-".to_string(), |v| format_gpa(Some(v))),
                    over_max: required_sgpa.is_some_and(|v| v > max_point),
                },
            })
            .collect();

        let projection = summary.projection.as_ref();
        let feasibility = projection.map(crate::core::projection::TargetProjection::feasibility);

        Self {
            registration_id: summary.registration_id.clone(),
            student_name: ctx.student_name.unwrap_or_default().to_string(),
            generated_at: ctx.generated_at.format("%Y-%m-%d %H:%M").to_string(),
            total_semesters: summary.total_semesters,
            completed: summary
                .rows
                .iter()
                .filter(|r| matches!(r, TrackerRow::Completed { .. }))
                .count(),
            current_cgpa: format_gpa(summary.current_cgpa),
            best: extreme_text(summary.best),
            worst: extreme_text(summary.worst),
            max_achievable: format_gpa(summary.max_achievable),
            has_target: projection.is_some(),
            target_cgpa: format_gpa(projection.map(|p| p.target_cgpa)),
            required_total: projection
                .map_or_else(|| "-".to_string(), |p| format!("{:.2}", p.required_total)),
            feasibility: feasibility.map_or_else(|| "-".to_string(), |f| f.to_string()),
            feasible: !matches!(feasibility, Some(Feasibility::Unreachable { .. })),
            policy: projection.map_or_else(String::new, |p| p.policy.to_string()),
            rows,
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Reporter for a format
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    }
}

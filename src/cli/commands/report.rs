//! Report command handler

use super::{fail, history_for, AppContext};
use cgpa_tracker::core::models::history::validate_target;
use cgpa_tracker::core::report::{reporter_for, ReportContext, ReportFormat};
use cgpa_tracker::core::tracker::Tracker;
use cgpa_tracker::info;
use std::path::{Path, PathBuf};

/// Default output location: `<reports_dir>/cgpa-<reg>.<ext>`
pub fn default_output_path(reports_dir: &str, registration_id: &str, format: ReportFormat) -> PathBuf {
    let dir = if reports_dir.is_empty() { "." } else { reports_dir };
    let safe: String = registration_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    Path::new(dir).join(format!("cgpa-{safe}.{}", format.extension()))
}

/// Build the tracker summary and write it as a report
pub fn run(
    ctx: &AppContext,
    output: Option<&Path>,
    format: &str,
    sgpas: &[f64],
    target: Option<f64>,
) {
    let format: ReportFormat = format.parse().unwrap_or_else(|e| fail(e));

    let mut history = history_for(ctx, sgpas);
    if let Some(target) = target {
        if let Err(e) = validate_target(target, ctx.max_point()) {
            fail(e);
        }
        history.target_cgpa = Some(target);
    }

    let summary = Tracker::new(ctx.aggregator(), ctx.total_semesters(), ctx.policy()).build(&history);
    let student_name = ctx
        .session
        .as_ref()
        .filter(|s| s.registration_id == history.registration_id)
        .map(|s| s.name.as_str());
    let report_ctx = ReportContext::new(&summary, student_name);

    let output_path = output.map_or_else(
        || default_output_path(&ctx.config.paths.reports_dir, &history.registration_id, format),
        Path::to_path_buf,
    );

    if let Err(e) = reporter_for(format).generate(&report_ctx, &output_path) {
        fail(format!("Failed to write {format} report: {e}"));
    }
    info!("Wrote {format} report for {}", history.registration_id);
    println!("✓ Report generated: {}", output_path.display());
}

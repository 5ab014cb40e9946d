//! CGPA command handler

use super::{history_for, AppContext};
use cgpa_tracker::core::aggregator::format_gpa;
use cgpa_tracker::verbose;

/// Print the cumulative CGPA over the recorded semesters
pub fn run(ctx: &AppContext, sgpas: &[f64]) {
    let history = history_for(ctx, sgpas);
    for record in history.records() {
        verbose!("  semester {:>2}: {:.2}", record.semester, record.sgpa);
    }
    let cgpa = ctx.aggregator().compute_cgpa(history.records());
    println!(
        "CGPA: {} over {} of {} semesters",
        format_gpa(cgpa),
        history.completed(),
        ctx.total_semesters()
    );
}

//! Semester history command handlers

use super::{fail, or_fail, AppContext};
use crate::args::HistorySubcommand;
use cgpa_tracker::core::aggregator::format_gpa;
use cgpa_tracker::core::api::RecordStore;
use cgpa_tracker::core::models::SemesterRecord;
use cgpa_tracker::core::tracker::running_cgpa;
use cgpa_tracker::info;

/// Dispatch history subcommands (listing when none is given)
pub fn run(ctx: &AppContext, subcommand: Option<HistorySubcommand>) {
    match subcommand {
        None | Some(HistorySubcommand::List) => handle_list(ctx),
        Some(HistorySubcommand::Edit { semester, sgpa }) => handle_edit(ctx, semester, sgpa),
        Some(HistorySubcommand::Delete { semester }) => handle_delete(ctx, semester),
    }
}

fn handle_list(ctx: &AppContext) {
    let reg = ctx.registration_id();
    let history = or_fail(ctx.client().load_history(&reg), "fetch semester history");
    if history.is_empty() {
        println!("No semesters recorded for {reg}");
        return;
    }

    println!("Semester history for {reg}\n");
    println!("  {:<10} {:>6} {:>13}", "Semester", "SGPA", "Running CGPA");
    for (record, running) in history.records().iter().zip(running_cgpa(history.records())) {
        println!(
            "  {:<10} {:>6} {:>13}",
            record.semester,
            format_gpa(Some(record.sgpa)),
            format_gpa(running)
        );
    }
    println!(
        "\nCGPA: {}",
        format_gpa(ctx.aggregator().compute_cgpa(history.records()))
    );
    if let Some(target) = history.target_cgpa {
        println!("Target: {target:.2}");
    }
}

fn stored_record(ctx: &AppContext, reg: &str, semester: u8) -> SemesterRecord {
    let history = or_fail(ctx.client().load_history(reg), "fetch semester history");
    history
        .get(semester)
        .cloned()
        .unwrap_or_else(|| fail(format!("Semester {semester} is not recorded for {reg}")))
}

fn handle_edit(ctx: &AppContext, semester: u8, sgpa: f64) {
    let reg = ctx.registration_id();
    let mut record = stored_record(ctx, &reg, semester);
    record.sgpa = sgpa;
    if let Err(e) = record.validate(ctx.total_semesters(), ctx.max_point()) {
        fail(e);
    }
    if record.id.is_none() {
        fail(format!("Semester {semester} has no backend id and cannot be edited"));
    }
    or_fail(
        ctx.client().update_sgpas(&reg, std::slice::from_ref(&record)),
        "update SGPA",
    );
    info!("Semester {semester} of {reg} updated to {sgpa}");
    println!("✓ Semester {semester} SGPA set to {sgpa:.2}");
}

fn handle_delete(ctx: &AppContext, semester: u8) {
    let reg = ctx.registration_id();
    let record = stored_record(ctx, &reg, semester);
    let Some(id) = record.id else {
        fail(format!("Semester {semester} has no backend id and cannot be deleted"));
    };
    or_fail(ctx.client().delete_sgpa(&id), "delete semester");
    info!("Semester {semester} of {reg} deleted");
    println!("✓ Deleted semester {semester}");
}

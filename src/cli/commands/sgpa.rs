//! SGPA command handler

use super::{fail, or_fail, AppContext};
use cgpa_tracker::core::aggregator::{format_gpa, SgpaBreakdown};
use cgpa_tracker::core::api::{RecordStore, SubmitOutcome};
use cgpa_tracker::core::models::{CourseRecord, SemesterRecord};
use cgpa_tracker::{info, verbose};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CsvCourse {
    credits: String,
    grade: String,
}

/// Read `credits,grade` rows from a CSV file.
///
/// Unparsable credit values become NaN rows, which the aggregator then excludes.
///
/// # Errors
/// Returns an error if the file cannot be read or lacks the two columns.
pub fn read_course_csv(path: &Path) -> Result<Vec<CourseRecord>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?;

    reader
        .deserialize::<CsvCourse>()
        .map(|row| {
            row.map(|r| CourseRecord::from_raw(&r.credits, &r.grade))
                .map_err(|e| format!("Failed to read {}: {e}", path.display()))
        })
        .collect()
}

/// Combine `--course` pairs and CSV rows, pairs first.
///
/// # Errors
/// Returns an error for a pair without `:` or an unreadable CSV file.
pub fn collect_courses(pairs: &[String], csv: Option<&Path>) -> Result<Vec<CourseRecord>, String> {
    let mut courses = pairs
        .iter()
        .map(|pair| CourseRecord::parse(pair))
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(path) = csv {
        courses.extend(read_course_csv(path)?);
    }
    if courses.is_empty() {
        return Err("No courses given. Use --course CREDITS:GRADE or --csv FILE".to_string());
    }
    Ok(courses)
}

/// Summary line for a computed SGPA, `SGPA: no data` when no row counted
pub fn sgpa_line(breakdown: &SgpaBreakdown) -> String {
    match breakdown.sgpa {
        Some(sgpa) => format!(
            "SGPA: {} ({} courses, {} credits, {:.2} points)",
            format_gpa(Some(sgpa)),
            breakdown.counted,
            breakdown.total_credits,
            breakdown.total_points
        ),
        None => format!("SGPA: {}", format_gpa(None)),
    }
}

/// Compute an SGPA, optionally saving it as semester `save`
pub fn run(ctx: &AppContext, pairs: &[String], csv: Option<&PathBuf>, save: Option<u8>) {
    let courses = collect_courses(pairs, csv.map(PathBuf::as_path)).unwrap_or_else(|e| fail(e));
    let breakdown = ctx.aggregator().sgpa_breakdown(&courses);

    for (idx, course) in courses.iter().enumerate() {
        verbose!("  {:>2}. {:>5} credits  {}", idx + 1, course.credits, course.grade);
    }
    for (idx, reason) in &breakdown.excluded {
        eprintln!("⚠ Skipped row {}: {reason}", idx + 1);
    }

    println!("{}", sgpa_line(&breakdown));
    let Some(sgpa) = breakdown.sgpa else {
        if let Some(semester) = save {
            eprintln!("⚠ Not saving semester {semester}: no course row counted");
        }
        return;
    };

    let Some(semester) = save else {
        return;
    };

    let record = SemesterRecord::new(semester, sgpa);
    if let Err(e) = record.validate(ctx.total_semesters(), ctx.max_point()) {
        fail(e);
    }
    let reg = ctx.registration_id();
    let outcome = or_fail(
        ctx.client().submit_sgpa(&reg, semester, sgpa),
        "save SGPA",
    );
    info!("Saved semester {semester} SGPA {sgpa} for {reg}");
    match outcome {
        SubmitOutcome::Created => println!("✓ Saved semester {semester}"),
        SubmitOutcome::Updated => println!("✓ Updated semester {semester}"),
    }
}

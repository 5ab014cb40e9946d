//! Integration tests for tracker report rendering

use cgpa_tracker::core::aggregator::AcademicAggregator;
use cgpa_tracker::core::models::{SemesterRecord, StudentAcademicHistory};
use cgpa_tracker::core::projection::ProjectionPolicy;
use cgpa_tracker::core::report::{reporter_for, ReportContext, ReportFormat};
use cgpa_tracker::core::tracker::{Tracker, TrackerSummary};

fn summary(target: Option<f64>) -> TrackerSummary {
    let mut history = StudentAcademicHistory::from_records(
        "RA2111003010001".to_string(),
        vec![SemesterRecord::new(2, 9.0), SemesterRecord::new(1, 8.0)],
    )
    .unwrap();
    history.target_cgpa = target;
    let aggregator = AcademicAggregator::default();
    Tracker::new(&aggregator, 8, ProjectionPolicy::Uniform).build(&history)
}

#[test]
fn markdown_contains_summary_and_projection() {
    let summary = summary(Some(9.0));
    let ctx = ReportContext::new(&summary, Some("Asha"));
    let content = reporter_for(ReportFormat::Markdown).render(&ctx).unwrap();

    assert!(content.contains("# CGPA Tracker: RA2111003010001"));
    assert!(content.contains("**Student:** Asha"));
    assert!(content.contains("| Current CGPA | 8.50 |"));
    assert!(content.contains("2 of 8"));
    assert!(content.contains("| Target CGPA | 9.00 |"));
    assert!(content.contains("| Points still needed | 55.00 |"));
    assert!(content.contains("achievable"));
    assert!(content.contains("| 1 | completed | 8.00 | 8.00 | - |"));
    assert!(content.contains("| 2 | completed | 9.00 | 8.50 | - |"));
    assert!(content.contains("| +1 | remaining | - | - | 9.17 |"));
    assert!(!content.contains('⚠'));
}

#[test]
fn markdown_without_target_omits_projection() {
    let summary = summary(None);
    let ctx = ReportContext::new(&summary, None);
    let content = reporter_for(ReportFormat::Markdown).render(&ctx).unwrap();

    assert!(!content.contains("## Target"));
    assert!(!content.contains("**Student:**"));
    assert!(content.contains("| +6 | remaining | - | - | - |"));
}

#[test]
fn unreachable_rows_are_flagged() {
    let summary = summary(Some(9.9));
    let ctx = ReportContext::new(&summary, None);
    let view = ctx.view();
    assert!(!view.feasible);
    assert!(view.rows.iter().filter(|r| r.status == "remaining").all(|r| r.over_max));

    let markdown = reporter_for(ReportFormat::Markdown).render(&ctx).unwrap();
    assert!(markdown.contains("unreachable"));
    assert!(markdown.contains('⚠'));

    let html = reporter_for(ReportFormat::Html).render(&ctx).unwrap();
    assert!(html.contains("class=\"unreachable\""));
    assert!(html.contains("class=\"over\""));
}

#[test]
fn html_escapes_student_name() {
    let summary = summary(None);
    let ctx = ReportContext::new(&summary, Some("Asha & <Ravi>"));
    let html = reporter_for(ReportFormat::Html).render(&ctx).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Asha &amp; &lt;Ravi&gt;"));
    assert!(!html.contains("<Ravi>"));
}

#[test]
fn generate_writes_file_in_new_directory() {
    let dir = tempfile::tempdir().unwrap();
    let summary = summary(Some(9.0));
    let ctx = ReportContext::new(&summary, None);

    for format in [ReportFormat::Markdown, ReportFormat::Html] {
        let path = dir
            .path()
            .join("reports")
            .join(format!("tracker.{}", format.extension()));
        reporter_for(format).generate(&ctx, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("RA2111003010001"));
    }
}

#[test]
fn format_parsing() {
    assert_eq!("md".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
    assert_eq!("HTML".parse::<ReportFormat>(), Ok(ReportFormat::Html));
    assert!("pdf".parse::<ReportFormat>().is_err());
}

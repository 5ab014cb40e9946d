//! Class dashboard command handlers

use super::{fail, or_fail, AppContext};
use crate::args::{ClassArgs, ClassSubcommand};
use cgpa_tracker::core::aggregator::format_gpa;
use cgpa_tracker::core::api::ClassroomService;
use cgpa_tracker::core::models::{ClassSection, StudentStanding};

/// Dispatch class subcommands
pub fn run(ctx: &AppContext, subcommand: ClassSubcommand) {
    let session = ctx.require_session();
    if !session.role.is_staff() {
        fail(format!(
            "Only teachers and admins can view class dashboards (you are a {})",
            session.role
        ));
    }
    let client = ctx.client();
    let class_of = |args: &ClassArgs| {
        resolve_class(args, session.class.as_ref()).unwrap_or_else(|e| fail(e))
    };

    match subcommand {
        ClassSubcommand::Students { class } => {
            let class = class_of(&class);
            let students = or_fail(client.class_students(&class), "fetch students");
            if students.is_empty() {
                println!("No students in {class}");
                return;
            }
            println!("Students of {class}\n");
            for student in &students {
                println!(
                    "  {:<16} {:<24} {:>6}",
                    student.registration_id,
                    student.name,
                    format_gpa(student.cgpa())
                );
            }
        }
        ClassSubcommand::Count { class } => {
            let class = class_of(&class);
            let total = or_fail(client.total_students(&class), "count students");
            println!("✓ {total} student(s) in {class}");
        }
        ClassSubcommand::Top { class } => {
            let class = class_of(&class);
            let top = or_fail(client.top_students(&class), "fetch top students");
            if top.is_empty() {
                println!("No CGPA recorded in {class}");
                return;
            }
            println!("Top students of {class}\n");
            for (rank, student) in top.iter().enumerate() {
                println!("  {}. {}", rank + 1, standing_line(student));
            }
        }
        ClassSubcommand::Cgpa { class } => {
            let class = class_of(&class);
            let summary = or_fail(client.class_cgpa(&class), "fetch class CGPA");
            println!("CGPA of {class}\n");
            for student in &summary.students {
                println!("  {}", standing_line(student));
            }
            println!("\nClass average: {}", format_gpa(summary.average_cgpa));
        }
    }
}

/// Class from `--year`/`--section`, filling gaps from the session's class.
///
/// # Errors
/// Returns an error when year or section is unknown or out of range.
pub fn resolve_class(
    args: &ClassArgs,
    session_class: Option<&ClassSection>,
) -> Result<ClassSection, String> {
    let year = args.year.or_else(|| session_class.map(|c| c.year));
    let section = args
        .section
        .clone()
        .or_else(|| session_class.map(|c| c.section.clone()));
    match (year, section) {
        (Some(year), Some(section)) => ClassSection::new(year, &section),
        _ => Err("No class given. Pass --year and --section".to_string()),
    }
}

fn standing_line(student: &StudentStanding) -> String {
    format!(
        "{:<24} {:<16} {:>6}",
        student.name,
        student.registration_id,
        format_gpa(student.cgpa)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(year: Option<u8>, section: Option<&str>) -> ClassArgs {
        ClassArgs {
            year,
            section: section.map(str::to_string),
        }
    }

    #[test]
    fn test_resolve_class_prefers_flags() {
        let own = ClassSection::new(3, "A").unwrap();
        assert_eq!(resolve_class(&args(None, None), Some(&own)), Ok(own.clone()));
        assert_eq!(
            resolve_class(&args(Some(1), None), Some(&own)),
            ClassSection::new(1, "A")
        );
        assert_eq!(
            resolve_class(&args(Some(2), Some("c")), None),
            ClassSection::new(2, "C")
        );
    }

    #[test]
    fn test_resolve_class_needs_both_parts() {
        assert!(resolve_class(&args(Some(2), None), None).is_err());
        assert!(resolve_class(&args(Some(9), Some("A")), None).is_err());
    }
}

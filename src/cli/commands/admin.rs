//! Teacher management command handlers

use super::{fail, or_fail, prompt, AppContext};
use crate::args::AdminSubcommand;
use cgpa_tracker::core::api::StaffDirectory;
use cgpa_tracker::core::auth::Role;
use cgpa_tracker::core::models::{Teacher, TeacherRegistration};
use cgpa_tracker::info;

/// Dispatch admin subcommands
pub fn run(ctx: &AppContext, subcommand: AdminSubcommand) {
    let session = ctx.require_session();
    if session.role != Role::Admin {
        fail(format!(
            "Only admins can manage teachers (you are a {})",
            session.role
        ));
    }
    let client = ctx.client();

    match subcommand {
        AdminSubcommand::AddTeacher {
            name,
            email,
            dob,
            gender,
            year,
            section,
            password,
        } => {
            let registration = TeacherRegistration {
                name: name.trim().to_string(),
                password: password.unwrap_or_else(|| prompt("Password: ")),
                email: email.trim().to_string(),
                dob,
                gender,
                year,
                section: section.trim().to_uppercase(),
            };
            if let Err(e) = registration.validate() {
                fail(e);
            }
            or_fail(client.register_teacher(&registration), "add teacher");
            info!("Added teacher {}", registration.email);
            println!(
                "✓ Added {} for year {} section {}",
                registration.name, registration.year, registration.section
            );
        }
        AdminSubcommand::Teachers => {
            let teachers = or_fail(client.list_teachers(), "fetch teachers");
            if teachers.is_empty() {
                println!("No teachers");
                return;
            }
            for teacher in &teachers {
                println!("{}", teacher_line(teacher));
            }
        }
        AdminSubcommand::RemoveTeacher { id } => {
            or_fail(client.delete_teacher(&id), "remove teacher");
            info!("Removed teacher {id}");
            println!("✓ Removed teacher {id}");
        }
    }
}

fn teacher_line(teacher: &Teacher) -> String {
    let class = teacher
        .class()
        .map_or_else(|| "no class".to_string(), |c| c.to_string());
    format!(
        "{:<26} {:<24} {:<28} {}",
        teacher.id.as_deref().unwrap_or("-"),
        teacher.name,
        teacher.email,
        class
    )
}

//! Student profile command handlers

use super::{fail, or_fail, AppContext};
use crate::args::ProfileSubcommand;
use cgpa_tracker::core::aggregator::format_gpa;
use cgpa_tracker::core::api::ProfileStore;
use cgpa_tracker::core::models::{ProfileUpdate, StudentProfile};
use cgpa_tracker::info;

/// Dispatch profile subcommands (showing when none is given)
pub fn run(ctx: &AppContext, subcommand: Option<ProfileSubcommand>) {
    match subcommand {
        None | Some(ProfileSubcommand::Show) => {
            let reg = ctx.registration_id();
            let profile = or_fail(ctx.client().fetch_profile(&reg), "fetch profile");
            for line in profile_lines(&profile) {
                println!("{line}");
            }
        }
        Some(ProfileSubcommand::Edit {
            semester,
            mobile,
            address,
            parent_address,
        }) => {
            let update = ProfileUpdate {
                current_semester: semester,
                mobile,
                address,
                parent_address,
            };
            handle_edit(ctx, &update);
        }
    }
}

fn handle_edit(ctx: &AppContext, update: &ProfileUpdate) {
    if update.is_empty() {
        fail("Nothing to change. Pass --semester, --mobile, --address or --parent-address");
    }
    if let Err(e) = update.validate(ctx.total_semesters()) {
        fail(e);
    }
    let reg = ctx.registration_id();
    or_fail(ctx.client().update_profile(&reg, update), "update profile");
    info!("Updated profile of {reg}");
    println!("✓ Updated profile for {reg}");
}

/// Display lines for a profile; missing fields show as `-`
pub fn profile_lines(profile: &StudentProfile) -> Vec<String> {
    let or_dash = |value: Option<&str>| {
        value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or("-")
            .to_string()
    };
    vec![
        format!("{} ({})", profile.name, profile.registration_id),
        format!("  email:          {}", or_dash(Some(profile.email.as_str()))),
        format!(
            "  semester:       {}",
            profile
                .current_semester
                .map_or_else(|| "-".to_string(), |s| s.to_string())
        ),
        format!(
            "  class:          {}",
            profile
                .class()
                .map_or_else(|| "-".to_string(), |c| c.to_string())
        ),
        format!("  mobile:         {}", or_dash(profile.mobile.as_deref())),
        format!("  address:        {}", or_dash(profile.address.as_deref())),
        format!("  parent address: {}", or_dash(profile.parent_address.as_deref())),
        format!("  CGPA:           {}", format_gpa(profile.cgpa())),
        format!(
            "  target CGPA:    {}",
            profile
                .target_cgpa
                .map_or_else(|| "-".to_string(), |t| format_gpa(Some(t)))
        ),
    ]
}

//! Target CGPA command handlers

use super::{fail, history_for, or_fail, AppContext};
use crate::args::TargetSubcommand;
use cgpa_tracker::core::aggregator::format_gpa;
use cgpa_tracker::core::api::RecordStore;
use cgpa_tracker::core::models::history::validate_target;
use cgpa_tracker::core::projection::{
    project_target, Feasibility, ProjectionPolicy, TargetProjection,
};
use cgpa_tracker::info;

/// Dispatch target subcommands
pub fn run(ctx: &AppContext, subcommand: TargetSubcommand) {
    match subcommand {
        TargetSubcommand::Set { value } => handle_set(ctx, value),
        TargetSubcommand::Show => handle_show(ctx),
        TargetSubcommand::Project {
            target,
            policy,
            offline,
        } => handle_project(ctx, target, policy.as_deref(), &offline.sgpas),
    }
}

fn handle_set(ctx: &AppContext, value: f64) {
    if let Err(e) = validate_target(value, ctx.max_point()) {
        fail(e);
    }
    let reg = ctx.registration_id();
    or_fail(ctx.client().set_target(&reg, value), "store target CGPA");
    info!("Target CGPA for {reg} set to {value}");
    println!("✓ Target CGPA set to {value:.2}");
}

fn handle_show(ctx: &AppContext) {
    let reg = ctx.registration_id();
    match or_fail(ctx.client().fetch_target(&reg), "fetch target CGPA") {
        Some(target) => println!("Target CGPA: {target:.2}"),
        None => println!("No target CGPA set. Use `cgpa target set <CGPA>`"),
    }
}

fn handle_project(ctx: &AppContext, target: Option<f64>, policy: Option<&str>, sgpas: &[f64]) {
    let policy = policy.map_or(Ok(ctx.policy()), str::parse::<ProjectionPolicy>);
    let policy = policy.unwrap_or_else(|e| fail(e));

    let history = history_for(ctx, sgpas);
    let Some(target) = target.or(history.target_cgpa) else {
        fail("No target CGPA. Pass --target or store one with `cgpa target set`");
    };
    if let Err(e) = validate_target(target, ctx.max_point()) {
        fail(e);
    }

    let projection = project_target(
        history.records(),
        target,
        ctx.total_semesters(),
        policy,
        ctx.max_point(),
    );
    print_projection(&projection);
}

/// Print a projection as a short table
pub fn print_projection(projection: &TargetProjection) {
    println!(
        "Target {:.2} | current CGPA {} over {} of {} semesters | policy {}",
        projection.target_cgpa,
        format_gpa(projection.current_cgpa),
        projection.completed,
        projection.total_semesters,
        projection.policy
    );

    for (i, required) in projection.required.iter().enumerate() {
        let marker = if *required > projection.max_point {
            "  ⚠ above maximum"
        } else {
            ""
        };
        println!(
            "  semester {:>2}: {}{marker}",
            projection.completed + i + 1,
            format_gpa(Some(*required))
        );
    }

    match projection.feasibility() {
        Feasibility::Unreachable { .. } => {
            println!("✗ Target is {}", projection.feasibility());
        }
        other => println!("✓ Target is {other}"),
    }
}

//! Leave command handlers

use super::{fail, or_fail, AppContext};
use crate::args::LeaveSubcommand;
use cgpa_tracker::core::api::LeaveStore;
use cgpa_tracker::core::models::{LeaveRequest, LeaveStatus};
use cgpa_tracker::info;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Dispatch leave subcommands
pub fn run(ctx: &AppContext, subcommand: LeaveSubcommand) {
    match subcommand {
        LeaveSubcommand::Submit { from, to, reason } => handle_submit(ctx, &from, &to, reason),
        LeaveSubcommand::List => {
            let reg = ctx.registration_id();
            let leaves = or_fail(ctx.client().leaves_for(&reg), "fetch leave requests");
            print_leaves(&leaves);
        }
        LeaveSubcommand::Pending => {
            require_reviewer(ctx);
            let leaves: Vec<_> = or_fail(ctx.client().all_leaves(), "fetch leave requests")
                .into_iter()
                .filter(|l| l.status == LeaveStatus::Pending)
                .collect();
            print_leaves(&leaves);
        }
        LeaveSubcommand::Approve { id } => handle_decision(ctx, &id, LeaveStatus::Approved),
        LeaveSubcommand::Deny { id } => handle_decision(ctx, &id, LeaveStatus::Denied),
    }
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
/// Returns an error naming the bad value.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| format!("Invalid date '{raw}' (expected YYYY-MM-DD): {e}"))
}

fn handle_submit(ctx: &AppContext, from: &str, to: &str, reason: String) {
    let session = ctx.require_session();
    let from_date = parse_date(from).unwrap_or_else(|e| fail(e));
    let to_date = parse_date(to).unwrap_or_else(|e| fail(e));
    let request = LeaveRequest::new(
        session.registration_id.clone(),
        session.name.clone(),
        session.email.clone(),
        from_date,
        to_date,
        reason,
    )
    .unwrap_or_else(|e| fail(e));

    or_fail(ctx.client().submit_leave(&request), "submit leave request");
    info!(
        "Submitted leave for {} from {} to {}",
        request.registration_id, request.from_date, request.to_date
    );
    println!(
        "✓ Requested {} day(s) of leave from {} to {}",
        request.days(),
        request.from_date,
        request.to_date
    );
}

fn handle_decision(ctx: &AppContext, id: &str, status: LeaveStatus) {
    require_reviewer(ctx);
    or_fail(ctx.client().set_leave_status(id, status), "update leave request");
    info!("Leave request {id} marked {status}");
    println!("✓ Leave request {id} {}", status.to_string().to_lowercase());
}

fn require_reviewer(ctx: &AppContext) {
    let session = ctx.require_session();
    if !session.role.can_review_leave() {
        fail(format!(
            "Only teachers and admins can review leave (you are a {})",
            session.role
        ));
    }
}

fn print_leaves(leaves: &[LeaveRequest]) {
    if leaves.is_empty() {
        println!("No leave requests");
        return;
    }
    for leave in leaves {
        println!(
            "{:<26} {:<10} {} → {} ({}d)  {}  {}",
            leave.id.as_deref().unwrap_or("-"),
            leave.status.to_string(),
            leave.from_date,
            leave.to_date,
            leave.days(),
            leave.registration_id,
            leave.reason
        );
    }
}

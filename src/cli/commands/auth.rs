//! Auth command handlers

use super::{fail, prompt, AppContext};
use crate::args::AuthSubcommand;
use cgpa_tracker::core::auth::{
    flow, AuthError, LoginFlow, LoginState, Role, Session, SystemClock,
};
use cgpa_tracker::core::models::Registration;
use cgpa_tracker::{info, warn};
use std::time::Duration;

/// Dispatch auth subcommands
pub fn run(ctx: &AppContext, subcommand: AuthSubcommand) {
    match subcommand {
        AuthSubcommand::Login {
            email,
            role,
            password,
        } => handle_login(ctx, &email, role, password),
        AuthSubcommand::Logout => handle_logout(ctx),
        AuthSubcommand::Register {
            email,
            registration_id,
            name,
            dob,
            semester,
            gender,
            password,
        } => {
            let registration = Registration {
                email: email.trim().to_string(),
                registration_id: registration_id.trim().to_string(),
                name: name.trim().to_string(),
                dob,
                password: password.unwrap_or_else(|| prompt("Password: ")),
                current_semester: semester,
                gender,
            };
            handle_register(ctx, &registration);
        }
        AuthSubcommand::ResetPassword {
            email,
            token,
            password,
        } => handle_reset(ctx, email.as_deref(), token.as_deref(), password),
        AuthSubcommand::Status => handle_status(ctx),
    }
}

fn handle_login(ctx: &AppContext, email: &str, role: Role, password: Option<String>) {
    let password = password.unwrap_or_else(|| prompt("Password: "));
    let client = ctx.client();
    let mut login = LoginFlow::new(
        &client,
        SystemClock::new(),
        ctx.config.auth.otp_length,
        Duration::from_secs(ctx.config.auth.resend_secs),
    )
    .with_role(role);

    match login.submit_credentials(email, &password) {
        Ok(LoginState::AwaitingOtp { email, .. }) => {
            println!("A passcode was sent to {email}");
        }
        Ok(_) => {}
        Err(e) => fail(format!("Login failed: {e}")),
    }

    while matches!(login.state(), LoginState::AwaitingOtp { .. }) {
        let input = prompt(&format!(
            "Enter the {}-digit passcode (r = resend, q = quit): ",
            ctx.config.auth.otp_length
        ));
        match input.as_str() {
            "q" | "Q" => {
                login.cancel();
                fail("Login cancelled");
            }
            "r" | "R" => match login.resend() {
                Ok(()) => println!("✓ A new passcode was sent"),
                Err(AuthError::ResendTooSoon { remaining_secs }) => {
                    println!("Please wait {remaining_secs}s before requesting another passcode");
                }
                Err(e) => fail(format!("Could not resend passcode: {e}")),
            },
            code => match login.verify(code) {
                Ok(_) => {}
                Err(AuthError::InvalidOtp) => println!("✗ That passcode is not valid, try again"),
                Err(e) => fail(format!("Verification failed: {e}")),
            },
        }
    }

    let Some(session) = login.into_session() else {
        fail("Login did not complete");
    };
    let path = ctx.session_path();
    if let Err(e) = session.save(&path) {
        fail(e);
    }
    info!("Session saved to {}", path.display());
    if session.role == Role::Student {
        println!(
            "✓ Logged in as {} ({}, {})",
            session.name, session.registration_id, session.role
        );
    } else {
        println!("✓ Logged in as {} ({})", session.email, session.role);
    }
}

fn handle_logout(ctx: &AppContext) {
    match Session::clear(&ctx.session_path()) {
        Ok(true) => println!("✓ Logged out"),
        Ok(false) => println!("✓ No saved session"),
        Err(e) => fail(e),
    }
}

fn handle_register(ctx: &AppContext, registration: &Registration) {
    let client = ctx.client();
    if let Err(e) = flow::register(
        &client,
        registration,
        &ctx.config.auth.email_domain,
        ctx.total_semesters(),
    ) {
        fail(format!("Registration failed: {e}"));
    }
    println!(
        "✓ Registered {}. Log in with `cgpa auth login --email {}` to verify your email",
        registration.registration_id, registration.email
    );
}

fn handle_reset(
    ctx: &AppContext,
    email: Option<&str>,
    token: Option<&str>,
    password: Option<String>,
) {
    let client = ctx.client();
    if let Some(token) = token {
        let password = password.unwrap_or_else(|| prompt("New password: "));
        if let Err(e) = flow::complete_password_reset(&client, token, &password) {
            fail(format!("Password reset failed: {e}"));
        }
        println!("✓ Password changed. You can now log in");
    } else if let Some(email) = email {
        if let Err(e) = flow::request_password_reset(&client, email) {
            fail(format!("Password reset failed: {e}"));
        }
        println!("✓ Reset instructions were sent to {email}");
    }
}

fn handle_status(ctx: &AppContext) {
    let Some(session) = &ctx.session else {
        println!("Not logged in");
        return;
    };
    println!("Logged in as {} <{}>", session.name, session.email);
    println!("  registration: {}", session.registration_id);
    println!("  role:         {}", session.role);
    if let Some(class) = &session.class {
        println!("  class:        {class}");
    }
    println!(
        "  since:        {}",
        session.logged_in_at.format("%Y-%m-%d %H:%M UTC")
    );
    if !session.verified {
        warn!("Email address is not verified");
        println!("  ⚠ email not verified");
    }
}

//! Login, registration, and password reset flows

use super::otp::OtpCode;
use super::session::{Role, Session};
use super::timer::{Clock, ResendTimer, TimerState};
use super::AuthError;
use crate::core::api::{ApiError, AuthService, LoginResponse};
use crate::core::models::registration::MIN_PASSWORD_LEN;
use crate::core::models::Registration;
use crate::{debug, info};
use std::time::Duration;

/// Where a login currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    /// Waiting for email and password
    Credentials,
    /// Credentials accepted; a passcode was sent to `email`
    AwaitingOtp {
        /// Address the passcode went to
        email: String,
        /// Login response held until the passcode is verified
        pending: LoginResponse,
    },
    /// Logged in
    Authenticated(Session),
}

/// Drives one login attempt from credentials to a verified session
///
/// Accounts the backend already reports as verified skip the passcode step. Teacher
/// and admin portals have no passcode step at all.
pub struct LoginFlow<'a, A: AuthService + ?Sized, C: Clock> {
    auth: &'a A,
    timer: ResendTimer<C>,
    otp_length: usize,
    role: Role,
    state: LoginState,
}

impl<'a, A: AuthService + ?Sized, C: Clock> LoginFlow<'a, A, C> {
    /// Start a flow against `auth`
    pub const fn new(auth: &'a A, clock: C, otp_length: usize, resend_after: Duration) -> Self {
        Self {
            auth,
            timer: ResendTimer::new(clock, resend_after),
            otp_length,
            role: Role::Student,
            state: LoginState::Credentials,
        }
    }

    /// Log in through the portal for `role` instead of the student one
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Current state
    pub const fn state(&self) -> &LoginState {
        &self.state
    }

    /// Countdown state while a passcode is outstanding
    pub fn resend_state(&mut self) -> TimerState {
        self.timer.poll()
    }

    /// Submit credentials.
    ///
    /// # Errors
    /// Returns `Api` if the backend rejects the credentials or cannot send a passcode.
    pub fn submit_credentials(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<&LoginState, AuthError> {
        let email = email.trim();
        let response = self.auth.login_as(self.role, email, password)?;
        if self.role != Role::Student {
            let mut session = Session::from_login(&response);
            session.role = self.role;
            session.verified = true;
            if session.email.is_empty() {
                session.email = email.to_string();
            }
            info!("Logged in as {} {email}", self.role);
            self.state = LoginState::Authenticated(session);
        } else if response.user.verified {
            info!("Logged in as {}", response.user.registration_id);
            self.state = LoginState::Authenticated(Session::from_login(&response));
        } else {
            debug!("Account {email} is unverified; requesting passcode");
            self.auth.generate_otp(email)?;
            self.timer.start();
            self.state = LoginState::AwaitingOtp {
                email: email.to_string(),
                pending: response,
            };
        }
        Ok(&self.state)
    }

    /// Verify an entered passcode and finish the login.
    ///
    /// # Errors
    /// Returns `InvalidOtp` for malformed or rejected codes, `Session` when no passcode
    /// is outstanding, and `Api` for other backend failures.
    pub fn verify(&mut self, input: &str) -> Result<Session, AuthError> {
        let LoginState::AwaitingOtp { email, pending } = &self.state else {
            return Err(AuthError::Session("no passcode is pending".to_string()));
        };
        let code = OtpCode::parse(input, self.otp_length)?;
        self.auth
            .verify_otp(email, code.as_str())
            .map_err(reject_as_invalid_otp)?;

        let mut session = Session::from_login(pending);
        session.verified = true;
        self.timer.cancel();
        info!("Verified {email}");
        self.state = LoginState::Authenticated(session.clone());
        Ok(session)
    }

    /// Ask for another passcode.
    ///
    /// # Errors
    /// Returns `ResendTooSoon` while the countdown runs, `Session` when no passcode is
    /// outstanding, and `Api` when the backend cannot send one.
    pub fn resend(&mut self) -> Result<(), AuthError> {
        let LoginState::AwaitingOtp { email, .. } = &self.state else {
            return Err(AuthError::Session("no passcode is pending".to_string()));
        };
        self.timer.try_resend()?;
        if let Err(e) = self.auth.generate_otp(email) {
            self.timer.cancel();
            return Err(e.into());
        }
        Ok(())
    }

    /// Abandon the attempt and return to the credentials step.
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.state = LoginState::Credentials;
    }

    /// The session, once authenticated
    pub fn into_session(self) -> Option<Session> {
        match self.state {
            LoginState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Client-side rejections (400/401/403) of a passcode mean the code was wrong.
fn reject_as_invalid_otp(error: ApiError) -> AuthError {
    match error {
        ApiError::Status {
            code: 400 | 401 | 403,
            ..
        } => AuthError::InvalidOtp,
        other => AuthError::Api(other),
    }
}

/// Validate and submit a registration.
///
/// # Errors
/// Returns `InvalidRegistration` for invalid fields and `Api` if the backend rejects it.
pub fn register<A: AuthService + ?Sized>(
    auth: &A,
    registration: &Registration,
    email_domain: &str,
    total_semesters: u8,
) -> Result<(), AuthError> {
    registration
        .validate(email_domain, total_semesters)
        .map_err(AuthError::InvalidRegistration)?;
    auth.register(registration)?;
    info!("Registered {}", registration.registration_id);
    Ok(())
}

/// Start a password reset for `email`.
///
/// # Errors
/// Returns `Api` if the backend refuses.
pub fn request_password_reset<A: AuthService + ?Sized>(
    auth: &A,
    email: &str,
) -> Result<(), AuthError> {
    auth.request_password_reset(email.trim())?;
    Ok(())
}

/// Finish a password reset with the emailed token.
///
/// # Errors
/// Returns `InvalidPassword` for a short password and `Api` if the token is rejected.
pub fn complete_password_reset<A: AuthService + ?Sized>(
    auth: &A,
    token: &str,
    new_password: &str,
) -> Result<(), AuthError> {
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::InvalidPassword(format!(
            "password must have at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    auth.reset_password(token.trim(), new_password)?;
    Ok(())
}

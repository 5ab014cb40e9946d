//! Authentication: sessions, passcodes, and the login flow

pub mod flow;
pub mod otp;
pub mod session;
pub mod timer;

pub use flow::{LoginFlow, LoginState};
pub use otp::OtpCode;
pub use session::{Role, Session};
pub use timer::{Clock, ManualClock, ResendTimer, SystemClock, TimerState};

use crate::core::api::ApiError;
use thiserror::Error;

/// Errors from authentication flows
#[derive(Debug, Error)]
pub enum AuthError {
    /// The passcode is malformed or was rejected
    #[error("invalid one-time passcode")]
    InvalidOtp,
    /// A resend was requested before the countdown elapsed
    #[error("a new passcode can be requested in {remaining_secs}s")]
    ResendTooSoon {
        /// Seconds left on the countdown
        remaining_secs: u64,
    },
    /// The account's email has not been verified
    #[error("email address is not verified; log in again to receive a passcode")]
    NotVerified,
    /// A registration field is invalid
    #[error("invalid registration: {0}")]
    InvalidRegistration(String),
    /// A new password does not meet the rules
    #[error("invalid password: {0}")]
    InvalidPassword(String),
    /// The backend call failed
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The saved session cannot be used
    #[error("session error: {0}")]
    Session(String),
}

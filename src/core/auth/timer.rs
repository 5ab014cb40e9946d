//! Passcode resend countdown
//!
//! [`ResendTimer`] is polled rather than callback driven: the caller asks for the
//! state whenever it needs it, and cancelling is a plain method call.

use super::AuthError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time source
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose origin is the moment of creation
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicU64,
}

impl ManualClock {
    /// Clock at time zero
    #[must_use]
    pub const fn new() -> Self {
        Self {
            millis: AtomicU64::new(0),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.millis.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

/// Observable state of a [`ResendTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// No countdown is running; a resend is allowed
    Idle,
    /// Counting down
    Running {
        /// Whole seconds left, rounded up
        remaining_secs: u64,
    },
}

/// Cancellable countdown gating passcode resends
#[derive(Debug)]
pub struct ResendTimer<C: Clock> {
    clock: C,
    period: Duration,
    deadline: Option<Duration>,
}

impl<C: Clock> ResendTimer<C> {
    /// Idle timer counting down `period` once started
    pub const fn new(clock: C, period: Duration) -> Self {
        Self {
            clock,
            period,
            deadline: None,
        }
    }

    /// Countdown length
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Start (or restart) the countdown.
    pub fn start(&mut self) {
        self.deadline = Some(self.clock.now() + self.period);
    }

    /// Stop the countdown without waiting for it.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Time left, `None` when idle.
    pub fn remaining(&self) -> Option<Duration> {
        let deadline = self.deadline?;
        let left = deadline.saturating_sub(self.clock.now());
        (!left.is_zero()).then_some(left)
    }

    /// Current state. An elapsed countdown returns the timer to idle.
    pub fn poll(&mut self) -> TimerState {
        match self.remaining() {
            Some(left) => TimerState::Running {
                remaining_secs: ceil_secs(left),
            },
            None => {
                self.deadline = None;
                TimerState::Idle
            }
        }
    }

    /// Whether a resend is allowed right now
    pub fn is_idle(&mut self) -> bool {
        self.poll() == TimerState::Idle
    }

    /// Claim a resend: restarts the countdown when idle.
    ///
    /// # Errors
    /// Returns `ResendTooSoon` while the countdown is running.
    pub fn try_resend(&mut self) -> Result<(), AuthError> {
        match self.poll() {
            TimerState::Running { remaining_secs } => {
                Err(AuthError::ResendTooSoon { remaining_secs })
            }
            TimerState::Idle => {
                self.start();
                Ok(())
            }
        }
    }
}

fn ceil_secs(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}

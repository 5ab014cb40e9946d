//! CLI command handlers for `cgpa-tracker`.
//!
//! Each command is implemented in its own submodule. Handlers print `✓`/`✗` lines and
//! exit non-zero on failure.

pub mod admin;
pub mod auth;
pub mod cgpa;
pub mod class;
pub mod config;
pub mod docs;
pub mod history;
pub mod leave;
pub mod profile;
pub mod report;
pub mod sgpa;
pub mod target;

use cgpa_tracker::config::Config;
use cgpa_tracker::core::aggregator::AcademicAggregator;
use cgpa_tracker::core::api::{ApiClient, ApiError};
use cgpa_tracker::core::auth::Session;
use cgpa_tracker::core::models::{SemesterRecord, StudentAcademicHistory};
use cgpa_tracker::core::projection::ProjectionPolicy;
use cgpa_tracker::logger;
use cgpa_tracker::{error, warn};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

/// Print an error and exit with status 1.
pub fn fail(message: impl Display) -> ! {
    if logger::is_file_logging() {
        error!("{message}");
    }
    eprintln!("✗ {message}");
    std::process::exit(1)
}

/// Everything a handler needs: effective config plus the saved session
pub struct AppContext {
    /// Configuration with CLI overrides applied
    pub config: Config,
    /// Logged-in session, if any
    pub session: Option<Session>,
    reg_override: Option<String>,
    aggregator: AcademicAggregator,
    policy: ProjectionPolicy,
}

impl AppContext {
    /// Build the context, loading the session from `paths.session_file`.
    pub fn new(config: Config, reg_override: Option<String>) -> Self {
        let aggregator = config
            .aggregator()
            .unwrap_or_else(|e| fail(format!("Invalid grade configuration: {e}")));
        let policy = config
            .projection_policy()
            .unwrap_or_else(|e| fail(format!("Invalid projection setting: {e}")));
        let session = match Session::load(&session_path(&config)) {
            Ok(session) => session,
            Err(e) => {
                warn!("Ignoring saved session: {e}");
                None
            }
        };
        Self {
            config,
            session,
            reg_override: reg_override.filter(|r| !r.trim().is_empty()),
            aggregator,
            policy,
        }
    }

    /// The single aggregator every command computes through
    pub const fn aggregator(&self) -> &AcademicAggregator {
        &self.aggregator
    }

    /// Configured projection policy
    pub const fn policy(&self) -> ProjectionPolicy {
        self.policy
    }

    /// Programme length
    pub const fn total_semesters(&self) -> u8 {
        self.config.academics.total_semesters
    }

    /// Maximum grade point
    pub fn max_point(&self) -> f64 {
        self.aggregator.scale().max_point()
    }

    /// Where the session is saved
    pub fn session_path(&self) -> PathBuf {
        session_path(&self.config)
    }

    /// HTTP client with the session token, falling back to `api.token`.
    pub fn client(&self) -> ApiClient {
        let token = self
            .session
            .as_ref()
            .map(|s| s.token.clone())
            .or_else(|| Some(self.config.api.token.clone()));
        let timeout = (self.config.api.timeout_secs > 0)
            .then(|| Duration::from_secs(self.config.api.timeout_secs));
        ApiClient::new(&self.config.api.endpoint, token, timeout).unwrap_or_else(|e| fail(e))
    }

    /// The logged-in session, or exit.
    pub fn require_session(&self) -> &Session {
        self.session
            .as_ref()
            .unwrap_or_else(|| fail("Not logged in. Run `cgpa auth login --email <EMAIL>` first"))
    }

    /// Registration number: `--reg` when given, else the logged-in student.
    pub fn registration_id(&self) -> String {
        self.reg_override
            .clone()
            .or_else(|| self.session.as_ref().map(|s| s.registration_id.clone()))
            .unwrap_or_else(|| {
                fail("No registration number. Log in with `cgpa auth login` or pass --reg")
            })
    }
}

fn session_path(config: &Config) -> PathBuf {
    if config.paths.session_file.is_empty() {
        Config::get_app_dir().join("session.json")
    } else {
        PathBuf::from(&config.paths.session_file)
    }
}

/// Exit on a boundary error.
pub fn or_fail<T>(result: Result<T, ApiError>, action: &str) -> T {
    result.unwrap_or_else(|e| fail(format!("Failed to {action}: {e}")))
}

/// History built from `--sgpa` values, numbering semesters from 1.
///
/// Only the first `total_semesters` values are used.
pub fn offline_history(
    registration_id: &str,
    sgpas: &[f64],
    total_semesters: u8,
) -> StudentAcademicHistory {
    let kept = sgpas.len().min(usize::from(total_semesters));
    if kept < sgpas.len() {
        warn!(
            "Ignoring {} SGPA values beyond semester {total_semesters}",
            sgpas.len() - kept
        );
    }
    let records = sgpas[..kept]
        .iter()
        .zip(1..=total_semesters)
        .map(|(sgpa, semester)| SemesterRecord::new(semester, *sgpa))
        .collect();
    StudentAcademicHistory::from_records(registration_id.to_string(), records)
        .unwrap_or_else(|e| fail(e))
}

/// Print `label` and read one trimmed line from stdin.
pub fn prompt(label: &str) -> String {
    print!("{label}");
    io::stdout().flush().ok();
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        fail("Failed to read from stdin");
    }
    line.trim().to_string()
}

/// History from `--sgpa` values when given, otherwise fetched from the backend.
///
/// Backend histories come with the stored target; offline ones have none.
pub fn history_for(ctx: &AppContext, sgpas: &[f64]) -> StudentAcademicHistory {
    use cgpa_tracker::core::api::RecordStore;

    if sgpas.is_empty() {
        let reg = ctx.registration_id();
        or_fail(ctx.client().load_history(&reg), "fetch semester history")
    } else {
        let reg = ctx
            .reg_override
            .clone()
            .or_else(|| ctx.session.as_ref().map(|s| s.registration_id.clone()))
            .unwrap_or_else(|| "local".to_string());
        let history = offline_history(&reg, sgpas, ctx.total_semesters());
        for record in history.records() {
            if let Err(e) = record.validate(ctx.total_semesters(), ctx.max_point()) {
                fail(e);
            }
        }
        history
    }
}

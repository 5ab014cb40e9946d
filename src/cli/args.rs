//! CLI argument definitions for `cgpa-tracker`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use cgpa_tracker::config::ConfigOverrides;
use cgpa_tracker::core::auth::Role;
use cgpa_tracker::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `endpoint`, `total_semesters`, `grade.A+`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Semester SGPA values given directly instead of fetched
#[derive(Debug, Clone, Default, clap::Args)]
pub struct OfflineHistory {
    /// SGPA of a completed semester, in semester order (repeatable; skips the backend)
    #[arg(long = "sgpa", value_name = "SGPA")]
    pub sgpas: Vec<f64>,
}

#[derive(Debug, Subcommand)]
pub enum TargetSubcommand {
    /// Store a target CGPA.
    Set {
        /// Target CGPA
        #[arg(value_name = "CGPA")]
        value: f64,
    },
    /// Show the stored target CGPA.
    Show,
    /// Show the SGPA needed in each remaining semester.
    Project {
        /// Target to project instead of the stored one
        #[arg(long, value_name = "CGPA")]
        target: Option<f64>,

        /// Distribution policy (uniform, front-loaded)
        #[arg(long, value_name = "POLICY")]
        policy: Option<String>,

        #[command(flatten)]
        offline: OfflineHistory,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistorySubcommand {
    /// List stored semester records with running CGPA.
    List,
    /// Change the SGPA of a stored semester.
    Edit {
        /// Semester number
        #[arg(value_name = "SEMESTER")]
        semester: u8,
        /// New SGPA
        #[arg(value_name = "SGPA")]
        sgpa: f64,
    },
    /// Delete a stored semester.
    Delete {
        /// Semester number
        #[arg(value_name = "SEMESTER")]
        semester: u8,
    },
}

#[derive(Debug, Subcommand)]
pub enum AuthSubcommand {
    /// Log in and save the session; unverified accounts are asked for a passcode.
    Login {
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Portal to log in through (student, teacher, admin)
        #[arg(long = "as", value_name = "ROLE", default_value = "student")]
        role: Role,
        /// Account password (prompted when omitted)
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,
    },
    /// Forget the saved session.
    Logout,
    /// Create an account.
    Register {
        /// Institutional email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Registration number
        #[arg(long = "reg-no", value_name = "REG")]
        registration_id: String,
        /// Full name
        #[arg(long, value_name = "NAME")]
        name: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        dob: String,
        /// Current semester
        #[arg(long, value_name = "N")]
        semester: u8,
        /// Gender
        #[arg(long, value_name = "GENDER", default_value = "")]
        gender: String,
        /// Password (prompted when omitted)
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,
    },
    /// Request a password reset, or finish one with --token.
    ResetPassword {
        /// Account email (to request a reset)
        #[arg(long, value_name = "EMAIL", required_unless_present = "token")]
        email: Option<String>,
        /// Reset token from the email (to finish a reset)
        #[arg(long, value_name = "TOKEN")]
        token: Option<String>,
        /// New password (prompted when omitted)
        #[arg(long, value_name = "PASSWORD", requires = "token")]
        password: Option<String>,
    },
    /// Show who is logged in.
    Status,
}

#[derive(Debug, Subcommand)]
pub enum LeaveSubcommand {
    /// Request leave.
    Submit {
        /// First day (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        from: String,
        /// Last day (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        to: String,
        /// Reason
        #[arg(long, value_name = "TEXT")]
        reason: String,
    },
    /// List your leave requests.
    List,
    /// List pending requests from all students (teachers and admins).
    Pending,
    /// Approve a request (teachers and admins).
    Approve {
        /// Request id
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Deny a request (teachers and admins).
    Deny {
        /// Request id
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum DocsSubcommand {
    /// Add a certificate or resume link.
    Add {
        /// certificate or resume
        #[arg(value_name = "KIND")]
        kind: String,
        /// Title (course name for certificates)
        #[arg(long, value_name = "TITLE")]
        title: String,
        /// Link URL
        #[arg(long, value_name = "URL")]
        url: String,
    },
    /// List links (both kinds when KIND is omitted).
    List {
        /// certificate or resume
        #[arg(value_name = "KIND")]
        kind: Option<String>,
    },
    /// Change the title or URL of a link.
    Edit {
        /// certificate or resume
        #[arg(value_name = "KIND")]
        kind: String,
        /// Link id
        #[arg(value_name = "ID")]
        id: String,
        /// New title
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,
        /// New URL
        #[arg(long, value_name = "URL")]
        url: Option<String>,
    },
    /// Delete a link.
    Delete {
        /// certificate or resume
        #[arg(value_name = "KIND")]
        kind: String,
        /// Link id
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileSubcommand {
    /// Show the student profile.
    Show,
    /// Change profile fields; only the given ones are sent.
    Edit {
        /// Current semester
        #[arg(long, value_name = "N")]
        semester: Option<u8>,
        /// Mobile number
        #[arg(long, value_name = "NUMBER")]
        mobile: Option<String>,
        /// Postal address
        #[arg(long, value_name = "TEXT")]
        address: Option<String>,
        /// Parent's postal address
        #[arg(long = "parent-address", value_name = "TEXT")]
        parent_address: Option<String>,
    },
}

/// Class to act on; defaults to the class on the saved session
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ClassArgs {
    /// Year of study (1-4)
    #[arg(long, value_name = "YEAR")]
    pub year: Option<u8>,
    /// Section letter
    #[arg(long, value_name = "SECTION")]
    pub section: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ClassSubcommand {
    /// List the students of a class with their CGPA.
    Students {
        #[command(flatten)]
        class: ClassArgs,
    },
    /// Count the students of a class.
    Count {
        #[command(flatten)]
        class: ClassArgs,
    },
    /// Show the students with the highest CGPA.
    Top {
        #[command(flatten)]
        class: ClassArgs,
    },
    /// Show every student's CGPA and the class average.
    Cgpa {
        #[command(flatten)]
        class: ClassArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminSubcommand {
    /// Create a teacher account in charge of a class.
    AddTeacher {
        /// Full name
        #[arg(long, value_name = "NAME")]
        name: String,
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        dob: String,
        /// Gender
        #[arg(long, value_name = "GENDER", default_value = "")]
        gender: String,
        /// Year of the assigned class (1-4)
        #[arg(long, value_name = "YEAR")]
        year: u8,
        /// Section of the assigned class
        #[arg(long, value_name = "SECTION")]
        section: String,
        /// Password (prompted when omitted)
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,
    },
    /// List teacher accounts.
    Teachers,
    /// Delete a teacher account.
    RemoveTeacher {
        /// Teacher id
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Compute a semester's SGPA from course grades.
    ///
    /// Courses come from repeated --course CREDITS:GRADE pairs and/or a CSV file with
    /// `credits,grade` columns. Invalid rows are skipped and reported.
    Sgpa {
        /// Course as CREDITS:GRADE, e.g. `4:A+` (repeatable)
        #[arg(short, long = "course", value_name = "CREDITS:GRADE")]
        courses: Vec<String>,

        /// CSV file with `credits,grade` columns
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Save the result as this semester's SGPA
        #[arg(long, value_name = "N")]
        save: Option<u8>,
    },
    /// Show the cumulative CGPA.
    Cgpa {
        #[command(flatten)]
        offline: OfflineHistory,
    },
    /// Manage and project the target CGPA.
    Target {
        #[command(subcommand)]
        subcommand: TargetSubcommand,
    },
    /// View and edit stored semester records.
    History {
        #[command(subcommand)]
        subcommand: Option<HistorySubcommand>,
    },
    /// Write a tracker report (semester table, target projection).
    Report {
        /// Output file path (optional; defaults to the reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "markdown")]
        format: String,

        #[command(flatten)]
        offline: OfflineHistory,

        /// Target CGPA to project in the report instead of the stored one
        #[arg(long, value_name = "CGPA")]
        target: Option<f64>,
    },
    /// Log in, register, and manage the session.
    Auth {
        #[command(subcommand)]
        subcommand: AuthSubcommand,
    },
    /// Submit and review leave requests.
    Leave {
        #[command(subcommand)]
        subcommand: LeaveSubcommand,
    },
    /// Manage certificate and resume links.
    Docs {
        #[command(subcommand)]
        subcommand: DocsSubcommand,
    },
    /// Show or edit the student profile.
    Profile {
        #[command(subcommand)]
        subcommand: Option<ProfileSubcommand>,
    },
    /// Class dashboard for teachers and admins.
    Class {
        #[command(subcommand)]
        subcommand: ClassSubcommand,
    },
    /// Manage teacher accounts (admins).
    Admin {
        #[command(subcommand)]
        subcommand: AdminSubcommand,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "cgpa",
    about = "Compute, store, and project SGPA/CGPA against the student record portal",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug", global = true)]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Registration number to act on (defaults to the logged-in student)
    #[arg(long, value_name = "REG", global = true)]
    pub reg: Option<String>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config API token
    #[arg(long = "config-token", value_name = "TOKEN")]
    pub config_token: Option<String>,

    /// Override config API token (short form)
    #[arg(long = "token", value_name = "TOKEN", global = true)]
    pub token: Option<String>,

    /// Override config API endpoint
    #[arg(long = "config-endpoint", value_name = "URL")]
    pub config_endpoint: Option<String>,

    /// Override config API endpoint (short form)
    #[arg(long = "endpoint", value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Override the programme length in semesters
    #[arg(long = "semesters", value_name = "N", global = true)]
    pub total_semesters: Option<u8>,

    /// Override the projection policy (uniform, front-loaded)
    #[arg(long = "projection", value_name = "POLICY", global = true)]
    pub projection: Option<String>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--token`) take precedence over long-form flags
    /// (e.g., `--config-token`) when both are provided.
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            token: self.token.clone().or_else(|| self.config_token.clone()),
            endpoint: self
                .endpoint
                .clone()
                .or_else(|| self.config_endpoint.clone()),
            total_semesters: self.total_semesters,
            projection: self.projection.clone(),
            reports_dir: self
                .reports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

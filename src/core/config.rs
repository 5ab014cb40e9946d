//! Configuration module for `cgpa-tracker`

use crate::core::aggregator::AcademicAggregator;
use crate::core::grades::{GradePoint, GradeScale, DEFAULT_MAX_POINT};
use crate::core::models::DEFAULT_TOTAL_SEMESTERS;
use crate::core::projection::ProjectionPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory inside string values
const DIR_VARIABLE: &str = "$CGPA_TRACKER";

const fn default_total_semesters() -> u8 {
    DEFAULT_TOTAL_SEMESTERS
}

const fn default_max_point() -> f64 {
    DEFAULT_MAX_POINT
}

const fn default_otp_length() -> usize {
    4
}

const fn default_resend_secs() -> u64 {
    30
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Record-store / auth REST API configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the portal backend
    #[serde(default)]
    pub endpoint: String,
    /// Fallback bearer token, used when no login session exists
    #[serde(default)]
    pub token: String,
    /// Request timeout in seconds (0 disables the timeout)
    #[serde(default)]
    pub timeout_secs: u64,
}

/// Programme and grading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicsConfig {
    /// Number of semesters in the programme
    #[serde(default = "default_total_semesters")]
    pub total_semesters: u8,
    /// Maximum grade point per course and per semester
    #[serde(default = "default_max_point")]
    pub max_point: f64,
    /// Policy for spreading required points over remaining semesters
    #[serde(default)]
    pub projection: String,
}

impl Default for AcademicsConfig {
    fn default() -> Self {
        Self {
            total_semesters: default_total_semesters(),
            max_point: default_max_point(),
            projection: String::new(),
        }
    }
}

/// Authentication flow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Number of digits in a one-time passcode
    #[serde(default = "default_otp_length")]
    pub otp_length: usize,
    /// Seconds before a passcode may be re-sent
    #[serde(default = "default_resend_secs")]
    pub resend_secs: u64,
    /// Required email domain for registration (empty accepts any)
    #[serde(default)]
    pub email_domain: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            otp_length: default_otp_length(),
            resend_secs: default_resend_secs(),
            email_domain: String::new(),
        }
    }
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for tracker report output files
    #[serde(default)]
    pub reports_dir: String,
    /// File holding the logged-in session
    #[serde(default)]
    pub session_file: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Programme settings
    #[serde(default)]
    pub academics: AcademicsConfig,
    /// Authentication settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Grade point overrides keyed by grade label (e.g. `"A+" = 9.0`)
    #[serde(default)]
    pub grades: BTreeMap<String, f64>,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override API endpoint
    pub endpoint: Option<String>,
    /// Override API token
    pub token: Option<String>,
    /// Override programme length
    pub total_semesters: Option<u8>,
    /// Override projection policy
    pub projection: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

impl Config {
    /// Get the `$CGPA_TRACKER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/cgpa-tracker`
    /// - macOS: `~/Library/Application Support/cgpa-tracker`
    /// - Windows: `%APPDATA%\cgpa-tracker`
    #[must_use]
    pub fn get_app_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cgpa-tracker")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are updated;
    /// numeric fields get their defaults from serde when absent.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        for (field, default) in [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.api.endpoint, &defaults.api.endpoint),
            (&mut self.academics.projection, &defaults.academics.projection),
            (&mut self.paths.reports_dir, &defaults.paths.reports_dir),
            (&mut self.paths.session_file, &defaults.paths.session_file),
        ] {
            if field.is_empty() && !default.is_empty() {
                field.clone_from(default);
                changed = true;
            }
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides affect this run only; they are not written to the config file
    /// unless the caller saves.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(endpoint) = &overrides.endpoint {
            self.api.endpoint.clone_from(endpoint);
        }
        if let Some(token) = &overrides.token {
            self.api.token.clone_from(token);
        }
        if let Some(total) = overrides.total_semesters {
            self.academics.total_semesters = total;
        }
        if let Some(projection) = &overrides.projection {
            self.academics.projection.clone_from(projection);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_app_dir`](Self::get_app_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_app_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$CGPA_TRACKER` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let app_dir = Self::get_app_dir();
            value.replace(DIR_VARIABLE, app_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults and `$CGPA_TRACKER` is expanded in
    /// path-like values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.api.endpoint = Self::expand_variables(&config.api.endpoint);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);
        config.paths.session_file = Self::expand_variables(&config.paths.session_file);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The defaults are
    /// compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: loads it, merges missing fields from defaults, and
    ///   saves the merged result
    /// - On first run: creates the config directory and writes the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file cannot be
    /// written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `endpoint`, `token`, `timeout_secs`,
    /// `total_semesters`, `max_point`, `projection`, `otp_length`, `resend_secs`,
    /// `email_domain`, `reports_dir`, `session_file`, and `grade.<LABEL>`
    /// (e.g. `grade.A+`).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(label) = key.strip_prefix("grade.") {
            let grade = GradePoint::from_label(label)?;
            return Some(
                self.grades
                    .iter()
                    .find(|(k, _)| GradePoint::from_label(k) == Some(grade))
                    .map_or_else(|| grade.default_point(), |(_, v)| *v)
                    .to_string(),
            );
        }

        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "endpoint" => Some(self.api.endpoint.clone()),
            "token" => Some(self.api.token.clone()),
            "timeout_secs" | "timeout-secs" => Some(self.api.timeout_secs.to_string()),
            "total_semesters" | "total-semesters" => {
                Some(self.academics.total_semesters.to_string())
            }
            "max_point" | "max-point" => Some(self.academics.max_point.to_string()),
            "projection" => Some(self.academics.projection.clone()),
            "otp_length" | "otp-length" => Some(self.auth.otp_length.to_string()),
            "resend_secs" | "resend-secs" => Some(self.auth.resend_secs.to_string()),
            "email_domain" | "email-domain" => Some(self.auth.email_domain.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "session_file" | "session-file" => Some(self.paths.session_file.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Numeric and enumerated values are validated. Call [`save()`](Config::save) to
    /// persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        if let Some(label) = key.strip_prefix("grade.") {
            let grade = GradePoint::from_label(label)
                .ok_or_else(|| format!("Unknown grade in key: '{key}'"))?;
            let point = parse_value::<f64>(key, value)?;
            let mut grades = self.grades.clone();
            grades.retain(|k, _| GradePoint::from_label(k) != Some(grade));
            grades.insert(grade.label().to_string(), point);
            GradeScale::with_overrides(&grades, self.academics.max_point)?;
            self.grades = grades;
            return Ok(());
        }

        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_value(key, value)?,
            "endpoint" => self.api.endpoint = value.to_string(),
            "token" => self.api.token = value.to_string(),
            "timeout_secs" | "timeout-secs" => self.api.timeout_secs = parse_value(key, value)?,
            "total_semesters" | "total-semesters" => {
                let total: u8 = parse_value(key, value)?;
                if total == 0 {
                    return Err("total_semesters must be at least 1".to_string());
                }
                self.academics.total_semesters = total;
            }
            "max_point" | "max-point" => {
                let max_point: f64 = parse_value(key, value)?;
                GradeScale::with_overrides(&self.grades, max_point)?;
                self.academics.max_point = max_point;
            }
            "projection" => {
                value.parse::<ProjectionPolicy>()?;
                self.academics.projection = value.to_string();
            }
            "otp_length" | "otp-length" => {
                let len: usize = parse_value(key, value)?;
                if len == 0 {
                    return Err("otp_length must be at least 1".to_string());
                }
                self.auth.otp_length = len;
            }
            "resend_secs" | "resend-secs" => self.auth.resend_secs = parse_value(key, value)?,
            "email_domain" | "email-domain" => self.auth.email_domain = value.to_string(),
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            "session_file" | "session-file" => self.paths.session_file = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        if let Some(label) = key.strip_prefix("grade.") {
            let grade = GradePoint::from_label(label)
                .ok_or_else(|| format!("Unknown grade in key: '{key}'"))?;
            self.grades
                .retain(|k, _| GradePoint::from_label(k) != Some(grade));
            self.grades.extend(
                defaults
                    .grades
                    .iter()
                    .filter(|(k, _)| GradePoint::from_label(k) == Some(grade))
                    .map(|(k, v)| (k.clone(), *v)),
            );
            return Ok(());
        }

        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "endpoint" => self.api.endpoint.clone_from(&defaults.api.endpoint),
            "token" => self.api.token.clone_from(&defaults.api.token),
            "timeout_secs" | "timeout-secs" => self.api.timeout_secs = defaults.api.timeout_secs,
            "total_semesters" | "total-semesters" => {
                self.academics.total_semesters = defaults.academics.total_semesters;
            }
            "max_point" | "max-point" => self.academics.max_point = defaults.academics.max_point,
            "projection" => self
                .academics
                .projection
                .clone_from(&defaults.academics.projection),
            "otp_length" | "otp-length" => self.auth.otp_length = defaults.auth.otp_length,
            "resend_secs" | "resend-secs" => self.auth.resend_secs = defaults.auth.resend_secs,
            "email_domain" | "email-domain" => {
                self.auth.email_domain.clone_from(&defaults.auth.email_domain);
            }
            "reports_dir" | "reports-dir" => {
                self.paths.reports_dir.clone_from(&defaults.paths.reports_dir);
            }
            "session_file" | "session-file" => {
                self.paths.session_file.clone_from(&defaults.paths.session_file);
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load) recreates it.
    /// Succeeds without doing anything if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Grade scale described by `[grades]` and `academics.max_point`.
    ///
    /// # Errors
    /// Returns an error if an override is invalid.
    pub fn grade_scale(&self) -> Result<GradeScale, String> {
        GradeScale::with_overrides(&self.grades, self.academics.max_point)
    }

    /// Aggregator over the configured grade scale.
    ///
    /// # Errors
    /// Returns an error if the grade scale is invalid.
    pub fn aggregator(&self) -> Result<AcademicAggregator, String> {
        self.grade_scale().map(AcademicAggregator::new)
    }

    /// Configured projection policy (uniform when unset).
    ///
    /// # Errors
    /// Returns an error if the configured name is unknown.
    pub fn projection_policy(&self) -> Result<ProjectionPolicy, String> {
        if self.academics.projection.is_empty() {
            Ok(ProjectionPolicy::default())
        } else {
            self.academics.projection.parse()
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| format!("Invalid value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[api]")?;
        writeln!(f, "  endpoint = \"{}\"", self.api.endpoint)?;
        let token = if self.api.token.is_empty() { "" } else { "********" };
        writeln!(f, "  token = \"{token}\"")?;
        writeln!(f, "  timeout_secs = {}", self.api.timeout_secs)?;

        writeln!(f, "\n[academics]")?;
        writeln!(f, "  total_semesters = {}", self.academics.total_semesters)?;
        writeln!(f, "  max_point = {}", self.academics.max_point)?;
        writeln!(f, "  projection = \"{}\"", self.academics.projection)?;

        writeln!(f, "\n[auth]")?;
        writeln!(f, "  otp_length = {}", self.auth.otp_length)?;
        writeln!(f, "  resend_secs = {}", self.auth.resend_secs)?;
        writeln!(f, "  email_domain = \"{}\"", self.auth.email_domain)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;
        writeln!(f, "  session_file = \"{}\"", self.paths.session_file)?;

        if !self.grades.is_empty() {
            writeln!(f, "\n[grades]")?;
            for (label, point) in &self.grades {
                writeln!(f, "  \"{label}\" = {point}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_parse() {
        let config = Config::from_defaults();
        assert_eq!(config.academics.total_semesters, 8);
        assert!(config.grade_scale().is_ok());
        assert_eq!(config.projection_policy(), Ok(ProjectionPolicy::Uniform));
    }

    #[test]
    fn test_token_is_masked_in_display() {
        let mut config = Config::from_defaults();
        config.api.token = "super-secret".to_string();
        let shown = config.to_string();
        assert!(!shown.contains("super-secret"));
        assert!(shown.contains("********"));
    }
}

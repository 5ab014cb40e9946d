//! Certificate and resume link model

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of document a link points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Course completion certificate
    Certificate,
    /// Resume / CV
    Resume,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Certificate => write!(f, "certificate"),
            Self::Resume => write!(f, "resume"),
        }
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "certificate" | "cert" => Ok(Self::Certificate),
            "resume" | "cv" => Ok(Self::Resume),
            _ => Err(format!("Unknown document kind: '{s}'")),
        }
    }
}

/// A link to an externally hosted certificate or resume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLink {
    /// Backend identifier, once stored
    pub id: Option<String>,
    /// Document kind
    pub kind: DocumentKind,
    /// Title (the course name for certificates)
    pub title: String,
    /// Absolute http(s) URL
    pub url: String,
    /// Owning student's registration number
    pub registration_id: String,
}

impl DocumentLink {
    /// Create a validated link.
    ///
    /// # Errors
    /// Returns an error if the title is blank or the URL is not an absolute http(s) URL.
    pub fn new(
        kind: DocumentKind,
        title: &str,
        url: &str,
        registration_id: String,
    ) -> Result<Self, String> {
        let title = title.trim();
        if title.is_empty() {
            return Err(format!("A {kind} link needs a title"));
        }
        let url = validate_url(url)?;
        Ok(Self {
            id: None,
            kind,
            title: title.to_string(),
            url,
            registration_id,
        })
    }
}

/// Check that `raw` is an absolute http or https URL and return it normalised.
///
/// # Errors
/// Returns an error for unparsable URLs and for non-http schemes.
pub fn validate_url(raw: &str) -> Result<String, String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("Invalid URL '{raw}': {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => Err(format!("Unsupported URL scheme '{other}' in '{raw}'")),
    }
}

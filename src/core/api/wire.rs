//! JSON bodies exchanged with the portal backend

use super::ApiError;
use crate::core::models::semester::optional_number_or_text;
use crate::core::models::{
    ClassCgpa, ClassSection, DocumentKind, DocumentLink, LeaveRequest, LeaveStatus,
    SemesterRecord, StudentProfile, StudentStanding, Teacher,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// POST `/api/sgpa`
#[derive(Debug, Serialize)]
pub struct SgpaBody<'a> {
    /// Semester number
    pub semester: u8,
    /// Computed SGPA
    pub sgpa: f64,
    /// Registration number
    pub reg: &'a str,
}

/// PUT `/api/sgpa/update`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody<'a> {
    /// Edited records
    pub sgpa_list: &'a [SemesterRecord],
    /// Registration number
    pub reg: &'a str,
}

/// POST `/api/set-target`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetBody<'a> {
    /// Target CGPA
    pub target_cgpa: f64,
    /// Registration number
    pub reg: &'a str,
}

/// Certificate and resume create/edit body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentBody<'a> {
    /// Link title
    pub course_name: &'a str,
    /// Link URL
    pub certificate_url: &'a str,
    /// Registration number
    pub reg: &'a str,
}

impl<'a> From<&'a DocumentLink> for DocumentBody<'a> {
    fn from(link: &'a DocumentLink) -> Self {
        Self {
            course_name: &link.title,
            certificate_url: &link.url,
            reg: &link.registration_id,
        }
    }
}

/// PATCH `/api/leave/{id}`
#[derive(Debug, Serialize)]
pub struct StatusBody {
    /// New status
    pub status: LeaveStatus,
}

/// POST `/Auth/login`
#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    /// Account email
    pub email: &'a str,
    /// Account password
    pub password: &'a str,
}

/// POST `/admin/login`
#[derive(Debug, Serialize)]
pub struct AdminLoginBody<'a> {
    /// Administrator email
    pub mail: &'a str,
    /// Administrator password
    pub password: &'a str,
}

/// Teacher dashboard bodies naming a class
#[derive(Debug, Serialize)]
pub struct ClassBody<'a> {
    /// Year of study
    pub year: u8,
    /// Section letter
    pub section: &'a str,
}

impl<'a> From<&'a ClassSection> for ClassBody<'a> {
    fn from(class: &'a ClassSection) -> Self {
        Self {
            year: class.year,
            section: &class.section,
        }
    }
}

/// Bodies carrying only an email address
#[derive(Debug, Serialize)]
pub struct EmailBody<'a> {
    /// Account email
    pub email: &'a str,
}

/// POST `/Auth/verify-otp`
#[derive(Debug, Serialize)]
pub struct OtpBody<'a> {
    /// Account email
    pub email: &'a str,
    /// Entered passcode
    pub otp: &'a str,
}

/// PATCH `/Auth/resetpass-otp`
#[derive(Debug, Serialize)]
pub struct ResetBody<'a> {
    /// Reset token
    pub token: &'a str,
    /// New password
    pub pwd: &'a str,
}

/// Successful login response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for later calls
    pub token: String,
    /// Profile of the logged-in account; the admin portal sends none
    #[serde(default)]
    pub user: LoginUser,
}

/// Account profile returned with a login
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoginUser {
    /// Whether the email address has been verified by passcode
    #[serde(default)]
    pub verified: bool,
    /// Role name (`student`, `teacher`, `admin`)
    #[serde(default)]
    pub role: String,
    /// Registration number
    #[serde(rename = "Reg", alias = "reg", default)]
    pub registration_id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Account email
    #[serde(alias = "mail", default)]
    pub email: String,
    /// Year of the class a teacher is in charge of
    #[serde(default, deserialize_with = "optional_number_or_text")]
    pub year: Option<u8>,
    /// Section of the class a teacher is in charge of
    #[serde(default)]
    pub section: Option<String>,
}

impl LoginUser {
    /// Class carried by a teacher login
    #[must_use]
    pub fn class(&self) -> Option<ClassSection> {
        match (self.year, self.section.as_deref()) {
            (Some(year), Some(section)) => ClassSection::new(year, section).ok(),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryShape {
    Wrapped { sgpas: Vec<SemesterRecord> },
    Bare(Vec<SemesterRecord>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentEntry {
    #[serde(rename = "_id", alias = "id", default)]
    id: Option<String>,
    #[serde(alias = "title", default)]
    course_name: String,
    #[serde(alias = "url", alias = "resumeUrl", default)]
    certificate_url: String,
}

fn decode<T: for<'de> Deserialize<'de>>(body: &str, what: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(format!("{what}: {e}")))
}

/// Decode a semester history, either `{"sgpas": [...]}` or a bare array.
///
/// # Errors
/// Returns `Decode` when the body matches neither shape.
pub fn decode_history(body: &str) -> Result<Vec<SemesterRecord>, ApiError> {
    match decode::<HistoryShape>(body, "semester history")? {
        HistoryShape::Wrapped { sgpas } | HistoryShape::Bare(sgpas) => Ok(sgpas),
    }
}

/// Decode `{"targetCgpa": ...}`. Null, absent, or an empty body mean no target.
///
/// # Errors
/// Returns `Decode` when the body is not JSON or the value is not a number.
pub fn decode_target(body: &str) -> Result<Option<f64>, ApiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = decode(body, "target CGPA")?;
    match value.get("targetCgpa").unwrap_or(&Value::Null) {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ApiError::Decode(format!("target CGPA is not a number: '{s}'"))),
        other => Err(ApiError::Decode(format!(
            "target CGPA is not a number: {other}"
        ))),
    }
}

/// Pull the list out of either a bare array or an object holding one array field.
fn list_items(value: Value, what: &str) -> Result<Vec<Value>, ApiError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(map) => map
            .into_iter()
            .find_map(|(_, v)| match v {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .ok_or_else(|| ApiError::Decode(format!("{what}: no list in response"))),
        _ => Err(ApiError::Decode(format!("{what}: expected a list"))),
    }
}

/// Decode certificate or resume links for one student.
///
/// # Errors
/// Returns `Decode` when the body is not a list of links.
pub fn decode_documents(
    kind: DocumentKind,
    registration_id: &str,
    body: &str,
) -> Result<Vec<DocumentLink>, ApiError> {
    let what = format!("{kind} links");
    let items = list_items(decode(body, &what)?, &what)?;
    items
        .into_iter()
        .map(|item| {
            let entry: DocumentEntry = serde_json::from_value(item)
                .map_err(|e| ApiError::Decode(format!("{what}: {e}")))?;
            Ok(DocumentLink {
                id: entry.id,
                kind,
                title: entry.course_name,
                url: entry.certificate_url,
                registration_id: registration_id.to_string(),
            })
        })
        .collect()
}

/// Decode a bare list or an object holding one list.
fn decode_list<T: DeserializeOwned>(body: &str, what: &str) -> Result<Vec<T>, ApiError> {
    list_items(decode(body, what)?, what)?
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).map_err(|e| ApiError::Decode(format!("{what}: {e}")))
        })
        .collect()
}

/// Decode a list of leave requests.
///
/// # Errors
/// Returns `Decode` when the body is not a list of requests.
pub fn decode_leaves(body: &str) -> Result<Vec<LeaveRequest>, ApiError> {
    decode_list(body, "leave requests")
}

/// Decode a student profile, bare or wrapped as `{"student": {...}}`.
///
/// # Errors
/// Returns `Decode` when the body is not a profile.
pub fn decode_profile(body: &str) -> Result<StudentProfile, ApiError> {
    let value: Value = decode(body, "student profile")?;
    let value = if value.get("student").is_some() {
        value["student"].clone()
    } else {
        value
    };
    serde_json::from_value(value).map_err(|e| ApiError::Decode(format!("student profile: {e}")))
}

/// Decode the students of a class.
///
/// # Errors
/// Returns `Decode` when the body is not a list of students.
pub fn decode_students(body: &str) -> Result<Vec<StudentProfile>, ApiError> {
    decode_list(body, "class students")
}

/// Decode a class head count: a `total`/`count` number, else the length of the list.
///
/// # Errors
/// Returns `Decode` when the body holds neither.
pub fn decode_total(body: &str) -> Result<usize, ApiError> {
    let value: Value = decode(body, "student count")?;
    let counted = ["total", "count", "totalStudents"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_u64));
    match counted {
        Some(n) => usize::try_from(n)
            .map_err(|_| ApiError::Decode(format!("student count out of range: {n}"))),
        None => Ok(list_items(value, "student count")?.len()),
    }
}

/// Decode a CGPA ranking, e.g. `{"topStudents": [...]}`.
///
/// # Errors
/// Returns `Decode` when the body is not a list of standings.
pub fn decode_standings(body: &str) -> Result<Vec<StudentStanding>, ApiError> {
    decode_list(body, "CGPA ranking")
}

/// Decode a class CGPA analysis. The average is recomputed from the listed students.
///
/// # Errors
/// Returns `Decode` when the body has no student list.
pub fn decode_class_cgpa(body: &str) -> Result<ClassCgpa, ApiError> {
    let value: Value = decode(body, "class CGPA")?;
    let students = match value.get("students") {
        Some(list) => serde_json::from_value(list.clone())
            .map_err(|e| ApiError::Decode(format!("class CGPA: {e}")))?,
        None => decode_list(body, "class CGPA")?,
    };
    Ok(ClassCgpa::from_standings(students))
}

/// Decode the teacher list.
///
/// # Errors
/// Returns `Decode` when the body is not a list of teachers.
pub fn decode_teachers(body: &str) -> Result<Vec<Teacher>, ApiError> {
    decode_list(body, "teachers")
}

/// Decode a login response.
///
/// # Errors
/// Returns `Decode` when the token or user is missing.
pub fn decode_login(body: &str) -> Result<LoginResponse, ApiError> {
    decode(body, "login response")
}

/// Human-readable message from an error body, falling back to `fallback`.
#[must_use]
pub fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error", "msg"]
                .iter()
                .find_map(|key| value.get(key).and_then(Value::as_str).map(str::to_string))
        })
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

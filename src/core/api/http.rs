//! HTTP implementation of the record-store boundary

use super::routes::{self, Method, Route};
use super::wire::{self, LoginResponse};
use super::{
    ApiError, AuthService, ClassroomService, DocumentStore, LeaveStore, ProfileStore,
    RecordStore, StaffDirectory, SubmitOutcome,
};
use crate::core::auth::Role;
use crate::core::models::{
    ClassCgpa, ClassSection, DocumentKind, DocumentLink, LeaveRequest, LeaveStatus,
    ProfileUpdate, Registration, SemesterRecord, StudentProfile, StudentStanding, Teacher,
    TeacherRegistration,
};
use crate::debug;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{StatusCode, Url};
use serde::Serialize;
use std::time::Duration;

/// Blocking REST client for the portal backend
///
/// Requests are one-shot: no retries and no caching. A bearer token is attached to
/// every request when one is set.
#[derive(Debug, Clone)]
pub struct ApiClient {
    endpoint: String,
    token: Option<String>,
    http: Client,
}

impl ApiClient {
    /// Create a client for `endpoint`.
    ///
    /// `timeout` of `None` disables the request timeout.
    ///
    /// # Errors
    /// Returns `Unavailable` for an empty endpoint, `Invalid` for an unparsable one, and
    /// `Transport` if the HTTP client cannot be built.
    pub fn new(
        endpoint: &str,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(ApiError::Unavailable(
                "no API endpoint configured (set one with `cgpa config set endpoint <url>` or --endpoint)"
                    .to_string(),
            ));
        }
        Url::parse(endpoint)
            .map_err(|e| ApiError::Invalid(format!("invalid endpoint '{endpoint}': {e}")))?;

        let http = Client::builder()
            .user_agent(concat!("cgpa-tracker/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            http,
        })
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Whether a bearer token will be sent
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, route: &Route) -> RequestBuilder {
        let url = route.url(&self.endpoint);
        debug!("{:?} {url}", route.method);
        let builder = match route.method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
            Method::Put => self.http.put(url),
            Method::Patch => self.http.patch(url),
            Method::Delete => self.http.delete(url),
        };
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn execute(&self, builder: RequestBuilder) -> Result<(StatusCode, String), ApiError> {
        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;
        accept_status(status, body)
    }

    fn call(&self, route: &Route) -> Result<(StatusCode, String), ApiError> {
        self.execute(self.request(route))
    }

    fn call_with<B: Serialize + ?Sized>(
        &self,
        route: &Route,
        body: &B,
    ) -> Result<(StatusCode, String), ApiError> {
        self.execute(self.request(route).json(body))
    }
}

/// Only 200 and 201 count as success; every other status is a failure.
fn accept_status(status: StatusCode, body: String) -> Result<(StatusCode, String), ApiError> {
    match status {
        StatusCode::OK | StatusCode::CREATED => Ok((status, body)),
        _ => {
            let fallback = status.canonical_reason().unwrap_or("request failed");
            Err(ApiError::Status {
                code: status.as_u16(),
                message: wire::error_message(&body, fallback),
            })
        }
    }
}

impl RecordStore for ApiClient {
    fn fetch_history(&self, registration_id: &str) -> Result<Vec<SemesterRecord>, ApiError> {
        match self.call(&routes::history(registration_id)) {
            Ok((_, body)) => wire::decode_history(&body),
            Err(ApiError::Status { code: 404, .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    fn submit_sgpa(
        &self,
        registration_id: &str,
        semester: u8,
        sgpa: f64,
    ) -> Result<SubmitOutcome, ApiError> {
        let body = wire::SgpaBody {
            semester,
            sgpa,
            reg: registration_id,
        };
        let (status, _) = self.call_with(&routes::submit_sgpa(), &body)?;
        if status == StatusCode::CREATED {
            Ok(SubmitOutcome::Created)
        } else {
            Ok(SubmitOutcome::Updated)
        }
    }

    fn update_sgpas(
        &self,
        registration_id: &str,
        records: &[SemesterRecord],
    ) -> Result<(), ApiError> {
        let body = wire::UpdateBody {
            sgpa_list: records,
            reg: registration_id,
        };
        self.call_with(&routes::update_sgpas(), &body).map(|_| ())
    }

    fn delete_sgpa(&self, record_id: &str) -> Result<(), ApiError> {
        self.call(&routes::delete_sgpa(record_id)).map(|_| ())
    }

    fn set_target(&self, registration_id: &str, target_cgpa: f64) -> Result<(), ApiError> {
        let body = wire::TargetBody {
            target_cgpa,
            reg: registration_id,
        };
        self.call_with(&routes::set_target(), &body).map(|_| ())
    }

    fn fetch_target(&self, registration_id: &str) -> Result<Option<f64>, ApiError> {
        match self.call(&routes::target(registration_id)) {
            Ok((_, body)) => wire::decode_target(&body),
            Err(ApiError::Status { code: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl DocumentStore for ApiClient {
    fn list_documents(
        &self,
        kind: DocumentKind,
        registration_id: &str,
    ) -> Result<Vec<DocumentLink>, ApiError> {
        let (_, body) = self.call(&routes::list_documents(kind, registration_id))?;
        wire::decode_documents(kind, registration_id, &body)
    }

    fn add_document(&self, link: &DocumentLink) -> Result<(), ApiError> {
        self.call_with(
            &routes::add_document(link.kind),
            &wire::DocumentBody::from(link),
        )
        .map(|_| ())
    }

    fn edit_document(&self, link: &DocumentLink) -> Result<(), ApiError> {
        let id = link
            .id
            .as_deref()
            .ok_or_else(|| ApiError::Invalid(format!("{} link has no id", link.kind)))?;
        self.call_with(
            &routes::edit_document(link.kind, id),
            &wire::DocumentBody::from(link),
        )
        .map(|_| ())
    }

    fn delete_document(&self, kind: DocumentKind, id: &str) -> Result<(), ApiError> {
        self.call(&routes::delete_document(kind, id)).map(|_| ())
    }
}

impl LeaveStore for ApiClient {
    fn submit_leave(&self, request: &LeaveRequest) -> Result<(), ApiError> {
        self.call_with(&routes::submit_leave(), request).map(|_| ())
    }

    fn leaves_for(&self, registration_id: &str) -> Result<Vec<LeaveRequest>, ApiError> {
        let (_, body) = self.call(&routes::leaves_for(registration_id))?;
        wire::decode_leaves(&body)
    }

    fn all_leaves(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        let (_, body) = self.call(&routes::all_leaves())?;
        wire::decode_leaves(&body)
    }

    fn set_leave_status(&self, id: &str, status: LeaveStatus) -> Result<(), ApiError> {
        self.call_with(&routes::leave_status(id), &wire::StatusBody { status })
            .map(|_| ())
    }
}

impl AuthService for ApiClient {
    fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        self.call_with(&routes::register(), registration).map(|_| ())
    }

    fn login_as(
        &self,
        role: Role,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let route = routes::login_for(role);
        let (_, body) = match role {
            Role::Admin => self.call_with(
                &route,
                &wire::AdminLoginBody {
                    mail: email,
                    password,
                },
            )?,
            Role::Student | Role::Teacher => {
                self.call_with(&route, &wire::LoginBody { email, password })?
            }
        };
        wire::decode_login(&body)
    }

    fn generate_otp(&self, email: &str) -> Result<(), ApiError> {
        self.call_with(&routes::generate_otp(), &wire::EmailBody { email })
            .map(|_| ())
    }

    fn verify_otp(&self, email: &str, otp: &str) -> Result<(), ApiError> {
        self.call_with(&routes::verify_otp(), &wire::OtpBody { email, otp })
            .map(|_| ())
    }

    fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        self.call_with(&routes::request_password_reset(), &wire::EmailBody { email })
            .map(|_| ())
    }

    fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError> {
        let body = wire::ResetBody {
            token,
            pwd: new_password,
        };
        self.call_with(&routes::reset_password(), &body).map(|_| ())
    }
}

impl ProfileStore for ApiClient {
    fn fetch_profile(&self, registration_id: &str) -> Result<StudentProfile, ApiError> {
        match self.call(&routes::student_profile(registration_id)) {
            Ok((_, body)) => wire::decode_profile(&body),
            Err(ApiError::Status { code: 404, .. }) => {
                Err(ApiError::NotFound(format!("student '{registration_id}'")))
            }
            Err(e) => Err(e),
        }
    }

    fn update_profile(
        &self,
        registration_id: &str,
        update: &ProfileUpdate,
    ) -> Result<(), ApiError> {
        self.call_with(&routes::update_profile(registration_id), update)
            .map(|_| ())
    }
}

impl ClassroomService for ApiClient {
    fn class_students(&self, class: &ClassSection) -> Result<Vec<StudentProfile>, ApiError> {
        let (_, body) = self.call_with(&routes::class_students(), &wire::ClassBody::from(class))?;
        wire::decode_students(&body)
    }

    fn total_students(&self, class: &ClassSection) -> Result<usize, ApiError> {
        let (_, body) = self.call_with(&routes::total_students(), &wire::ClassBody::from(class))?;
        wire::decode_total(&body)
    }

    fn top_students(&self, class: &ClassSection) -> Result<Vec<StudentStanding>, ApiError> {
        let (_, body) = self.call_with(&routes::top_cgpa(), &wire::ClassBody::from(class))?;
        wire::decode_standings(&body)
    }

    fn class_cgpa(&self, class: &ClassSection) -> Result<ClassCgpa, ApiError> {
        let (_, body) = self.call_with(&routes::class_cgpa(), &wire::ClassBody::from(class))?;
        wire::decode_class_cgpa(&body)
    }
}

impl StaffDirectory for ApiClient {
    fn register_teacher(&self, registration: &TeacherRegistration) -> Result<(), ApiError> {
        self.call_with(&routes::register_teacher(), registration)
            .map(|_| ())
    }

    fn list_teachers(&self) -> Result<Vec<Teacher>, ApiError> {
        let (_, body) = self.call(&routes::teachers())?;
        wire::decode_teachers(&body)
    }

    fn delete_teacher(&self, id: &str) -> Result<(), ApiError> {
        self.call(&routes::delete_teacher(id)).map(|_| ())
    }
}

//! Record-store boundary
//!
//! Every call to the portal backend goes through one of the traits here. [`ApiClient`]
//! speaks the REST contract over HTTP; [`MemoryStore`] keeps everything in process.

pub mod http;
pub mod memory;
pub mod routes;
pub mod wire;

pub use http::ApiClient;
pub use memory::MemoryStore;
pub use wire::{LoginResponse, LoginUser};

use crate::core::aggregator::compute_cgpa;
use crate::core::auth::Role;
use crate::core::models::profile::{rank_top, TOP_STUDENTS};
use crate::core::models::{
    ClassCgpa, ClassSection, DocumentKind, DocumentLink, LeaveRequest, LeaveStatus,
    ProfileUpdate, Registration, SemesterRecord, StudentAcademicHistory, StudentProfile,
    StudentStanding, Teacher, TeacherRegistration,
};
use thiserror::Error;

/// Errors crossing the record-store boundary
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status
    #[error("backend returned {code}: {message}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Message from the response body, or the status reason
        message: String,
    },
    /// The response body did not have the expected shape
    #[error("could not decode response: {0}")]
    Decode(String),
    /// The addressed record does not exist
    #[error("not found: {0}")]
    NotFound(String),
    /// The request was rejected before it was sent
    #[error("invalid request: {0}")]
    Invalid(String),
    /// No backend is configured or reachable
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Whether a submitted SGPA created a record or replaced one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new semester record was stored
    Created,
    /// An existing record for the semester was overwritten
    Updated,
}

/// Semester history and target storage
pub trait RecordStore {
    /// Semester records for a student, in any order.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the history cannot be fetched.
    fn fetch_history(&self, registration_id: &str) -> Result<Vec<SemesterRecord>, ApiError>;

    /// Store the SGPA for one semester, replacing any existing record for it.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the record is rejected or cannot be sent.
    fn submit_sgpa(
        &self,
        registration_id: &str,
        semester: u8,
        sgpa: f64,
    ) -> Result<SubmitOutcome, ApiError>;

    /// Replace the stored values of existing records.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the update is rejected or cannot be sent.
    fn update_sgpas(
        &self,
        registration_id: &str,
        records: &[SemesterRecord],
    ) -> Result<(), ApiError>;

    /// Delete one semester record by backend id.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the record cannot be deleted.
    fn delete_sgpa(&self, record_id: &str) -> Result<(), ApiError>;

    /// Store the target CGPA.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the target cannot be stored.
    fn set_target(&self, registration_id: &str, target_cgpa: f64) -> Result<(), ApiError>;

    /// Stored target CGPA, `None` when never set.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the target cannot be fetched.
    fn fetch_target(&self, registration_id: &str) -> Result<Option<f64>, ApiError>;

    /// Cumulative CGPA, always derived from the semester history.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the history cannot be fetched.
    fn fetch_cgpa(&self, registration_id: &str) -> Result<Option<f64>, ApiError> {
        Ok(compute_cgpa(&self.fetch_history(registration_id)?))
    }

    /// Fetch history and target together.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when either fetch fails, or `Decode` when the backend
    /// holds two records for the same semester.
    fn load_history(&self, registration_id: &str) -> Result<StudentAcademicHistory, ApiError> {
        let records = self.fetch_history(registration_id)?;
        let mut history = StudentAcademicHistory::from_records(registration_id.to_string(), records)
            .map_err(ApiError::Decode)?;
        history.target_cgpa = self.fetch_target(registration_id)?;
        Ok(history)
    }
}

/// Certificate and resume link storage
pub trait DocumentStore {
    /// Links of one kind for a student.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the list cannot be fetched.
    fn list_documents(
        &self,
        kind: DocumentKind,
        registration_id: &str,
    ) -> Result<Vec<DocumentLink>, ApiError>;

    /// Store a new link.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the link is rejected.
    fn add_document(&self, link: &DocumentLink) -> Result<(), ApiError>;

    /// Replace the title and URL of an existing link (matched by `link.id`).
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the link has no id or is not found.
    fn edit_document(&self, link: &DocumentLink) -> Result<(), ApiError>;

    /// Delete a link by id.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the link cannot be deleted.
    fn delete_document(&self, kind: DocumentKind, id: &str) -> Result<(), ApiError>;
}

/// Leave request storage
pub trait LeaveStore {
    /// Submit a new request.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the request is rejected.
    fn submit_leave(&self, request: &LeaveRequest) -> Result<(), ApiError>;

    /// Requests made by one student.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the list cannot be fetched.
    fn leaves_for(&self, registration_id: &str) -> Result<Vec<LeaveRequest>, ApiError>;

    /// Every request, for teacher and admin views.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the list cannot be fetched.
    fn all_leaves(&self) -> Result<Vec<LeaveRequest>, ApiError>;

    /// Record a decision on a request.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the request is not found or the change is rejected.
    fn set_leave_status(&self, id: &str, status: LeaveStatus) -> Result<(), ApiError>;
}

/// Account and one-time-passcode operations
pub trait AuthService {
    /// Create an account.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when registration is rejected.
    fn register(&self, registration: &Registration) -> Result<(), ApiError>;

    /// Exchange credentials for a token and user profile on the portal for `role`.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the credentials are rejected.
    fn login_as(&self, role: Role, email: &str, password: &str)
        -> Result<LoginResponse, ApiError>;

    /// Student login.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the credentials are rejected.
    fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.login_as(Role::Student, email, password)
    }

    /// Ask the backend to send a passcode to `email`.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the passcode cannot be issued.
    fn generate_otp(&self, email: &str) -> Result<(), ApiError>;

    /// Check a passcode. A wrong code is reported as `Status`.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the code is wrong or the call fails.
    fn verify_otp(&self, email: &str, otp: &str) -> Result<(), ApiError>;

    /// Start a password reset for `email`.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the reset cannot be started.
    fn request_password_reset(&self, email: &str) -> Result<(), ApiError>;

    /// Set a new password using the reset token.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the token is rejected.
    fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError>;
}

/// Student profile details
pub trait ProfileStore {
    /// Profile of one student.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown student, or another [`ApiError`] on failure.
    fn fetch_profile(&self, registration_id: &str) -> Result<StudentProfile, ApiError>;

    /// Change the editable fields of a profile.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the update is rejected.
    fn update_profile(&self, registration_id: &str, update: &ProfileUpdate)
        -> Result<(), ApiError>;
}

/// Class views for teachers
///
/// Rankings and averages are derived from [`class_students`](Self::class_students)
/// unless an implementation asks the backend for them directly.
pub trait ClassroomService {
    /// Every student in a class.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the list cannot be fetched.
    fn class_students(&self, class: &ClassSection) -> Result<Vec<StudentProfile>, ApiError>;

    /// Number of students in a class.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the count cannot be fetched.
    fn total_students(&self, class: &ClassSection) -> Result<usize, ApiError> {
        Ok(self.class_students(class)?.len())
    }

    /// Students with the highest CGPA, best first.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the ranking cannot be fetched.
    fn top_students(&self, class: &ClassSection) -> Result<Vec<StudentStanding>, ApiError> {
        let standings: Vec<StudentStanding> = self
            .class_students(class)?
            .iter()
            .map(StudentStanding::from)
            .collect();
        Ok(rank_top(&standings, TOP_STUDENTS))
    }

    /// CGPA of every student plus the class average.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the analysis cannot be fetched.
    fn class_cgpa(&self, class: &ClassSection) -> Result<ClassCgpa, ApiError> {
        let standings = self
            .class_students(class)?
            .iter()
            .map(StudentStanding::from)
            .collect();
        Ok(ClassCgpa::from_standings(standings))
    }
}

/// Teacher account management for administrators
pub trait StaffDirectory {
    /// Create a teacher account.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the registration is rejected.
    fn register_teacher(&self, registration: &TeacherRegistration) -> Result<(), ApiError>;

    /// Every teacher account.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the list cannot be fetched.
    fn list_teachers(&self) -> Result<Vec<Teacher>, ApiError>;

    /// Delete a teacher account by id.
    ///
    /// # Errors
    /// Returns an [`ApiError`] when the account cannot be deleted.
    fn delete_teacher(&self, id: &str) -> Result<(), ApiError>;
}

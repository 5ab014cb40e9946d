//! In-process record store
//!
//! Implements every boundary trait against maps held behind a mutex. Used by tests and
//! by callers that embed the library without a backend.

use super::wire::{LoginResponse, LoginUser};
use super::{
    ApiError, AuthService, ClassroomService, DocumentStore, LeaveStore, ProfileStore,
    RecordStore, StaffDirectory, SubmitOutcome,
};
use crate::core::aggregator::compute_cgpa;
use crate::core::auth::Role;
use crate::core::grades::DEFAULT_MAX_POINT;
use crate::core::models::{
    ClassSection, DocumentKind, DocumentLink, LeaveRequest, LeaveStatus, ProfileUpdate,
    Registration, SemesterRecord, StudentProfile, Teacher, TeacherRegistration,
    DEFAULT_TOTAL_SEMESTERS,
};
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug)]
struct Account {
    registration: Registration,
    verified: bool,
    role: String,
    class: Option<ClassSection>,
    mobile: Option<String>,
    address: Option<String>,
    parent_address: Option<String>,
}

#[derive(Debug)]
struct StaffAccount {
    teacher: Teacher,
    password: String,
}

#[derive(Debug, Default)]
struct State {
    histories: HashMap<String, Vec<SemesterRecord>>,
    targets: HashMap<String, f64>,
    documents: Vec<DocumentLink>,
    leaves: Vec<LeaveRequest>,
    accounts: HashMap<String, Account>,
    otps: HashMap<String, String>,
    reset_tokens: HashMap<String, String>,
    staff: Vec<StaffAccount>,
    admins: HashMap<String, String>,
}

impl State {
    fn student(&self, registration_id: &str) -> Option<&Account> {
        self.accounts
            .values()
            .find(|a| a.registration.registration_id == registration_id)
    }

    fn student_mut(&mut self, registration_id: &str) -> Option<&mut Account> {
        self.accounts
            .values_mut()
            .find(|a| a.registration.registration_id == registration_id)
    }

    fn email_taken(&self, email: &str) -> bool {
        self.accounts.contains_key(email)
            || self.admins.contains_key(email)
            || self.staff.iter().any(|s| s.teacher.email == email)
    }

    fn profile(&self, account: &Account) -> StudentProfile {
        let reg = &account.registration.registration_id;
        let sgpas = self.histories.get(reg).cloned().unwrap_or_default();
        StudentProfile {
            id: None,
            registration_id: reg.clone(),
            name: account.registration.name.clone(),
            email: account.registration.email.clone(),
            dob: account.registration.dob.clone(),
            gender: account.registration.gender.clone(),
            current_semester: Some(account.registration.current_semester),
            mobile: account.mobile.clone(),
            address: account.address.clone(),
            parent_address: account.parent_address.clone(),
            year: account.class.as_ref().map(|c| c.year),
            section: account.class.as_ref().map(|c| c.section.clone()),
            reported_cgpa: compute_cgpa(&sgpas),
            sgpas,
            target_cgpa: self.targets.get(reg).copied(),
        }
    }
}

/// Record store kept entirely in memory
///
/// Semester records are checked against a programme of `total_semesters` and a
/// `max_point` scale, the way the portal backend checks them.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<State>,
    otp_length: usize,
    total_semesters: u8,
    max_point: f64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn not_found(what: &str, id: &str) -> ApiError {
    ApiError::NotFound(format!("{what} '{id}'"))
}

fn conflict(message: String) -> ApiError {
    ApiError::Status { code: 409, message }
}

fn bad_credentials() -> ApiError {
    ApiError::Status {
        code: 401,
        message: "Invalid email or password".to_string(),
    }
}

impl MemoryStore {
    /// Empty store issuing four-digit passcodes
    #[must_use]
    pub fn new() -> Self {
        Self::with_otp_length(4)
    }

    /// Empty store issuing passcodes of `otp_length` digits
    #[must_use]
    pub fn with_otp_length(otp_length: usize) -> Self {
        Self {
            state: Mutex::new(State::default()),
            otp_length: otp_length.clamp(1, 18),
            total_semesters: DEFAULT_TOTAL_SEMESTERS,
            max_point: DEFAULT_MAX_POINT,
        }
    }

    /// Check semester records against a different programme length and grade scale
    #[must_use]
    pub fn with_limits(mut self, total_semesters: u8, max_point: f64) -> Self {
        self.total_semesters = total_semesters;
        self.max_point = max_point;
        self
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, ApiError> {
        self.state
            .lock()
            .map_err(|_| ApiError::Unavailable("memory store lock poisoned".to_string()))
    }

    /// Last passcode issued to `email`, if one is outstanding
    #[must_use]
    pub fn issued_otp(&self, email: &str) -> Option<String> {
        self.state.lock().ok()?.otps.get(email).cloned()
    }

    /// Last password reset token issued to `email`
    #[must_use]
    pub fn issued_reset_token(&self, email: &str) -> Option<String> {
        let state = self.state.lock().ok()?;
        state
            .reset_tokens
            .iter()
            .find(|(_, owner)| owner.as_str() == email)
            .map(|(token, _)| token.clone())
    }

    /// Change the role of an existing account (`student`, `teacher`, `admin`).
    ///
    /// # Errors
    /// Returns `NotFound` if no account uses `email`.
    pub fn set_role(&self, email: &str, role: &str) -> Result<(), ApiError> {
        let mut state = self.state()?;
        let account = state
            .accounts
            .get_mut(email)
            .ok_or_else(|| not_found("account", email))?;
        account.role = role.to_string();
        Ok(())
    }

    /// Place a registered student in a class.
    ///
    /// # Errors
    /// Returns `NotFound` if no student has `registration_id`.
    pub fn assign_class(&self, registration_id: &str, class: ClassSection) -> Result<(), ApiError> {
        let mut state = self.state()?;
        let account = state
            .student_mut(registration_id)
            .ok_or_else(|| not_found("student", registration_id))?;
        account.class = Some(class);
        Ok(())
    }

    /// Create an administrator account.
    ///
    /// # Errors
    /// Returns a 409 `Status` if the email is already in use.
    pub fn add_admin(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let mut state = self.state()?;
        if state.email_taken(email) {
            return Err(conflict(format!("{email} is already registered")));
        }
        state.admins.insert(email.to_string(), password.to_string());
        Ok(())
    }

    fn passcode(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.otp_length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10_u8)))
            .collect()
    }

    fn check_record(&self, record: &SemesterRecord) -> Result<(), ApiError> {
        record
            .validate(self.total_semesters, self.max_point)
            .map_err(ApiError::Invalid)
    }
}

impl RecordStore for MemoryStore {
    fn fetch_history(&self, registration_id: &str) -> Result<Vec<SemesterRecord>, ApiError> {
        Ok(self
            .state()?
            .histories
            .get(registration_id)
            .cloned()
            .unwrap_or_default())
    }

    fn submit_sgpa(
        &self,
        registration_id: &str,
        semester: u8,
        sgpa: f64,
    ) -> Result<SubmitOutcome, ApiError> {
        self.check_record(&SemesterRecord::new(semester, sgpa))?;
        let mut state = self.state()?;
        let records = state
            .histories
            .entry(registration_id.to_string())
            .or_default();
        if let Some(existing) = records.iter_mut().find(|r| r.semester == semester) {
            existing.sgpa = sgpa;
            return Ok(SubmitOutcome::Updated);
        }
        records.push(SemesterRecord::new(semester, sgpa).with_id(new_id()));
        Ok(SubmitOutcome::Created)
    }

    fn update_sgpas(
        &self,
        registration_id: &str,
        records: &[SemesterRecord],
    ) -> Result<(), ApiError> {
        let mut state = self.state()?;
        let stored = state
            .histories
            .get_mut(registration_id)
            .ok_or_else(|| not_found("history", registration_id))?;

        // Check everything first so a failed update leaves the history untouched.
        for record in records {
            self.check_record(record)?;
            let id = record
                .id
                .as_deref()
                .ok_or_else(|| ApiError::Invalid(format!("semester {} has no id", record.semester)))?;
            if !stored.iter().any(|r| r.id.as_deref() == Some(id)) {
                return Err(not_found("semester record", id));
            }
        }
        let mut semesters: Vec<u8> = stored
            .iter()
            .map(|r| {
                records
                    .iter()
                    .find(|u| u.id == r.id)
                    .map_or(r.semester, |u| u.semester)
            })
            .collect();
        semesters.sort_unstable();
        if let Some(pair) = semesters.windows(2).find(|w| w[0] == w[1]) {
            return Err(conflict(format!(
                "semester {} is already recorded for {registration_id}",
                pair[0]
            )));
        }

        for record in records {
            if let Some(target) = stored.iter_mut().find(|r| r.id == record.id) {
                target.semester = record.semester;
                target.sgpa = record.sgpa;
            }
        }
        Ok(())
    }

    fn delete_sgpa(&self, record_id: &str) -> Result<(), ApiError> {
        let mut state = self.state()?;
        for records in state.histories.values_mut() {
            if let Some(pos) = records
                .iter()
                .position(|r| r.id.as_deref() == Some(record_id))
            {
                records.remove(pos);
                return Ok(());
            }
        }
        Err(not_found("semester record", record_id))
    }

    fn set_target(&self, registration_id: &str, target_cgpa: f64) -> Result<(), ApiError> {
        self.state()?
            .targets
            .insert(registration_id.to_string(), target_cgpa);
        Ok(())
    }

    fn fetch_target(&self, registration_id: &str) -> Result<Option<f64>, ApiError> {
        Ok(self.state()?.targets.get(registration_id).copied())
    }
}

impl DocumentStore for MemoryStore {
    fn list_documents(
        &self,
        kind: DocumentKind,
        registration_id: &str,
    ) -> Result<Vec<DocumentLink>, ApiError> {
        Ok(self
            .state()?
            .documents
            .iter()
            .filter(|d| d.kind == kind && d.registration_id == registration_id)
            .cloned()
            .collect())
    }

    fn add_document(&self, link: &DocumentLink) -> Result<(), ApiError> {
        let mut stored = link.clone();
        stored.id = Some(new_id());
        self.state()?.documents.push(stored);
        Ok(())
    }

    fn edit_document(&self, link: &DocumentLink) -> Result<(), ApiError> {
        let id = link
            .id
            .as_deref()
            .ok_or_else(|| ApiError::Invalid(format!("{} link has no id", link.kind)))?;
        let mut state = self.state()?;
        let stored = state
            .documents
            .iter_mut()
            .find(|d| d.kind == link.kind && d.id.as_deref() == Some(id))
            .ok_or_else(|| not_found(&format!("{} link", link.kind), id))?;
        stored.title.clone_from(&link.title);
        stored.url.clone_from(&link.url);
        Ok(())
    }

    fn delete_document(&self, kind: DocumentKind, id: &str) -> Result<(), ApiError> {
        let mut state = self.state()?;
        let before = state.documents.len();
        state
            .documents
            .retain(|d| !(d.kind == kind && d.id.as_deref() == Some(id)));
        if state.documents.len() == before {
            return Err(not_found(&format!("{kind} link"), id));
        }
        Ok(())
    }
}

impl LeaveStore for MemoryStore {
    fn submit_leave(&self, request: &LeaveRequest) -> Result<(), ApiError> {
        request.validate().map_err(ApiError::Invalid)?;
        let mut stored = request.clone();
        stored.id = Some(new_id());
        stored.status = LeaveStatus::Pending;
        self.state()?.leaves.push(stored);
        Ok(())
    }

    fn leaves_for(&self, registration_id: &str) -> Result<Vec<LeaveRequest>, ApiError> {
        Ok(self
            .state()?
            .leaves
            .iter()
            .filter(|l| l.registration_id == registration_id)
            .cloned()
            .collect())
    }

    fn all_leaves(&self) -> Result<Vec<LeaveRequest>, ApiError> {
        Ok(self.state()?.leaves.clone())
    }

    fn set_leave_status(&self, id: &str, status: LeaveStatus) -> Result<(), ApiError> {
        let mut state = self.state()?;
        let leave = state
            .leaves
            .iter_mut()
            .find(|l| l.id.as_deref() == Some(id))
            .ok_or_else(|| not_found("leave request", id))?;
        let result = match status {
            LeaveStatus::Approved => leave.approve(),
            LeaveStatus::Denied => leave.deny(),
            LeaveStatus::Pending => Err("A decided request cannot return to Pending".to_string()),
        };
        result.map_err(ApiError::Invalid)
    }
}

impl AuthService for MemoryStore {
    fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let mut state = self.state()?;
        if state.email_taken(&registration.email) {
            return Err(conflict(format!("{} is already registered", registration.email)));
        }
        if state.student(&registration.registration_id).is_some() {
            return Err(conflict(format!(
                "{} is already registered",
                registration.registration_id
            )));
        }
        state.accounts.insert(
            registration.email.clone(),
            Account {
                registration: registration.clone(),
                verified: false,
                role: "student".to_string(),
                class: None,
                mobile: None,
                address: None,
                parent_address: None,
            },
        );
        Ok(())
    }

    fn login_as(
        &self,
        role: Role,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let state = self.state()?;
        let user = match role {
            Role::Student => {
                let account = state
                    .accounts
                    .get(email)
                    .filter(|a| a.registration.password == password)
                    .ok_or_else(bad_credentials)?;
                LoginUser {
                    verified: account.verified,
                    role: account.role.clone(),
                    registration_id: account.registration.registration_id.clone(),
                    name: account.registration.name.clone(),
                    email: email.to_string(),
                    year: account.class.as_ref().map(|c| c.year),
                    section: account.class.as_ref().map(|c| c.section.clone()),
                }
            }
            Role::Teacher => {
                let staff = state
                    .staff
                    .iter()
                    .find(|s| s.teacher.email == email && s.password == password)
                    .ok_or_else(bad_credentials)?;
                LoginUser {
                    verified: true,
                    role: Role::Teacher.to_string(),
                    registration_id: String::new(),
                    name: staff.teacher.name.clone(),
                    email: email.to_string(),
                    year: staff.teacher.year,
                    section: staff.teacher.section.clone(),
                }
            }
            Role::Admin => {
                if state.admins.get(email).map(String::as_str) != Some(password) {
                    return Err(bad_credentials());
                }
                LoginUser::default()
            }
        };
        Ok(LoginResponse {
            token: new_id(),
            user,
        })
    }

    fn generate_otp(&self, email: &str) -> Result<(), ApiError> {
        let code = self.passcode();
        let mut state = self.state()?;
        if !state.accounts.contains_key(email) {
            return Err(not_found("account", email));
        }
        state.otps.insert(email.to_string(), code);
        Ok(())
    }

    fn verify_otp(&self, email: &str, otp: &str) -> Result<(), ApiError> {
        let mut state = self.state()?;
        if state.otps.get(email).map(String::as_str) != Some(otp) {
            return Err(ApiError::Status {
                code: 400,
                message: "Invalid OTP".to_string(),
            });
        }
        state.otps.remove(email);
        if let Some(account) = state.accounts.get_mut(email) {
            account.verified = true;
        }
        Ok(())
    }

    fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        let mut state = self.state()?;
        if !state.accounts.contains_key(email) {
            return Err(not_found("account", email));
        }
        state.reset_tokens.retain(|_, owner| owner != email);
        state.reset_tokens.insert(new_id(), email.to_string());
        Ok(())
    }

    fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError> {
        let mut state = self.state()?;
        let email = state
            .reset_tokens
            .remove(token)
            .ok_or_else(|| ApiError::Status {
                code: 400,
                message: "Reset link is invalid or has expired".to_string(),
            })?;
        let account = state
            .accounts
            .get_mut(&email)
            .ok_or_else(|| not_found("account", &email))?;
        account.registration.password = new_password.to_string();
        Ok(())
    }
}

impl ProfileStore for MemoryStore {
    fn fetch_profile(&self, registration_id: &str) -> Result<StudentProfile, ApiError> {
        let state = self.state()?;
        let account = state
            .student(registration_id)
            .ok_or_else(|| not_found("student", registration_id))?;
        Ok(state.profile(account))
    }

    fn update_profile(
        &self,
        registration_id: &str,
        update: &ProfileUpdate,
    ) -> Result<(), ApiError> {
        update
            .validate(self.total_semesters)
            .map_err(ApiError::Invalid)?;
        let mut state = self.state()?;
        let account = state
            .student_mut(registration_id)
            .ok_or_else(|| not_found("student", registration_id))?;
        let mut profile = StudentProfile {
            current_semester: Some(account.registration.current_semester),
            mobile: account.mobile.take(),
            address: account.address.take(),
            parent_address: account.parent_address.take(),
            ..StudentProfile::default()
        };
        update.apply_to(&mut profile);
        if let Some(semester) = profile.current_semester {
            account.registration.current_semester = semester;
        }
        account.mobile = profile.mobile;
        account.address = profile.address;
        account.parent_address = profile.parent_address;
        Ok(())
    }
}

impl ClassroomService for MemoryStore {
    fn class_students(&self, class: &ClassSection) -> Result<Vec<StudentProfile>, ApiError> {
        let state = self.state()?;
        let mut students: Vec<StudentProfile> = state
            .accounts
            .values()
            .filter(|a| a.class.as_ref() == Some(class))
            .map(|a| state.profile(a))
            .collect();
        students.sort_by(|a, b| a.registration_id.cmp(&b.registration_id));
        Ok(students)
    }
}

impl StaffDirectory for MemoryStore {
    fn register_teacher(&self, registration: &TeacherRegistration) -> Result<(), ApiError> {
        registration.validate().map_err(ApiError::Invalid)?;
        let class = registration.class().map_err(ApiError::Invalid)?;
        let mut state = self.state()?;
        if state.email_taken(&registration.email) {
            return Err(conflict(format!("{} is already registered", registration.email)));
        }
        state.staff.push(StaffAccount {
            teacher: Teacher {
                id: Some(new_id()),
                name: registration.name.trim().to_string(),
                email: registration.email.trim().to_string(),
                dob: registration.dob.clone(),
                gender: registration.gender.clone(),
                year: Some(class.year),
                section: Some(class.section),
            },
            password: registration.password.clone(),
        });
        Ok(())
    }

    fn list_teachers(&self) -> Result<Vec<Teacher>, ApiError> {
        Ok(self
            .state()?
            .staff
            .iter()
            .map(|s| s.teacher.clone())
            .collect())
    }

    fn delete_teacher(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.state()?;
        let before = state.staff.len();
        state.staff.retain(|s| s.teacher.id.as_deref() != Some(id));
        if state.staff.len() == before {
            return Err(not_found("teacher", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_creates_then_updates() {
        let store = MemoryStore::new();
        assert_eq!(store.submit_sgpa("R1", 1, 8.0).unwrap(), SubmitOutcome::Created);
        assert_eq!(store.submit_sgpa("R1", 1, 9.0).unwrap(), SubmitOutcome::Updated);
        let history = store.fetch_history("R1").unwrap();
        assert_eq!(history.len(), 1);
        assert!((history[0].sgpa - 9.0).abs() < 1e-12);
        assert!(history[0].id.is_some());
    }

    #[test]
    fn test_passcode_has_configured_width() {
        let store = MemoryStore::with_otp_length(6);
        for _ in 0..20 {
            let code = store.passcode();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_submit_enforces_record_bounds() {
        let store = MemoryStore::new();
        assert!(matches!(store.submit_sgpa("R1", 0, 42.0), Err(ApiError::Invalid(_))));
        assert!(matches!(store.submit_sgpa("R1", 9, 8.0), Err(ApiError::Invalid(_))));
        assert!(matches!(store.submit_sgpa("R1", 2, 10.5), Err(ApiError::Invalid(_))));
        assert!(store.fetch_history("R1").unwrap().is_empty());

        let wide = MemoryStore::new().with_limits(10, 4.0);
        assert!(wide.submit_sgpa("R1", 10, 4.0).is_ok());
        assert!(wide.submit_sgpa("R1", 1, 5.0).is_err());
    }

    #[test]
    fn test_update_cannot_duplicate_a_semester() {
        let store = MemoryStore::new();
        store.submit_sgpa("R1", 1, 8.0).unwrap();
        store.submit_sgpa("R1", 2, 9.0).unwrap();
        let mut records = store.fetch_history("R1").unwrap();
        let second = records.iter_mut().find(|r| r.semester == 2).unwrap();
        second.semester = 1;

        assert!(matches!(
            store.update_sgpas("R1", std::slice::from_ref(second)),
            Err(ApiError::Status { code: 409, .. })
        ));
        assert!(store.load_history("R1").is_ok());
        assert_eq!(store.fetch_cgpa("R1").unwrap(), Some(8.5));
    }

    #[test]
    fn test_update_may_swap_semesters() {
        let store = MemoryStore::new();
        store.submit_sgpa("R1", 1, 8.0).unwrap();
        store.submit_sgpa("R1", 2, 9.0).unwrap();
        let mut records = store.fetch_history("R1").unwrap();
        for record in &mut records {
            record.semester = 3 - record.semester;
        }
        store.update_sgpas("R1", &records).unwrap();
        let history = store.load_history("R1").unwrap();
        assert_eq!(history.sgpas(), vec![9.0, 8.0]);
    }

    #[test]
    fn test_update_with_unknown_id_changes_nothing() {
        let store = MemoryStore::new();
        store.submit_sgpa("R1", 1, 8.0).unwrap();
        let mut records = store.fetch_history("R1").unwrap();
        records[0].sgpa = 6.0;
        records.push(SemesterRecord::new(2, 7.0).with_id("missing"));
        assert!(matches!(
            store.update_sgpas("R1", &records),
            Err(ApiError::NotFound(_))
        ));
        assert!((store.fetch_history("R1").unwrap()[0].sgpa - 8.0).abs() < 1e-12);
    }

    fn teacher_form(email: &str) -> TeacherRegistration {
        TeacherRegistration {
            name: "Meena".to_string(),
            password: "secret123".to_string(),
            email: email.to_string(),
            dob: "1985-02-11".to_string(),
            gender: "female".to_string(),
            year: 2,
            section: "b".to_string(),
        }
    }

    #[test]
    fn test_role_logins() {
        let store = MemoryStore::new();
        store.register_teacher(&teacher_form("meena@x.edu")).unwrap();
        store.add_admin("root@x.edu", "hunter22").unwrap();

        let teacher = store.login_as(Role::Teacher, "meena@x.edu", "secret123").unwrap();
        assert_eq!(teacher.user.role, "teacher");
        assert_eq!(teacher.user.class(), ClassSection::new(2, "B").ok());

        assert!(store.login_as(Role::Admin, "root@x.edu", "hunter22").is_ok());
        assert!(matches!(
            store.login_as(Role::Admin, "meena@x.edu", "secret123"),
            Err(ApiError::Status { code: 401, .. })
        ));
        assert!(matches!(
            store.login("meena@x.edu", "secret123"),
            Err(ApiError::Status { code: 401, .. })
        ));
    }

    #[test]
    fn test_teacher_directory() {
        let store = MemoryStore::new();
        store.register_teacher(&teacher_form("a@x.edu")).unwrap();
        assert!(matches!(
            store.register_teacher(&teacher_form("a@x.edu")),
            Err(ApiError::Status { code: 409, .. })
        ));
        let mut bad = teacher_form("b@x.edu");
        bad.section = "BB".to_string();
        assert!(matches!(store.register_teacher(&bad), Err(ApiError::Invalid(_))));

        let teachers = store.list_teachers().unwrap();
        assert_eq!(teachers.len(), 1);
        let id = teachers[0].id.clone().unwrap();
        store.delete_teacher(&id).unwrap();
        assert!(store.list_teachers().unwrap().is_empty());
        assert!(matches!(store.delete_teacher(&id), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_assign_class_needs_known_student() {
        let store = MemoryStore::new();
        let class = ClassSection::new(1, "A").unwrap();
        assert!(matches!(
            store.assign_class("nobody", class.clone()),
            Err(ApiError::NotFound(_))
        ));
        assert!(store.class_students(&class).unwrap().is_empty());
        assert_eq!(store.total_students(&class).unwrap(), 0);
    }
}

//! REST paths of the portal backend

use crate::core::auth::Role;
use crate::core::models::DocumentKind;

/// HTTP methods used by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

/// One backend call: method plus path relative to the endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// HTTP method
    pub method: Method,
    /// Path beginning with `/`
    pub path: String,
}

impl Route {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// Join the path onto a base endpoint, tolerating a trailing slash.
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", endpoint.trim_end_matches('/'), self.path)
    }
}

/// Percent-encode one path segment.
fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// GET `/api/sgpas/{reg}`
#[must_use]
pub fn history(registration_id: &str) -> Route {
    Route::new(Method::Get, format!("/api/sgpas/{}", segment(registration_id)))
}

/// POST `/api/sgpa`
#[must_use]
pub fn submit_sgpa() -> Route {
    Route::new(Method::Post, "/api/sgpa")
}

/// PUT `/api/sgpa/update`
#[must_use]
pub fn update_sgpas() -> Route {
    Route::new(Method::Put, "/api/sgpa/update")
}

/// DELETE `/api/sgpa/{id}`
#[must_use]
pub fn delete_sgpa(record_id: &str) -> Route {
    Route::new(Method::Delete, format!("/api/sgpa/{}", segment(record_id)))
}

/// POST `/api/set-target`
#[must_use]
pub fn set_target() -> Route {
    Route::new(Method::Post, "/api/set-target")
}

/// GET `/api/target-cgpa/{reg}`
#[must_use]
pub fn target(registration_id: &str) -> Route {
    Route::new(
        Method::Get,
        format!("/api/target-cgpa/{}", segment(registration_id)),
    )
}

/// List links of one kind for a student
#[must_use]
pub fn list_documents(kind: DocumentKind, registration_id: &str) -> Route {
    let reg = segment(registration_id);
    match kind {
        DocumentKind::Certificate => Route::new(Method::Get, format!("/api/{reg}")),
        DocumentKind::Resume => Route::new(Method::Get, format!("/api/resume/{reg}")),
    }
}

/// Create a link
#[must_use]
pub fn add_document(kind: DocumentKind) -> Route {
    match kind {
        DocumentKind::Certificate => Route::new(Method::Post, "/api/upload-certificate"),
        DocumentKind::Resume => Route::new(Method::Post, "/api/upload-resume"),
    }
}

/// Edit a link
#[must_use]
pub fn edit_document(kind: DocumentKind, id: &str) -> Route {
    let id = segment(id);
    match kind {
        DocumentKind::Certificate => {
            Route::new(Method::Put, format!("/api/edit-certificate/{id}"))
        }
        DocumentKind::Resume => Route::new(Method::Put, format!("/api/edit-resume/{id}")),
    }
}

/// Delete a link
#[must_use]
pub fn delete_document(kind: DocumentKind, id: &str) -> Route {
    let id = segment(id);
    match kind {
        DocumentKind::Certificate => {
            Route::new(Method::Delete, format!("/api/delete-certificate/{id}"))
        }
        DocumentKind::Resume => Route::new(Method::Delete, format!("/api/delete-resume/{id}")),
    }
}

/// POST `/api/leave`
#[must_use]
pub fn submit_leave() -> Route {
    Route::new(Method::Post, "/api/leave")
}

/// GET `/api/leave/{reg}`
#[must_use]
pub fn leaves_for(registration_id: &str) -> Route {
    Route::new(Method::Get, format!("/api/leave/{}", segment(registration_id)))
}

/// GET `/api/leave`
#[must_use]
pub fn all_leaves() -> Route {
    Route::new(Method::Get, "/api/leave")
}

/// PATCH `/api/leave/{id}`
#[must_use]
pub fn leave_status(id: &str) -> Route {
    Route::new(Method::Patch, format!("/api/leave/{}", segment(id)))
}

/// POST `/Auth/register`
#[must_use]
pub fn register() -> Route {
    Route::new(Method::Post, "/Auth/register")
}

/// POST `/Auth/login`
#[must_use]
pub fn login() -> Route {
    login_for(Role::Student)
}

/// Login route of each portal: `/Auth/login`, `/teacher/login`, `/admin/login`
#[must_use]
pub fn login_for(role: Role) -> Route {
    match role {
        Role::Student => Route::new(Method::Post, "/Auth/login"),
        Role::Teacher => Route::new(Method::Post, "/teacher/login"),
        Role::Admin => Route::new(Method::Post, "/admin/login"),
    }
}

/// POST `/Auth/generate-otp`
#[must_use]
pub fn generate_otp() -> Route {
    Route::new(Method::Post, "/Auth/generate-otp")
}

/// POST `/Auth/verify-otp`
#[must_use]
pub fn verify_otp() -> Route {
    Route::new(Method::Post, "/Auth/verify-otp")
}

/// POST `/Auth/reset-password`
#[must_use]
pub fn request_password_reset() -> Route {
    Route::new(Method::Post, "/Auth/reset-password")
}

/// PATCH `/Auth/resetpass-otp`
#[must_use]
pub fn reset_password() -> Route {
    Route::new(Method::Patch, "/Auth/resetpass-otp")
}

/// GET `/api/student/{reg}`
#[must_use]
pub fn student_profile(registration_id: &str) -> Route {
    Route::new(Method::Get, format!("/api/student/{}", segment(registration_id)))
}

/// PUT `/api/student/{reg}`
#[must_use]
pub fn update_profile(registration_id: &str) -> Route {
    Route::new(Method::Put, format!("/api/student/{}", segment(registration_id)))
}

/// POST `/teacher/getstd`
#[must_use]
pub fn class_students() -> Route {
    Route::new(Method::Post, "/teacher/getstd")
}

/// POST `/teacher/totalstudents`
#[must_use]
pub fn total_students() -> Route {
    Route::new(Method::Post, "/teacher/totalstudents")
}

/// POST `/teacher/topcgpa`
#[must_use]
pub fn top_cgpa() -> Route {
    Route::new(Method::Post, "/teacher/topcgpa")
}

/// POST `/teacher/classcgpa`
#[must_use]
pub fn class_cgpa() -> Route {
    Route::new(Method::Post, "/teacher/classcgpa")
}

/// POST `/admin/regTeacher`
#[must_use]
pub fn register_teacher() -> Route {
    Route::new(Method::Post, "/admin/regTeacher")
}

/// GET `/teachers`
#[must_use]
pub fn teachers() -> Route {
    Route::new(Method::Get, "/teachers")
}

/// DELETE `/teachers/{id}`
#[must_use]
pub fn delete_teacher(id: &str) -> Route {
    Route::new(Method::Delete, format!("/teachers/{}", segment(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_route() {
        let route = history("21BCE0001");
        assert_eq!(route.method, Method::Get);
        assert_eq!(
            route.url("http://localhost:5000/"),
            "http://localhost:5000/api/sgpas/21BCE0001"
        );
    }

    #[test]
    fn test_segments_are_encoded() {
        assert_eq!(delete_sgpa("a b/c").path, "/api/sgpa/a%20b%2Fc");
        assert_eq!(history("RA21?x=1#f").path, "/api/sgpas/RA21%3Fx%3D1%23f");
    }

    #[test]
    fn test_document_routes_by_kind() {
        assert_eq!(list_documents(DocumentKind::Certificate, "R1").path, "/api/R1");
        assert_eq!(list_documents(DocumentKind::Resume, "R1").path, "/api/resume/R1");
        assert_eq!(
            edit_document(DocumentKind::Resume, "x9").path,
            "/api/edit-resume/x9"
        );
        assert_eq!(
            delete_document(DocumentKind::Certificate, "x9").method,
            Method::Delete
        );
    }

    #[test]
    fn test_auth_routes() {
        assert_eq!(login().path, "/Auth/login");
        assert_eq!(login_for(Role::Teacher).path, "/teacher/login");
        assert_eq!(login_for(Role::Admin).path, "/admin/login");
        assert_eq!(reset_password().method, Method::Patch);
    }

    #[test]
    fn test_staff_routes() {
        assert_eq!(student_profile("RA 1").path, "/api/student/RA%201");
        assert_eq!(update_profile("RA1").method, Method::Put);
        assert_eq!(class_students().path, "/teacher/getstd");
        assert_eq!(top_cgpa().method, Method::Post);
        assert_eq!(delete_teacher("t1").path, "/teachers/t1");
        assert_eq!(teachers().method, Method::Get);
    }
}

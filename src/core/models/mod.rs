//! Data models for `cgpa-tracker`

pub mod course;
pub mod document;
pub mod history;
pub mod leave;
pub mod profile;
pub mod registration;
pub mod semester;
pub mod teacher;

pub use course::{CourseRecord, InvalidRow};
pub use document::{DocumentKind, DocumentLink};
pub use history::StudentAcademicHistory;
pub use leave::{LeaveRequest, LeaveStatus};
pub use profile::{ClassCgpa, ClassSection, ProfileUpdate, StudentProfile, StudentStanding};
pub use registration::Registration;
pub use semester::{SemesterRecord, DEFAULT_TOTAL_SEMESTERS};
pub use teacher::{Teacher, TeacherRegistration};

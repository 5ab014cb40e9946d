//! Shared library for `cgpa-tracker`
//!
//! Computes SGPA and CGPA from course grades, projects the SGPA needed to reach a
//! target CGPA, and talks to the student record portal through the traits in
//! [`core::api`]. The `cgpa` binary is a thin caller over this crate.

pub mod core;
pub mod logger;

pub use crate::core::aggregator::{compute_cgpa, compute_required_sgpa, AcademicAggregator};
pub use crate::core::config;
pub use crate::core::get_version;
pub use crate::core::grades::{GradePoint, GradeScale};

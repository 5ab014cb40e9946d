//! Target CGPA projection
//!
//! Back-computes the SGPA a student needs in remaining semesters to reach a target
//! CGPA, and classifies whether that target is still reachable.

use crate::core::aggregator::{compute_cgpa, compute_required_sgpa_with, required_total};
use crate::core::models::SemesterRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the remaining grade points are spread across future semesters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectionPolicy {
    /// Every remaining semester needs the same SGPA
    #[default]
    Uniform,
    /// Earlier semesters carry more of the load, with weights `n, n-1, ..., 1`
    FrontLoaded,
}

impl ProjectionPolicy {
    /// Split `total` grade points over `remaining` semesters.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn distribute(self, total: f64, remaining: usize) -> Vec<f64> {
        if remaining == 0 {
            return Vec::new();
        }
        match self {
            Self::Uniform => vec![total / remaining as f64; remaining],
            Self::FrontLoaded => {
                let weight_sum = (remaining * (remaining + 1) / 2) as f64;
                (0..remaining)
                    .map(|i| total * (remaining - i) as f64 / weight_sum)
                    .collect()
            }
        }
    }
}

impl FromStr for ProjectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" | "even" => Ok(Self::Uniform),
            "front-loaded" | "front_loaded" | "frontloaded" | "front" => Ok(Self::FrontLoaded),
            _ => Err(format!("Unknown projection policy: '{s}'")),
        }
    }
}

impl fmt::Display for ProjectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::FrontLoaded => write!(f, "front-loaded"),
        }
    }
}

/// Whether a target CGPA can still be reached
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feasibility {
    /// No semesters remain; the CGPA is already fixed
    Determined,
    /// The target is met even with zero points in every remaining semester
    AlreadySecured,
    /// Every required SGPA is within the maximum grade point
    Achievable,
    /// At least one required SGPA exceeds the maximum grade point
    Unreachable {
        /// Points above what the best possible result could supply
        shortfall: f64,
    },
}

impl fmt::Display for Feasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Determined => write!(f, "determined (no semesters remaining)"),
            Self::AlreadySecured => write!(f, "already secured"),
            Self::Achievable => write!(f, "achievable"),
            Self::Unreachable { shortfall } => {
                write!(f, "unreachable (short by {shortfall:.2} points)")
            }
        }
    }
}

/// Required SGPA per remaining semester for a target CGPA
#[derive(Debug, Clone, PartialEq)]
pub struct TargetProjection {
    /// Target CGPA
    pub target_cgpa: f64,
    /// CGPA over completed semesters, `None` when none are recorded
    pub current_cgpa: Option<f64>,
    /// Completed semester count
    pub completed: usize,
    /// Programme length in semesters
    pub total_semesters: u8,
    /// Grade points needed across all remaining semesters
    pub required_total: f64,
    /// Required SGPA per remaining semester, unclamped
    pub required: Vec<f64>,
    /// Policy that produced `required`
    pub policy: ProjectionPolicy,
    /// Maximum grade point per semester
    pub max_point: f64,
}

impl TargetProjection {
    /// Remaining semester count
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.required.len()
    }

    /// Classify the projection against the maximum grade point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn feasibility(&self) -> Feasibility {
        if self.required.is_empty() {
            return Feasibility::Determined;
        }
        if self.required_total <= 0.0 {
            return Feasibility::AlreadySecured;
        }
        let over = self
            .required
            .iter()
            .copied()
            .filter(|v| *v > self.max_point)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));

        match over {
            None => Feasibility::Achievable,
            Some(worst) => {
                let capacity = self.max_point * self.remaining() as f64;
                let shortfall = if self.required_total > capacity {
                    self.required_total - capacity
                } else {
                    worst - self.max_point
                };
                Feasibility::Unreachable { shortfall }
            }
        }
    }

    /// Whether the target can still be met
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        !matches!(self.feasibility(), Feasibility::Unreachable { .. })
    }
}

/// Project a target CGPA over the remaining semesters.
#[must_use]
pub fn project_target(
    history: &[SemesterRecord],
    target_cgpa: f64,
    total_semesters: u8,
    policy: ProjectionPolicy,
    max_point: f64,
) -> TargetProjection {
    TargetProjection {
        target_cgpa,
        current_cgpa: compute_cgpa(history),
        completed: history.len(),
        total_semesters,
        required_total: required_total(history, target_cgpa, total_semesters),
        required: compute_required_sgpa_with(policy, history, target_cgpa, total_semesters),
        policy,
        max_point,
    }
}

/// Highest CGPA reachable if every remaining semester earns `max_point`.
///
/// Returns `None` for a zero-length programme.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn max_achievable_cgpa(
    history: &[SemesterRecord],
    total_semesters: u8,
    max_point: f64,
) -> Option<f64> {
    if total_semesters == 0 {
        return None;
    }
    let total = f64::from(total_semesters);
    let remaining = usize::from(total_semesters).saturating_sub(history.len()) as f64;
    let earned: f64 = history
        .iter()
        .map(|r| r.sgpa)
        .filter(|v| v.is_finite())
        .sum();
    let semesters = total.max(history.len() as f64);
    Some((earned + remaining * max_point) / semesters)
}

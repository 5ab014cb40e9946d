//! Integration tests for SGPA, CGPA, and required-SGPA aggregation

use cgpa_tracker::core::aggregator::{round_to, AcademicAggregator};
use cgpa_tracker::core::models::{CourseRecord, InvalidRow, SemesterRecord};
use cgpa_tracker::core::projection::{project_target, Feasibility, ProjectionPolicy};
use cgpa_tracker::{compute_cgpa, compute_required_sgpa, GradeScale};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

const LABELS: [&str; 9] = ["O", "A+", "A", "B+", "B", "C", "F", "X", "d"];

/// Course sets with mixed valid and invalid rows, the same on every run
fn course_sets(seed: u64, count: usize) -> Vec<Vec<CourseRecord>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(1..=9);
            (0..len)
                .map(|_| {
                    let credits = f64::from(rng.gen_range(-2_i8..=8)) * 0.5;
                    let label = LABELS[rng.gen_range(0..LABELS.len())];
                    CourseRecord::new(credits, label)
                })
                .collect()
        })
        .collect()
}

fn semesters(sgpas: &[f64]) -> Vec<SemesterRecord> {
    sgpas
        .iter()
        .zip(1_u8..)
        .map(|(sgpa, semester)| SemesterRecord::new(semester, *sgpa))
        .collect()
}

#[test]
fn sgpa_is_credit_weighted() {
    let courses = vec![CourseRecord::new(3.0, "O"), CourseRecord::new(4.0, "A")];
    let breakdown = AcademicAggregator::default().sgpa_breakdown(&courses);

    assert!((breakdown.total_points - 62.0).abs() < 1e-9);
    assert!((breakdown.total_credits - 7.0).abs() < 1e-9);
    assert_eq!(breakdown.sgpa.map(|v| round_to(v, 2)), Some(8.86));
}

#[test]
fn negative_credits_are_excluded() {
    let courses = vec![CourseRecord::new(3.0, "O"), CourseRecord::new(-1.0, "A")];
    let breakdown = AcademicAggregator::default().sgpa_breakdown(&courses);

    assert_eq!(breakdown.sgpa, Some(10.0));
    assert_eq!(breakdown.counted, 1);
    assert_eq!(breakdown.excluded.len(), 1);
    assert_eq!(breakdown.excluded[0].0, 1);
}

#[test]
fn unknown_grade_is_excluded_regardless_of_credits() {
    let courses = vec![CourseRecord::new(4.0, "D"), CourseRecord::new(2.0, "B")];
    let breakdown = AcademicAggregator::default().sgpa_breakdown(&courses);

    assert_eq!(breakdown.sgpa, Some(6.0));
    assert!(matches!(
        breakdown.excluded.as_slice(),
        [(0, InvalidRow::UnknownGrade(_))]
    ));
}

#[test]
fn sgpa_without_valid_rows_is_none() {
    let agg = AcademicAggregator::default();
    assert_eq!(agg.compute_sgpa(&[]), None);
    assert_eq!(
        agg.compute_sgpa(&[CourseRecord::new(0.0, "O"), CourseRecord::new(3.0, "X")]),
        None
    );
}

#[test]
fn sgpa_stays_within_scale() {
    let agg = AcademicAggregator::default();
    let grades = ["O", "A+", "A", "B+", "B", "C", "F"];
    for (i, first) in grades.iter().enumerate() {
        for second in &grades[i..] {
            let courses = vec![
                CourseRecord::new(f64::from(u8::try_from(i).unwrap() + 1), *first),
                CourseRecord::new(3.0, *second),
            ];
            let sgpa = agg.compute_sgpa(&courses).unwrap();
            assert!((0.0..=10.0).contains(&sgpa), "{first}/{second} gave {sgpa}");
        }
    }
}

#[test]
fn custom_scale_changes_points() {
    let mut overrides = BTreeMap::new();
    overrides.insert("a".to_string(), 7.5);
    let agg = AcademicAggregator::new(GradeScale::with_overrides(&overrides, 10.0).unwrap());

    assert_eq!(agg.compute_sgpa(&[CourseRecord::new(4.0, " a ")]), Some(7.5));
}

#[test]
fn cgpa_is_mean_of_semesters() {
    assert_eq!(compute_cgpa(&semesters(&[8.0, 9.0])), Some(8.5));
    assert_eq!(compute_cgpa(&[]), None);
}

#[test]
fn cgpa_skips_non_finite_sgpas() {
    assert_eq!(compute_cgpa(&semesters(&[8.0, f64::NAN, 9.0])), Some(8.5));
}

#[test]
fn cgpa_lies_between_best_and_worst() {
    let history = semesters(&[6.2, 9.8, 7.4, 8.1]);
    let cgpa = compute_cgpa(&history).unwrap();
    assert!(cgpa >= 6.2 && cgpa <= 9.8);
}

#[test]
fn required_sgpa_for_scenario() {
    let required = compute_required_sgpa(&semesters(&[8.0, 9.0]), 9.0, 8);

    assert_eq!(required.len(), 6);
    for value in &required {
        assert!((value - 55.0 / 6.0).abs() < 1e-9);
        assert_eq!(round_to(*value, 2), 9.17);
    }
}

#[test]
fn required_sgpa_reaches_target_when_met() {
    let history = semesters(&[7.0, 8.5, 9.0]);
    let target = 8.6;
    let required = compute_required_sgpa(&history, target, 8);

    let mut all = history.clone();
    all.extend(
        required
            .iter()
            .zip(4_u8..)
            .map(|(sgpa, semester)| SemesterRecord::new(semester, *sgpa)),
    );
    assert!((compute_cgpa(&all).unwrap() - target).abs() < 1e-9);
}

#[test]
fn required_sgpa_empty_when_programme_complete() {
    let history = semesters(&[8.0; 8]);
    assert!(compute_required_sgpa(&history, 9.0, 8).is_empty());

    let projection = project_target(&history, 9.0, 8, ProjectionPolicy::Uniform, 10.0);
    assert_eq!(projection.feasibility(), Feasibility::Determined);
}

#[test]
fn required_sgpa_with_empty_history() {
    let required = compute_required_sgpa(&[], 8.0, 8);
    assert_eq!(required, vec![8.0; 8]);
}

#[test]
fn required_sgpa_is_not_clamped() {
    let history = semesters(&[5.0, 5.0]);
    let projection = project_target(&history, 9.5, 8, ProjectionPolicy::Uniform, 10.0);

    assert!(projection.required.iter().all(|v| (v - 11.0).abs() < 1e-9));
    match projection.feasibility() {
        Feasibility::Unreachable { shortfall } => assert!((shortfall - 6.0).abs() < 1e-9),
        other => panic!("expected unreachable, got {other:?}"),
    }
    assert!(!projection.is_feasible());
}

#[test]
fn low_target_is_already_secured() {
    let history = semesters(&[10.0, 10.0]);
    let projection = project_target(&history, 2.0, 3, ProjectionPolicy::Uniform, 10.0);

    assert!(projection.required_total < 0.0);
    assert_eq!(projection.feasibility(), Feasibility::AlreadySecured);
}

#[test]
fn front_loaded_matches_uniform_total() {
    let history = semesters(&[8.0, 9.0]);
    let uniform = project_target(&history, 9.0, 8, ProjectionPolicy::Uniform, 10.0);
    let front = project_target(&history, 9.0, 8, ProjectionPolicy::FrontLoaded, 10.0);

    let sum_uniform: f64 = uniform.required.iter().sum();
    let sum_front: f64 = front.required.iter().sum();
    assert!((sum_uniform - sum_front).abs() < 1e-9);
    assert!(front.required.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn sgpa_ignores_course_order() {
    let agg = AcademicAggregator::default();
    let mut rng = StdRng::seed_from_u64(7);
    for courses in course_sets(11, 200) {
        let expected = agg.compute_sgpa(&courses);

        let mut reversed = courses.clone();
        reversed.reverse();
        let mut rotated = courses.clone();
        rotated.rotate_left(courses.len() / 2);
        let mut shuffled = courses.clone();
        shuffled.shuffle(&mut rng);

        for reordered in [reversed, rotated, shuffled] {
            let got = agg.compute_sgpa(&reordered);
            match (expected, got) {
                (Some(a), Some(b)) => assert!((a - b).abs() < 1e-9, "{courses:?}: {a} vs {b}"),
                (a, b) => assert_eq!(a, b, "{courses:?}"),
            }
            assert_eq!(
                agg.sgpa_breakdown(&reordered).counted,
                agg.sgpa_breakdown(&courses).counted
            );
        }
    }
}

#[test]
fn repeated_computation_is_identical() {
    let agg = AcademicAggregator::default();
    for courses in course_sets(23, 100) {
        let first = agg.sgpa_breakdown(&courses);
        let second = agg.sgpa_breakdown(&courses);
        assert_eq!(first.sgpa.map(f64::to_bits), second.sgpa.map(f64::to_bits));
        assert_eq!(first.total_points.to_bits(), second.total_points.to_bits());
        assert_eq!(first.excluded.len(), second.excluded.len());
    }

    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let sgpas: Vec<f64> = (0..rng.gen_range(1..=8))
            .map(|_| rng.gen_range(0.0..=10.0))
            .collect();
        let history = semesters(&sgpas);
        assert_eq!(
            compute_cgpa(&history).map(f64::to_bits),
            compute_cgpa(&history).map(f64::to_bits)
        );
        assert_eq!(
            compute_required_sgpa(&history, 8.5, 8),
            compute_required_sgpa(&history, 8.5, 8)
        );
    }
}

#[test]
fn single_semester_cgpa_equals_its_sgpa() {
    let agg = AcademicAggregator::default();
    let computed = course_sets(31, 100)
        .iter()
        .filter_map(|courses| agg.compute_sgpa(courses))
        .collect::<Vec<_>>();
    assert!(!computed.is_empty());

    for sgpa in computed.into_iter().chain([0.0, 5.0, 7.333_333_333, 9.99, 10.0]) {
        let history = [SemesterRecord::new(1, sgpa)];
        assert_eq!(compute_cgpa(&history), Some(sgpa));
        assert_eq!(agg.compute_cgpa(&history), Some(sgpa));
    }
}

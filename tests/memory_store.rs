//! Integration tests for the in-process record store

use cgpa_tracker::core::api::{
    ApiError, AuthService, ClassroomService, DocumentStore, LeaveStore, MemoryStore,
    ProfileStore, RecordStore, SubmitOutcome,
};
use cgpa_tracker::core::models::{
    ClassSection, DocumentKind, DocumentLink, LeaveRequest, LeaveStatus, ProfileUpdate,
    Registration,
};
use chrono::NaiveDate;

const REG: &str = "RA2111003010001";

#[test]
fn history_round_trip_through_store() {
    let store = MemoryStore::new();
    assert_eq!(store.submit_sgpa(REG, 2, 9.0).unwrap(), SubmitOutcome::Created);
    assert_eq!(store.submit_sgpa(REG, 1, 8.0).unwrap(), SubmitOutcome::Created);
    store.set_target(REG, 9.0).unwrap();

    let history = store.load_history(REG).unwrap();
    assert_eq!(history.completed(), 2);
    assert_eq!(history.sgpas(), vec![8.0, 9.0]);
    assert_eq!(history.target_cgpa, Some(9.0));
    assert_eq!(store.fetch_cgpa(REG).unwrap(), Some(8.5));
}

#[test]
fn unknown_student_has_empty_history() {
    let store = MemoryStore::new();
    let history = store.load_history("nobody").unwrap();
    assert!(history.is_empty());
    assert_eq!(history.target_cgpa, None);
    assert_eq!(store.fetch_cgpa("nobody").unwrap(), None);
}

#[test]
fn resubmitting_a_semester_replaces_it() {
    let store = MemoryStore::new();
    store.submit_sgpa(REG, 1, 8.0).unwrap();
    assert_eq!(store.submit_sgpa(REG, 1, 7.0).unwrap(), SubmitOutcome::Updated);

    let records = store.fetch_history(REG).unwrap();
    assert_eq!(records.len(), 1);
    assert!((records[0].sgpa - 7.0).abs() < 1e-12);
}

#[test]
fn non_finite_sgpa_is_rejected() {
    let store = MemoryStore::new();
    assert!(matches!(
        store.submit_sgpa(REG, 1, f64::NAN),
        Err(ApiError::Invalid(_))
    ));
    assert!(store.fetch_history(REG).unwrap().is_empty());
}

#[test]
fn edit_and_delete_by_id() {
    let store = MemoryStore::new();
    store.submit_sgpa(REG, 1, 8.0).unwrap();
    store.submit_sgpa(REG, 2, 6.0).unwrap();

    let mut records = store.fetch_history(REG).unwrap();
    let second = records.iter_mut().find(|r| r.semester == 2).unwrap();
    second.sgpa = 9.0;
    store
        .update_sgpas(REG, std::slice::from_ref(second))
        .unwrap();
    assert_eq!(store.fetch_cgpa(REG).unwrap(), Some(8.5));

    let first_id = records
        .iter()
        .find(|r| r.semester == 1)
        .and_then(|r| r.id.clone())
        .unwrap();
    store.delete_sgpa(&first_id).unwrap();
    assert_eq!(store.fetch_cgpa(REG).unwrap(), Some(9.0));
    assert!(matches!(
        store.delete_sgpa(&first_id),
        Err(ApiError::NotFound(_))
    ));
}

#[test]
fn documents_are_scoped_by_kind_and_student() {
    let store = MemoryStore::new();
    let cert = DocumentLink::new(
        DocumentKind::Certificate,
        "Machine Learning",
        "https://coursera.org/verify/ABC",
        REG.to_string(),
    )
    .unwrap();
    let resume = DocumentLink::new(
        DocumentKind::Resume,
        "CV 2026",
        "https://example.com/cv.pdf",
        REG.to_string(),
    )
    .unwrap();
    store.add_document(&cert).unwrap();
    store.add_document(&resume).unwrap();

    let certs = store.list_documents(DocumentKind::Certificate, REG).unwrap();
    assert_eq!(certs.len(), 1);
    assert!(store
        .list_documents(DocumentKind::Certificate, "someone-else")
        .unwrap()
        .is_empty());

    let mut edited = certs[0].clone();
    edited.title = "Deep Learning".to_string();
    store.edit_document(&edited).unwrap();
    let certs = store.list_documents(DocumentKind::Certificate, REG).unwrap();
    assert_eq!(certs[0].title, "Deep Learning");

    // Ids are only valid for their own kind
    let id = certs[0].id.clone().unwrap();
    assert!(store.delete_document(DocumentKind::Resume, &id).is_err());
    store.delete_document(DocumentKind::Certificate, &id).unwrap();
    assert!(store
        .list_documents(DocumentKind::Certificate, REG)
        .unwrap()
        .is_empty());
    assert_eq!(store.list_documents(DocumentKind::Resume, REG).unwrap().len(), 1);
}

#[test]
fn editing_a_link_without_id_fails() {
    let store = MemoryStore::new();
    let link = DocumentLink::new(
        DocumentKind::Resume,
        "CV",
        "https://example.com/cv.pdf",
        REG.to_string(),
    )
    .unwrap();
    assert!(matches!(store.edit_document(&link), Err(ApiError::Invalid(_))));
}

fn leave(from: u32, to: u32) -> LeaveRequest {
    LeaveRequest::new(
        REG.to_string(),
        "Asha".to_string(),
        "asha@srmist.edu.in".to_string(),
        NaiveDate::from_ymd_opt(2026, 3, from).unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, to).unwrap(),
        "family function".to_string(),
    )
    .unwrap()
}

#[test]
fn leave_requests_move_from_pending_once() {
    let store = MemoryStore::new();
    store.submit_leave(&leave(2, 4)).unwrap();
    store.submit_leave(&leave(10, 10)).unwrap();

    let mine = store.leaves_for(REG).unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|l| l.status == LeaveStatus::Pending));

    let first = mine[0].id.clone().unwrap();
    let second = mine[1].id.clone().unwrap();
    store.set_leave_status(&first, LeaveStatus::Approved).unwrap();
    store.set_leave_status(&second, LeaveStatus::Denied).unwrap();

    assert!(store.set_leave_status(&first, LeaveStatus::Denied).is_err());
    assert!(store.set_leave_status(&second, LeaveStatus::Pending).is_err());
    assert!(matches!(
        store.set_leave_status("missing", LeaveStatus::Approved),
        Err(ApiError::NotFound(_))
    ));

    let all = store.all_leaves().unwrap();
    let statuses: Vec<_> = all.iter().map(|l| l.status).collect();
    assert_eq!(statuses, vec![LeaveStatus::Approved, LeaveStatus::Denied]);
}

#[test]
fn invalid_leave_is_not_stored() {
    let store = MemoryStore::new();
    let mut request = leave(2, 4);
    request.reason = "  ".to_string();
    assert!(matches!(store.submit_leave(&request), Err(ApiError::Invalid(_))));
    assert!(store.all_leaves().unwrap().is_empty());
}

#[test]
fn out_of_range_records_are_rejected() {
    let store = MemoryStore::new();
    assert!(matches!(store.submit_sgpa(REG, 1, 11.0), Err(ApiError::Invalid(_))));
    assert!(matches!(store.submit_sgpa(REG, 1, -0.5), Err(ApiError::Invalid(_))));
    assert!(matches!(store.submit_sgpa(REG, 0, 8.0), Err(ApiError::Invalid(_))));

    store.submit_sgpa(REG, 1, 8.0).unwrap();
    let mut records = store.fetch_history(REG).unwrap();
    records[0].sgpa = 12.0;
    assert!(matches!(store.update_sgpas(REG, &records), Err(ApiError::Invalid(_))));
    assert_eq!(store.fetch_cgpa(REG).unwrap(), Some(8.0));
}

#[test]
fn moving_a_record_onto_a_taken_semester_fails() {
    let store = MemoryStore::new();
    store.submit_sgpa(REG, 1, 8.0).unwrap();
    store.submit_sgpa(REG, 3, 6.0).unwrap();

    let mut records = store.fetch_history(REG).unwrap();
    for record in &mut records {
        record.semester = 3;
    }
    assert!(matches!(
        store.update_sgpas(REG, &records),
        Err(ApiError::Status { code: 409, .. })
    ));
    let history = store.load_history(REG).unwrap();
    assert_eq!(history.sgpas(), vec![8.0, 6.0]);
}

fn student(reg: &str, email: &str) -> Registration {
    Registration {
        email: email.to_string(),
        registration_id: reg.to_string(),
        name: format!("Student {reg}"),
        dob: "2004-05-01".to_string(),
        password: "secret123".to_string(),
        current_semester: 3,
        gender: String::new(),
    }
}

#[test]
fn class_views_rank_by_cgpa() {
    let store = MemoryStore::new();
    let class = ClassSection::new(2, "A").unwrap();
    let other = ClassSection::new(2, "B").unwrap();
    let grades = [("R1", 7.0), ("R2", 9.5), ("R3", 8.0), ("R4", 6.0), ("R5", 9.0)];
    for (reg, sgpa) in grades {
        store.register(&student(reg, &format!("{reg}@x.edu"))).unwrap();
        store.assign_class(reg, class.clone()).unwrap();
        store.submit_sgpa(reg, 1, sgpa).unwrap();
    }
    store.register(&student("R6", "R6@x.edu")).unwrap();
    store.assign_class("R6", other.clone()).unwrap();
    store.register(&student("R7", "R7@x.edu")).unwrap();
    store.assign_class("R7", class.clone()).unwrap();

    assert_eq!(store.total_students(&class).unwrap(), 6);
    assert_eq!(store.total_students(&other).unwrap(), 1);

    let top: Vec<String> = store
        .top_students(&class)
        .unwrap()
        .into_iter()
        .map(|s| s.registration_id)
        .collect();
    assert_eq!(top, vec!["R2", "R5", "R3", "R1"]);

    let summary = store.class_cgpa(&class).unwrap();
    assert_eq!(summary.students.len(), 6);
    let average = summary.average_cgpa.unwrap();
    assert!((average - 7.9).abs() < 1e-9);
}

#[test]
fn profile_collects_account_and_history() {
    let store = MemoryStore::new();
    store.register(&student(REG, "asha@x.edu")).unwrap();
    store.submit_sgpa(REG, 1, 8.0).unwrap();
    store.submit_sgpa(REG, 2, 9.0).unwrap();
    store.set_target(REG, 9.2).unwrap();

    let profile = store.fetch_profile(REG).unwrap();
    assert_eq!(profile.email, "asha@x.edu");
    assert_eq!(profile.current_semester, Some(3));
    assert_eq!(profile.cgpa(), Some(8.5));
    assert_eq!(profile.target_cgpa, Some(9.2));
    assert!(matches!(store.fetch_profile("nobody"), Err(ApiError::NotFound(_))));
}

#[test]
fn profile_update_is_validated_then_applied() {
    let store = MemoryStore::new();
    store.register(&student(REG, "asha@x.edu")).unwrap();

    let bad = ProfileUpdate {
        current_semester: Some(12),
        ..ProfileUpdate::default()
    };
    assert!(matches!(store.update_profile(REG, &bad), Err(ApiError::Invalid(_))));

    let update = ProfileUpdate {
        current_semester: Some(4),
        mobile: Some(" +91 98400-12345 ".to_string()),
        address: Some("12 Lake Road".to_string()),
        parent_address: None,
    };
    store.update_profile(REG, &update).unwrap();

    let profile = store.fetch_profile(REG).unwrap();
    assert_eq!(profile.current_semester, Some(4));
    assert_eq!(profile.mobile.as_deref(), Some("+91 98400-12345"));
    assert_eq!(profile.address.as_deref(), Some("12 Lake Road"));
    assert_eq!(profile.parent_address, None);
}

//! Integration tests for session persistence

use gwa_calc::core::range_filter::RangeFilter;
use gwa_calc::core::storage::{
    FileStore, KeyValueStore, MemoryStore, DATA_BLOB_KEY, RANGE_FILTER_KEY, SCHOOL_NAME_KEY,
    STUDENT_NAME_KEY,
};
use gwa_calc::core::validation::GradingBounds;
use gwa_calc::models::{AcademicPeriod, AcademicStructure, SubjectEntry, SubjectField};
use gwa_calc::GwaSession;
use std::fs;
use tempfile::TempDir;

fn open(dir: &std::path::Path) -> GwaSession<FileStore> {
    GwaSession::load(
        FileStore::new(dir),
        AcademicStructure::default(),
        GradingBounds::default(),
    )
}

fn fill(session: &mut GwaSession<FileStore>, period: AcademicPeriod, name: &str, grade: &str, units: &str) {
    let index = session.add_subject(period).expect("period in structure");
    session
        .edit_field(period, index, SubjectField::Name, name)
        .expect("name");
    session
        .edit_field(period, index, SubjectField::Grade, grade)
        .expect("grade");
    session
        .edit_field(period, index, SubjectField::Units, units)
        .expect("units");
}

#[test]
fn test_state_survives_reload() {
    let temp_dir = TempDir::new().expect("temp dir");
    let first = AcademicPeriod::new(0, 0);
    let later = AcademicPeriod::new(2, 1);

    {
        let mut session = open(temp_dir.path());
        fill(&mut session, first, "Algebra", "1.25", "3");
        fill(&mut session, later, "Thesis", "1", "6");
        session.set_student_name(" Ada ");
        session.set_school_name("Analytical College");
        session.set_range_filter(RangeFilter::between(first, AcademicPeriod::new(1, 1)));
    }

    let session = open(temp_dir.path());
    assert_eq!(
        session.records().subjects(first),
        &[SubjectEntry::new("Algebra", "1.25", "3")]
    );
    assert_eq!(session.records().subjects(later)[0].name, "Thesis");
    assert_eq!(session.student_name(), "Ada");
    assert_eq!(session.school_name(), "Analytical College");
    assert_eq!(
        *session.range(),
        RangeFilter::between(first, AcademicPeriod::new(1, 1))
    );
    assert_eq!(session.summary().cumulative_gwa, Some(1.25));
}

#[test]
fn test_files_use_documented_keys() {
    let temp_dir = TempDir::new().expect("temp dir");
    let mut session = open(temp_dir.path());
    session.set_school_name("MIT");

    for key in [DATA_BLOB_KEY, RANGE_FILTER_KEY, SCHOOL_NAME_KEY, STUDENT_NAME_KEY] {
        assert!(temp_dir.path().join(key).is_file(), "missing {key}");
    }
    assert_eq!(
        fs::read_to_string(temp_dir.path().join(RANGE_FILTER_KEY)).expect("read"),
        "all"
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join(DATA_BLOB_KEY)).expect("read"),
        "{}"
    );
}

#[test]
fn test_corrupt_keys_fall_back_independently() {
    let temp_dir = TempDir::new().expect("temp dir");
    fs::write(temp_dir.path().join(DATA_BLOB_KEY), "[1, 2").expect("write");
    fs::write(temp_dir.path().join(RANGE_FILTER_KEY), "first-to-last").expect("write");
    fs::write(temp_dir.path().join(STUDENT_NAME_KEY), "Grace").expect("write");

    let session = open(temp_dir.path());
    assert!(session.records().is_empty());
    assert_eq!(*session.range(), RangeFilter::All);
    assert_eq!(session.student_name(), "Grace");
    assert_eq!(session.school_name(), "");
}

#[test]
fn test_lenient_blob_decoding() {
    let blob = r#"{"0":{"1":[{"name":"Lab","grade":1.5,"units":2},{"name":null},{}]}}"#;
    let store = MemoryStore::with_entries(&[(DATA_BLOB_KEY, blob)]);
    let session = GwaSession::load(store, AcademicStructure::default(), GradingBounds::default());

    let subjects = session.records().subjects(AcademicPeriod::new(0, 1));
    assert_eq!(subjects.len(), 3);
    assert_eq!(subjects[0], SubjectEntry::new("Lab", "1.5", "2"));
    assert_eq!(subjects[1], SubjectEntry::blank());
    assert_eq!(subjects[2], SubjectEntry::blank());
    assert_eq!(session.semester_gwa(AcademicPeriod::new(0, 1)), Some(1.5));
}

#[test]
fn test_write_failures_do_not_interrupt() {
    let mut store = MemoryStore::new();
    store.set_fail_writes(true);
    let mut session =
        GwaSession::load(store, AcademicStructure::default(), GradingBounds::default());

    let period = AcademicPeriod::new(1, 0);
    let index = session.add_subject(period).expect("period in structure");
    session
        .edit_field(period, index, SubjectField::Grade, "2")
        .expect("grade");
    session
        .edit_field(period, index, SubjectField::Units, "3")
        .expect("units");

    assert_eq!(session.semester_gwa(period), Some(2.0));
    assert!(session.store().is_empty());
}

#[test]
fn test_clear_all_removes_files() {
    let temp_dir = TempDir::new().expect("temp dir");
    let mut session = open(temp_dir.path());
    fill(&mut session, AcademicPeriod::new(0, 0), "Art", "2", "1");

    assert!(session.clear_all());
    for key in [DATA_BLOB_KEY, RANGE_FILTER_KEY, SCHOOL_NAME_KEY, STUDENT_NAME_KEY] {
        assert_eq!(session.store().get(key).expect("get"), None);
    }

    let reloaded = open(temp_dir.path());
    assert!(!reloaded.has_data());
    assert!(!open(temp_dir.path()).clear_all());
}

#[test]
fn test_remove_shifts_following_subjects() {
    let temp_dir = TempDir::new().expect("temp dir");
    let period = AcademicPeriod::new(0, 0);
    let mut session = open(temp_dir.path());
    fill(&mut session, period, "First", "1", "3");
    fill(&mut session, period, "Second", "2", "3");

    let removed = session.remove_subject(period, 0).expect("entry exists");
    assert_eq!(removed.name, "First");
    assert!(session.remove_subject(period, 7).is_none());

    let reloaded = open(temp_dir.path());
    let subjects = reloaded.records().subjects(period);
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0].name, "Second");
}

#[test]
fn test_huge_period_indices_on_disk() {
    let temp_dir = TempDir::new().expect("temp dir");
    let huge = usize::MAX;
    fs::write(
        temp_dir.path().join(DATA_BLOB_KEY),
        format!(r#"{{"{huge}":{{"0":[{{"name":"Ghost","grade":"1","units":"3"}}]}}}}"#),
    )
    .expect("write");
    fs::write(temp_dir.path().join(RANGE_FILTER_KEY), format!("0-0-{huge}-{huge}")).expect("write");
    fs::write(temp_dir.path().join(STUDENT_NAME_KEY), "Grace").expect("write");
    fs::write(temp_dir.path().join(SCHOOL_NAME_KEY), "Navy School").expect("write");

    let session = open(temp_dir.path());
    assert_eq!(session.student_name(), "Grace");
    assert_eq!(session.school_name(), "Navy School");
    assert_eq!(
        *session.range(),
        RangeFilter::between(AcademicPeriod::new(0, 0), AcademicPeriod::new(huge, huge))
    );

    let summary = session.summary();
    assert_eq!(summary.cumulative_gwa, Some(1.0));
    assert_eq!(summary.total_units, 3.0);
    assert_eq!(summary.active_semesters, 1);
    assert!(session
        .range()
        .label(session.structure())
        .ends_with(&format!("Year {huge} Sem {huge}")));
}

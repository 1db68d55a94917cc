use super::{check, check_file};
use crate::jsonl::write_records;
use crate::section::{SectionId, SectionRecord};

fn valid_lines() -> Vec<u8> {
    let id = |s: &str| s.parse::<SectionId>().unwrap();
    let mut buf = Vec::new();
    write_records(
        &mut buf,
        &[
            SectionRecord::new(id("1"), "Introduction", 1, "d"),
            SectionRecord::new(id("1.1"), "Scope", 2, "d"),
        ],
    )
    .unwrap();
    buf
}

#[test]
fn test_written_records_pass() {
    let report = check(valid_lines().as_slice()).unwrap();
    assert_eq!(report.total_records, 2);
    assert_eq!(report.valid_records, 2);
    assert_eq!(report.invalid_records, 0);
    assert!(report.field_types_valid);
    assert!(report.errors.is_empty());
}

#[test]
fn test_missing_fields_are_listed() {
    let report = check(r#"{"section_id":"1","title":"Intro","page":1}"#.as_bytes()).unwrap();
    assert_eq!(report.invalid_records, 1);
    assert_eq!(
        report.missing_fields,
        ["level", "parent_id", "full_path", "doc_title", "tags"]
    );
    assert!(report.errors[0].starts_with("Record 1: missing fields level"));
    // Missing is not mistyped.
    assert!(report.field_types_valid);
}

#[test]
fn test_wrong_types_are_flagged() {
    let line = r#"{"section_id":"1","title":"Intro","page":"1","level":1,"parent_id":3,"full_path":"1 Intro","doc_title":"d","tags":[]}"#;
    let report = check(line.as_bytes()).unwrap();
    assert!(!report.field_types_valid);
    assert_eq!(report.invalid_records, 1);
    assert!(report.errors[0].contains("page"));
    assert!(report.errors[0].contains("parent_id"));
}

#[test]
fn test_bad_lines_do_not_stop_the_check() {
    let mut input = b"not json\n\n[1, 2]\n".to_vec();
    input.extend(valid_lines());
    let report = check(input.as_slice()).unwrap();

    assert_eq!(report.total_records, 4);
    assert_eq!(report.valid_records, 2);
    assert_eq!(report.invalid_records, 2);
    assert!(report.errors[0].starts_with("Record 1: invalid JSON"));
    assert_eq!(report.errors[1], "Record 3: not a JSON object");
}

#[test]
fn test_check_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spec_spec.jsonl");
    std::fs::write(&path, valid_lines()).unwrap();

    assert_eq!(check_file(&path).unwrap().valid_records, 2);
    assert!(check_file(&dir.path().join("absent.jsonl")).is_err());
}

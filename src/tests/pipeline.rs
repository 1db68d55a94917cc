use super::{reconcile_records, DocumentInput, Engine};
use crate::defect::Defect;
use crate::error::ReconcileError;
use crate::input::{self, PageLine};
use crate::section::{Provenance, SectionId, SectionRecord};

fn lines(entries: &[(u32, &str)]) -> Vec<PageLine> {
    entries
        .iter()
        .map(|&(page, text)| PageLine::new(page, text).unwrap())
        .collect()
}

fn id(s: &str) -> SectionId {
    s.parse().unwrap()
}

#[test]
fn test_matching_passes_reach_full_coverage() {
    let document = DocumentInput {
        toc: lines(&[
            (1, "1 Introduction ... 1"),
            (1, "1.1 Scope ... 2"),
            (1, "1.2 Definitions ... 3"),
        ]),
        body: lines(&[
            (1, "1 Introduction 1"),
            (2, "1.1 Scope 2"),
            (3, "1.2 Definitions 3"),
        ]),
    };
    let run = Engine::new("PD Spec").run(&document).unwrap();

    assert_eq!(run.toc.len(), 3);
    assert_eq!(run.body.len(), 3);
    assert!((run.report.coverage_percentage() - 100.0).abs() < f64::EPSILON);
    assert!(run.report.structural_defects().is_empty());
    assert!(run.report.orphaned_sections().is_empty());
    assert!(run.report.parent_child_mismatches().is_empty());
}

#[test]
fn test_unfound_toc_entry_is_reported() {
    let document = DocumentInput {
        toc: lines(&[
            (2, "2 Cable Assemblies ..... 10"),
            (2, "2.1 Plugs ..... 11"),
            (2, "2.1.1 Dimensions ..... 11"),
            (2, "2.1.2 Materials ..... 12"),
        ]),
        body: lines(&[
            (10, "2 Cable Assemblies"),
            (11, "2.1 Plugs"),
            (11, "2.1.1 Dimensions"),
            (12, "Plugs shall be made of a conductive material."),
        ]),
    };
    let run = Engine::new("d").run(&document).unwrap();

    assert_eq!(run.report.toc_only(), 1);
    assert_eq!(run.report.toc_only_sections()[0].section_id, id("2.1.2"));
    assert!(run.report.coverage_percentage() < 100.0);
}

#[test]
fn test_printed_pages_survive_the_body_scan() {
    let document = DocumentInput {
        toc: lines(&[
            (1, "1 Introduction ... 1"),
            (1, "1.1 Scope ... 2"),
            (1, "1.2 Definitions ... 3"),
        ]),
        body: lines(&[
            (1, "1 Introduction 1"),
            (1, "1.1 Scope 2"),
            (1, "1.2 Definitions 3"),
        ]),
    };
    let run = Engine::new("PD Spec").run(&document).unwrap();

    let pages: Vec<u32> = run.body.iter().map(|r| r.page).collect();
    assert_eq!(pages, [1, 2, 3]);
    assert!((run.report.coverage_percentage() - 100.0).abs() < f64::EPSILON);
    assert!(run.report.structural_defects().is_empty());
}

#[test]
fn test_toc_lines_in_the_body_agree_with_headings() {
    let pages = input::split_pages(
        "Contents\n1 Introduction ..... 3\n1.1 Scope ..... 4\x0c\
         Revision history\x0c\
         1 Introduction\nThis document describes cables.\x0c\
         1.1 Scope\nIt covers plugs.",
    );
    let toc_pages = input::detect_toc_pages(&pages, 20, 3);
    assert_eq!(toc_pages, [1]);

    let document = DocumentInput {
        toc: input::page_lines(&pages, toc_pages),
        body: input::all_lines(&pages),
    };
    let run = Engine::new("d").run(&document).unwrap();

    let body: Vec<(String, u32)> = run
        .body
        .iter()
        .map(|r| (r.section_id.to_string(), r.page))
        .collect();
    assert_eq!(body, [("1".to_string(), 3), ("1.1".to_string(), 4)]);
    assert!((run.report.coverage_percentage() - 100.0).abs() < f64::EPSILON);
    assert!(run.report.parent_child_mismatches().is_empty());
    // The real headings repeat the contents entries on the same pages.
    assert_eq!(run.report.structural_defects().len(), 2);
    assert!(run
        .report
        .structural_defects()
        .iter()
        .all(|d| matches!(d.defect, Defect::DuplicateIdentifier { .. })));
}

#[test]
fn test_body_records_never_start_on_page_zero() {
    assert!(PageLine::new(0, "1 Introduction").is_err());

    let body: Vec<PageLine> = (0..3)
        .filter_map(|page| PageLine::new(page, "2 Introduction").ok())
        .chain(lines(&[(4, "2.1 Scope")]))
        .collect();
    let document = DocumentInput {
        toc: lines(&[(1, "2 Introduction ..... 1")]),
        body,
    };
    let run = Engine::new("d").run(&document).unwrap();

    assert_eq!(run.body.len(), 2);
    assert!(run.body.iter().all(|r| r.page >= 1));
    assert_eq!(run.body.records()[0].page, 2);
}

#[test]
fn test_bare_headings_can_be_disabled() {
    let document = DocumentInput {
        toc: lines(&[(1, "1 Introduction ..... 2")]),
        body: lines(&[(2, "1 Introduction")]),
    };
    let engine = Engine {
        body_bare_headings: false,
        ..Engine::new("d")
    };
    let run = engine.run(&document).unwrap();

    assert!(run.body.is_empty());
    assert_eq!(run.report.toc_only(), 1);
}

#[test]
fn test_empty_pass_is_an_error() {
    let engine = Engine::new("d");
    let some = lines(&[(1, "1 Introduction 1")]);

    let err = engine
        .run(&DocumentInput {
            toc: Vec::new(),
            body: some.clone(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ReconcileError::EmptyInput {
            provenance: Provenance::Toc
        }
    ));

    let err = engine
        .run(&DocumentInput {
            toc: some,
            body: Vec::new(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ReconcileError::EmptyInput {
            provenance: Provenance::Body
        }
    ));
}

#[test]
fn test_no_headings_is_not_an_error() {
    let document = DocumentInput {
        toc: lines(&[(1, "Contents")]),
        body: lines(&[(1, "The Source shall respond within tSenderResponse.")]),
    };
    let run = Engine::new("d").run(&document).unwrap();

    assert_eq!(run.report.total_toc(), 0);
    assert!(run.report.coverage_ratio().abs() < f64::EPSILON);
}

#[test]
fn test_duplicates_reach_the_report() {
    let document = DocumentInput {
        toc: lines(&[(1, "4 Cables ..... 9"), (1, "4.1 Assemblies ..... 10")]),
        body: lines(&[(10, "4.1 Assemblies"), (9, "4.1 Assemblies")]),
    };
    let run = Engine::new("d").run(&document).unwrap();

    assert_eq!(run.body.len(), 1);
    assert_eq!(run.body.records()[0].page, 10);
    assert!(run
        .report
        .structural_defects()
        .iter()
        .any(|d| matches!(
            d.defect,
            Defect::DuplicateIdentifier {
                kept_page: 10,
                discarded_page: 9,
                ..
            }
        )));
}

#[test]
fn test_stored_records_are_revalidated() {
    let mut tampered = SectionRecord::new(id("1.1"), "Scope", 2, "d");
    tampered.level = 3;
    let toc = vec![SectionRecord::new(id("1"), "Introduction", 1, "d"), tampered];
    let body = vec![SectionRecord::new(id("1"), "Introduction", 1, "d")];

    let run = reconcile_records(toc, body).unwrap();
    assert_eq!(run.report.level_inconsistencies().len(), 1);
    assert_eq!(run.report.toc_only(), 1);
    assert!((run.report.coverage_percentage() - 50.0).abs() < f64::EPSILON);

    assert!(matches!(
        reconcile_records(Vec::new(), Vec::new()),
        Err(ReconcileError::EmptyInput { .. })
    ));
}

#[test]
fn test_runs_are_repeatable() {
    let document = DocumentInput {
        toc: lines(&[(1, "1 Introduction ..... 2"), (1, "1.2 Scope ..... 3")]),
        body: lines(&[(2, "1 Introduction"), (3, "1.2 Scope"), (4, "7 Extra")]),
    };
    let engine = Engine::new("d");
    let first = serde_json::to_string(&engine.run(&document).unwrap().report).unwrap();
    let second = serde_json::to_string(&engine.run(&document).unwrap().report).unwrap();
    assert_eq!(first, second);
}

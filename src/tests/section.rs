use super::{Provenance, SectionId, SectionRecord, SectionSequence};

fn id(s: &str) -> SectionId {
    s.parse().unwrap()
}

#[test]
fn test_parse_dotted_identifier() {
    let section_id = id("2.1.2");
    assert_eq!(section_id.components(), &[2, 1, 2]);
    assert_eq!(section_id.level(), 3);
    assert_eq!(section_id.last(), 2);
    assert_eq!(section_id.to_string(), "2.1.2");
}

#[test]
fn test_parent_drops_last_component() {
    assert_eq!(id("2.1.2").parent(), Some(id("2.1")));
    assert_eq!(id("2.1").parent(), Some(id("2")));
    assert_eq!(id("2").parent(), None);
}

#[test]
fn test_rejects_malformed_identifiers() {
    for bad in ["", "1.", ".1", "1..2", "0", "1.0", "a.1", "+1", "1 .2", "99999999999"] {
        assert!(bad.parse::<SectionId>().is_err(), "{bad:?} should not parse");
    }
}

#[test]
fn test_identifiers_order_numerically() {
    let mut ids = vec![id("2"), id("1.10"), id("1.2"), id("1"), id("1.1")];
    ids.sort();
    let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["1", "1.1", "1.2", "1.10", "2"]);
}

#[test]
fn test_record_derives_fields_from_identifier() {
    let record = SectionRecord::new(id("4.2.1"), "  Source Capabilities ", 88, "PD Spec");
    assert_eq!(record.title, "Source Capabilities");
    assert_eq!(record.level, 3);
    assert_eq!(record.parent_id, Some(id("4.2")));
    assert_eq!(record.full_path, "4.2.1 Source Capabilities");
    assert_eq!(record.doc_title, "PD Spec");
    assert!(record.tags.is_empty());
}

#[test]
fn test_top_level_record_has_no_parent() {
    let record = SectionRecord::new(id("1"), "Introduction", 1, "PD Spec");
    assert_eq!(record.level, 1);
    assert_eq!(record.parent_id, None);
    assert_eq!(record.full_path, "1 Introduction");
}

#[test]
fn test_record_serialises_identifiers_as_strings() {
    let record = SectionRecord::new(id("1.1"), "Scope", 2, "PD Spec")
        .with_tags(vec!["intro".to_string()]);
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["section_id"], "1.1");
    assert_eq!(json["parent_id"], "1");
    assert_eq!(json["level"], 2);
    assert_eq!(json["full_path"], "1.1 Scope");
    assert_eq!(json["tags"][0], "intro");

    let top = serde_json::to_value(SectionRecord::new(id("1"), "Intro", 1, "PD Spec")).unwrap();
    assert!(top["parent_id"].is_null());
}

#[test]
fn test_deserialise_rejects_bad_identifier() {
    let line = r#"{"doc_title":"d","section_id":"1..2","title":"t","page":1,"level":2,"parent_id":null,"full_path":"1..2 t","tags":[]}"#;
    assert!(serde_json::from_str::<SectionRecord>(line).is_err());
}

#[test]
fn test_sequence_lookup() {
    let sequence = SectionSequence::from_records(
        Provenance::Toc,
        vec![
            SectionRecord::new(id("1"), "Introduction", 1, "d"),
            SectionRecord::new(id("1.1"), "Scope", 2, "d"),
        ],
    );
    assert_eq!(sequence.provenance(), Provenance::Toc);
    assert_eq!(sequence.len(), 2);
    assert_eq!(sequence.get(&id("1.1")).map(|r| r.page), Some(2));
    assert!(sequence.get(&id("2")).is_none());
}

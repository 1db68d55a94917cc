use super::Config;

#[test]
fn test_empty_file_gives_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.doc_title, "Untitled Specification");
    assert!(config.title_keywords.is_empty());
    assert_eq!(config.title_scan_pages, 3);
    assert_eq!(config.toc_scan_pages, 20);
    assert_eq!(config.toc_min_numbered_lines, 3);
    assert!(config.body_bare_headings);
    assert_eq!(config.output_prefix, "spec");
}

#[test]
fn test_overrides() {
    let config = Config::parse(
        r#"
doc_title = "USB Power Delivery"
title_keywords = ["power", "delivery"]
toc_scan_pages = 8
body_bare_headings = false
"#,
    )
    .unwrap();
    assert_eq!(config.doc_title, "USB Power Delivery");
    assert_eq!(config.title_keywords, ["power", "delivery"]);
    assert_eq!(config.toc_scan_pages, 8);
    assert!(!config.body_bare_headings);
    assert_eq!(config.output_prefix, "spec");
}

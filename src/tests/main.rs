use super::prepare_index;
use regtree::config::Config;
use regtree::diff::DiffApplier;
use regtree::formats::html::HtmlFormat;
use regtree::Error;
use std::fs;
use tempfile::tempdir;

const PAGE: &str = r#"<div id="reg-content"><li id="1005-1">ab</li></div>"#;

#[test]
fn test_bad_diff_position_fails_only_that_document() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.html");
    let second = dir.path().join("second.html");
    fs::write(&first, PAGE).unwrap();
    fs::write(&second, r#"<div id="reg-content"><li id="1005-1">abcdefgh</li></div>"#).unwrap();
    let applier = DiffApplier::from_json(
        r#"{"1005-1": {"op": "modified", "text": [["insert", 5, "X"]]}}"#,
        "1005",
    )
    .unwrap();
    let cfg = Config::default();

    let failed = prepare_index(&first, &HtmlFormat, &cfg, Some(&applier));
    let marked = prepare_index(&second, &HtmlFormat, &cfg, Some(&applier)).unwrap();

    assert!(matches!(failed, Err(Error::DiffPosition { .. })));
    assert_eq!(
        marked.get("1005-1").map(|r| r.content.as_str()),
        Some("abcdef<ins>X </ins>gh")
    );
}

#[test]
fn test_without_diff_index_is_unchanged() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reg.html");
    fs::write(&path, PAGE).unwrap();

    let index = prepare_index(&path, &HtmlFormat, &Config::default(), None).unwrap();

    assert_eq!(index.get("1005-1").map(|r| r.content.as_str()), Some("ab"));
}

#[test]
fn test_added_section_is_merged_and_marked() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reg.html");
    fs::write(&path, PAGE).unwrap();
    let applier = DiffApplier::from_json(
        r#"{"1005-1-a": {"op": "added", "node": {"text": "new", "title": null}}}"#,
        "1005",
    )
    .unwrap();

    let index = prepare_index(&path, &HtmlFormat, &Config::default(), Some(&applier)).unwrap();

    let added = index.get("1005-1-a").unwrap();
    assert_eq!(added.content, "<ins>new</ins>");
    assert_eq!(added.depth, 2);
}

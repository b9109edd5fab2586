use super::{HtmlFormat, DOCUMENT_NODE};
use crate::extract::Extractor;
use crate::formats::Format;
use crate::section::SectionNode;

const REGULATION: &str = concat!(
    r#"<div id="reg-content">"#,
    r#"<li id="intro">Intro</li>"#,
    r#"<li id="body"><p>Body</p><ol><li id="body-1">Nested</li></ol></li>"#,
    "</div>",
);

fn parse(source: &str) -> SectionNode {
    HtmlFormat.parse(source).unwrap()
}

#[test]
fn test_document_root_wraps_elements() {
    let document = parse(REGULATION);

    assert_eq!(document.name, DOCUMENT_NODE);
    assert_eq!(document.content, REGULATION);
    assert_eq!(document.children.len(), 1);
    assert_eq!(document.children[0].name, "div");
    assert_eq!(
        document.children[0].identifier.as_deref(),
        Some("reg-content")
    );
}

#[test]
fn test_content_is_inner_source() {
    let document = parse(REGULATION);
    let body = document.find_by_id("body").unwrap();

    assert_eq!(body.content, r#"<p>Body</p><ol><li id="body-1">Nested</li></ol>"#);
    let names: Vec<_> = body.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["p", "ol"]);
}

#[test]
fn test_parsed_regulation_indexes_in_document_order() {
    let document = parse(REGULATION);
    let root = document.find_by_id("reg-content").unwrap();

    let index = Extractor::default().index(root);

    let keys: Vec<_> = index.entries_in_order().map(|r| r.key.as_deref()).collect();
    assert_eq!(keys, [Some("intro"), Some("body"), Some("body-1")]);
    assert_eq!(index.get("intro").map(|r| r.content.as_str()), Some("Intro"));
    assert_eq!(index.get("body-1").map(|r| r.content.as_str()), Some("Nested"));
}

#[test]
fn test_identifier_attribute_forms() {
    let document = parse(concat!(
        "<div>",
        "<span id=plain>a</span>",
        "<span id='single'>b</span>",
        r#"<span ID="upper">c</span>"#,
        r#"<span id="">d</span>"#,
        "<span>e</span>",
        r#"<span class="x" id="late" id="ignored">f</span>"#,
        "</div>",
    ));

    let ids: Vec<_> = document.children[0]
        .children
        .iter()
        .map(|c| c.identifier.as_deref())
        .collect();
    assert_eq!(
        ids,
        [
            Some("plain"),
            Some("single"),
            Some("upper"),
            Some(""),
            None,
            Some("late"),
        ]
    );
}

#[test]
fn test_void_elements_have_empty_content() {
    let document = parse(r#"<p id="v">a<br>b</p>"#);
    let paragraph = &document.children[0];

    assert_eq!(paragraph.content, "a<br>b");
    assert_eq!(paragraph.children.len(), 1);
    assert_eq!(paragraph.children[0].name, "br");
    assert_eq!(paragraph.children[0].content, "");
}

#[test]
fn test_script_is_a_leaf() {
    let document = parse(r#"<div><script id="s">var x = 1;</script></div>"#);
    let script = document.find_by_id("s").unwrap();

    assert_eq!(script.name, "script");
    assert_eq!(script.content, "var x = 1;");
    assert!(script.children.is_empty());
}

#[test]
fn test_text_only_document_has_no_elements() {
    let document = parse("just some text");
    assert!(document.children.is_empty());
}

#[test]
fn test_siblings_and_nesting_survive_lowering() {
    let document = parse(concat!(
        r#"<div id="a"><p id="b"><span id="c"></span></p><p id="d"></p></div>"#,
        r#"<div id="e"></div>"#,
    ));

    let top: Vec<_> = document.children.iter().map(|c| c.identifier.as_deref()).collect();
    assert_eq!(top, [Some("a"), Some("e")]);
    let inner: Vec<_> = document.children[0]
        .children
        .iter()
        .map(|c| c.identifier.as_deref())
        .collect();
    assert_eq!(inner, [Some("b"), Some("d")]);
    assert_eq!(
        document.children[0].children[0].children[0].identifier.as_deref(),
        Some("c")
    );
}

#[test]
fn test_deeply_nested_markup_parses() {
    const DEPTH: usize = 20_000;
    let source = format!(
        r#"{}<p id="deepest">x</p>{}"#,
        "<div>".repeat(DEPTH),
        "</div>".repeat(DEPTH)
    );

    let document = parse(&source);

    // Closing tags this deep may not all pair up, but every element is still lowered.
    let deepest = document.find_by_id("deepest").expect("Innermost element should be lowered");
    assert_eq!(deepest.name, "p");
    assert!(deepest.content.starts_with('x'));
}

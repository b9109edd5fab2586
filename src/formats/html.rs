//! HTML format implementation using tree-sitter-html.
//!
//! Elements are lowered into [`SectionNode`]s whose content is the exact source text between
//! the start and end tags, which is what a browser hands back as an element's inner HTML for
//! well-formed markup. Identifiers come from a query over `id` attributes.

use crate::error::{Error, Result};
use crate::formats::Format;
use crate::section::SectionNode;
use std::collections::HashMap;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

/// Name given to the synthetic node wrapping the whole document.
pub const DOCUMENT_NODE: &str = "#document";

/// Tree-sitter queries and lowering for HTML documents.
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn language(&self) -> Language {
        tree_sitter_html::LANGUAGE.into()
    }

    fn identifier_query(&self) -> &'static str {
        r#"((attribute (attribute_name) @name) @attribute (#match? @name "^[iI][dD]$"))"#
    }

    fn parse(&self, source: &str) -> Result<SectionNode> {
        let language = self.language();
        let mut parser = Parser::new();
        parser.set_language(&language)?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::Parse("HTML document".to_string()))?;
        let root = tree.root_node();
        let identifiers = collect_identifiers(&language, self.identifier_query(), root, source)?;

        Ok(SectionNode {
            name: DOCUMENT_NODE.to_string(),
            identifier: None,
            content: source.to_string(),
            children: lower_tree(root, source, &identifiers),
        })
    }
}

/// Maps element node ids to the value of their first `id` attribute.
fn collect_identifiers(
    language: &Language,
    query_source: &str,
    root: Node,
    source: &str,
) -> Result<HashMap<usize, String>> {
    let query = Query::new(language, query_source)?;
    let mut identifiers = HashMap::new();
    let Some(attribute_index) = query.capture_index_for_name("attribute") else {
        return Ok(identifiers);
    };

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, source.as_bytes());

    while let Some(found) = matches.next() {
        for capture in found.captures.iter().filter(|c| c.index == attribute_index) {
            let attribute = capture.node;
            // attribute -> start_tag -> element
            let Some(element) = attribute.parent().and_then(|tag| tag.parent()) else {
                continue;
            };
            identifiers
                .entry(element.id())
                .or_insert_with(|| attribute_value(attribute, source));
        }
    }

    Ok(identifiers)
}

/// Unquoted attribute value; a bare attribute yields an empty string.
fn attribute_value(attribute: Node, source: &str) -> String {
    let mut cursor = attribute.walk();
    let value = attribute
        .named_children(&mut cursor)
        .find_map(|child| match child.kind() {
            "attribute_value" => Some(&source[child.byte_range()]),
            "quoted_attribute_value" => {
                let quoted = &source[child.byte_range()];
                Some(quoted.get(1..quoted.len().saturating_sub(1)).unwrap_or_default())
            }
            _ => None,
        });
    value.unwrap_or_default().to_string()
}

/// Lowers the elements beneath `root` with an explicit stack, so document nesting is bounded
/// by memory rather than by the call stack.
fn lower_tree(
    root: Node,
    source: &str,
    identifiers: &HashMap<usize, String>,
) -> Vec<SectionNode> {
    // Pre-order list of lowered elements, each with the position of its lowered parent.
    let mut flat: Vec<(Option<usize>, SectionNode)> = Vec::new();
    let mut stack: Vec<(Node, Option<usize>)> = named_children(root)
        .into_iter()
        .rev()
        .map(|child| (child, None))
        .collect();

    while let Some((node, parent)) = stack.pop() {
        let Some(element) = lower_element(node, source, identifiers) else {
            continue;
        };
        let position = flat.len();
        flat.push((parent, element));

        // Script and style bodies are raw text.
        if node.kind() == "element" {
            stack.extend(
                named_children(node)
                    .into_iter()
                    .rev()
                    .map(|child| (child, Some(position))),
            );
        }
    }

    assemble(flat)
}

/// Rebuilds the nesting of a pre-order list; parents always precede their children.
fn assemble(flat: Vec<(Option<usize>, SectionNode)>) -> Vec<SectionNode> {
    let (parents, nodes): (Vec<_>, Vec<_>) = flat.into_iter().unzip();
    let mut slots: Vec<Option<SectionNode>> = nodes.into_iter().map(Some).collect();
    let mut top = Vec::new();

    for position in (0..slots.len()).rev() {
        let Some(mut node) = slots[position].take() else {
            continue;
        };
        // Children were attached last-first.
        node.children.reverse();
        match parents[position].and_then(|parent| slots[parent].as_mut()) {
            Some(parent) => parent.children.push(node),
            None => top.push(node),
        }
    }

    top.reverse();
    top
}

fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Lowers a single element without its children.
fn lower_element(
    node: Node,
    source: &str,
    identifiers: &HashMap<usize, String>,
) -> Option<SectionNode> {
    if !matches!(node.kind(), "element" | "script_element" | "style_element") {
        return None;
    }

    let mut start_tag = None;
    let mut end_tag = None;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "start_tag" | "self_closing_tag" => start_tag = Some(child),
            "end_tag" => end_tag = Some(child),
            _ => {}
        }
    }
    let start_tag = start_tag?;

    let content_start = start_tag.end_byte();
    let content_end = end_tag.map_or(node.end_byte(), |tag| tag.start_byte());
    let content = source
        .get(content_start..content_end.max(content_start))
        .unwrap_or_default();

    Some(SectionNode {
        name: tag_name(start_tag, source).to_ascii_lowercase(),
        identifier: identifiers.get(&node.id()).cloned(),
        content: content.to_string(),
        children: Vec::new(),
    })
}

fn tag_name<'s>(tag: Node, source: &'s str) -> &'s str {
    let mut cursor = tag.walk();
    let name = tag
        .named_children(&mut cursor)
        .find(|child| child.kind() == "tag_name")
        .map(|child| &source[child.byte_range()]);
    name.unwrap_or_default()
}

#[cfg(test)]
#[path = "../tests/html.rs"]
mod tests;

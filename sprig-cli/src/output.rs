//! Tree printing and JSON conversion.

use std::io::{self, Write};

use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use serde_json::{Map, Value, json};
use sprig_dom::{DomTree, Element, NodeId};

/// Deepest subtree [`node_to_json`] will convert. Both the conversion and
/// `serde_json`'s serializer recurse once per level.
pub const MAX_JSON_DEPTH: usize = 256;

/// Print a node and its subtree, one node per line, indented by depth.
///
/// Walks with an explicit `(node, depth)` stack, so nesting depth is bounded
/// only by memory.
pub fn write_tree(
    out: &mut impl Write,
    tree: &DomTree,
    id: NodeId,
    indent: usize,
) -> io::Result<()> {
    let mut stack = vec![(id, indent)];
    while let Some((id, depth)) = stack.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        write_node(out, node, depth)?;
        stack.extend(tree.children(id).iter().rev().map(|&child| (child, depth + 1)));
    }
    Ok(())
}

fn write_node(out: &mut impl Write, node: &Element, depth: usize) -> io::Result<()> {
    let prefix = "  ".repeat(depth);

    if node.is_text() {
        let display = node.inner_text.replace('\n', "\\n").replace(' ', "\u{00B7}");
        writeln!(out, "{prefix}\"{}\"", display.green())
    } else if node.attributes.is_empty() {
        writeln!(out, "{prefix}<{}>", node.tag.cyan())
    } else {
        let mut attrs: Vec<String> = node
            .attributes
            .iter()
            .map(|(k, v)| {
                if v.is_empty() {
                    k.clone()
                } else {
                    format!("{k}=\"{v}\"")
                }
            })
            .collect();
        attrs.sort();
        writeln!(out, "{prefix}<{} {}>", node.tag.cyan(), attrs.join(" "))
    }
}

/// Number of levels below `id`, counting `id` itself as level zero.
#[must_use]
pub fn subtree_depth(tree: &DomTree, id: NodeId) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(id, 0)];
    while let Some((id, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(tree.children(id).iter().map(|&child| (child, depth + 1)));
    }
    deepest
}

/// Convert a node and its subtree to JSON.
///
/// # Errors
///
/// Fails when the subtree is nested deeper than [`MAX_JSON_DEPTH`].
pub fn node_to_json(tree: &DomTree, id: NodeId) -> Result<Value> {
    let depth = subtree_depth(tree, id);
    if depth > MAX_JSON_DEPTH {
        bail!("tree is nested {depth} levels deep; JSON output supports at most {MAX_JSON_DEPTH}");
    }
    Ok(build_json(tree, id))
}

fn build_json(tree: &DomTree, id: NodeId) -> Value {
    let Some(node) = tree.get(id) else {
        return Value::Null;
    };

    if node.is_text() {
        return json!({ "type": "text", "content": node.inner_text });
    }

    let attributes: Map<String, Value> = node
        .attributes
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    let children: Vec<Value> = tree
        .children(id)
        .iter()
        .map(|&child| build_json(tree, child))
        .collect();

    let kind = if id == NodeId::ROOT { "document" } else { "element" };
    json!({
        "type": kind,
        "tagName": node.tag,
        "id": node.id,
        "classList": node.class_list,
        "attributes": attributes,
        "children": children,
    })
}

/// Pretty-print a JSON value followed by a newline.
pub fn write_json(out: &mut impl Write, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let tree = sprig_html::parse(r#"<p class="a b" id="x">hi</p>"#);
        let value = node_to_json(&tree, tree.root()).unwrap();

        assert_eq!(value["type"], "document");
        let p = &value["children"][0];
        assert_eq!(p["tagName"], "p");
        assert_eq!(p["id"], "x");
        assert_eq!(p["classList"], json!(["a", "b"]));
        assert_eq!(p["children"][0], json!({ "type": "text", "content": "hi" }));
    }

    #[test]
    fn test_tree_lines_are_indented_by_depth() {
        let tree = sprig_html::parse("<ul><li>a</li></ul>");
        let mut buf = Vec::new();
        write_tree(&mut buf, &tree, tree.root(), 0).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("  <"));
        assert!(lines[2].starts_with("    <"));
        assert!(lines[3].starts_with("      \""));
    }

    #[test]
    fn test_deep_tree_prints_without_recursion() {
        let depth = 10_000;
        let tree = sprig_html::parse(&"<div>".repeat(depth));
        assert_eq!(subtree_depth(&tree, tree.root()), depth);

        let mut sink = io::sink();
        write_tree(&mut sink, &tree, tree.root(), 0).unwrap();
    }

    #[test]
    fn test_deep_tree_json_is_refused() {
        let tree = sprig_html::parse(&"<div>".repeat(MAX_JSON_DEPTH + 1));
        let err = node_to_json(&tree, tree.root()).unwrap_err();
        assert!(err.to_string().contains("at most"));

        let shallow = sprig_html::parse(&"<div>".repeat(MAX_JSON_DEPTH));
        assert!(node_to_json(&shallow, shallow.root()).is_ok());
    }
}

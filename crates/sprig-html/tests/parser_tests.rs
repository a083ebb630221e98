//! Integration tests for the markup parser.

use sprig_html::{
    DomTree, IssueKind, NodeId, ParseError, ParseOptions, TreeBuilder, UnbalancedClosePolicy,
    VoidElementMatching, parse, parse_with_options, tokenizer::tokenize,
};

/// Helper to collect element tags (text nodes skipped) in document order
fn tag_order(tree: &DomTree) -> Vec<String> {
    tree.descendants(NodeId::ROOT)
        .filter_map(|id| tree.get(id))
        .filter(|el| !el.is_text())
        .map(|el| el.tag.clone())
        .collect()
}

/// Helper to get the tags of a node's direct children
fn child_tags(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .filter_map(|&c| tree.get(c))
        .map(|el| el.tag.clone())
        .collect()
}

#[test]
fn test_heading_with_text() {
    let tree = parse("<h1>Hello</h1>");

    let root = tree.get(NodeId::ROOT).unwrap();
    assert_eq!(root.tag, "document");
    assert_eq!(root.children.len(), 1);

    let h1 = tree.get(root.children[0]).unwrap();
    assert_eq!(h1.tag, "h1");
    assert_eq!(h1.children.len(), 1);

    let text = tree.get(h1.children[0]).unwrap();
    assert!(text.is_text());
    assert_eq!(text.inner_text, "Hello");
    assert!(text.children.is_empty());
}

#[test]
fn test_id_and_class_lookup() {
    let tree = parse(r#"<div id="a"><p class="x y">Hi</p></div>"#);
    let document = tree.document();

    let div = document.find_by_id("a").unwrap();
    assert_eq!(div.tag, "div");

    let ys = document.find_all_by_class_name("y");
    assert_eq!(ys.len(), 1);
    assert_eq!(ys[0].tag, "p");
    assert_eq!(ys[0].class_list, vec!["x", "y"]);
    assert_eq!(ys[0].parent().unwrap(), div);
}

#[test]
fn test_void_element_siblings() {
    let tree = parse("<br><span>t</span>");

    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["br", "span"]);
    let br = tree.children(NodeId::ROOT)[0];
    let span = tree.children(NodeId::ROOT)[1];
    assert!(tree.children(br).is_empty());
    assert_eq!(tree.children(span).len(), 1);
    assert_eq!(tree.text_content(span), "t");
}

#[test]
fn test_img_does_not_capture_following_content() {
    let tree = parse(r#"<p><img src="x">caption<b>bold</b></p>"#);
    let p = tree.children(NodeId::ROOT)[0];

    assert_eq!(child_tags(&tree, p), vec!["img", "", "b"]);
    let img = tree.children(p)[0];
    assert!(tree.children(img).is_empty());
    assert_eq!(tree.get(img).unwrap().attributes["src"], "x");
}

#[test]
fn test_nesting_order_matches_source() {
    let tree = parse(
        "<html><head><title>T</title></head><body><ul><li>a</li><li>b</li></ul></body></html>",
    );
    assert_eq!(
        tag_order(&tree),
        vec!["html", "head", "title", "body", "ul", "li", "li"]
    );
}

#[test]
fn test_quoted_attribute_keeps_spaces() {
    let tree = parse(r#"<a key="v1 v2" title='single quoted' plain=ok flag>x</a>"#);
    let a = tree.get(tree.children(NodeId::ROOT)[0]).unwrap();

    assert_eq!(a.attributes["key"], "v1 v2");
    assert_eq!(a.attributes["title"], "single quoted");
    assert_eq!(a.attributes["plain"], "ok");
    assert_eq!(a.attributes["flag"], "");
}

#[test]
fn test_element_without_class_has_empty_class_list() {
    let tree = parse("<p id=only>x</p>");
    let p = tree.document().find_by_id("only").unwrap();
    assert!(p.class_list.is_empty());
}

#[test]
fn test_find_all_divs_in_document_order() {
    let tree = parse("<div>one<div>two</div></div><section><div>three</div></section>");
    let divs = tree.document().find_all_by_tag_name("div");

    assert_eq!(divs.len(), 3);
    let texts: Vec<String> = divs.iter().map(|d| d.text_content()).collect();
    assert_eq!(texts, vec!["onetwo", "two", "three"]);
    assert!(divs.iter().all(|d| d.tag == "div"));
}

#[test]
fn test_text_is_unescaped() {
    let tree = parse("<p>Tom &amp; Jerry&#39;s &quot;show&quot; &amp;quot;</p>");
    let p = tree.children(NodeId::ROOT)[0];
    assert_eq!(tree.text_content(p), "Tom & Jerry's \"show\" &quot;");
}

#[test]
fn test_attribute_values_are_not_unescaped() {
    let tree = parse(r#"<a href="?a=1&amp;b=2">x</a>"#);
    let a = tree.get(tree.children(NodeId::ROOT)[0]).unwrap();
    assert_eq!(a.attributes["href"], "?a=1&amp;b=2");
}

#[test]
fn test_empty_input() {
    let tree = parse("");
    assert_eq!(tree.len(), 1);
    assert!(tree.children(NodeId::ROOT).is_empty());
}

#[test]
fn test_plain_text_only() {
    let tree = parse("just text");
    let root = tree.document();
    assert_eq!(root.children().count(), 1);
    assert_eq!(root.text_content(), "just text");
}

#[test]
fn test_doctype_and_comment_are_leaf_nodes() {
    let tree = parse("<!DOCTYPE html><!-- c --><p>x</p>");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["!DOCTYPE", "!--", "p"]);
    let doctype = tree.children(NodeId::ROOT)[0];
    assert!(tree.children(doctype).is_empty());
}

#[test]
fn test_self_closing_custom_element() {
    let tree = parse(r#"<x-icon name="star"/><p>after</p>"#);
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["x-icon", "p"]);
    let icon = tree.get(tree.children(NodeId::ROOT)[0]).unwrap();
    assert_eq!(icon.attributes["name"], "star");
}

#[test]
fn test_whitespace_text_kept_by_default() {
    let tree = parse("<ul>\n  <li>a</li>\n</ul>");
    let ul = tree.children(NodeId::ROOT)[0];
    assert_eq!(tree.children(ul).len(), 3);
}

#[test]
fn test_whitespace_text_dropped_when_configured() {
    let options = ParseOptions::new().with_whitespace_text(false);
    let tree = parse_with_options("<ul>\n  <li>a</li>\n</ul>", options).unwrap();
    let ul = tree.children(NodeId::ROOT)[0];
    assert_eq!(child_tags(&tree, ul), vec!["li"]);
}

// ========== malformed input ==========

#[test]
fn test_unbalanced_close_clamps_at_root() {
    let tree = parse("</div></div><p>still here</p>");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["p"]);
}

#[test]
fn test_extra_close_after_content_keeps_structure() {
    let tree = parse("<div><p>x</p></div></div><span>y</span>");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["div", "span"]);
}

#[test]
fn test_unbalanced_close_rejected_in_strict_mode() {
    let options = ParseOptions::new().with_unbalanced_close(UnbalancedClosePolicy::Reject);
    let result = parse_with_options("<p>x</p></p>", options);

    let Err(ParseError::UnbalancedClose { tag, position, .. }) = result else {
        panic!("expected UnbalancedClose, got {result:?}");
    };
    assert_eq!(tag, "</p>");
    assert_eq!(position, 8);
}

#[test]
fn test_balanced_input_passes_strict_mode() {
    let options = ParseOptions::new().with_unbalanced_close(UnbalancedClosePolicy::Reject);
    assert!(parse_with_options("<p><b>x</b></p>", options).is_ok());
}

#[test]
fn test_run_returns_partial_tree_under_reject() {
    let options = ParseOptions::new().with_unbalanced_close(UnbalancedClosePolicy::Reject);
    let tree = TreeBuilder::new(tokenize("<a></a></a><b></b>"))
        .with_options(options)
        .run();
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["a"]);
}

#[test]
fn test_unclosed_tag_becomes_text() {
    let (tree, issues) = TreeBuilder::new(tokenize("<p>a < b</p>")).run_with_issues();
    let p = tree.children(NodeId::ROOT)[0];

    assert_eq!(tree.text_content(p), "a < b");
    assert!(issues.iter().any(|i| i.kind == IssueKind::MalformedTag));
}

#[test]
fn test_unclosed_tag_at_end_of_input() {
    let tree = parse("<p>x</p><div class=\"a");
    let last = *tree.children(NodeId::ROOT).last().unwrap();
    assert_eq!(tree.get(last).unwrap().inner_text, "<div class=\"a");
}

#[test]
fn test_empty_tag_is_an_element_without_name() {
    let (tree, issues) = TreeBuilder::new(tokenize("<>x</>")).run_with_issues();
    let empty = tree.get(tree.children(NodeId::ROOT)[0]).unwrap();

    assert!(empty.tag.is_empty());
    assert!(!empty.is_text());
    assert_eq!(empty.children.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::EmptyTag);
}

#[test]
fn test_legacy_prefix_matching_treats_code_as_void() {
    let options = ParseOptions::new().with_void_elements(VoidElementMatching::LegacyPrefix);
    let tree = parse_with_options("<code>x</code>", options).unwrap();
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["code", ""]);

    let tree = parse("<code>x</code>");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["code"]);
}

#[test]
fn test_arbitrary_garbage_does_not_panic() {
    let inputs = [
        "<<<>>>",
        "</></></>",
        "<a b=\"c>d\" e='f>",
        "&&&;;;<",
        ">",
        "<",
        "</",
        "<p \"unterminated>text",
        "é<ü>ß</ü>",
    ];
    for input in inputs {
        let tree = parse(input);
        assert_eq!(tree.get(NodeId::ROOT).unwrap().tag, "document");
    }
}

#[test]
fn test_warning_log_stays_bounded_across_documents() {
    for i in 0..500 {
        let padding = "x".repeat(i);
        let (_, issues) = TreeBuilder::new(tokenize(&format!("{padding}a < b"))).run_with_issues();
        assert_eq!(issues[0].position, i + 2);
        let _ = parse(&format!("<p>unclosed {i}</q></r>"));
    }
    // One entry per issue kind at most, however many documents were parsed.
    assert!(sprig_common::warning::warning_count() <= 5);
}

// Selector matching fixtures against built trees.

use printrender::{html, selector_matches};

#[test]
fn plain_tag_selectors() {
  let tree = html::build("<p>abc</p>");
  assert!(selector_matches(&tree, 1, "p"));
  assert!(selector_matches(&tree, 1, " p"));
  assert!(selector_matches(&tree, 1, "*"));
  assert!(!selector_matches(&tree, 1, "h1"));
}

#[test]
fn class_qualified_descendants() {
  // root, p, "abc", span, "def", /span, /p
  let tree = html::build("<p class=\"first\">abc<span>def</span></p>");
  assert!(selector_matches(&tree, 1, "p.first"));
  assert!(selector_matches(&tree, 3, "p.first span"));
  assert!(selector_matches(&tree, 3, "p.first > span"));
  assert!(selector_matches(&tree, 3, ".first span"));
  assert!(!selector_matches(&tree, 3, "p.second span"));
  assert!(!selector_matches(&tree, 1, "p.first span"));
}

#[test]
fn id_qualified_descendants() {
  let tree = html::build("<p id=\"second\">abc<span>def</span></p>");
  assert!(selector_matches(&tree, 1, "p#second"));
  assert!(selector_matches(&tree, 3, "p#second span"));
  assert!(selector_matches(&tree, 3, "p#second > span"));
  assert!(selector_matches(&tree, 3, "#second span"));
  assert!(!selector_matches(&tree, 3, "p#first span"));
}

#[test]
fn descendant_spans_multiple_levels() {
  // root, div, p, span, "x", /span, /p, /div
  let tree = html::build("<div class=\"outer\"><p><span>x</span></p></div>");
  assert!(selector_matches(&tree, 3, "div.outer span"));
  assert!(selector_matches(&tree, 3, "div.outer p span"));
  assert!(!selector_matches(&tree, 3, "div.outer > span"));
}

#[test]
fn non_tag_nodes_never_match() {
  let tree = html::build("<p>abc</p>");
  assert!(!selector_matches(&tree, 0, "*"));
  assert!(!selector_matches(&tree, 2, "p"));
  assert!(!selector_matches(&tree, 99, "p"));
}

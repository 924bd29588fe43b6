//! Flat DOM arena
//!
//! The document tree is stored as an append-only, pre-order sequence of
//! nodes with integer parent back-references instead of a linked tree.
//! Ancestors always precede descendants, so selector matching walks
//! ancestor chains with simple index-following loops and the whole
//! structure is read-only shareable once built.

use crate::css::RuleMap;
use rustc_hash::FxHashMap;
use std::ops::Index;

/// One entry of the flat document sequence.
///
/// Node 0 is always the non-tag document root (`parent == 0`). Every
/// opening tag is followed, at the same nesting depth, by its closing
/// entry; both share the `element_key` assigned when the tag opened.
#[derive(Debug, Clone, Default)]
pub struct DomNode {
  /// Position in the flat sequence.
  pub index: usize,
  /// 1-based ordinal among tag nodes; 0 for the root and text nodes.
  /// Opening and closing entries of one element share the same key.
  pub element_key: usize,
  /// Index of the nearest enclosing tag node, 0 for top-level nodes.
  pub parent: usize,
  /// True for tag nodes, false for the root and text runs.
  pub is_tag: bool,
  /// True for opening tags; meaningless for non-tag nodes.
  pub opening: bool,
  /// True for void or self-closed tags (`<br>`, `<marker .../>`).
  pub self_closing: bool,
  /// Lowercased tag name, for tag nodes only.
  pub tag_name: Option<String>,
  /// Decoded text content, for text nodes only.
  pub text: Option<String>,
  /// Parsed tag attributes, names lowercased. After the build pass,
  /// `attributes["style"]` holds the fully resolved style string.
  pub attributes: FxHashMap<String, String>,
  /// The raw `style="..."` attribute exactly as written, if present.
  pub inline_style: Option<String>,
  /// Effective declarations parsed from the resolved style string.
  pub style: FxHashMap<String, String>,
  /// Numeric line height, when a convertible `line-height` applies.
  pub line_height: Option<f64>,
}

impl DomNode {
  /// Whitespace-separated, case-folded class list of this node.
  pub fn classes(&self) -> Vec<String> {
    self
      .attributes
      .get("class")
      .map(|value| {
        value
          .split_whitespace()
          .map(|class| class.to_ascii_lowercase())
          .collect()
      })
      .unwrap_or_default()
  }

  /// Case-folded `id` attribute, if any.
  pub fn id(&self) -> Option<String> {
    self
      .attributes
      .get("id")
      .map(|id| id.to_ascii_lowercase())
  }
}

/// The styled document tree produced by the HTML tree builder.
///
/// Owns the pre-order node sequence plus the rule map merged from the
/// fragment's `<style>` blocks and any externally supplied stylesheet.
/// Immutable once returned; consumers read it top to bottom.
#[derive(Debug, Clone, Default)]
pub struct DomTree {
  nodes: Vec<DomNode>,
  rules: RuleMap,
}

impl DomTree {
  pub(crate) fn new(nodes: Vec<DomNode>, rules: RuleMap) -> Self {
    Self { nodes, rules }
  }

  /// Number of nodes in the sequence, including the root.
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn get(&self, index: usize) -> Option<&DomNode> {
    self.nodes.get(index)
  }

  /// All nodes in pre-order.
  pub fn nodes(&self) -> &[DomNode] {
    &self.nodes
  }

  /// The rule map this tree was resolved against.
  pub fn rules(&self) -> &RuleMap {
    &self.rules
  }

  /// Walks enclosing tag nodes from `index` up to (excluding) the root.
  pub fn ancestors(&self, index: usize) -> Ancestors<'_> {
    Ancestors {
      tree: self,
      current: index,
    }
  }
}

impl Index<usize> for DomTree {
  type Output = DomNode;

  fn index(&self, index: usize) -> &DomNode {
    &self.nodes[index]
  }
}

/// Iterator over the ancestor chain of a node, nearest first.
pub struct Ancestors<'a> {
  tree: &'a DomTree,
  current: usize,
}

impl<'a> Iterator for Ancestors<'a> {
  type Item = &'a DomNode;

  fn next(&mut self) -> Option<&'a DomNode> {
    let parent = self.tree.get(self.current)?.parent;
    if parent == 0 || parent >= self.current {
      return None;
    }
    self.current = parent;
    self.tree.get(parent)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tag(index: usize, parent: usize, name: &str) -> DomNode {
    DomNode {
      index,
      parent,
      is_tag: true,
      opening: true,
      tag_name: Some(name.to_string()),
      ..DomNode::default()
    }
  }

  #[test]
  fn test_ancestors_walk_nearest_first() {
    let nodes = vec![
      DomNode::default(),
      tag(1, 0, "div"),
      tag(2, 1, "p"),
      tag(3, 2, "span"),
    ];
    let tree = DomTree::new(nodes, RuleMap::new());
    let chain: Vec<&str> = tree
      .ancestors(3)
      .map(|node| node.tag_name.as_deref().unwrap())
      .collect();
    assert_eq!(chain, vec!["p", "div"]);
  }

  #[test]
  fn test_ancestors_of_top_level_node_is_empty() {
    let tree = DomTree::new(vec![DomNode::default(), tag(1, 0, "p")], RuleMap::new());
    assert_eq!(tree.ancestors(1).count(), 0);
  }

  #[test]
  fn test_classes_are_case_folded_word_list() {
    let mut node = DomNode::default();
    node
      .attributes
      .insert("class".to_string(), "First  wide".to_string());
    assert_eq!(node.classes(), vec!["first", "wide"]);
    assert_eq!(node.id(), None);
  }
}

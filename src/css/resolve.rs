//! Per-node style resolution
//!
//! Builds the effective style string layout code consumes: the node's
//! own inline declarations first, then every matching rule in ascending
//! key order (cascade precedence). Each contribution is appended as `;`
//! followed by its declaration text verbatim, so later, more specific
//! declarations follow earlier ones and shadow them downstream; nothing
//! is deduplicated by property name here.

use crate::css::extract::RuleMap;
use crate::css::matcher;
use crate::dom::{DomNode, DomTree};

/// Resolves the merged style string for the node at `index`.
///
/// Returns an empty string when the node has no inline style and no rule
/// matches. Rule-map keys lacking the `"<key> <selector>"` shape are
/// skipped silently, never an error.
pub fn resolve_style(tree: &DomTree, index: usize, rules: &RuleMap) -> String {
  resolve_in(tree.nodes(), index, rules)
}

pub(crate) fn resolve_in(nodes: &[DomNode], index: usize, rules: &RuleMap) -> String {
  let mut resolved = String::new();

  if let Some(inline) = nodes.get(index).and_then(|node| node.inline_style.as_deref()) {
    if !inline.is_empty() {
      resolved.push(';');
      resolved.push_str(inline);
    }
  }

  for (key, declarations) in rules {
    let Some((_, selector)) = key.split_once(' ') else {
      continue;
    };
    if matcher::matches_in(nodes, index, selector) {
      resolved.push(';');
      resolved.push_str(declarations);
    }
  }

  resolved
}

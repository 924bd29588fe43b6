//! Selector matching over the flat DOM arena
//!
//! Supports chains of simple selectors (`tag`, `tag.class`, `tag#id`,
//! bare `.class`/`#id`, `*`) joined by the descendant (space) and child
//! (`>`) combinators. Matching starts from the rightmost token against
//! the target node and walks `parent` links right to left: a descendant
//! token may be satisfied by any ancestor, a child token only by the
//! immediate parent. The walk never runs past the root.

use crate::dom::{DomNode, DomTree};
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// `a > b` and `a>b` are the same child combinator.
static CHILD_SPACING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*>\s*").unwrap());

/// Bare `.class` / `#id` tokens get an explicit `*` tag so the token
/// scanner below always sees a name.
static BARE_QUALIFIERS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"([>\s])([.#])").unwrap());

/// One simple selector: combinator, tag name, optional qualifier.
static SIMPLE_SELECTORS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"([>\s])([A-Za-z0-9*]+)([^>\s]*)").unwrap());

/// Decides whether `selector` matches the node at `index`.
///
/// Leading and trailing whitespace in the selector is insignificant;
/// non-tag nodes never match.
pub fn selector_matches(tree: &DomTree, index: usize, selector: &str) -> bool {
  matches_in(tree.nodes(), index, selector)
}

pub(crate) fn matches_in(nodes: &[DomNode], index: usize, selector: &str) -> bool {
  let normalized = normalize(selector);
  matches_normalized(nodes, index, &normalized)
}

/// Collapses whitespace, tightens `>` combinators, prepends the leading
/// combinator every token needs, and rescues bare qualifiers.
fn normalize(selector: &str) -> String {
  let collapsed = WHITESPACE_RUNS.replace_all(selector, " ");
  let tightened = CHILD_SPACING.replace_all(&collapsed, ">");
  let padded = format!(" {}", tightened.trim());
  BARE_QUALIFIERS.replace_all(&padded, "${1}*${2}").into_owned()
}

fn matches_normalized(nodes: &[DomNode], index: usize, selector: &str) -> bool {
  let Some(node) = nodes.get(index) else {
    return false;
  };
  if !node.is_tag {
    return false;
  }

  let Some(caps) = SIMPLE_SELECTORS.captures_iter(selector).last() else {
    return false;
  };
  let Some(whole) = caps.get(0) else {
    return false;
  };

  let tag = &caps[2];
  let node_tag = node.tag_name.as_deref().unwrap_or("");
  if tag != "*" && !tag.eq_ignore_ascii_case(node_tag) {
    return false;
  }

  let qualifier = caps[3].to_ascii_lowercase();
  if !qualifier.is_empty() {
    match qualifier.as_bytes()[0] {
      b'.' => {
        if !node.classes().iter().any(|class| *class == qualifier[1..]) {
          return false;
        }
      }
      b'#' => {
        if node.id().as_deref() != Some(&qualifier[1..]) {
          return false;
        }
      }
      // Attribute and pseudo qualifiers are outside the grammar.
      _ => return false,
    }
  }

  let offset = whole.start();
  if offset == 0 {
    return true;
  }
  let remaining = &selector[..offset];

  match &caps[1] {
    ">" => matches_normalized(nodes, node.parent, remaining),
    _ => {
      // Descendant: any ancestor may satisfy the remaining chain.
      let mut current = index;
      while nodes[current].parent > 0 {
        let parent = nodes[current].parent;
        if matches_normalized(nodes, parent, remaining) {
          return true;
        }
        current = parent;
      }
      false
    }
  }
}

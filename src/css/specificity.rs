//! Selector specificity encoding
//!
//! Cascade precedence is carried by a four-digit, lexicographically
//! sortable key prefixed to every rule-map entry: ID selectors outrank
//! class/attribute selectors, which outrank plain element selectors, and
//! the composite `"<key> <selector>"` map keys break remaining ties.
//!
//! Pseudo-class words are counted loosely: `first`, `last`, `not`, ...
//! hit even without a leading colon, so `p#first` and `p#second` land in
//! different buckets. The digits are a private encoding; only the
//! resulting sort order is contractual.

use regex::Regex;
use std::sync::LazyLock;

/// Only `link` requires the colon; every other word counts as a bare
/// substring.
static PSEUDO_CLASS_WORDS: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"(?i):link|visited|hover|active|focus|target|lang|enabled|disabled|checked|indeterminate|root|nth|first|last|only|empty|contains|not",
  )
  .unwrap()
});

/// A name token counts as an element when preceded by a combinator.
static ELEMENT_TOKENS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[>+~\s][A-Za-z0-9*]+").unwrap());

/// Specificity counts for a single (non-grouped) selector.
///
/// Derived `Ord` compares IDs first, then classes, then elements,
/// matching the key's digit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
  pub ids: usize,
  pub classes: usize,
  pub elements: usize,
}

impl Specificity {
  /// Counts the specificity of one selector, combinators included
  /// (`table.list th` counts 1 class + 2 elements).
  pub fn of(selector: &str) -> Self {
    let ids = selector.matches('#').count();
    let classes = selector.chars().filter(|&ch| ch == '.' || ch == '[').count()
      + PSEUDO_CLASS_WORDS.find_iter(selector).count();
    let padded = format!(" {selector}");
    let elements =
      ELEMENT_TOKENS.find_iter(&padded).count() + selector.matches("::").count();
    Self {
      ids,
      classes,
      elements,
    }
  }

  /// The sortable key: a constant origin digit followed by the three
  /// counts. Selectors grouped by a comma are split before encoding, so
  /// every member of a group carries the key of its own text.
  pub fn sort_key(&self) -> String {
    format!("0{}{}{}", self.ids, self.classes, self.elements)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_plain_element_selector() {
    assert_eq!(Specificity::of("h1").sort_key(), "0001");
    assert_eq!(Specificity::of("body").sort_key(), "0001");
  }

  #[test]
  fn test_id_and_class_digits() {
    assert_eq!(Specificity::of("#top-menu").sort_key(), "0100");
    assert_eq!(Specificity::of(".contextual").sort_key(), "0010");
    assert_eq!(Specificity::of("p.second").sort_key(), "0011");
    assert_eq!(Specificity::of("p#second").sort_key(), "0101");
  }

  #[test]
  fn test_lax_pseudo_class_words_count() {
    // "first" hits the pseudo-class alternation without a colon, so
    // p#first and p#second sort into different buckets.
    assert_eq!(Specificity::of("p#first").sort_key(), "0111");
    assert_eq!(Specificity::of("p.first").sort_key(), "0021");
  }

  #[test]
  fn test_combinator_selectors_count_all_elements() {
    assert_eq!(Specificity::of("table.list th").sort_key(), "0012");
    assert_eq!(Specificity::of("table.list").sort_key(), "0011");
    assert_eq!(Specificity::of("p#second > span").sort_key(), "0102");
  }

  #[test]
  fn test_id_outranks_class_outranks_element() {
    let element = Specificity::of("h1");
    let class = Specificity::of(".wide");
    let id = Specificity::of("#main");
    assert!(element < class);
    assert!(class < id);
    assert!(element.sort_key() < class.sort_key());
    assert!(class.sort_key() < id.sort_key());
  }
}

//! Stylesheet rule extraction
//!
//! Turns raw CSS text into a [`RuleMap`]: a `BTreeMap` keyed by
//! `"<specificity-key> <selector>"` whose iteration order *is* cascade
//! precedence order. Declarations stay as flat `prop:value;` strings;
//! nothing here interprets property values.
//!
//! Extraction never fails. Malformed input degrades to whatever rules
//! can still be read, and an empty or comment-only stylesheet yields an
//! empty map.

use crate::css::media::MediaPolicy;
use crate::css::specificity::Specificity;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Rule map: `"<specificity-key> <selector>"` to declaration text.
///
/// The composite key, not the specificity alone, is the lookup identity;
/// ascending key order is the order the style resolver applies rules in.
pub type RuleMap = BTreeMap<String, String>;

static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static PUNCTUATION_SPACING: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s*([;:{}])\s*").unwrap());

static EMPTY_BLOCKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^{}]+\{\}").unwrap());

/// Extracts every rule of `css` that applies under `media`.
///
/// Grouped selectors (`h1,h2,h3 { ... }`) produce one entry per
/// selector, all sharing the same declaration text. Rules with an empty
/// body contribute nothing.
pub fn extract_css_properties(css: &str, media: &MediaPolicy) -> RuleMap {
  let mut rules = RuleMap::new();
  if css.is_empty() {
    return rules;
  }

  let css = strip_comments(css);
  let css = WHITESPACE_RUNS.replace_all(&css, " ");
  let css = PUNCTUATION_SPACING.replace_all(&css, "$1");
  let css = EMPTY_BLOCKS.replace_all(&css, "");
  let css = expand_media_blocks(&css, media);
  let css = css.strip_suffix('}').unwrap_or(&css);

  for block in css.split('}') {
    let Some((selector_list, declarations)) = block.split_once('{') else {
      continue;
    };
    if declarations.is_empty() {
      continue;
    }
    for selector in selector_list.split(',') {
      let selector = selector.trim();
      if selector.is_empty() {
        continue;
      }
      let key = format!("{} {}", Specificity::of(selector).sort_key(), selector);
      rules.insert(key, declarations.to_string());
    }
  }

  rules
}

/// Removes `/* ... */` comments. An unterminated comment consumes the
/// rest of the input.
fn strip_comments(css: &str) -> String {
  let mut out = String::with_capacity(css.len());
  let mut rest = css;
  while let Some(start) = rest.find("/*") {
    out.push_str(&rest[..start]);
    match rest[start + 2..].find("*/") {
      Some(end) => rest = &rest[start + 2 + end + 2..],
      None => return out,
    }
  }
  out.push_str(rest);
  out
}

/// Expands `@media <ident-list> { ... }` blocks by brace-depth scanning.
///
/// Accepted bodies are appended after the surrounding CSS in document
/// order and expanded recursively; rejected blocks vanish. Expects the
/// normalized form produced by `extract_css_properties` (spaces already
/// tightened around braces).
fn expand_media_blocks(css: &str, media: &MediaPolicy) -> String {
  let mut result = String::new();
  let mut expanded = String::new();
  let lower = css.to_ascii_lowercase();
  let bytes = css.as_bytes();
  let mut i = 0;

  while i < css.len() {
    if lower[i..].starts_with("@media") {
      let after_keyword = i + "@media".len();
      let Some(brace) = css[after_keyword..].find('{') else {
        // No block opener; nothing after this point can parse as a rule.
        break;
      };
      let ident_list = css[after_keyword..after_keyword + brace].trim();
      let body_start = after_keyword + brace + 1;

      let mut depth = 1usize;
      let mut j = body_start;
      while j < bytes.len() && depth > 0 {
        match bytes[j] {
          b'{' => depth += 1,
          b'}' => depth -= 1,
          _ => {}
        }
        j += 1;
      }
      let body_end = if depth == 0 { j - 1 } else { bytes.len() };

      if media.accepts(ident_list) {
        expanded.push_str(&expand_media_blocks(&css[body_start..body_end], media));
      }
      i = j;
      continue;
    }

    if let Some(ch) = css[i..].chars().next() {
      result.push(ch);
      i += ch.len_utf8();
    } else {
      break;
    }
  }

  result.push_str(&expanded);
  result
}

#[cfg(test)]
mod tests {
  use super::*;

  fn extract(css: &str) -> RuleMap {
    extract_css_properties(css, &MediaPolicy::print())
  }

  #[test]
  fn test_empty_and_comment_only_inputs() {
    assert!(extract("").is_empty());
    assert!(extract("/* comment */").is_empty());
    assert!(extract("/* unterminated").is_empty());
  }

  #[test]
  fn test_comment_containing_stars() {
    let rules = extract("/* ** tricky ** */h1{color:navy}");
    assert_eq!(rules.get("0001 h1").map(String::as_str), Some("color:navy"));
  }

  #[test]
  fn test_empty_body_elided() {
    assert!(extract("h1 {}").is_empty());
  }

  #[test]
  fn test_declarations_kept_verbatim() {
    let rules = extract("p.second { color: rgb(00,63,127); font-family: times; }");
    assert_eq!(
      rules.get("0011 p.second").map(String::as_str),
      Some("color:rgb(00,63,127);font-family:times;")
    );
  }

  #[test]
  fn test_no_trailing_semicolon_added() {
    let rules = extract("h1,h2{background-color:#e0e0e0}");
    assert_eq!(
      rules.get("0001 h1").map(String::as_str),
      Some("background-color:#e0e0e0")
    );
  }

  #[test]
  fn test_media_filtering() {
    assert!(extract("@media screen { body { font: 12pt sans-serif } }").is_empty());
    let rules = extract("@media print { body { font: 10pt serif } }");
    assert_eq!(
      rules.get("0001 body").map(String::as_str),
      Some("font:10pt serif")
    );
  }

  #[test]
  fn test_media_ident_list_accepts_any_match() {
    let rules = extract("@media screen, print { body { color: black } }");
    assert_eq!(rules.len(), 1);
  }

  #[test]
  fn test_nested_media_blocks() {
    let rules = extract("@media all { @media print { p { margin: 0 } } h1 { color: navy } }");
    assert_eq!(rules.get("0001 p").map(String::as_str), Some("margin:0"));
    assert_eq!(rules.get("0001 h1").map(String::as_str), Some("color:navy"));
  }

  #[test]
  fn test_idempotent_extraction() {
    let css = "h1 { color: navy; } p.first { color: #003300; }";
    assert_eq!(extract(css), extract(css));
  }
}

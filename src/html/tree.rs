//! HTML tree building
//!
//! Tokenizes an HTML fragment into the flat, parent-linked node arena
//! described in [`crate::dom`]. Every `<style>` block is consumed into
//! the rule map before any node is emitted, so cascade matches see the
//! whole fragment's CSS regardless of where the block sits. Each opening
//! tag is resolved against the merged rules as it is emitted; ancestors
//! always precede descendants in the arena, so matching can walk parent
//! links immediately.

use crate::css::extract::{extract_css_properties, RuleMap};
use crate::css::media::MediaPolicy;
use crate::css::resolve::resolve_in;
use crate::dom::{DomNode, DomTree};
use crate::error::ParseError;
use crate::html::entities;
use crate::html::preprocess::normalize_fragment;
use regex::{Captures, Regex};
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// `line-height: normal` resolves to this multiplier.
const NORMAL_LINE_HEIGHT: f64 = 1.25;

/// Tags that never take a closing entry.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "marker"];

static STYLE_BLOCKS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?is)<style([^>]*)>(.*?)</style>").unwrap());

static MEDIA_ATTRIBUTE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"(?i)media\s*=\s*"([^"]*)""#).unwrap());

static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static TAG_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/?([A-Za-z0-9]+)").unwrap());

static ATTRIBUTES: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"([^=\s]+)\s*=\s*"([^"]*)""#).unwrap());

static DECLARATIONS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"([^;:\s]+):([^;]*)").unwrap());

/// Builds a tree from `html` with the default (print) media policy and
/// no external stylesheet.
pub fn build(html: &str) -> DomTree {
  TreeBuilder::new().build(html)
}

/// Configurable tree builder.
///
/// The rule map is assembled per build call and threaded explicitly
/// through resolution — there is no implicit global stylesheet scope, so
/// independent fragments can be processed concurrently.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
  media: MediaPolicy,
  stylesheet: Option<String>,
}

impl TreeBuilder {
  pub fn new() -> Self {
    Self {
      media: MediaPolicy::print(),
      stylesheet: None,
    }
  }

  /// Sets the media policy used for `@media` blocks and `<style media>`
  /// attributes.
  pub fn with_media(mut self, media: MediaPolicy) -> Self {
    self.media = media;
    self
  }

  /// Supplies global CSS applied beneath the fragment's own `<style>`
  /// blocks.
  pub fn with_stylesheet(mut self, css: impl Into<String>) -> Self {
    self.stylesheet = Some(css.into());
    self
  }

  /// Builds the style-annotated tree for `html`.
  pub fn build(&self, html: &str) -> DomTree {
    self.build_with_diagnostics(html).0
  }

  /// Builds the tree and reports what malformed structure was repaired.
  /// The build itself never fails.
  pub fn build_with_diagnostics(&self, html: &str) -> (DomTree, Vec<ParseError>) {
    let mut rules = RuleMap::new();
    if let Some(css) = &self.stylesheet {
      rules.extend(extract_css_properties(css, &self.media));
    }

    // Consume <style> blocks wherever they appear; their nodes are
    // never emitted.
    let html = STYLE_BLOCKS.replace_all(html, |caps: &Captures| {
      let accepted = match MEDIA_ATTRIBUTE.captures(&caps[1]) {
        Some(media) => self.media.accepts(&media[1]),
        None => true,
      };
      if accepted {
        rules.extend(extract_css_properties(&caps[2], &self.media));
      }
      String::new()
    });
    let html = normalize_fragment(&html);

    let mut emitter = Emitter::new(rules);
    let mut cursor = 0;
    for tag in TAGS.find_iter(&html) {
      if tag.start() > cursor {
        emitter.emit_text(&html[cursor..tag.start()]);
      }
      emitter.emit_tag(&html[tag.start() + 1..tag.end() - 1]);
      cursor = tag.end();
    }
    if cursor < html.len() {
      emitter.emit_text(&html[cursor..]);
    }

    emitter.finish()
  }
}

impl Default for TreeBuilder {
  fn default() -> Self {
    Self::new()
  }
}

/// Single-pass node emitter: owns the arena under construction, the
/// open-tag stack (rooted at node 0), and the diagnostics list.
struct Emitter {
  nodes: Vec<DomNode>,
  stack: Vec<usize>,
  rules: RuleMap,
  diagnostics: Vec<ParseError>,
  element_key: usize,
}

impl Emitter {
  fn new(rules: RuleMap) -> Self {
    let root = DomNode::default();
    Self {
      nodes: vec![root],
      stack: vec![0],
      rules,
      diagnostics: Vec::new(),
      element_key: 0,
    }
  }

  fn parent(&self) -> usize {
    self.stack.last().copied().unwrap_or(0)
  }

  fn emit_text(&mut self, raw: &str) {
    if raw.is_empty() {
      return;
    }
    let index = self.nodes.len();
    self.nodes.push(DomNode {
      index,
      parent: self.parent(),
      text: Some(entities::decode(raw)),
      ..DomNode::default()
    });
  }

  fn emit_tag(&mut self, element: &str) {
    let Some(name) = TAG_NAME
      .captures(element)
      .map(|caps| caps[1].to_ascii_lowercase())
    else {
      // Not a parseable tag (e.g. a stray "<>"); drop it.
      return;
    };
    if element.starts_with('/') {
      self.emit_closing_tag(&name);
    } else {
      self.emit_opening_tag(element, name);
    }
  }

  fn emit_closing_tag(&mut self, name: &str) {
    let open = self.parent();
    if open == 0 {
      self.diagnostics.push(ParseError::MismatchedClosingTag {
        tag: name.to_string(),
      });
      return;
    }
    if self.nodes[open].tag_name.as_deref() != Some(name) {
      self.diagnostics.push(ParseError::MismatchedClosingTag {
        tag: name.to_string(),
      });
    }

    let index = self.nodes.len();
    self.nodes.push(DomNode {
      index,
      element_key: self.nodes[open].element_key,
      parent: open,
      is_tag: true,
      opening: false,
      tag_name: Some(name.to_string()),
      ..DomNode::default()
    });
    self.stack.pop();
  }

  fn emit_opening_tag(&mut self, element: &str, name: String) {
    let mut attributes = FxHashMap::default();
    for caps in ATTRIBUTES.captures_iter(element) {
      attributes.insert(caps[1].to_ascii_lowercase(), caps[2].to_string());
    }
    let inline_style = attributes.get("style").cloned();
    let self_closing = element.ends_with('/') || VOID_TAGS.contains(&name.as_str());

    self.element_key += 1;
    let index = self.nodes.len();
    self.nodes.push(DomNode {
      index,
      element_key: self.element_key,
      parent: self.parent(),
      is_tag: true,
      opening: true,
      self_closing,
      tag_name: Some(name),
      attributes,
      inline_style,
      ..DomNode::default()
    });
    if !self_closing {
      self.stack.push(index);
    }

    let resolved = resolve_in(&self.nodes, index, &self.rules);
    if !resolved.is_empty() {
      self.apply_resolved_style(index, resolved);
    }
  }

  /// Stores the resolved style string and derives the parsed style map,
  /// line height, and the `border` attribute mirror from it.
  fn apply_resolved_style(&mut self, index: usize, resolved: String) {
    let mut style = FxHashMap::default();
    for caps in DECLARATIONS.captures_iter(&resolved) {
      // Later duplicates replace earlier ones.
      style.insert(caps[1].to_ascii_lowercase(), caps[2].trim().to_string());
    }

    let node = &mut self.nodes[index];
    node.line_height = style.get("line-height").and_then(|value| parse_line_height(value));
    if let Some(border) = style.get("border") {
      node.attributes.insert("border".to_string(), border.clone());
    }
    node.attributes.insert("style".to_string(), resolved);
    node.style = style;
  }

  fn finish(mut self) -> (DomTree, Vec<ParseError>) {
    while let Some(open) = self.stack.pop() {
      if open == 0 {
        break;
      }
      if let Some(name) = self.nodes[open].tag_name.clone() {
        self.diagnostics.push(ParseError::UnclosedTag { tag: name });
      }
    }
    (DomTree::new(self.nodes, self.rules), self.diagnostics)
  }
}

/// Normalizes the three convertible `line-height` forms; any other unit
/// leaves the numeric field unset for downstream defaults.
fn parse_line_height(value: &str) -> Option<f64> {
  let value = value.trim();
  if value == "normal" {
    return Some(NORMAL_LINE_HEIGHT);
  }
  if let Ok(number) = value.parse::<f64>() {
    return Some(number);
  }
  if let Some(percent) = value.strip_suffix('%') {
    return percent.trim().parse::<f64>().ok().map(|n| n / 100.0);
  }
  None
}

//! Fragment normalization
//!
//! The raw fragment is massaged before tokenizing: comments dropped,
//! unsupported tags stripped (text kept), newlines flattened to spaces,
//! and the inter-tag whitespace around table/list structure removed so
//! it cannot surface as stray text nodes between rows and cells. A
//! zero-height `<marker/>` sentinel is planted before every cell closer
//! for the table layout collaborator.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Tags the renderer understands; everything else is stripped with its
/// text content preserved.
const SUPPORTED_TAGS: &[&str] = &[
  "a", "b", "blockquote", "br", "dd", "del", "div", "dl", "dt", "em", "font", "h1", "h2", "h3",
  "h4", "h5", "h6", "hr", "i", "img", "li", "marker", "ol", "p", "pre", "small", "span", "strong",
  "sub", "sup", "table", "td", "th", "thead", "tr", "tt", "u", "ul",
];

pub(crate) const CELL_MARKER: &str = "<marker style=\"font-size:0\"/>";

static HTML_COMMENTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static TAG_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^</?([A-Za-z0-9]+)").unwrap());

static SPACE_BEFORE_STRUCTURE_CLOSER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s+</(table|tr|td|th|ul|ol|dl|li)>").unwrap());

static SPACE_BEFORE_STRUCTURE_OPENER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s+<(tr|td|th|ul|ol|dl|li|br)").unwrap());

static SPACE_AFTER_BLOCK_CLOSER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"</(table|tr|td|th|blockquote|dd|div|dl|dt|h1|h2|h3|h4|h5|h6|hr|li|ol|p|ul)>\s+<")
    .unwrap()
});

static CELL_CLOSER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</(td|th)>").unwrap());

static MARKER_AFTER_TABLE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"</table>\s*<marker style="font-size:0"/>"#).unwrap());

/// Normalizes a fragment whose `<style>` blocks have already been
/// consumed.
pub(crate) fn normalize_fragment(html: &str) -> String {
  let html = HTML_COMMENTS.replace_all(html, "");
  let html = strip_unsupported_tags(&html);
  let html = html
    .replace("\r\n", "\n")
    .replace('\r', "\n")
    .replace('\n', " ")
    .replace('\t', " ");
  let html = SPACE_BEFORE_STRUCTURE_CLOSER.replace_all(&html, "</$1>");
  let html = SPACE_BEFORE_STRUCTURE_OPENER.replace_all(&html, "<$1");
  let html = SPACE_AFTER_BLOCK_CLOSER.replace_all(&html, "</$1><");
  let html = CELL_CLOSER.replace_all(&html, format!("{CELL_MARKER}</$1>").as_str());
  let html = MARKER_AFTER_TABLE.replace_all(&html, "</table>");
  html.into_owned()
}

fn strip_unsupported_tags(html: &str) -> String {
  ANY_TAG
    .replace_all(html, |caps: &Captures| {
      let tag = &caps[0];
      let supported = TAG_NAME
        .captures(tag)
        .map(|name| SUPPORTED_TAGS.contains(&name[1].to_ascii_lowercase().as_str()))
        .unwrap_or(false);
      if supported {
        tag.to_string()
      } else {
        String::new()
      }
    })
    .into_owned()
}

//! HTML entity decoding for text runs
//!
//! Text nodes are decoded after tokenization so that encoded angle
//! brackets can never open a tag. Unknown or unterminated entities are
//! left verbatim; decoding never fails.

/// Longest entity body we accept between `&` and `;`.
const MAX_ENTITY_LEN: usize = 10;

/// Decodes named basics plus decimal/hex numeric references.
pub fn decode(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut rest = text;

  while let Some(pos) = rest.find('&') {
    out.push_str(&rest[..pos]);
    let candidate = &rest[pos..];
    match candidate.find(';') {
      Some(end) if end > 1 && end <= MAX_ENTITY_LEN + 1 => {
        if let Some(ch) = lookup(&candidate[1..end]) {
          out.push(ch);
          rest = &candidate[end + 1..];
        } else {
          out.push('&');
          rest = &candidate[1..];
        }
      }
      _ => {
        out.push('&');
        rest = &candidate[1..];
      }
    }
  }

  out.push_str(rest);
  out
}

fn lookup(name: &str) -> Option<char> {
  match name {
    "amp" => Some('&'),
    "lt" => Some('<'),
    "gt" => Some('>'),
    "quot" => Some('"'),
    "apos" => Some('\''),
    "nbsp" => Some('\u{a0}'),
    _ => {
      let body = name.strip_prefix('#')?;
      let code = if let Some(hex) = body.strip_prefix('x').or_else(|| body.strip_prefix('X')) {
        u32::from_str_radix(hex, 16).ok()?
      } else {
        body.parse::<u32>().ok()?
      };
      char::from_u32(code)
    }
  }
}

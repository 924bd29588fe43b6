//! Accepted-media configuration
//!
//! `@media` blocks and `<style media="...">` tags are filtered against a
//! [`MediaPolicy`]. A paginated (print) render accepts `print` and `all`
//! and drops `screen`; the policy is configurable so callers targeting a
//! different medium can flip it.

/// The set of media idents whose rule blocks apply to this render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPolicy {
  accepted: Vec<String>,
}

impl MediaPolicy {
  /// Policy for paginated output: accepts `print` and `all`.
  pub fn print() -> Self {
    Self {
      accepted: vec!["all".to_string(), "print".to_string()],
    }
  }

  /// Policy for on-screen output: accepts `screen` and `all`.
  pub fn screen() -> Self {
    Self {
      accepted: vec!["all".to_string(), "screen".to_string()],
    }
  }

  /// Adds one more accepted medium.
  pub fn accept(mut self, medium: impl Into<String>) -> Self {
    self.accepted.push(medium.into().to_ascii_lowercase());
    self
  }

  /// True when a single medium ident is accepted.
  pub fn accepts_medium(&self, medium: &str) -> bool {
    let medium = medium.trim().to_ascii_lowercase();
    self.accepted.iter().any(|accepted| *accepted == medium)
  }

  /// True when at least one medium of a comma-separated ident list is
  /// accepted. An empty list places no constraint and always applies.
  pub fn accepts(&self, ident_list: &str) -> bool {
    if ident_list.trim().is_empty() {
      return true;
    }
    ident_list.split(',').any(|medium| self.accepts_medium(medium))
  }
}

impl Default for MediaPolicy {
  fn default() -> Self {
    Self::print()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_print_policy_accepts_print_and_all() {
    let policy = MediaPolicy::print();
    assert!(policy.accepts("print"));
    assert!(policy.accepts("all"));
    assert!(!policy.accepts("screen"));
  }

  #[test]
  fn test_ident_list_accepted_when_any_medium_matches() {
    let policy = MediaPolicy::print();
    assert!(policy.accepts("screen, print"));
    assert!(!policy.accepts("screen, tv"));
  }

  #[test]
  fn test_empty_ident_list_always_applies() {
    assert!(MediaPolicy::print().accepts(""));
    assert!(MediaPolicy::print().accepts("   "));
  }

  #[test]
  fn test_case_insensitive_idents() {
    assert!(MediaPolicy::print().accepts("PRINT"));
    assert!(MediaPolicy::screen().accepts("Screen"));
  }

  #[test]
  fn test_extended_policy() {
    let policy = MediaPolicy::print().accept("handheld");
    assert!(policy.accepts("handheld"));
  }
}

//! Image file-type classification
//!
//! Collaborator seam for the image loader: a trivial, extension-based
//! lookup. Content sniffing, decoding, and placement belong to the
//! rendering collaborators, not the cascade core.

use std::ffi::OsStr;
use std::path::Path;

/// Supported raster formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
  Gif,
  Png,
  Jpeg,
}

impl ImageKind {
  /// Classifies a path by extension, case-insensitively. `jpg` and
  /// `jpeg` both map to [`ImageKind::Jpeg`].
  pub fn from_path(path: &str) -> Option<Self> {
    let extension = Path::new(path)
      .extension()
      .and_then(OsStr::to_str)?
      .to_ascii_lowercase();
    match extension.as_str() {
      "gif" => Some(Self::Gif),
      "png" => Some(Self::Png),
      "jpg" | "jpeg" => Some(Self::Jpeg),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Gif => "gif",
      Self::Png => "png",
      Self::Jpeg => "jpeg",
    }
  }
}

/// The classifier contract consumed by document assembly: unknown,
/// missing, or empty extensions yield `""` rather than an error.
pub fn image_file_type(path: &str) -> &'static str {
  ImageKind::from_path(path).map(|kind| kind.as_str()).unwrap_or("")
}

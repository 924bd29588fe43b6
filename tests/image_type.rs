// Image classifier fixtures.

use printrender::image::{image_file_type, ImageKind};

#[test]
fn extension_classification() {
  assert_eq!(image_file_type("/images/logo_example.gif"), "gif");
  assert_eq!(image_file_type("/images/logo_example.PNG"), "png");
  assert_eq!(image_file_type("/images/logo_example.jpg"), "jpeg");
  assert_eq!(image_file_type("/images/logo_example.jpeg"), "jpeg");
}

#[test]
fn unknown_inputs_yield_empty() {
  assert_eq!(image_file_type("/images/logo_example"), "");
  assert_eq!(image_file_type(""), "");
}

#[test]
fn kind_round_trips_to_name() {
  assert_eq!(ImageKind::from_path("a.gif"), Some(ImageKind::Gif));
  assert_eq!(ImageKind::from_path("a.webp"), None);
  assert_eq!(ImageKind::Jpeg.as_str(), "jpeg");
}

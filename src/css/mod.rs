//! CSS extraction, selector matching, and cascade resolution
//!
//! Everything here is string/tree manipulation over the flat DOM arena;
//! no external CSS engine is involved.

pub mod extract;
pub mod matcher;
pub mod media;
pub mod resolve;
pub mod specificity;

pub use extract::{extract_css_properties, RuleMap};
pub use matcher::selector_matches;
pub use media::MediaPolicy;
pub use resolve::resolve_style;
pub use specificity::Specificity;

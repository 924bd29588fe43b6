pub mod css;
pub mod dom;
pub mod error;
pub mod html;
pub mod image;

pub use css::{extract_css_properties, resolve_style, selector_matches, MediaPolicy, RuleMap, Specificity};
pub use dom::{DomNode, DomTree};
pub use error::{Error, ParseError, Result};
pub use html::TreeBuilder;

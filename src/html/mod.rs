//! HTML fragment handling
//!
//! Normalization, entity decoding, and the flat tree builder.

pub mod entities;
pub mod preprocess;
pub mod tree;

pub use tree::{build, TreeBuilder};

//! Block model.
//!
//! A "block" is one top-level JSON object or array found inside a larger text:
//! - decoded content
//! - source span (byte range)
//! - kind (object / array)
//! - stable UUID id for rendering keys

pub mod model;

pub use model::{Block, BlockId, BlockKind};

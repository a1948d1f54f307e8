//! Small parsing helpers shared across layers.

pub mod parse;

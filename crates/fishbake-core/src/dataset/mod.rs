//! Embedded species dataset: extraction, record model and rewrite.
//!
//! The dataset lives inside a larger source file as a single array literal
//! (`const FISH = [ ... ];`). Only that region is ever touched; every other
//! byte of the file survives a rewrite unchanged.

mod parse;
mod record;
mod write;

pub use parse::{parse_dataset, ArrayFrame, ParsedDataset, SkippedEntry};
pub use record::{SpeciesRecord, FIELD_COUNT, IMAGE_SLOT};
pub use write::{render_array, splice, write_atomic};

//! Similarity-driven text collage generation library.
//!
//! This crate stitches paragraphs together from several fixed corpora:
//! - Sentences are vectorized once by a similarity oracle
//! - Each seed sentence is ranked against the other corpora
//! - Fixed ranked positions and seeded random picks fill a paragraph template
//! - The result is cleaned of whitespace and punctuation artifacts
//!
//! File helpers are kept internal; loading goes through `model::sources`.

/// Error type shared by the whole crate.
pub mod error;

/// Corpora, ranking and generation logic.
pub mod model;

/// I/O utilities (file loading, globbing, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{MakeshiftError, Result};

/// Writes generated text to `path`.
pub fn write_text<P: AsRef<std::path::Path>>(path: P, text: &str) -> Result<()> {
	Ok(io::write_text(path, text)?)
}

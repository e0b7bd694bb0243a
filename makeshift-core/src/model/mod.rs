//! Top-level module for the collage generation system.
//!
//! This crate provides a similarity-driven text collage generator, including:
//! - Sentence segmentation (`segmenter`)
//! - A pluggable similarity oracle (`SimilarityOracle`, `HashedWordOracle`)
//! - Named, vectorized corpora with an on-disk cache (`Corpus`)
//! - Source loading (`Sources`)
//! - Top-k and best-of-stream ranking (`Ranker`)
//! - Assembly parameters (`GenerationInput`)
//! - A seeded paragraph assembler (`Generator`)
//! - A text post-processor (`clean`)

/// Whitespace and punctuation cleanup of assembled text.
pub mod cleaner;

/// Named, ordered, immutable sentence collections.
///
/// Supports parallel vectorization at build time and postcard caching.
pub mod corpus;

/// Tunable parameters of the assembler: cadences, ranked-list sizes,
/// fixed positions and random pick windows.
pub mod generation_input;

/// High-level interface turning seed sentences into collage paragraphs.
///
/// Owns no data: borrows the loaded sources and the oracle, and keeps the
/// random stream in a per-pass state.
pub mod generator;

/// Similarity oracle trait and the built-in hashed word-vector oracle.
pub mod oracle;

/// Similarity ranking of corpus sentences against a query sentence.
pub mod ranker;

/// Rule-based sentence splitting and word tokenization.
pub mod segmenter;

/// Sentences and corpus names.
pub mod sentence;

/// Loading of the apprentice, kleiser, repub and conwell sources.
pub mod sources;

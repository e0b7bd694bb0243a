use thiserror::Error;

use crate::model::sentence::CorpusName;

/// Errors raised while loading sources or assembling text.
///
/// Every variant is fatal for the command-line tool: there is no
/// recoverable category, the run either completes or aborts.
#[derive(Error, Debug)]
pub enum MakeshiftError {
	/// Propagated I/O error (missing source file, unwritable output...).
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// Malformed structured input (apprentice entries, config file).
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// Corpus cache could not be encoded or decoded.
	#[error("cache error: {0}")]
	Cache(#[from] postcard::Error),

	#[error("invalid glob pattern: {0}")]
	Pattern(#[from] glob::PatternError),

	#[error("glob error: {0}")]
	Glob(#[from] glob::GlobError),

	/// No file matched a required source pattern.
	#[error("no source files match {0}")]
	MissingSources(String),

	/// The similarity oracle could not be set up.
	#[error("similarity oracle unavailable: {0}")]
	Oracle(String),

	/// Invalid generation parameters.
	#[error("config error: {0}")]
	Config(String),

	/// A corpus holds fewer sentences than the configured positions need.
	#[error("corpus {corpus} has {len} sentences, at least {required} required")]
	CorpusTooSmall {
		corpus: CorpusName,
		len: usize,
		required: usize,
	},

	/// Not enough titles for the headings of the seed sequence.
	#[error("no title available for heading {0}")]
	MissingTitle(usize),

	/// A fixed-position read fell outside a ranked list.
	#[error("position {position} out of range for {corpus} ranking of length {len}")]
	RankOutOfRange {
		corpus: CorpusName,
		position: isize,
		len: usize,
	},

	/// A random pick window selected nothing.
	#[error("empty pick window {start}..{end} in {corpus} ranking of length {len}")]
	EmptyPickWindow {
		corpus: CorpusName,
		start: usize,
		end: usize,
		len: usize,
	},
}

pub type Result<T> = std::result::Result<T, MakeshiftError>;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Names of the corpora a sentence can come from.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CorpusName {
	/// Episode summaries; the seed sentences and the heading titles.
	Apprentice,
	/// One phrase per line.
	Kleiser,
	/// Numbered text files, segmented into sentences.
	Repub,
	/// A single sentence file, segmented and cached.
	Conwell,
}

impl fmt::Display for CorpusName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			CorpusName::Apprentice => "apprentice",
			CorpusName::Kleiser => "kleiser",
			CorpusName::Repub => "repub",
			CorpusName::Conwell => "conwell",
		};
		f.write_str(name)
	}
}

/// An immutable text span and its embedding vector.
///
/// Identified by `(corpus, index)`; the index is the position of the
/// sentence inside its corpus.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Sentence {
	corpus: CorpusName,
	index: usize,
	text: String,
	vector: Vec<f32>,
}

impl Sentence {
	pub fn new(corpus: CorpusName, index: usize, text: String, vector: Vec<f32>) -> Self {
		Self { corpus, index, text, vector }
	}

	pub fn corpus(&self) -> CorpusName {
		self.corpus
	}

	pub fn index(&self) -> usize {
		self.index
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn vector(&self) -> &[f32] {
		&self.vector
	}

	/// Text with the first character uppercased and the rest lowercased.
	pub fn capitalized(&self) -> String {
		capitalize(&self.text)
	}
}

/// Uppercases the first character of `text` and lowercases the rest.
///
/// Examples:
/// - `"the ROAD home"` → `"The road home"`
/// - `""` → `""`
pub fn capitalize(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
		None => String::new(),
	}
}

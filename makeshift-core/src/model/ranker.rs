use std::collections::VecDeque;

use super::corpus::Corpus;
use super::oracle::SimilarityOracle;
use super::sentence::Sentence;

/// One ranked candidate: its corpus index, score and sentence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedMatch<'a> {
	pub index: usize,
	pub score: f32,
	pub sentence: &'a Sentence,
}

impl<'a> RankedMatch<'a> {
	pub fn text(&self) -> &'a str {
		self.sentence.text()
	}
}

/// Ranks corpus sentences by similarity to a query sentence.
///
/// Two strategies are offered:
/// - [`Ranker::top_k`]: full sort, strictly ordered.
/// - [`Ranker::best_of_stream`]: single pass keeping the chain of
///   successive best matches, newest (best) first.
#[derive(Clone, Copy)]
pub struct Ranker<'o> {
	oracle: &'o dyn SimilarityOracle,
}

impl<'o> Ranker<'o> {
	pub fn new(oracle: &'o dyn SimilarityOracle) -> Self {
		Self { oracle }
	}

	pub fn oracle(&self) -> &'o dyn SimilarityOracle {
		self.oracle
	}

	/// Returns the `k` sentences of `corpus` most similar to `query`.
	///
	/// # Behavior
	/// - Scores every sentence of the corpus.
	/// - Sorts by descending score; ties keep the lower corpus index first.
	/// - Truncates to `k`.
	///
	/// An empty corpus yields an empty list.
	pub fn top_k<'c>(&self, query: &Sentence, corpus: &'c Corpus, k: usize) -> Vec<RankedMatch<'c>> {
		let mut matches: Vec<RankedMatch<'c>> = corpus
			.iter()
			.enumerate()
			.map(|(index, sentence)| RankedMatch {
				index,
				score: self.oracle.similarity(query, sentence),
				sentence,
			})
			.collect();

		matches.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
		matches.truncate(k);
		matches
	}

	/// Streams `corpus` once, keeping a chain of successive best matches.
	///
	/// # Behavior
	/// - The running best starts at `0.0`; a candidate enters only if it
	///   scores strictly above the current front, and becomes the new front.
	/// - When the window overflows `capacity`, the back entry is evicted.
	/// - Scores therefore strictly decrease from front to back.
	///
	/// # Returns
	/// At most `capacity` matches, best first. The list can be shorter than
	/// `capacity`, and is empty when nothing scores above zero.
	pub fn best_of_stream<'c>(&self, query: &Sentence, corpus: &'c Corpus, capacity: usize) -> Vec<RankedMatch<'c>> {
		if capacity == 0 {
			return Vec::new();
		}
		let mut window: VecDeque<RankedMatch<'c>> = VecDeque::with_capacity(capacity + 1);

		for (index, sentence) in corpus.iter().enumerate() {
			let score = self.oracle.similarity(query, sentence);
			let best = window.front().map_or(0.0, |m| m.score);
			if score > best {
				window.push_front(RankedMatch { index, score, sentence });
				if window.len() > capacity {
					window.pop_back();
				}
			}
		}

		window.into()
	}
}

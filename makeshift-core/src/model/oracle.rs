use crate::error::{MakeshiftError, Result};
use crate::model::segmenter::words;
use crate::model::sentence::Sentence;

/// Scores how semantically close two sentences are.
///
/// Implementations turn a text into a vector once (at corpus build time)
/// and compare stored vectors afterwards. Scores are treated as opaque:
/// only their ordering matters to the ranker.
pub trait SimilarityOracle: Send + Sync {
	/// Computes the embedding vector of `text`.
	fn vectorize(&self, text: &str) -> Vec<f32>;

	/// Length of the vectors this oracle produces.
	fn dim(&self) -> usize {
		self.vectorize("").len()
	}

	/// Similarity of two sentences, cosine of their vectors by default.
	///
	/// Vectors of different lengths score `0.0`; corpora are checked
	/// against `dim` when loaded so this does not happen during ranking.
	fn similarity(&self, a: &Sentence, b: &Sentence) -> f32 {
		cosine_similarity(a.vector(), b.vector()).unwrap_or(0.0)
	}
}

/// Cosine similarity, `0.0` when either vector has no magnitude.
///
/// # Returns
/// `None` if the vectors have different lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
	if a.len() != b.len() {
		return None;
	}
	let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
	let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
	let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
	if na > 0.0 && nb > 0.0 {
		Some(dot / (na * nb))
	} else {
		Some(0.0)
	}
}

/// Checks that every vector of `sentences` has the oracle's dimension.
///
/// # Errors
/// Returns `Oracle` naming the first mismatching sentence.
pub fn check_dim(sentences: &[Sentence], oracle: &dyn SimilarityOracle) -> Result<()> {
	let dim = oracle.dim();
	match sentences.iter().find(|s| s.vector().len() != dim) {
		Some(s) => Err(MakeshiftError::Oracle(format!(
			"{} sentence {} has {} dimensions, the oracle produces {dim}",
			s.corpus(),
			s.index(),
			s.vector().len()
		))),
		None => Ok(()),
	}
}

/// Deterministic word-vector oracle.
///
/// Every lowercased word gets a pseudo-random vector derived from
/// `seed ^ fnv1a(word)`; a text vector is the average of its word vectors.
/// Texts sharing words therefore score higher, and the same text always
/// yields the same vector regardless of call order.
#[derive(Debug, Clone)]
pub struct HashedWordOracle {
	dim: usize,
	seed: u64,
}

impl HashedWordOracle {
	/// # Errors
	/// Returns `Oracle` if `dim` is zero.
	pub fn new(dim: usize, seed: u64) -> Result<Self> {
		if dim == 0 {
			return Err(MakeshiftError::Oracle("vector dimension must be > 0".to_owned()));
		}
		Ok(Self { dim, seed })
	}

	fn word_vector(&self, word: &str, into: &mut [f32]) {
		let mut rng = SplitMix64::new(self.seed ^ fnv1a64(word.as_bytes()));
		for x in into.iter_mut() {
			// [0, 1) mapped to [-0.5, 0.5)
			*x += rng.next_f64() as f32 - 0.5;
		}
	}
}

impl SimilarityOracle for HashedWordOracle {
	fn vectorize(&self, text: &str) -> Vec<f32> {
		let mut v = vec![0.0f32; self.dim];
		let mut count = 0usize;
		for word in words(text) {
			self.word_vector(&word, &mut v);
			count += 1;
		}
		if count > 0 {
			let inv = 1.0 / count as f32;
			v.iter_mut().for_each(|x| *x *= inv);
		}
		v
	}

	fn dim(&self) -> usize {
		self.dim
	}
}

/// FNV-1a 64-bit.
fn fnv1a64(bytes: &[u8]) -> u64 {
	let mut h: u64 = 0xcbf29ce484222325;
	for &b in bytes {
		h ^= b as u64;
		h = h.wrapping_mul(0x100000001b3);
	}
	h
}

struct SplitMix64 {
	state: u64,
}

impl SplitMix64 {
	fn new(seed: u64) -> Self {
		Self { state: seed }
	}

	fn next_u64(&mut self) -> u64 {
		self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
		let mut z = self.state;
		z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
		z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
		z ^ (z >> 31)
	}

	fn next_f64(&mut self) -> f64 {
		(self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::sentence::CorpusName;

	fn sentence(oracle: &HashedWordOracle, text: &str) -> Sentence {
		Sentence::new(CorpusName::Kleiser, 0, text.to_owned(), oracle.vectorize(text))
	}

	#[test]
	fn zero_dimension_is_rejected() {
		assert!(matches!(HashedWordOracle::new(0, 1), Err(MakeshiftError::Oracle(_))));
	}

	#[test]
	fn vectors_are_deterministic() {
		let oracle = HashedWordOracle::new(64, 7).unwrap();
		assert_eq!(oracle.vectorize("Acres of diamonds"), oracle.vectorize("acres OF diamonds!"));
		assert_eq!(oracle.vectorize("anything").len(), 64);
	}

	#[test]
	fn shared_words_score_higher() {
		let oracle = HashedWordOracle::new(128, 1100).unwrap();
		let query = sentence(&oracle, "the farmer sold his farm");
		let close = sentence(&oracle, "a farmer sold the farm");
		let far = sentence(&oracle, "quantum chromodynamics lecture");

		let self_score = oracle.similarity(&query, &query);
		assert!((self_score - 1.0).abs() < 1e-5);
		assert!(oracle.similarity(&query, &close) > oracle.similarity(&query, &far));
	}

	#[test]
	fn unequal_lengths_are_rejected() {
		assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), None);
		assert_eq!(cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]), Some(1.0));
	}

	#[test]
	fn dimension_mismatch_is_reported() {
		let small = HashedWordOracle::new(8, 0).unwrap();
		let large = HashedWordOracle::new(300, 0).unwrap();
		assert_eq!(large.dim(), 300);

		let sentences = vec![sentence(&small, "acres of diamonds")];
		assert!(check_dim(&sentences, &small).is_ok());
		assert!(matches!(check_dim(&sentences, &large), Err(MakeshiftError::Oracle(_))));
	}

	#[test]
	fn empty_text_scores_zero() {
		let oracle = HashedWordOracle::new(16, 3).unwrap();
		let empty = sentence(&oracle, "...");
		let other = sentence(&oracle, "words");
		assert_eq!(oracle.similarity(&empty, &other), 0.0);
	}
}

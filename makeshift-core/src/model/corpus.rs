use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::oracle::{SimilarityOracle, check_dim};
use super::segmenter::split_sentences;
use super::sentence::{CorpusName, Sentence};
use crate::error::Result;

/// A named, ordered and immutable sequence of sentences.
///
/// # Invariants
/// - `sentences[i].index() == i`
/// - every sentence belongs to `name`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Corpus {
	name: CorpusName,
	sentences: Vec<Sentence>,
}

impl Corpus {
	/// Returns an empty corpus.
	pub fn empty(name: CorpusName) -> Self {
		Self { name, sentences: Vec::new() }
	}

	/// Builds a corpus where every text is one sentence.
	///
	/// # Behavior
	/// - Splits the texts into chunks (based on CPU cores * factor).
	/// - Vectorizes each chunk on its own thread.
	/// - Reassembles the chunks in their original order.
	pub fn from_texts<S: AsRef<str> + Sync>(name: CorpusName, texts: &[S], oracle: &dyn SimilarityOracle) -> Self {
		if texts.is_empty() {
			return Self::empty(name);
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = texts.len().div_ceil(chunks);

		let mut parts: Vec<(usize, Vec<Vec<f32>>)> = thread::scope(|scope| {
			let (tx, rx) = mpsc::channel();
			for (chunk_index, chunk) in texts.chunks(chunk_size).enumerate() {
				let tx = tx.clone();
				scope.spawn(move || {
					let vectors: Vec<Vec<f32>> = chunk.iter().map(|t| oracle.vectorize(t.as_ref())).collect();
					tx.send((chunk_index, vectors)).expect("Failed to send from thread");
				});
			}
			drop(tx);
			rx.iter().collect()
		});
		parts.sort_by_key(|(chunk_index, _)| *chunk_index);

		let sentences = texts
			.iter()
			.zip(parts.into_iter().flat_map(|(_, vectors)| vectors))
			.enumerate()
			.map(|(index, (text, vector))| Sentence::new(name, index, text.as_ref().to_owned(), vector))
			.collect();

		Self { name, sentences }
	}

	/// Segments a running text into sentences and builds the corpus from them.
	pub fn from_document(name: CorpusName, text: &str, oracle: &dyn SimilarityOracle) -> Self {
		let sentences = split_sentences(text);
		debug!("{name}: segmented {} sentences", sentences.len());
		Self::from_texts(name, &sentences, oracle)
	}

	/// Loads a corpus from a postcard cache, building and caching it if absent.
	///
	/// - Uses `postcard` for compact serialization/deserialization.
	/// - The cache is trusted against its sources (no staleness check), but
	///   vectors of another dimension than `oracle` produces are rebuilt
	///   and the cache is overwritten.
	pub fn load_cached<P, F>(cache_path: P, oracle: &dyn SimilarityOracle, build: F) -> Result<Self>
	where
		P: AsRef<Path>,
		F: FnOnce() -> Result<Corpus>,
	{
		let cache_path = cache_path.as_ref();
		if cache_path.exists() {
			info!("loading cached corpus from {}", cache_path.display());
			let bytes = std::fs::read(cache_path)?;
			let cached: Corpus = postcard::from_bytes(&bytes)?;
			match check_dim(&cached.sentences, oracle) {
				Ok(()) => return Ok(cached),
				Err(err) => warn!("rebuilding {}: {err}", cache_path.display()),
			}
		}

		let corpus = build()?;
		let bytes = postcard::to_stdvec(&corpus)?;
		std::fs::write(cache_path, bytes)?;
		info!("{}: cached {} sentences to {}", corpus.name, corpus.len(), cache_path.display());
		Ok(corpus)
	}

	pub fn name(&self) -> CorpusName {
		self.name
	}

	pub fn len(&self) -> usize {
		self.sentences.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sentences.is_empty()
	}

	pub fn sentences(&self) -> &[Sentence] {
		&self.sentences
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Sentence> {
		self.sentences.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::oracle::HashedWordOracle;

	#[test]
	fn indices_follow_input_order() {
		let oracle = HashedWordOracle::new(8, 0).unwrap();
		let texts: Vec<String> = (0..1000).map(|i| format!("phrase number {i}")).collect();
		let corpus = Corpus::from_texts(CorpusName::Kleiser, &texts, &oracle);

		assert_eq!(corpus.len(), 1000);
		for (i, sentence) in corpus.iter().enumerate() {
			assert_eq!(sentence.index(), i);
			assert_eq!(sentence.text(), texts[i]);
			assert_eq!(sentence.vector(), oracle.vectorize(&texts[i]).as_slice());
			assert_eq!(sentence.corpus(), CorpusName::Kleiser);
		}
	}

	#[test]
	fn empty_input_gives_empty_corpus() {
		let oracle = HashedWordOracle::new(8, 0).unwrap();
		let corpus = Corpus::from_texts::<&str>(CorpusName::Repub, &[], &oracle);
		assert!(corpus.is_empty());
	}

	#[test]
	fn document_is_segmented() {
		let oracle = HashedWordOracle::new(8, 0).unwrap();
		let corpus = Corpus::from_document(CorpusName::Conwell, "First one. Second one!", &oracle);
		let texts: Vec<&str> = corpus.iter().map(Sentence::text).collect();
		assert_eq!(texts, vec!["First one.", "Second one!"]);
	}

	#[test]
	fn cache_is_written_then_reused() {
		let dir = tempfile::tempdir().unwrap();
		let cache = dir.path().join("conwell_sents.bin");
		let oracle = HashedWordOracle::new(8, 0).unwrap();

		let built = Corpus::load_cached(&cache, &oracle, || {
			Ok(Corpus::from_document(CorpusName::Conwell, "Acres. Of diamonds.", &oracle))
		})
		.unwrap();
		assert!(cache.exists());

		let reused = Corpus::load_cached(&cache, &oracle, || panic!("cache should be used")).unwrap();
		assert_eq!(built, reused);
	}

	#[test]
	fn cache_of_another_dimension_is_rebuilt() {
		let dir = tempfile::tempdir().unwrap();
		let cache = dir.path().join("conwell_sents.bin");
		let text = "Acres of diamonds. Acres of gold.";

		let small = HashedWordOracle::new(8, 0).unwrap();
		Corpus::load_cached(&cache, &small, || Ok(Corpus::from_document(CorpusName::Conwell, text, &small))).unwrap();

		let large = HashedWordOracle::new(300, 0).unwrap();
		let rebuilt =
			Corpus::load_cached(&cache, &large, || Ok(Corpus::from_document(CorpusName::Conwell, text, &large))).unwrap();
		assert!(rebuilt.iter().all(|s| s.vector().len() == 300));
		let first = &rebuilt.sentences()[0];
		assert!((large.similarity(first, first) - 1.0).abs() < 1e-5);

		let reused = Corpus::load_cached(&cache, &large, || panic!("cache should be used")).unwrap();
		assert_eq!(rebuilt, reused);
	}
}

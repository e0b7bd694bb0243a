use makeshift_core::model::corpus::Corpus;
use makeshift_core::model::oracle::{HashedWordOracle, SimilarityOracle};
use makeshift_core::model::ranker::Ranker;
use makeshift_core::model::sentence::{CorpusName, Sentence};
use proptest::prelude::*;

const WORDS: [&str; 10] = ["gold", "farm", "river", "market", "diamond", "city", "church", "money", "road", "lamp"];

fn phrase() -> impl Strategy<Value = String> {
	prop::collection::vec(prop::sample::select(WORDS.to_vec()), 1..5).prop_map(|words| words.join(" "))
}

fn query(oracle: &HashedWordOracle, text: &str) -> Sentence {
	Sentence::new(CorpusName::Apprentice, 0, text.to_owned(), oracle.vectorize(text))
}

proptest! {
	#[test]
	fn top_k_is_bounded_sorted_and_from_corpus(
		texts in prop::collection::vec(phrase(), 0..40),
		q in phrase(),
		k in 0usize..50,
	) {
		let oracle = HashedWordOracle::new(32, 1100).unwrap();
		let corpus = Corpus::from_texts(CorpusName::Kleiser, &texts, &oracle);
		let query = query(&oracle, &q);

		let matches = Ranker::new(&oracle).top_k(&query, &corpus, k);
		prop_assert_eq!(matches.len(), k.min(texts.len()));
		for pair in matches.windows(2) {
			prop_assert!(pair[0].score >= pair[1].score);
			if pair[0].score.total_cmp(&pair[1].score).is_eq() {
				prop_assert!(pair[0].index < pair[1].index);
			}
		}
		for m in &matches {
			prop_assert_eq!(corpus.sentences().get(m.index), Some(m.sentence));
			prop_assert_eq!(m.sentence.corpus(), CorpusName::Kleiser);
			prop_assert_eq!(m.score, oracle.similarity(&query, m.sentence));
		}
	}

	#[test]
	fn best_of_stream_is_bounded_and_led_by_the_best(
		texts in prop::collection::vec(phrase(), 0..40),
		q in phrase(),
		capacity in 1usize..25,
	) {
		let oracle = HashedWordOracle::new(32, 1100).unwrap();
		let corpus = Corpus::from_texts(CorpusName::Kleiser, &texts, &oracle);
		let query = query(&oracle, &q);
		let ranker = Ranker::new(&oracle);

		let window = ranker.best_of_stream(&query, &corpus, capacity);
		prop_assert!(window.len() <= capacity.min(texts.len()));

		match ranker.top_k(&query, &corpus, 1).first() {
			Some(best) if best.score > 0.0 => {
				prop_assert_eq!(window[0].index, best.index);
			}
			_ => {
				prop_assert!(window.is_empty());
			}
		}
		for m in &window {
			prop_assert!(m.score > 0.0);
			prop_assert_eq!(corpus.sentences().get(m.index), Some(m.sentence));
		}
	}

	#[test]
	fn best_of_stream_scores_strictly_decrease(
		texts in prop::collection::vec(phrase(), 0..60),
		q in phrase(),
		capacity in 1usize..25,
	) {
		let oracle = HashedWordOracle::new(32, 1100).unwrap();
		let corpus = Corpus::from_texts(CorpusName::Kleiser, &texts, &oracle);
		let query = query(&oracle, &q);

		let window = Ranker::new(&oracle).best_of_stream(&query, &corpus, capacity);
		for pair in window.windows(2) {
			prop_assert!(pair[0].score > pair[1].score);
			prop_assert!(pair[0].index > pair[1].index);
		}
	}
}

#[test]
fn empty_corpus_ranks_nothing() {
	let oracle = HashedWordOracle::new(32, 1100).unwrap();
	let corpus = Corpus::empty(CorpusName::Repub);
	let query = query(&oracle, "gold farm");
	let ranker = Ranker::new(&oracle);

	assert!(ranker.top_k(&query, &corpus, 60).is_empty());
	assert!(ranker.best_of_stream(&query, &corpus, 20).is_empty());
}

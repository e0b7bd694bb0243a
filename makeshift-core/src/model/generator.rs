use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::error::{MakeshiftError, Result};
use crate::model::corpus::Corpus;
use crate::model::generation_input::{GenerationInput, PickWindow, resolve_position};
use crate::model::oracle::{SimilarityOracle, check_dim};
use crate::model::ranker::{RankedMatch, Ranker};
use crate::model::sentence::{CorpusName, Sentence, capitalize};
use crate::model::sources::Sources;

/// Mutable state of one generation pass: the output buffer and the random stream.
///
/// Created at the start of a pass and dropped once the text is returned.
struct GenerationState {
	text: String,
	rng: StdRng,
}

impl GenerationState {
	fn new(seed: u64) -> Self {
		Self {
			text: String::new(),
			rng: StdRng::seed_from_u64(seed),
		}
	}
}

/// Assembles collage paragraphs from ranked corpus sentences.
///
/// # Responsibilities
/// - Hold the generation context explicitly: sources, ranker and parameters
/// - Check corpus sizes before any random draw
/// - Emit one paragraph per seed sentence, in seed order
///
/// The random stream is consumed in a fixed order per paragraph (bridge
/// sentence, repub pick, sorted kleiser pick, early then late conwell pick),
/// so a given seed, oracle and sources always produce the same text.
pub struct Generator<'a> {
	sources: &'a Sources,
	ranker: Ranker<'a>,
	input: GenerationInput,
}

impl<'a> Generator<'a> {
	/// Creates a generator over loaded sources.
	///
	/// # Errors
	/// - `Config` if the parameters are invalid.
	/// - `Oracle` if a corpus was vectorized with another dimension.
	/// - `CorpusTooSmall` if kleiser, repub or conwell is smaller than the
	///   fixed positions and pick windows of `input` need. This is a lower
	///   bound only: the bounded kleiser list can still come out shorter.
	pub fn new(sources: &'a Sources, oracle: &'a dyn SimilarityOracle, input: GenerationInput) -> Result<Self> {
		input.validate()?;
		for corpus in [&sources.seeds, &sources.kleiser, &sources.repub, &sources.conwell] {
			check_dim(corpus.sentences(), oracle)?;
		}
		check_len(&sources.kleiser, input.min_kleiser_len())?;
		check_len(&sources.repub, 1)?;
		check_len(&sources.conwell, input.min_conwell_len())?;

		Ok(Self {
			sources,
			ranker: Ranker::new(oracle),
			input,
		})
	}

	/// Generates the text for the seed sentences of the sources.
	pub fn generate(&self) -> Result<String> {
		self.generate_from(self.sources.seeds.sentences())
	}

	/// Generates one paragraph per seed sentence and concatenates them.
	///
	/// # Errors
	/// - `Oracle` if a seed was vectorized with another dimension.
	/// - `MissingTitle` if there are fewer titles than headings.
	/// - `RankOutOfRange` / `EmptyPickWindow` if a ranked list is shorter
	///   than a fixed position or pick window needs. The bounded kleiser
	///   list only holds successive improvements, so a seed with few of
	///   them fails here.
	pub fn generate_from(&self, seeds: &[Sentence]) -> Result<String> {
		check_dim(seeds, self.ranker.oracle())?;
		let needed = self.input.titles_needed(seeds.len());
		if self.sources.titles.len() < needed {
			return Err(MakeshiftError::MissingTitle(self.sources.titles.len()));
		}

		info!("generating text with seed {}", self.input.seed);
		let mut state = GenerationState::new(self.input.seed);
		for (i, seed) in seeds.iter().enumerate() {
			debug!("paragraph {i}");
			self.write_paragraph(i, seed, &mut state)?;
		}
		Ok(state.text)
	}

	fn write_paragraph(&self, i: usize, seed: &Sentence, state: &mut GenerationState) -> Result<()> {
		let input = &self.input;
		let sources = self.sources;

		if i % input.heading_every == 0 {
			let heading = i / input.heading_every;
			let title = sources.titles.get(heading).ok_or(MakeshiftError::MissingTitle(heading))?;
			state.text.push_str("   ");
			state.text.push_str(title);
			state.text.push_str("\n\n");
		}

		let bounded = self.ranker.best_of_stream(seed, &sources.kleiser, input.bounded_capacity);
		let sorted = self.ranker.top_k(seed, &sources.kleiser, input.kleiser_top_k);
		let bridge = self.bridge(i, &mut state.rng)?;

		let repubs = self.ranker.top_k(seed, &sources.repub, input.repub_top_k);
		let repub = pick(&repubs, PickWindow::new(0, repubs.len()), &mut state.rng, CorpusName::Repub)?;

		let conwells = self.ranker.top_k(seed, &sources.conwell, input.conwell_top_k);

		let mut lead = vec![at(&sorted, 0, CorpusName::Kleiser)?.text()];
		for &position in &input.bounded_lead_picks {
			lead.push(at(&bounded, position, CorpusName::Kleiser)?.text());
		}
		state.text.push_str(&lead.join(", "));
		state.text.push_str(". ");

		if bounded.len() > input.bounded_extra_threshold {
			let extra = at(&bounded, input.bounded_extra_pick, CorpusName::Kleiser)?;
			state.text.push_str(&extra.sentence.capitalized());
			state.text.push_str(". ");
		}

		state.text.push_str(repub.text());
		state.text.push(' ');
		let runner = pick(&sorted, input.sorted_pick, &mut state.rng, CorpusName::Kleiser)?;
		state.text.push_str(runner.text());
		state.text.push_str(".\n\n");

		state.text.push_str(&bridge);
		state.text.push_str(seed.text());
		state.text.push(' ');
		for window in [input.conwell_early, input.conwell_late] {
			let conwell = pick(&conwells, window, &mut state.rng, CorpusName::Conwell)?;
			state.text.push_str(conwell.text());
			state.text.push(' ');
		}

		let closing = input
			.bounded_closing_picks
			.iter()
			.map(|&position| at(&bounded, position, CorpusName::Kleiser).map(|m| m.text()))
			.collect::<Result<Vec<_>>>()?;
		state.text.push_str(&closing.join(". "));
		state.text.push_str(".\n\n");

		Ok(())
	}

	/// Builds the bridging phrase of paragraph `i`.
	///
	/// Every `bridge_every` paragraphs a random conwell sentence leads,
	/// followed by its closest kleiser phrase; otherwise a random kleiser
	/// phrase leads, followed by its closest other kleiser phrase. The
	/// follower is omitted when the ranking has no entry at its position.
	fn bridge(&self, i: usize, rng: &mut StdRng) -> Result<String> {
		let kleiser = &self.sources.kleiser;
		let mut bridge = String::new();

		let next_position = if i % self.input.bridge_every == 0 {
			let phrase = choose(&self.sources.conwell, rng)?;
			bridge.push_str(phrase.text());
			bridge.push(' ');
			(phrase, self.input.conwell_bridge_next)
		} else {
			let phrase = choose(kleiser, rng)?;
			bridge.push_str(&phrase.capitalized());
			bridge.push_str(". ");
			(phrase, self.input.kleiser_bridge_next)
		};

		let (phrase, position) = next_position;
		let next = self.ranker.top_k(phrase, kleiser, self.input.kleiser_top_k);
		if let Some(index) = resolve_position(position, next.len()) {
			bridge.push_str(&capitalize(next[index].text()));
			bridge.push_str(". ");
		}

		Ok(bridge)
	}
}

fn check_len(corpus: &Corpus, required: usize) -> Result<()> {
	if corpus.len() < required {
		return Err(MakeshiftError::CorpusTooSmall {
			corpus: corpus.name(),
			len: corpus.len(),
			required,
		});
	}
	Ok(())
}

/// Uniformly random sentence of a corpus.
fn choose<'c>(corpus: &'c Corpus, rng: &mut StdRng) -> Result<&'c Sentence> {
	corpus.sentences().choose(rng).ok_or(MakeshiftError::CorpusTooSmall {
		corpus: corpus.name(),
		len: 0,
		required: 1,
	})
}

/// Ranked entry at a signed position.
fn at<'c>(ranked: &[RankedMatch<'c>], position: isize, corpus: CorpusName) -> Result<RankedMatch<'c>> {
	resolve_position(position, ranked.len())
		.map(|index| ranked[index])
		.ok_or(MakeshiftError::RankOutOfRange {
			corpus,
			position,
			len: ranked.len(),
		})
}

/// Uniformly random entry within `window`, clamped to the list length.
fn pick<'c>(
	ranked: &[RankedMatch<'c>],
	window: PickWindow,
	rng: &mut StdRng,
	corpus: CorpusName,
) -> Result<RankedMatch<'c>> {
	let end = window.end.min(ranked.len());
	ranked
		.get(window.start..end)
		.and_then(|slice| slice.choose(rng))
		.copied()
		.ok_or(MakeshiftError::EmptyPickWindow {
			corpus,
			start: window.start,
			end: window.end,
			len: ranked.len(),
		})
}

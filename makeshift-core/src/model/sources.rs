use std::path::Path;

use log::info;
use serde::Deserialize;

use super::corpus::Corpus;
use super::oracle::SimilarityOracle;
use super::sentence::CorpusName;
use crate::error::Result;
use crate::io;

/// Episode list: a JSON array of `{ "name", "summary" }` objects.
pub const APPRENTICE_FILE: &str = "apprentice_eps.json";
/// One phrase per line.
pub const KLEISER_FILE: &str = "kleiser_phrases.txt";
/// Numbered repub files; the first line of each is a header.
pub const REPUB_PATTERN: &str = "repub_1*";
/// Running sentence text.
pub const CONWELL_FILE: &str = "conwell_sents.txt";

/// One apprentice episode entry.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Episode {
	pub name: String,
	pub summary: String,
}

/// Everything a generation pass reads, loaded once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Sources {
	/// Seed sentences driving one paragraph each.
	pub seeds: Corpus,
	/// Heading titles, one per `heading_every` seeds.
	pub titles: Vec<String>,
	pub kleiser: Corpus,
	pub repub: Corpus,
	pub conwell: Corpus,
}

impl Sources {
	/// Loads the four corpora from a sources directory.
	///
	/// # Parameters
	/// - `dir`: Directory holding the source files. `"."` is accepted.
	/// - `oracle`: Computes the sentence vectors.
	/// - `use_cache`: Read or write the conwell postcard cache.
	///
	/// # Errors
	/// Any missing file or malformed apprentice entry.
	pub fn load<P: AsRef<Path>>(dir: P, oracle: &dyn SimilarityOracle, use_cache: bool) -> Result<Self> {
		let dir = io::normalize_folder(dir);

		info!("loading apprentice");
		let (seeds, titles) = Self::load_apprentice(dir.join(APPRENTICE_FILE), oracle)?;
		info!("loading kleiser");
		let kleiser = Self::load_kleiser(dir.join(KLEISER_FILE), oracle)?;
		info!("loading repub");
		let repub = Self::load_repub(&dir, oracle)?;
		info!("loading conwell");
		let conwell = Self::load_conwell(dir.join(CONWELL_FILE), oracle, use_cache)?;

		info!(
			"loaded {} seeds, {} titles, {} kleiser, {} repub, {} conwell",
			seeds.len(),
			titles.len(),
			kleiser.len(),
			repub.len(),
			conwell.len()
		);
		Ok(Self { seeds, titles, kleiser, repub, conwell })
	}

	/// Loads the seed sentences and the heading titles.
	///
	/// Summaries are stripped of paragraph tags, unescaped, joined with a
	/// space and segmented into sentences. Names become titles.
	pub fn load_apprentice<P: AsRef<Path>>(path: P, oracle: &dyn SimilarityOracle) -> Result<(Corpus, Vec<String>)> {
		let episodes: Vec<Episode> = serde_json::from_str(&io::read_text(path)?)?;

		let text = episodes
			.iter()
			.map(|ep| clean_summary(&ep.summary))
			.collect::<Vec<_>>()
			.join(" ");
		let titles = episodes.into_iter().map(|ep| ep.name).collect();

		Ok((Corpus::from_document(CorpusName::Apprentice, &text, oracle), titles))
	}

	/// Loads kleiser phrases, one per non-blank line.
	pub fn load_kleiser<P: AsRef<Path>>(path: P, oracle: &dyn SimilarityOracle) -> Result<Corpus> {
		let phrases: Vec<String> = io::read_file(path)?
			.into_iter()
			.map(|line| line.trim().to_owned())
			.filter(|line| !line.is_empty())
			.collect();
		Ok(Corpus::from_texts(CorpusName::Kleiser, &phrases, oracle))
	}

	/// Loads every `repub_1*` file of `dir` as one segmented text.
	///
	/// # Notes
	/// - Files are read in path order.
	/// - The first line of each file is dropped.
	pub fn load_repub<P: AsRef<Path>>(dir: P, oracle: &dyn SimilarityOracle) -> Result<Corpus> {
		let mut text = String::new();
		for path in io::list_matching(dir, REPUB_PATTERN)? {
			let lines = io::read_file(&path)?;
			let body = lines.iter().skip(1).map(String::as_str).collect::<Vec<_>>().join(" ");
			if !text.is_empty() {
				text.push(' ');
			}
			text.push_str(&body);
		}
		Ok(Corpus::from_document(CorpusName::Repub, &text, oracle))
	}

	/// Loads conwell sentences, through the postcard cache when enabled.
	///
	/// The cache lives next to the source (`conwell_sents.bin`) and is
	/// rebuilt when absent or when its vectors do not match the oracle.
	pub fn load_conwell<P: AsRef<Path>>(path: P, oracle: &dyn SimilarityOracle, use_cache: bool) -> Result<Corpus> {
		let path = path.as_ref();
		let build = || -> Result<Corpus> {
			let text = io::read_text(path)?.replace('\n', " ");
			Ok(Corpus::from_document(CorpusName::Conwell, &text, oracle))
		};

		if use_cache {
			Corpus::load_cached(io::build_output_path(path, "bin")?, oracle, build)
		} else {
			build()
		}
	}
}

/// Strips `<p>` tags and unescapes `&amp;` in an episode summary.
pub fn clean_summary(summary: &str) -> String {
	summary.replace("<p>", "").replace("</p>", "").replace("&amp;", "&")
}

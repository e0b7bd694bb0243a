use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MakeshiftError, Result};
use crate::io;

/// Default random seed of a generation pass.
pub const DEFAULT_SEED: u64 = 1100;

/// Half-open window `start..end` of ranked positions for a random pick.
///
/// The end is clamped to the ranked list length when picking.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickWindow {
	pub start: usize,
	pub end: usize,
}

impl PickWindow {
	pub const fn new(start: usize, end: usize) -> Self {
		Self { start, end }
	}
}

/// Input parameters of the text assembler.
///
/// All fixed positions and list sizes the assembler reads are kept here so
/// they can be tuned without touching the assembly logic. Defaults match
/// the stylistic constants the collage was first tuned with.
///
/// Positions are signed: `-1` is the last entry of a ranked list, `-4` the
/// fourth from the end.
///
/// # Invariants
/// - cadences are > 0
/// - pick windows are non-empty (`start < end`)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GenerationInput {
	/// Seed of the random stream.
	pub seed: u64,

	/// A heading is emitted every `heading_every` seed sentences.
	pub heading_every: usize,

	/// The conwell bridge replaces the kleiser bridge every `bridge_every` seed sentences.
	pub bridge_every: usize,

	/// Capacity of the bounded best-of-stream kleiser ranking.
	pub bounded_capacity: usize,

	/// Size of the sorted kleiser ranking.
	pub kleiser_top_k: usize,

	/// Bounded positions listed after the best sorted kleiser match.
	pub bounded_lead_picks: Vec<isize>,

	/// Extra bounded position, read only when the bounded list is long enough.
	pub bounded_extra_pick: isize,

	/// The extra pick is read when the bounded list holds more than this.
	pub bounded_extra_threshold: usize,

	/// Window of the random sorted kleiser pick.
	pub sorted_pick: PickWindow,

	/// Bounded positions closing each paragraph.
	pub bounded_closing_picks: Vec<isize>,

	/// Sorted position of the runner appended to a conwell bridge.
	pub conwell_bridge_next: isize,

	/// Sorted position of the runner appended to a kleiser bridge.
	pub kleiser_bridge_next: isize,

	/// Size of the sorted repub ranking.
	pub repub_top_k: usize,

	/// Size of the sorted conwell ranking.
	pub conwell_top_k: usize,

	/// Window of the first conwell pick.
	pub conwell_early: PickWindow,

	/// Window of the second conwell pick.
	pub conwell_late: PickWindow,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			seed: DEFAULT_SEED,
			heading_every: 4,
			bridge_every: 7,
			bounded_capacity: 20,
			kleiser_top_k: 50,
			bounded_lead_picks: vec![-4, -3, -1],
			bounded_extra_pick: -10,
			bounded_extra_threshold: 12,
			sorted_pick: PickWindow::new(1, 5),
			bounded_closing_picks: vec![1, 2],
			conwell_bridge_next: 0,
			kleiser_bridge_next: 1,
			repub_top_k: 60,
			conwell_top_k: 100,
			conwell_early: PickWindow::new(0, 15),
			conwell_late: PickWindow::new(15, 50),
		}
	}
}

impl GenerationInput {
	/// Reads overrides from a JSON file; missing fields keep their defaults.
	///
	/// # Errors
	/// Returns an error if the file cannot be read, is not valid JSON,
	/// or describes invalid parameters.
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let text = io::read_text(path)?;
		let input: Self = serde_json::from_str(&text)?;
		input.validate()?;
		Ok(input)
	}

	/// Sets the random seed.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = seed;
		self
	}

	/// Checks the invariants of the parameters.
	pub fn validate(&self) -> Result<()> {
		if self.heading_every == 0 || self.bridge_every == 0 {
			return Err(MakeshiftError::Config("heading and bridge cadences must be > 0".to_owned()));
		}
		if self.bounded_capacity == 0 || self.bounded_capacity < self.min_bounded_len() {
			return Err(MakeshiftError::Config(format!(
				"bounded_capacity {} cannot hold the bounded picks (needs {})",
				self.bounded_capacity,
				self.min_bounded_len().max(1)
			)));
		}
		if required_len(self.bounded_extra_pick) > self.bounded_extra_threshold + 1 {
			return Err(MakeshiftError::Config(format!(
				"bounded_extra_pick {} is not covered by bounded_extra_threshold {}",
				self.bounded_extra_pick, self.bounded_extra_threshold
			)));
		}
		if self.kleiser_top_k <= self.sorted_pick.start {
			return Err(MakeshiftError::Config("kleiser_top_k too small for sorted_pick".to_owned()));
		}
		if self.repub_top_k == 0 || self.conwell_top_k < self.min_conwell_len() {
			return Err(MakeshiftError::Config("repub_top_k or conwell_top_k too small for their picks".to_owned()));
		}
		for (name, window) in [
			("sorted_pick", self.sorted_pick),
			("conwell_early", self.conwell_early),
			("conwell_late", self.conwell_late),
		] {
			if window.start >= window.end {
				return Err(MakeshiftError::Config(format!(
					"{name} window {}..{} is empty",
					window.start, window.end
				)));
			}
		}
		Ok(())
	}

	/// Lower bound on the kleiser size for the fixed kleiser reads.
	///
	/// The extra pick is guarded by its threshold and the bridge runners
	/// are skipped when missing, so neither counts.
	pub fn min_kleiser_len(&self) -> usize {
		self.min_bounded_len().max(self.sorted_pick.start + 1)
	}

	/// Minimum bounded list length for the lead and closing picks.
	pub fn min_bounded_len(&self) -> usize {
		self.bounded_lead_picks
			.iter()
			.chain(&self.bounded_closing_picks)
			.map(|&p| required_len(p))
			.max()
			.unwrap_or(0)
	}

	/// Minimum conwell size so that both conwell windows can pick.
	pub fn min_conwell_len(&self) -> usize {
		self.conwell_early.start.max(self.conwell_late.start) + 1
	}

	/// Number of titles needed for `seeds` seed sentences.
	pub fn titles_needed(&self, seeds: usize) -> usize {
		seeds.div_ceil(self.heading_every)
	}
}

/// Length a list needs for `position` to be readable.
pub(crate) fn required_len(position: isize) -> usize {
	if position >= 0 {
		position as usize + 1
	} else {
		position.unsigned_abs()
	}
}

/// Resolves a signed position against a list of `len` entries.
pub(crate) fn resolve_position(position: isize, len: usize) -> Option<usize> {
	if position >= 0 {
		let index = position as usize;
		(index < len).then_some(index)
	} else {
		len.checked_sub(position.unsigned_abs())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_are_valid() {
		let input = GenerationInput::default();
		assert!(input.validate().is_ok());
		assert_eq!(input.seed, DEFAULT_SEED);
		assert_eq!(input.min_kleiser_len(), 4);
		assert_eq!(input.min_conwell_len(), 16);
		assert_eq!(input.titles_needed(8), 2);
		assert_eq!(input.titles_needed(9), 3);
		assert_eq!(input.titles_needed(0), 0);
	}

	#[test]
	fn invalid_windows_are_rejected() {
		let input = GenerationInput {
			conwell_late: PickWindow::new(50, 15),
			..GenerationInput::default()
		};
		assert!(matches!(input.validate(), Err(MakeshiftError::Config(_))));

		let input = GenerationInput { heading_every: 0, ..GenerationInput::default() };
		assert!(input.validate().is_err());
	}

	#[test]
	fn positions_resolve_from_both_ends() {
		assert_eq!(resolve_position(0, 3), Some(0));
		assert_eq!(resolve_position(2, 3), Some(2));
		assert_eq!(resolve_position(3, 3), None);
		assert_eq!(resolve_position(-1, 3), Some(2));
		assert_eq!(resolve_position(-3, 3), Some(0));
		assert_eq!(resolve_position(-4, 3), None);
		assert_eq!(resolve_position(-1, 0), None);
	}

	#[test]
	fn json_overrides_keep_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("input.json");
		std::fs::write(&path, r#"{ "seed": 7, "bounded_lead_picks": [-2] }"#).unwrap();

		let input = GenerationInput::from_json_file(&path).unwrap();
		assert_eq!(input.seed, 7);
		assert_eq!(input.bounded_lead_picks, vec![-2]);
		assert_eq!(input.repub_top_k, 60);
	}

	#[test]
	fn malformed_json_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("input.json");
		std::fs::write(&path, "{ seed: ").unwrap();
		assert!(matches!(GenerationInput::from_json_file(&path), Err(MakeshiftError::Json(_))));
	}
}

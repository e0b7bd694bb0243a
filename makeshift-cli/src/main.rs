use std::path::PathBuf;

use clap::Parser;
use log::info;

use makeshift_core::model::cleaner::clean;
use makeshift_core::model::generation_input::GenerationInput;
use makeshift_core::model::generator::Generator;
use makeshift_core::model::oracle::HashedWordOracle;
use makeshift_core::model::sources::Sources;

/// Generates a collage text from the apprentice, kleiser, repub and conwell sources.
#[derive(Parser, Debug)]
#[command(name = "makeshift", version, about)]
struct Args {
	/// Directory holding the source files
	#[arg(long, default_value = "sources")]
	sources: PathBuf,

	/// Output text file
	#[arg(long, default_value = "makeshift.txt")]
	output: PathBuf,

	/// Random seed (overrides the config file)
	#[arg(long)]
	seed: Option<u64>,

	/// JSON file overriding the generation parameters
	#[arg(long)]
	config: Option<PathBuf>,

	/// Rebuild the conwell corpus instead of reading or writing its cache
	#[arg(long)]
	no_cache: bool,

	/// Dimension of the word vectors
	#[arg(long, default_value_t = 300)]
	dim: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	let mut input = match &args.config {
		Some(path) => GenerationInput::from_json_file(path)?,
		None => GenerationInput::default(),
	};
	if let Some(seed) = args.seed {
		input.seed = seed;
	}

	// The oracle seed is fixed so cached vectors stay comparable across runs.
	let oracle = HashedWordOracle::new(args.dim, 0)?;
	let sources = Sources::load(&args.sources, &oracle, !args.no_cache)?;

	let generator = Generator::new(&sources, &oracle, input)?;
	let text = clean(&generator.generate()?);

	info!("{} words", text.split_whitespace().count());
	makeshift_core::write_text(&args.output, &text)?;
	info!("wrote {}", args.output.display());

	Ok(())
}

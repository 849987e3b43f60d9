use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_markov_core::{CONTROL_PREFIX, Chain, Config, Generator, MarkovError, Query, corpus_from_source};

/// Default corpus: the original speeches dataset.
const DEFAULT_CORPUS: &str = "https://raw.githubusercontent.com/ryanmcdermott/trump-speeches/master/speeches.txt";

/// Interactive Markov text generator
#[derive(Parser)]
#[command(name = "rs-markov-repl")]
#[command(about = "Generate text from a corpus and inspect the Markov chain")]
#[command(version)]
struct Cli {
	/// Corpus file path or http(s) URL
	#[arg(short, long, default_value = DEFAULT_CORPUS)]
	corpus: String,

	/// JSON configuration file
	#[arg(long)]
	config: Option<PathBuf>,

	/// Override the maximum context length
	#[arg(short = 'n', long)]
	max_order: Option<usize>,

	/// Download timeout for remote corpora, in seconds
	#[arg(long, default_value = "30")]
	timeout: u64,

	/// Fixed RNG seed for reproducible sessions
	#[arg(short, long)]
	seed: Option<u64>,
}

/// Loads the configuration and builds the chain from the corpus source.
fn load(cli: &Cli) -> Result<(Chain, Config), MarkovError> {
	let mut config = match &cli.config {
		Some(path) => Config::from_json_file(path)?,
		None => Config::default(),
	};
	if let Some(max_order) = cli.max_order {
		config.chain.max_order = max_order;
	}
	config.validate()?;

	log::info!("loading corpus from {}", cli.corpus);
	let provider = corpus_from_source(&cli.corpus, Duration::from_secs(cli.timeout))?;
	let chain = Chain::from_provider(provider.as_ref(), &config.chain)?;
	Ok((chain, config))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();
	let cli = Cli::parse();

	// Build the chain once; everything below only reads it
	let (chain, config) = load(&cli)?;
	println!("Corpus size: {} words.", chain.corpus_len());
	println!("Chain size: {} distinct word groups.", chain.len());

	let generator = Generator::new(&chain, &config.generation, &config.punctuation);
	let mut rng = match cli.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	println!("{}", generator.generate_with(&mut rng, None)?);

	// Empty line or '::' generates, anything else is looked up as a context
	let stdin = io::stdin();
	let mut stdout = io::stdout();
	for line in stdin.lock().lines() {
		let line = line?;
		match Query::parse(&line, CONTROL_PREFIX) {
			Query::Lookup(context) => match chain.lookup(&context) {
				Some(successors) => writeln!(stdout, "{context:?} -> {:?}", successors.words())?,
				None => writeln!(stdout, "Index not found")?,
			},
			Query::Generate => match generator.generate_with(&mut rng, None) {
				Ok(text) => writeln!(stdout, "{text}")?,
				Err(e) => writeln!(stdout, "Error: {e}")?,
			},
		}
		stdout.flush()?;
	}

	Ok(())
}

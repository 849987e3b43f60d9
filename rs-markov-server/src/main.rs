use std::path::PathBuf;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use rs_markov_core::{Chain, Config, Generator, MarkovError, corpus_from_source};

/// Default corpus: the original speeches dataset.
const DEFAULT_CORPUS: &str = "https://raw.githubusercontent.com/ryanmcdermott/trump-speeches/master/speeches.txt";

/// Read-only HTTP surface over a Markov chain built at startup.
#[derive(Parser)]
#[command(name = "rs-markov-server")]
#[command(about = "Serve Markov-generated text over HTTP")]
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

	/// Address to bind
	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	/// Port to bind
	#[arg(short, long, default_value = "5000")]
	port: u16,
}

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	/// Fixed RNG seed for reproducible output
	seed: Option<u64>,
}

/// Query parameters for the `/v1/lookup` endpoint
#[derive(Deserialize)]
struct LookupParams {
	context: Option<String>,
}

#[derive(Serialize)]
struct Stats {
	corpus_tokens: usize,
	contexts: usize,
	max_order: usize,
}

/// Immutable state shared by every worker.
struct SharedData {
	chain: Chain,
	config: Config,
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates one text from the shared chain on the blocking thread pool.
/// Returns the text as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let seed = query.seed;
	let result = web::block(move || {
		let generator = Generator::new(&data.chain, &data.config.generation, &data.config.punctuation);
		match seed {
			Some(seed) => generator.generate_with(&mut StdRng::seed_from_u64(seed), None),
			None => generator.generate(),
		}
	})
	.await;

	match result {
		Ok(Ok(text)) => HttpResponse::Ok().body(text),
		Ok(Err(e @ MarkovError::GenerationExhausted { .. })) => HttpResponse::ServiceUnavailable().body(e.to_string()),
		Ok(Err(e)) => HttpResponse::InternalServerError().body(e.to_string()),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/lookup?context=the+cat`
///
/// Returns the successor list of an exact context as JSON.
#[get("/v1/lookup")]
async fn get_lookup(data: web::Data<SharedData>, query: web::Query<LookupParams>) -> impl Responder {
	let context: Vec<&str> = match &query.context {
		Some(s) if !s.trim().is_empty() => s.split_whitespace().collect(),
		_ => return HttpResponse::BadRequest().body("Missing or empty context"),
	};

	match data.chain.lookup(&context) {
		Some(successors) => HttpResponse::Ok().json(successors),
		None => HttpResponse::NotFound().body("Index not found"),
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<SharedData>) -> impl Responder {
	HttpResponse::Ok().json(Stats {
		corpus_tokens: data.chain.corpus_len(),
		contexts: data.chain.len(),
		max_order: data.chain.max_order(),
	})
}

/// Loads the configuration and builds the chain before any request is served.
///
/// Runs outside the async runtime: remote corpora use a blocking client.
fn load(cli: &Cli) -> Result<SharedData, MarkovError> {
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
	Ok(SharedData { chain, config })
}

/// Starts the Actix-web server over an already built chain.
///
/// The chain is never mutated after construction, so workers share it
/// without a lock.
async fn serve(shared_data: SharedData, host: String, port: u16) -> std::io::Result<()> {
	let shared_data = web::Data::new(shared_data);

	log::info!("listening on {host}:{port}");
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET"]))
			.app_data(shared_data.clone())
			.service(get_generated)
			.service(get_lookup)
			.service(get_stats)
	})
		.workers(num_cpus::get())
		.bind((host, port))?
		.run()
		.await
}

/// Main entry point for the server.
///
/// Builds the chain, then starts an Actix-web HTTP server.
fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::init();
	let cli = Cli::parse();

	let shared_data = load(&cli)?;
	actix_web::rt::System::new().block_on(serve(shared_data, cli.host, cli.port))?;
	Ok(())
}

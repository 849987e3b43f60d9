use thiserror::Error;

/// Result type alias for chain building and generation.
pub type Result<T> = std::result::Result<T, MarkovError>;

/// Failure of the corpus provider.
///
/// Raised only by `CorpusProvider` implementations and propagated unchanged;
/// the core never retries a fetch.
#[derive(Error, Debug)]
pub enum FetchError {
	/// Local file could not be read
	#[error("failed to read corpus: {0}")]
	Io(#[from] std::io::Error),

	/// Remote corpus could not be downloaded
	#[error("failed to download corpus: {0}")]
	Http(String),
}

/// Errors surfaced by the Markov core.
///
/// Dead ends, odd punctuation counts and pruned contexts are routine during
/// generation and are resolved internally; they never show up here.
#[derive(Error, Debug)]
pub enum MarkovError {
	/// The tokenizer produced no token at all
	#[error("corpus is empty: no tokens to build a chain from")]
	CorpusEmpty,

	/// Generation was attempted on a chain without entries
	#[error("chain has no entries")]
	EmptyChain,

	/// Every allowed restart ran into a dead end or the step cap
	#[error("generation exhausted after {restarts} restarts")]
	GenerationExhausted { restarts: usize },

	/// The caller cancelled the generation
	#[error("generation cancelled")]
	Cancelled,

	/// Configuration rejected by validation or parsing
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	#[error(transparent)]
	Fetch(#[from] FetchError),
}

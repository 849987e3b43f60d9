//! Word-level Markov chain text generation library.
//!
//! This crate models a corpus as a variable-order Markov chain over words
//! and samples sentence-like text from it:
//! - Tokenization of corpus lines with line-start sentinels
//! - Multi-order chain construction with sparsity pruning
//! - Generation using the longest known context, with restart on dead ends
//! - Punctuation-aware post-processing (quote/bracket balancing, sentence ends)
//!
//! The chain is built once and then shared read-only; fetching the corpus
//! is delegated to a `CorpusProvider`.

/// Chain, generator and punctuation helpers.
pub mod model;

/// Configuration of chain building, generation and punctuation tuning.
pub mod config;

/// Error taxonomy and `Result` alias.
pub mod error;

/// Corpus providers (file, HTTP).
pub mod io;

/// Parsing of interactive query lines.
pub mod query;

pub use config::{ChainConfig, Config, GenerationConfig, PunctuationConfig};
pub use error::{FetchError, MarkovError, Result};
pub use io::{CorpusProvider, FileCorpus, corpus_from_source};
pub use model::chain::Chain;
pub use model::generator::{CancelToken, Generator};
pub use query::{CONTROL_PREFIX, Query};

use std::collections::HashMap;

use super::order_table::OrderTable;
use super::successors::Successors;
use super::tokenizer::tokenize;
use crate::config::ChainConfig;
use crate::error::{MarkovError, Result};
use crate::io::CorpusProvider;

/// Variable-order word transition chain.
///
/// Holds contexts of every length from 1 to `max_order` in a single map:
/// `("the",)` and `("the", "cat")` may both be present. Lookups during
/// generation always prefer the longest context available.
///
/// The chain is built once and is read-only afterwards, so a shared
/// reference can be handed to any number of concurrent generations.
///
/// # Invariants
/// - Every context holds at least `context.len() / 2` successors
/// - Keys are never empty
#[derive(Clone, Debug, Default)]
pub struct Chain {
	sentinel: String,
	max_order: usize,
	corpus_len: usize,
	contexts: HashMap<Vec<String>, Successors>,
}

impl Chain {
	/// Builds a chain from an already tokenized corpus.
	///
	/// For each order from 1 to `config.max_order`, every window is recorded,
	/// then the order is pruned before being merged into the chain.
	///
	/// # Errors
	/// - `CorpusEmpty` if `tokens` is empty.
	/// - `InvalidConfig` if `config.max_order` is 0.
	///
	/// # Notes
	/// A corpus shorter than `max_order + 1` tokens is not an error: higher
	/// orders simply contribute no entries.
	pub fn build<S: AsRef<str>>(tokens: &[S], config: &ChainConfig) -> Result<Self> {
		if tokens.is_empty() {
			return Err(MarkovError::CorpusEmpty);
		}
		if config.max_order == 0 {
			return Err(MarkovError::InvalidConfig("max_order must be >= 1".to_owned()));
		}

		let mut chain = Self {
			sentinel: config.sentinel.clone(),
			max_order: 0,
			corpus_len: tokens.len(),
			contexts: HashMap::new(),
		};

		for order in 1..=config.max_order {
			let mut table = OrderTable::new(order)?;
			table.add_tokens(tokens);
			table.prune();
			chain.merge(table);
		}

		Ok(chain)
	}

	/// Tokenizes raw corpus lines and builds the chain.
	///
	/// # Errors
	/// Returns `CorpusEmpty` if the lines hold no word at all.
	pub fn from_lines<S: AsRef<str>>(lines: &[S], config: &ChainConfig) -> Result<Self> {
		let tokens = tokenize(lines, &config.sentinel)?;
		let chain = Self::build(&tokens, config)?;
		log::info!("Corpus size: {} words.", chain.corpus_len);
		log::info!("Chain size: {} distinct word groups.", chain.len());
		Ok(chain)
	}

	/// Fetches the corpus from a provider and builds the chain.
	///
	/// # Errors
	/// Propagates the provider's `FetchError` unchanged (wrapped in `Fetch`).
	pub fn from_provider(provider: &dyn CorpusProvider, config: &ChainConfig) -> Result<Self> {
		let lines = provider.fetch_lines()?;
		Self::from_lines(&lines, config)
	}

	/// Moves the surviving contexts of one order into the chain.
	fn merge(&mut self, table: OrderTable) {
		let order = table.order();
		let contexts = table.into_contexts();
		log::debug!("order {order}: {} contexts kept", contexts.len());
		if !contexts.is_empty() {
			self.max_order = self.max_order.max(order);
		}
		self.contexts.extend(contexts);
	}

	/// Returns the successors of an exact context.
	pub fn lookup<S: AsRef<str>>(&self, context: &[S]) -> Option<&Successors> {
		let key: Vec<String> = context.iter().map(|s| s.as_ref().to_owned()).collect();
		self.contexts.get(&key)
	}

	/// Returns the successors of the longest trailing context of `words`
	/// present in the chain.
	///
	/// Every length from 1 to `max_order` is tried and a longer present
	/// context replaces a shorter one. Returns `None` if no suffix is known.
	pub fn longest_match(&self, words: &[String]) -> Option<&Successors> {
		let mut found = None;
		for i in 1..=self.max_order.min(words.len()) {
			if let Some(successors) = self.contexts.get(&words[words.len() - i..]) {
				found = Some(successors);
			}
		}
		found
	}

	/// Iterates over the contexts of one length.
	pub fn contexts_of_order(&self, order: usize) -> impl Iterator<Item = (&[String], &Successors)> {
		self.contexts
			.iter()
			.filter(move |(context, _)| context.len() == order)
			.map(|(context, successors)| (context.as_slice(), successors))
	}

	/// Iterates over every context of every order.
	pub fn iter(&self) -> impl Iterator<Item = (&[String], &Successors)> {
		self.contexts.iter().map(|(context, successors)| (context.as_slice(), successors))
	}

	/// Number of distinct contexts (all orders).
	pub fn len(&self) -> usize {
		self.contexts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.contexts.is_empty()
	}

	/// Longest context length actually stored.
	pub fn max_order(&self) -> usize {
		self.max_order
	}

	/// Boundary marker the chain was trained with.
	pub fn sentinel(&self) -> &str {
		&self.sentinel
	}

	/// Number of tokens the chain was built from.
	pub fn corpus_len(&self) -> usize {
		self.corpus_len
	}
}

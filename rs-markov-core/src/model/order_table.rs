use std::collections::HashMap;

use super::successors::Successors;
use crate::error::{MarkovError, Result};

/// Transition table for a single context length (`order`).
///
/// Maps every window of `order` consecutive tokens to the tokens observed
/// right after it.
///
/// # Invariants
/// - `order` is always >= 1
/// - Every key holds exactly `order` tokens
/// - After `prune`, every entry holds at least `order / 2` successors
#[derive(Clone, Debug)]
pub(crate) struct OrderTable {
	order: usize,
	contexts: HashMap<Vec<String>, Successors>,
}

impl OrderTable {
	/// Creates an empty table for contexts of length `order`.
	///
	/// # Errors
	/// Returns an error if `order < 1`.
	pub(crate) fn new(order: usize) -> Result<Self> {
		if order < 1 {
			return Err(MarkovError::InvalidConfig("order must be >= 1".to_owned()));
		}
		Ok(Self { order, contexts: HashMap::new() })
	}

	/// Records every window of the token sequence.
	///
	/// Sequences shorter than `order + 1` contribute nothing.
	pub(crate) fn add_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) {
		if tokens.len() <= self.order {
			return;
		}

		for i in 0..tokens.len() - self.order {
			let context: Vec<String> = tokens[i..i + self.order]
				.iter()
				.map(|t| t.as_ref().to_owned())
				.collect();
			self.contexts
				.entry(context)
				.or_default()
				.push(tokens[i + self.order].as_ref());
		}
	}

	/// Removes contexts with too little evidence for their length.
	///
	/// The threshold is `order / 2`, so nothing is removed below order 2.
	pub(crate) fn prune(&mut self) {
		let threshold = self.order / 2;
		self.contexts.retain(|_, successors| successors.len() >= threshold);
	}

	pub(crate) fn order(&self) -> usize {
		self.order
	}

	pub(crate) fn into_contexts(self) -> HashMap<Vec<String>, Successors> {
		self.contexts
	}
}

use rand::Rng;
use rand::seq::IndexedRandom;

use serde::Serialize;

/// Words observed right after one context.
///
/// Conceptually, this is the outgoing edge list of a node in the Markov
/// chain. Frequency is encoded by repetition: a word seen three times after
/// the context is stored three times, so uniform sampling reproduces the
/// empirical distribution.
///
/// ## Invariants
/// - Words are kept in first-seen corpus order
/// - Duplicates are retained
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Successors {
	words: Vec<String>,
}

impl Successors {
	/// Records one more observation of `word` after the context.
	pub fn push(&mut self, word: &str) {
		self.words.push(word.to_owned());
	}

	/// Number of recorded observations (duplicates included).
	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Returns all observations in first-seen order.
	pub fn words(&self) -> &[String] {
		&self.words
	}

	/// Picks one observation uniformly at random.
	///
	/// Returns `None` if nothing was recorded.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.words.choose(rng).map(String::as_str)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn duplicates_are_kept_in_order() {
		let mut successors = Successors::default();
		for word in ["b", "b", "c"] {
			successors.push(word);
		}
		assert_eq!(successors.words(), ["b", "b", "c"]);
		assert_eq!(successors.len(), 3);
	}

	#[test]
	fn sampling_follows_frequency() {
		let mut successors = Successors::default();
		for word in ["x", "x", "x", "y"] {
			successors.push(word);
		}
		let mut rng = StdRng::seed_from_u64(7);
		let xs = (0..4000).filter(|_| successors.sample(&mut rng) == Some("x")).count();
		// Expected 3000
		assert!((2700..3300).contains(&xs), "x sampled {xs} times");
	}

	#[test]
	fn empty_samples_nothing() {
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(Successors::default().sample(&mut rng), None);
	}
}

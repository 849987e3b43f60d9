use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;

use super::chain::Chain;
use super::pair_balancer::{PairBalancer, PairCounts};
use super::punctuation::PunctuationClassifier;
use crate::config::{GenerationConfig, PunctuationConfig};
use crate::error::{MarkovError, Result};

/// Cooperative cancellation flag shared with a running generation.
///
/// Cloning shares the flag; the generator checks it once per step.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
	pub fn new() -> Self {
		Self::default()
	}

	/// Requests cancellation of every generation holding this token.
	pub fn cancel(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// Lifecycle of one generation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
	/// Text holds the sentinel only
	Seeded,
	/// At least one word was appended
	Extending,
	/// Terminal, the text is ready to be cleaned
	Done,
}

/// Text accumulated by one attempt.
///
/// `words` is what chain lookups use. The counters are kept up to date by
/// `append` so no step has to rescan `text`.
struct GenerationState {
	text: String,
	words: Vec<String>,
	phase: Phase,
	steps: usize,
	chars: usize,
	sentinels: usize,
	pairs: PairCounts,
}

impl GenerationState {
	fn seeded(sentinel: &str, balancer: &PairBalancer) -> Self {
		Self {
			text: sentinel.to_owned(),
			words: vec![sentinel.to_owned()],
			phase: Phase::Seeded,
			steps: 0,
			chars: sentinel.chars().count(),
			sentinels: 1,
			pairs: balancer.counts(sentinel),
		}
	}

	/// Appends `word` to the text and moves the lookup context to `context`.
	///
	/// An empty `word` leaves the text untouched.
	fn append(&mut self, word: &str, context: &str, sentinel: &str, balancer: &PairBalancer) {
		if !word.is_empty() {
			self.text.push(' ');
			self.text.push_str(word);
			self.chars += 1 + word.chars().count();
			self.sentinels += word.matches(sentinel).count();
			balancer.tally(&mut self.pairs, word);
		}
		self.words.push(context.to_owned());
		self.phase = Phase::Extending;
		self.steps += 1;
	}
}

/// Outcome of a single generation step.
enum Step {
	Continue,
	DeadEnd,
	StepCap,
	Done,
}

/// Walks a `Chain` to produce sentence-like text.
///
/// # Responsibilities
/// - Sample the successor of the longest known trailing context
/// - Keep paired punctuation balanced as words are appended
/// - Stop on a second line start, or on a sentence end once the text is long enough
/// - Restart from scratch on a dead end or when an attempt runs too long
///
/// The generator only borrows the chain, so several generators may run
/// concurrently over the same chain.
#[derive(Debug)]
pub struct Generator<'c> {
	chain: &'c Chain,
	classifier: PunctuationClassifier,
	balancer: PairBalancer,
	config: GenerationConfig,
}

impl<'c> Generator<'c> {
	/// Creates a generator over `chain` with the given caps and punctuation sets.
	pub fn new(chain: &'c Chain, generation: &GenerationConfig, punctuation: &PunctuationConfig) -> Self {
		Self {
			chain,
			classifier: PunctuationClassifier::new(punctuation),
			balancer: PairBalancer::new(punctuation),
			config: generation.clone(),
		}
	}

	/// Generates one text with the thread-local RNG.
	///
	/// # Errors
	/// See `generate_with`.
	pub fn generate(&self) -> Result<String> {
		self.generate_with(&mut rand::rng(), None)
	}

	/// Generates one text with the given RNG, checking `cancel` before each step.
	///
	/// # Errors
	/// - `EmptyChain` if the chain has no entries.
	/// - `GenerationExhausted` once `max_restarts` restarts were used, or
	///   right away if the chain does not know the sentinel at all.
	/// - `Cancelled` if the token is cancelled.
	pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, cancel: Option<&CancelToken>) -> Result<String> {
		if self.chain.is_empty() {
			return Err(MarkovError::EmptyChain);
		}

		let sentinel = self.chain.sentinel();
		let mut restarts = 0;
		let mut state = GenerationState::seeded(sentinel, &self.balancer);

		loop {
			if cancel.is_some_and(CancelToken::is_cancelled) {
				log::warn!("generation cancelled after {restarts} restarts");
				return Err(MarkovError::Cancelled);
			}

			match self.step(&mut state, rng) {
				Step::Continue => continue,
				Step::Done => return Ok(self.finish(&state.text)),
				Step::DeadEnd if state.phase == Phase::Seeded => {
					log::warn!("sentinel {sentinel:?} has no successor in the chain");
					return Err(MarkovError::GenerationExhausted { restarts });
				}
				Step::DeadEnd => log::debug!("dead end after {} words, restarting", state.steps),
				Step::StepCap => log::debug!("no termination after {} words, restarting", state.steps),
			}

			if restarts >= self.config.max_restarts {
				log::warn!("generation exhausted after {restarts} restarts");
				return Err(MarkovError::GenerationExhausted { restarts });
			}
			restarts += 1;
			state = GenerationState::seeded(sentinel, &self.balancer);
		}
	}

	/// Appends one word to `state`, or reports why the attempt cannot go on.
	fn step<R: Rng + ?Sized>(&self, state: &mut GenerationState, rng: &mut R) -> Step {
		if state.steps >= self.config.max_steps {
			return Step::StepCap;
		}

		let Some(sampled) = self.chain.longest_match(&state.words).and_then(|s| s.sample(rng)) else {
			return Step::DeadEnd;
		};

		let sentinel = self.chain.sentinel();
		let word = if sampled == sentinel {
			sampled.to_owned()
		} else {
			self.balancer.strip_counted(&state.pairs, sampled)
		};
		// A stray glyph stripped to nothing still moves the context forward
		let context = if word.is_empty() { sampled } else { word.as_str() };
		state.append(&word, context, sentinel, &self.balancer);

		let looped = state.sentinels > 1;
		let long_enough = state.chars > self.config.min_length && self.classifier.ends_sentence(&word);
		if looped || long_enough {
			state.phase = Phase::Done;
			return Step::Done;
		}
		Step::Continue
	}

	/// Removes every sentinel and closes dangling quotes.
	fn finish(&self, text: &str) -> String {
		let sentinel = self.chain.sentinel();
		let cleaned = text.replace(&format!("{sentinel} "), "").replace(sentinel, "");
		self.balancer.close(cleaned.trim())
	}
}

//! Word-level Markov chain and text generation.
//!
//! - Corpus tokenization (`tokenizer`)
//! - Variable-order transition chain (`Chain`)
//! - Sentence-end detection (`PunctuationClassifier`)
//! - Paired punctuation repair (`PairBalancer`)
//! - The generation loop (`Generator`)

/// Splits corpus lines into word tokens with line-start sentinels.
pub mod tokenizer;

/// Multi-order transition chain built once from the corpus.
///
/// Supports building from tokens, lines or a corpus provider, exact
/// lookups and longest-context lookups.
pub mod chain;

/// Transition table of a single order, built then pruned before being
/// merged into the chain.
/// This module is not exposed publicly.
mod order_table;

/// Ordered successor list of one context, sampled uniformly.
pub mod successors;

/// Sentence-end classification with honorific and abbreviation exceptions.
pub mod punctuation;

/// Quote and bracket balancing of generated text.
pub mod pair_balancer;

/// Generation loop with restart, step caps and cooperative cancellation.
pub mod generator;

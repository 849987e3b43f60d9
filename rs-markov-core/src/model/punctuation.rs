use std::collections::HashSet;

use crate::config::PunctuationConfig;

/// Closing quote/bracket glyphs ignored at the end of a word.
const TRAILING_CLOSERS: &[char] = &['"', '\'', ')', ']', '}'];

/// Symbols that never end a sentence when repeated (`..`, `,,`).
const REPEATED_SYMBOLS: &[&str] = &["..", ",,"];

/// Decides whether a word plausibly ends a sentence.
///
/// Honorifics (`Dr.`) and abbreviations (`etc.`) are excepted, as are words
/// carrying ellipses or other repeated symbols.
#[derive(Clone, Debug)]
pub struct PunctuationClassifier {
	exceptions: HashSet<String>,
}

impl Default for PunctuationClassifier {
	fn default() -> Self {
		Self::new(&PunctuationConfig::default())
	}
}

impl PunctuationClassifier {
	/// Builds a classifier from the configured honorific and abbreviation lists.
	///
	/// Entries are compared lowercased.
	pub fn new(config: &PunctuationConfig) -> Self {
		let exceptions = config
			.honorifics
			.iter()
			.chain(&config.abbreviations)
			.map(|word| word.to_lowercase())
			.collect();
		Self { exceptions }
	}

	/// Returns `true` if `word` ends a sentence.
	///
	/// The word is trimmed, stripped of trailing closing quotes and brackets,
	/// and lowercased before any check.
	pub fn ends_sentence(&self, word: &str) -> bool {
		let word = word.trim().trim_end_matches(TRAILING_CLOSERS).to_lowercase();

		if self.exceptions.contains(&word) {
			return false;
		}

		if REPEATED_SYMBOLS.iter().any(|symbol| word.contains(symbol)) {
			return false;
		}

		word.ends_with(['.', '!', '?'])
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{ABBREVIATIONS, HONORIFICS};

	#[test]
	fn plain_sentence_ends() {
		let classifier = PunctuationClassifier::default();
		assert!(classifier.ends_sentence("ended."));
		assert!(classifier.ends_sentence("Really?"));
		assert!(classifier.ends_sentence("wow!"));
		assert!(!classifier.ends_sentence("ended"));
		assert!(!classifier.ends_sentence("ended,"));
	}

	#[test]
	fn closing_quotes_and_brackets_are_ignored() {
		let classifier = PunctuationClassifier::default();
		assert!(classifier.ends_sentence("\"Done!\""));
		assert!(classifier.ends_sentence("(really.)"));
		assert!(classifier.ends_sentence("it.')]}"));
		assert!(!classifier.ends_sentence("Dr.)\""));
	}

	#[test]
	fn every_exception_is_excepted() {
		let classifier = PunctuationClassifier::default();
		for word in HONORIFICS.iter().chain(ABBREVIATIONS) {
			assert!(!classifier.ends_sentence(word), "{word} should not end a sentence");
			assert!(!classifier.ends_sentence(&word.to_uppercase()), "{word} uppercased");
		}
		assert!(!classifier.ends_sentence("Dr."));
		assert!(!classifier.ends_sentence("  Mrs.  "));
	}

	#[test]
	fn repeated_symbols_do_not_end() {
		let classifier = PunctuationClassifier::default();
		assert!(!classifier.ends_sentence("wait..."));
		assert!(!classifier.ends_sentence("so..."));
		assert!(!classifier.ends_sentence("what,,!"));
		assert!(!classifier.ends_sentence("hmm..?"));
	}

	#[test]
	fn configured_exceptions_replace_defaults() {
		let config = PunctuationConfig {
			honorifics: vec!["Sgt.".to_owned()],
			abbreviations: vec![],
			..PunctuationConfig::default()
		};
		let classifier = PunctuationClassifier::new(&config);
		assert!(!classifier.ends_sentence("sgt."));
		assert!(classifier.ends_sentence("Dr."));
	}
}

use crate::config::PunctuationConfig;

/// Keeps paired punctuation (quotes, brackets, emphasis markers) balanced
/// while words are appended to a generated text.
///
/// Two kinds of pairs are tracked:
/// - symmetric symbols, whose opening and closing glyphs are identical (`"`, `**`)
/// - asymmetric pairs, with distinct glyphs (`(` / `)`)
///
/// ## Responsibilities
/// - Strip a stray glyph from a candidate word before it is appended (`strip`)
/// - Close dangling symmetric symbols once generation ends (`close`)
///
/// Brackets are never closed at the end, only quotes and other symmetric
/// symbols are.
#[derive(Clone, Debug)]
pub struct PairBalancer {
	symmetric: Vec<String>,
	asymmetric: Vec<(String, String)>,
}

/// Running symbol counts of a text, in the balancer's symbol order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairCounts {
	symmetric: Vec<usize>,
	asymmetric: Vec<(usize, usize)>,
}

impl Default for PairBalancer {
	fn default() -> Self {
		Self::new(&PunctuationConfig::default())
	}
}

impl PairBalancer {
	/// Creates a balancer from the configured symbol sets.
	///
	/// Order matters: a symbol that contains another one (`**` and `*`) must
	/// be listed first.
	pub fn new(config: &PunctuationConfig) -> Self {
		Self {
			symmetric: config.symmetric.clone(),
			asymmetric: config.asymmetric.clone(),
		}
	}

	/// Sanitizes `candidate` before it is appended to `text`.
	///
	/// Counts are taken on `text + " " + candidate`:
	/// - symmetric symbol with an odd count: its first occurrence in the
	///   candidate that directly follows a letter, digit or `.?!` is removed
	/// - more than one unmatched opening glyph: the first opening glyph that
	///   follows a letter, digit or `.?!` is removed
	/// - more closing than opening glyphs: the first closing glyph is removed
	///
	/// At most one occurrence per symbol is removed and no other character
	/// of the candidate is touched. The result is empty when the candidate
	/// was a single stray glyph.
	pub fn strip(&self, text: &str, candidate: &str) -> String {
		self.strip_counted(&self.counts(text), candidate)
	}

	/// Same as `strip`, with the counts of `text` already tallied.
	///
	/// Symbols never contain whitespace, so the counts of a space-joined text
	/// are the sum of the counts of its words.
	pub fn strip_counted(&self, counts: &PairCounts, candidate: &str) -> String {
		let mut word = candidate.to_owned();

		for (symbol, &seen) in self.symmetric.iter().zip(&counts.symmetric) {
			if (seen + count(candidate, symbol)) % 2 != 0 {
				if let Some(index) = find_after_text(&word, symbol) {
					remove_at(&mut word, index, symbol);
				}
			}
		}

		for ((open, close), &(seen_opens, seen_closes)) in self.asymmetric.iter().zip(&counts.asymmetric) {
			let opens = seen_opens + count(candidate, open);
			let closes = seen_closes + count(candidate, close);

			if opens > closes + 1 {
				if let Some(index) = find_after_text(&word, open) {
					remove_at(&mut word, index, open);
				}
			} else if closes > opens {
				if let Some(index) = word.find(close.as_str()) {
					remove_at(&mut word, index, close);
				}
			}
		}

		word
	}

	/// Tallies every tracked symbol in `text`.
	pub fn counts(&self, text: &str) -> PairCounts {
		let mut counts = PairCounts {
			symmetric: vec![0; self.symmetric.len()],
			asymmetric: vec![(0, 0); self.asymmetric.len()],
		};
		self.tally(&mut counts, text);
		counts
	}

	/// Adds the symbols of `word` to `counts`.
	pub fn tally(&self, counts: &mut PairCounts, word: &str) {
		for (symbol, seen) in self.symmetric.iter().zip(&mut counts.symmetric) {
			*seen += count(word, symbol);
		}
		for ((open, close), (opens, closes)) in self.asymmetric.iter().zip(&mut counts.asymmetric) {
			*opens += count(word, open);
			*closes += count(word, close);
		}
	}

	/// Appends the closing glyph of every symmetric symbol left open in `text`.
	///
	/// Counts are re-evaluated after each append, so closing `**` also
	/// balances the `*` it contains.
	pub fn close(&self, text: &str) -> String {
		let mut closed = text.to_owned();
		for symbol in &self.symmetric {
			if count(&closed, symbol) % 2 != 0 {
				closed.push_str(symbol);
			}
		}
		closed
	}
}

/// Non-overlapping occurrences of `symbol` in `text`.
fn count(text: &str, symbol: &str) -> usize {
	text.matches(symbol).count()
}

/// Byte offset of the first `glyph` directly preceded by a letter, a digit
/// or one of `.?!`.
fn find_after_text(word: &str, glyph: &str) -> Option<usize> {
	word.match_indices(glyph)
		.map(|(index, _)| index)
		.find(|&index| {
			word[..index]
				.chars()
				.next_back()
				.is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '?' | '!'))
		})
}

fn remove_at(word: &mut String, index: usize, glyph: &str) {
	word.replace_range(index..index + glyph.len(), "");
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn stray_closing_quote_is_removed() {
		let balancer = PairBalancer::default();
		assert_eq!(balancer.strip("Line:: he said", "hello\""), "hello");
		assert_eq!(balancer.strip("Line:: he said", "hello.\""), "hello.");
	}

	#[test]
	fn opening_quote_is_kept() {
		let balancer = PairBalancer::default();
		assert_eq!(balancer.strip("Line:: he said", "\"hello"), "\"hello");
	}

	#[test]
	fn matching_quote_is_kept() {
		let balancer = PairBalancer::default();
		assert_eq!(balancer.strip("Line:: \"he said", "hi.\""), "hi.\"");
	}

	#[test]
	fn balanced_candidate_is_untouched() {
		let balancer = PairBalancer::default();
		for candidate in ["plain", "(fine)", "\"quoted\"", "**bold**", "it's'"] {
			assert_eq!(balancer.strip("Line:: some text", candidate), candidate);
		}
	}

	#[test]
	fn only_one_occurrence_is_removed() {
		let balancer = PairBalancer::default();
		assert_eq!(balancer.strip("Line:: x", "a\"b\"c\""), "ab\"c\"");
	}

	#[test]
	fn double_asterisk_is_handled_before_single() {
		let balancer = PairBalancer::default();
		// `**` count is odd while the `*` count is even.
		assert_eq!(balancer.strip("Line:: some", "bold**"), "bold");
	}

	#[test]
	fn colon_is_a_symmetric_symbol() {
		let balancer = PairBalancer::default();
		assert_eq!(balancer.strip("Line::", "Note:"), "Note");
		assert_eq!(balancer.strip("Line:: Note:", "this:"), "this:");
	}

	#[test]
	fn excess_opening_bracket_is_removed() {
		let balancer = PairBalancer::default();
		assert_eq!(balancer.strip("Line:: ((a", "b(c"), "bc");
		// A single unmatched opening bracket is allowed.
		assert_eq!(balancer.strip("Line:: a", "c(d"), "c(d");
		// Opening glyph at the start of the word is never removed.
		assert_eq!(balancer.strip("Line:: ((a", "(c"), "(c");
	}

	#[test]
	fn excess_closing_bracket_is_removed() {
		let balancer = PairBalancer::default();
		assert_eq!(balancer.strip("Line:: a", "b)"), "b");
		assert_eq!(balancer.strip("Line:: a", "]b]"), "b]");
		assert_eq!(balancer.strip("Line:: (a", "b)"), "b)");
	}

	#[test]
	fn angle_paren_pair() {
		let balancer = PairBalancer::default();
		assert_eq!(balancer.strip("Line:: a", "smile>)"), "smile");
	}

	#[test]
	fn close_balances_symmetric_symbols() {
		let balancer = PairBalancer::default();
		assert_eq!(balancer.close("\"he said hi"), "\"he said hi\"");
		assert_eq!(balancer.close("\"he\" said hi"), "\"he\" said hi");
		assert_eq!(balancer.close("**very bold"), "**very bold**");
	}

	#[test]
	fn lone_closing_bracket_is_emptied() {
		let balancer = PairBalancer::default();
		assert_eq!(balancer.strip("Line:: we won", ")"), "");
	}

	#[test]
	fn tally_matches_recount() {
		let balancer = PairBalancer::default();
		let mut counts = balancer.counts("Line::");
		for word in ["\"he", "(said", "**so**", "x:"] {
			balancer.tally(&mut counts, word);
		}
		assert_eq!(counts, balancer.counts("Line:: \"he (said **so** x:"));
	}

	#[test]
	fn close_leaves_brackets_open() {
		let balancer = PairBalancer::default();
		assert_eq!(balancer.close("(a [b {c"), "(a [b {c");
	}

	proptest! {
		#[test]
		fn strip_only_removes_paired_glyphs(
			text in "[a-z \"'()*:\\[\\]]{0,40}",
			candidate in "[a-z.!?\"'()*:\\[\\]{}<>`_~]{0,12}",
		) {
			let balancer = PairBalancer::default();
			let stripped = balancer.strip(&text, &candidate);

			// Output is the candidate minus some punctuation characters.
			let mut rest = candidate.chars();
			for c in stripped.chars() {
				loop {
					let next = rest.next();
					prop_assert!(next.is_some(), "{stripped:?} is not a subsequence of {candidate:?}");
					let next = next.unwrap_or_default();
					if next == c {
						break;
					}
					prop_assert!(!next.is_ascii_alphanumeric(), "removed {next:?} from {candidate:?}");
				}
			}
			prop_assert!(rest.all(|c| !c.is_ascii_alphanumeric()));
		}

		#[test]
		fn plain_words_are_never_stripped(
			text in "[a-z \"'()*:]{0,40}",
			candidate in "[a-z]{1,12}",
		) {
			let balancer = PairBalancer::default();
			prop_assert_eq!(balancer.strip(&text, &candidate), candidate);
		}

		#[test]
		fn running_counts_strip_like_a_recount(
			words in prop::collection::vec("[a-z\"'()*:\\[\\]]{1,6}", 0..12),
			candidate in "[a-z.!?\"'()*:\\[\\]{}<>`_~]{0,12}",
		) {
			let balancer = PairBalancer::default();
			let mut counts = balancer.counts("Line::");
			let mut text = "Line::".to_owned();
			for word in &words {
				balancer.tally(&mut counts, word);
				text.push(' ');
				text.push_str(word);
			}
			prop_assert_eq!(balancer.strip_counted(&counts, &candidate), balancer.strip(&text, &candidate));
		}
	}
}

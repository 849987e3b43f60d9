use crate::error::{MarkovError, Result};

/// Turns raw corpus lines into one flat sequence of word tokens.
///
/// Every non-blank line contributes the `sentinel` followed by its
/// whitespace-separated words. Blank lines contribute nothing. Tokens keep
/// their attached punctuation and case.
///
/// # Errors
/// Returns `CorpusEmpty` if no token is produced.
pub fn tokenize<'a, S>(lines: &'a [S], sentinel: &'a str) -> Result<Vec<&'a str>>
where
	S: AsRef<str>,
{
	let mut tokens = Vec::new();
	for line in lines {
		let line = line.as_ref();
		if line.trim().is_empty() {
			continue;
		}
		tokens.push(sentinel);
		tokens.extend(line.split_whitespace());
	}

	if tokens.is_empty() {
		return Err(MarkovError::CorpusEmpty);
	}
	Ok(tokens)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sentinel_starts_every_line() {
		let lines = ["the cat sat.", "  the dog\tran. "];
		let tokens = tokenize(&lines, "Line::").unwrap();
		assert_eq!(
			tokens,
			vec!["Line::", "the", "cat", "sat.", "Line::", "the", "dog", "ran."]
		);
	}

	#[test]
	fn blank_lines_are_skipped() {
		let lines = vec!["".to_owned(), "   ".to_owned(), "hi".to_owned(), "\t".to_owned()];
		let tokens = tokenize(&lines, "Line::").unwrap();
		assert_eq!(tokens, vec!["Line::", "hi"]);
	}

	#[test]
	fn only_blank_lines_is_corpus_empty() {
		let lines = ["", "  ", "\t\t"];
		assert!(matches!(tokenize(&lines, "Line::"), Err(MarkovError::CorpusEmpty)));
		let none: [&str; 0] = [];
		assert!(matches!(tokenize(&none, "Line::"), Err(MarkovError::CorpusEmpty)));
	}

	#[test]
	fn punctuation_and_case_are_kept() {
		let lines = ["\"Hello,\" SAID (Dr. Who)"];
		let tokens = tokenize(&lines, "<s>").unwrap();
		assert_eq!(tokens, vec!["<s>", "\"Hello,\"", "SAID", "(Dr.", "Who)"]);
	}
}

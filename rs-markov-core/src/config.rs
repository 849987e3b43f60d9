use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MarkovError, Result};

/// Titles that end with a period without ending the sentence.
pub const HONORIFICS: &[&str] = &[
	"mr.", "ms.", "mrs.", "mx.", "dr.", "prof.", "capt.", "gen.", "gov.",
	"sen.", "st.", "rev.", "hon.", "jr.", "sr.", "ph.d.", "phd.", "m.d.",
	"b.a.", "m.a.", "d.d.s.",
];

/// Common abbreviations that end with a period without ending the sentence.
pub const ABBREVIATIONS: &[&str] = &[
	"etc.", "a.m.", "p.m.", "vol.", "inc.", "co.", "corp.", "ltd.", "www.", "...",
];

/// Paired symbols whose opening and closing glyphs are identical.
///
/// Symbols containing another symbol come first so that `**` is handled
/// before `*`.
pub const SYMMETRIC_PAIRS: &[&str] = &["\"", "'", "\\*", "**", "*", "`", "~~", "__", ":"];

/// Paired symbols with distinct opening and closing glyphs.
pub const ASYMMETRIC_PAIRS: &[(&str, &str)] = &[("(<", ">)"), ("(", ")"), ("[", "]"), ("{", "}")];

/// Complete configuration of the Markov text generator.
///
/// Every field has a default, so a JSON file only needs to list what it
/// overrides.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
	pub chain: ChainConfig,
	pub generation: GenerationConfig,
	pub punctuation: PunctuationConfig,
}

/// Parameters of the chain construction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ChainConfig {
	/// Marker injected at the start of every corpus line and generation attempt.
	pub sentinel: String,
	/// Longest context length stored in the chain.
	pub max_order: usize,
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self { sentinel: "Line::".to_owned(), max_order: 3 }
	}
}

/// Bounds of the generation loop.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
	/// Text length (in characters) after which a sentence end stops generation.
	pub min_length: usize,
	/// Number of full restarts allowed before giving up.
	pub max_restarts: usize,
	/// Number of words one attempt may append before it is restarted.
	pub max_steps: usize,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self { min_length: 200, max_restarts: 1000, max_steps: 2000 }
	}
}

/// Corpus-specific punctuation tuning.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PunctuationConfig {
	pub honorifics: Vec<String>,
	pub abbreviations: Vec<String>,
	pub symmetric: Vec<String>,
	pub asymmetric: Vec<(String, String)>,
}

impl Default for PunctuationConfig {
	fn default() -> Self {
		let owned = |list: &[&str]| list.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>();
		Self {
			honorifics: owned(HONORIFICS),
			abbreviations: owned(ABBREVIATIONS),
			symmetric: owned(SYMMETRIC_PAIRS),
			asymmetric: ASYMMETRIC_PAIRS
				.iter()
				.map(|(open, close)| ((*open).to_owned(), (*close).to_owned()))
				.collect(),
		}
	}
}

impl Config {
	/// Loads a configuration from a JSON file and validates it.
	///
	/// # Errors
	/// - `Fetch` if the file cannot be read.
	/// - `InvalidConfig` if the JSON is malformed or fails validation.
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let contents = std::fs::read_to_string(path).map_err(crate::error::FetchError::from)?;
		Self::from_json_str(&contents)
	}

	/// Parses and validates a configuration from a JSON string.
	pub fn from_json_str(contents: &str) -> Result<Self> {
		let config: Config = serde_json::from_str(contents)
			.map_err(|e| MarkovError::InvalidConfig(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	/// Checks the invariants the builder and the generator rely on.
	pub fn validate(&self) -> Result<()> {
		if self.chain.max_order == 0 {
			return Err(MarkovError::InvalidConfig("max_order must be >= 1".to_owned()));
		}
		if self.chain.sentinel.is_empty() || self.chain.sentinel.chars().any(char::is_whitespace) {
			return Err(MarkovError::InvalidConfig(
				"sentinel must be a non-empty word without whitespace".to_owned(),
			));
		}
		if self.generation.max_steps == 0 {
			return Err(MarkovError::InvalidConfig("max_steps must be >= 1".to_owned()));
		}
		let bad_symbol = |s: &String| s.is_empty() || s.chars().any(char::is_whitespace);
		if self.punctuation.symmetric.iter().any(bad_symbol)
			|| self.punctuation.asymmetric.iter().any(|(o, c)| bad_symbol(o) || bad_symbol(c))
		{
			return Err(MarkovError::InvalidConfig(
				"paired symbols must be non-empty and without whitespace".to_owned(),
			));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let config = Config::from_json_str(r#"{ "chain": { "max_order": 2 } }"#).unwrap();
		assert_eq!(config.chain.max_order, 2);
		assert_eq!(config.chain.sentinel, "Line::");
		assert_eq!(config.generation, GenerationConfig::default());
		assert!(config.punctuation.honorifics.contains(&"dr.".to_owned()));
	}

	#[test]
	fn zero_order_is_rejected() {
		let err = Config::from_json_str(r#"{ "chain": { "max_order": 0 } }"#).unwrap_err();
		assert!(matches!(err, MarkovError::InvalidConfig(_)));
	}

	#[test]
	fn sentinel_with_space_is_rejected() {
		let mut config = Config::default();
		config.chain.sentinel = "Line ::".to_owned();
		assert!(config.validate().is_err());
	}

	#[test]
	fn paired_symbol_with_space_is_rejected() {
		let mut config = Config::default();
		config.punctuation.asymmetric.push(("<<".to_owned(), "> >".to_owned()));
		assert!(matches!(config.validate(), Err(MarkovError::InvalidConfig(_))));
	}

	#[test]
	fn malformed_json_is_invalid_config() {
		assert!(matches!(Config::from_json_str("{ nope"), Err(MarkovError::InvalidConfig(_))));
	}

	#[test]
	fn reads_config_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.json");
		std::fs::write(&path, r#"{ "generation": { "min_length": 50 } }"#).unwrap();
		let config = Config::from_json_file(&path).unwrap();
		assert_eq!(config.generation.min_length, 50);
		assert_eq!(config.generation.max_restarts, 1000);
	}
}

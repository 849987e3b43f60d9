use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::FetchError;

/// Source of raw corpus lines.
///
/// The core only consumes the returned lines; where they come from
/// (file, network, memory) is up to the implementation.
pub trait CorpusProvider {
	/// Returns the corpus as an ordered sequence of lines.
	///
	/// # Errors
	/// Returns a `FetchError` if the underlying source cannot be read.
	fn fetch_lines(&self) -> Result<Vec<String>, FetchError>;
}

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> std::io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(split_lines(&contents))
}

fn split_lines(contents: &str) -> Vec<String> {
	contents.lines().map(str::to_owned).collect()
}

/// Corpus stored in a local text file.
#[derive(Debug, Clone)]
pub struct FileCorpus {
	path: PathBuf,
}

impl FileCorpus {
	pub fn new<P: AsRef<Path>>(path: P) -> Self {
		Self { path: path.as_ref().to_path_buf() }
	}
}

impl CorpusProvider for FileCorpus {
	fn fetch_lines(&self) -> Result<Vec<String>, FetchError> {
		log::debug!("reading corpus from {}", self.path.display());
		Ok(read_file(&self.path)?)
	}
}

/// Corpus downloaded over HTTP(S) with a blocking client.
///
/// Must not be used from inside an async runtime.
#[cfg(feature = "remote")]
#[derive(Debug, Clone)]
pub struct HttpCorpus {
	url: String,
	timeout: Duration,
}

#[cfg(feature = "remote")]
impl HttpCorpus {
	/// Downloads `url`, giving up after `timeout`.
	pub fn new(url: &str, timeout: Duration) -> Self {
		Self { url: url.to_owned(), timeout }
	}
}

#[cfg(feature = "remote")]
impl CorpusProvider for HttpCorpus {
	fn fetch_lines(&self) -> Result<Vec<String>, FetchError> {
		log::debug!("downloading corpus from {}", self.url);
		let http_error = |e: reqwest::Error| FetchError::Http(e.to_string());
		let client = reqwest::blocking::Client::builder()
			.timeout(self.timeout)
			.build()
			.map_err(http_error)?;
		let body = client
			.get(&self.url)
			.send()
			.and_then(|response| response.error_for_status())
			.and_then(|response| response.text())
			.map_err(http_error)?;
		Ok(split_lines(&body))
	}
}

/// Returns `true` if `source` looks like an HTTP(S) URL.
pub fn is_remote(source: &str) -> bool {
	source.starts_with("http://") || source.starts_with("https://")
}

/// Picks a provider for a source given on the command line.
///
/// URLs are downloaded (feature `remote`) with the given `timeout`, anything
/// else is read as a file.
///
/// # Errors
/// Returns `FetchError::Http` for a URL when the `remote` feature is disabled.
#[cfg_attr(not(feature = "remote"), allow(unused_variables))]
pub fn corpus_from_source(source: &str, timeout: Duration) -> Result<Box<dyn CorpusProvider>, FetchError> {
	if is_remote(source) {
		#[cfg(feature = "remote")]
		{
			return Ok(Box::new(HttpCorpus::new(source, timeout)));
		}
		#[cfg(not(feature = "remote"))]
		{
			return Err(FetchError::Http(format!("remote corpora are disabled: {source}")));
		}
	}
	Ok(Box::new(FileCorpus::new(source)))
}

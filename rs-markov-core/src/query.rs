/// Prefix that turns an interactive line into a generation request.
pub const CONTROL_PREFIX: &str = "::";

/// One request typed on the interactive query surface.
#[derive(Debug, PartialEq, Eq)]
pub enum Query<'a> {
	/// Show the successors of this exact context
	Lookup(Vec<&'a str>),
	/// Generate a new text
	Generate,
}

impl<'a> Query<'a> {
	/// Interprets one line of user input.
	///
	/// A blank line, or a line starting with `control_prefix`, asks for a
	/// generation. Anything else is split on whitespace into a context.
	pub fn parse(line: &'a str, control_prefix: &str) -> Self {
		if line.trim().is_empty() || line.starts_with(control_prefix) {
			return Query::Generate;
		}
		Query::Lookup(line.split_whitespace().collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blank_and_control_lines_generate() {
		assert_eq!(Query::parse("", CONTROL_PREFIX), Query::Generate);
		assert_eq!(Query::parse("   ", CONTROL_PREFIX), Query::Generate);
		assert_eq!(Query::parse("::", CONTROL_PREFIX), Query::Generate);
		assert_eq!(Query::parse("::again please", CONTROL_PREFIX), Query::Generate);
	}

	#[test]
	fn other_lines_are_lookups() {
		assert_eq!(Query::parse("the cat", CONTROL_PREFIX), Query::Lookup(vec!["the", "cat"]));
		assert_eq!(Query::parse(" Line:: we ", CONTROL_PREFIX), Query::Lookup(vec!["Line::", "we"]));
		assert_eq!(Query::parse("a ::b", CONTROL_PREFIX), Query::Lookup(vec!["a", "::b"]));
	}
}

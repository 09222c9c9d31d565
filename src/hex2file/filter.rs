// Prefix stripped from every line after the caller's ignore strings.
const HEX_PREFIX: &str = "0x";

/// Comment markers and ignore strings applied to each input line.
///
/// Marker order is significant: every marker works on the line as left by the
/// markers before it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterConfig {
	pub comments: Vec<String>,
	pub ignore: Vec<String>,
}

impl FilterConfig {
	/// Builds a configuration, dropping empty strings from both lists.
	pub fn new<C, I>(comments: C, ignore: I) -> Self
	where
		C: IntoIterator,
		C::Item: Into<String>,
		I: IntoIterator,
		I::Item: Into<String>,
	{
		Self {
			comments: non_empty(comments),
			ignore: non_empty(ignore),
		}
	}

	/// Reduces one line of input to its residual hex digits.
	///
	/// Returns `None` when the line should be skipped: it is blank, starts with a
	/// comment marker, or nothing is left once comments, ignore strings and
	/// whitespace are removed.
	pub fn sanitize(&self, line: &str) -> Option<String> {
		let mut line = line.trim();

		if line.is_empty() {
			return None;
		}

		// The fields are public, so empties can still arrive without `new`.
		for marker in self.comments.iter().filter(|m| !m.is_empty()) {
			if line.starts_with(marker.as_str()) {
				return None;
			}
			if let Some(pos) = line.find(marker.as_str()) {
				line = &line[..pos];
			}
		}

		let mut residual = line.to_string();
		for ignore in self.ignore.iter().filter(|s| !s.is_empty()) {
			residual = residual.replace(ignore.as_str(), "");
		}
		residual = residual.replace(HEX_PREFIX, "");

		residual.retain(|c| !c.is_whitespace());

		if residual.is_empty() {
			None
		} else {
			Some(residual)
		}
	}
}

fn non_empty<T>(items: T) -> Vec<String>
where
	T: IntoIterator,
	T::Item: Into<String>,
{
	items
		.into_iter()
		.map(Into::into)
		.filter(|s| !s.is_empty())
		.collect()
}

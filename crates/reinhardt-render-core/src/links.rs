//! URI templates for resource and relationship links
//!
//! Supports the level 1 and level 2 forms of RFC 6570 that link
//! configuration needs: `{var}` (percent-encoded) and `{+var}` (reserved
//! characters kept). Undefined variables expand to nothing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A URI template such as `/books/{id}/relationships/author`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkTemplate(String);

impl LinkTemplate {
	pub fn new(template: impl Into<String>) -> Self {
		Self(template.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Expand the template with the given variables.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_render_core::LinkTemplate;
	///
	/// let template = LinkTemplate::new("/{type}/{id}/relationships/{relationship}");
	/// let link = template.expand(&[("type", "books"), ("id", "1"), ("relationship", "author")]);
	/// assert_eq!(link, "/books/1/relationships/author");
	///
	/// let encoded = LinkTemplate::new("/search/{q}").expand(&[("q", "a b")]);
	/// assert_eq!(encoded, "/search/a%20b");
	/// ```
	pub fn expand(&self, vars: &[(&str, &str)]) -> String {
		let mut out = String::with_capacity(self.0.len());
		let mut rest = self.0.as_str();

		while let Some(start) = rest.find('{') {
			out.push_str(&rest[..start]);
			let after = &rest[start + 1..];
			let Some(end) = after.find('}') else {
				// Unterminated expression, keep it verbatim
				out.push_str(&rest[start..]);
				return out;
			};
			let expression = &after[..end];
			let (reserved, name) = match expression.strip_prefix('+') {
				Some(name) => (true, name),
				None => (false, expression),
			};
			if let Some((_, value)) = vars.iter().find(|(var, _)| *var == name) {
				if reserved {
					out.push_str(value);
				} else {
					out.push_str(&urlencoding::encode(value));
				}
			}
			rest = &after[end + 1..];
		}
		out.push_str(rest);
		out
	}
}

impl From<&str> for LinkTemplate {
	fn from(template: &str) -> Self {
		Self::new(template)
	}
}

impl From<String> for LinkTemplate {
	fn from(template: String) -> Self {
		Self(template)
	}
}

impl fmt::Display for LinkTemplate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

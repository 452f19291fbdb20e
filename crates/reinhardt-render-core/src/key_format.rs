//! Key formatting for attribute and relationship names

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Function used by [`KeyFormat::Custom`].
pub type KeyFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// How a serializer turns a field name into an output key.
///
/// # Examples
///
/// ```
/// use reinhardt_render_core::KeyFormat;
///
/// assert_eq!(KeyFormat::Dasherize.apply("published_at"), "published-at");
/// assert_eq!(KeyFormat::CamelCase.apply("published_at"), "publishedAt");
/// assert_eq!(KeyFormat::SnakeCase.apply("published-at"), "published_at");
/// assert_eq!(KeyFormat::custom(|key| key.to_uppercase()).apply("title"), "TITLE");
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
pub enum KeyFormat {
	/// Keep names as they are
	#[default]
	#[serde(rename = "unchanged")]
	Unchanged,
	/// `published_at` -> `published-at`
	#[serde(rename = "dasherize")]
	Dasherize,
	/// `published_at` -> `publishedAt`
	#[serde(rename = "camelCase")]
	CamelCase,
	/// `published-at` -> `published_at`
	#[serde(rename = "snake_case")]
	SnakeCase,
	/// Caller supplied transform
	#[serde(skip)]
	Custom(KeyFn),
}

impl KeyFormat {
	/// Wrap a closure as a custom key format.
	pub fn custom<F>(f: F) -> Self
	where
		F: Fn(&str) -> String + Send + Sync + 'static,
	{
		KeyFormat::Custom(Arc::new(f))
	}

	pub fn apply(&self, key: &str) -> String {
		match self {
			KeyFormat::Unchanged => key.to_string(),
			KeyFormat::Dasherize => key.to_case(Case::Kebab),
			KeyFormat::CamelCase => key.to_case(Case::Camel),
			KeyFormat::SnakeCase => key.to_case(Case::Snake),
			KeyFormat::Custom(f) => f(key),
		}
	}
}

impl fmt::Debug for KeyFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			KeyFormat::Unchanged => f.write_str("Unchanged"),
			KeyFormat::Dasherize => f.write_str("Dasherize"),
			KeyFormat::CamelCase => f.write_str("CamelCase"),
			KeyFormat::SnakeCase => f.write_str("SnakeCase"),
			KeyFormat::Custom(_) => f.write_str("Custom(..)"),
		}
	}
}

impl PartialEq for KeyFormat {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(KeyFormat::Custom(a), KeyFormat::Custom(b)) => Arc::ptr_eq(a, b),
			(a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
		}
	}
}

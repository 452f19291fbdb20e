//! Per-call render options

use serde_json::{Map, Value};

/// Options passed along a single render call.
///
/// Serializers and the built-in renderers only read `type_name`, `meta` and
/// `links`; `context` is carried untouched so custom adapters and hooks can
/// receive request-specific values.
///
/// # Examples
///
/// ```
/// use reinhardt_render_core::RenderOptions;
/// use serde_json::json;
///
/// let options = RenderOptions::new()
///     .with_type("books")
///     .with_meta(json!({"total": 2}))
///     .with_link("self", "/books");
///
/// let related = options.for_related("users");
/// assert_eq!(related.type_name.as_deref(), Some("users"));
/// assert!(related.meta.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
	/// Type hint for records whose type the adapter cannot infer
	pub type_name: Option<String>,
	/// Top-level document meta
	pub meta: Option<Value>,
	/// Top-level document links
	pub links: Option<Map<String, Value>>,
	/// Free-form values for custom adapters and serializer hooks
	pub context: Map<String, Value>,
}

impl RenderOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
		self.type_name = Some(type_name.into());
		self
	}

	pub fn with_meta(mut self, meta: Value) -> Self {
		self.meta = Some(meta);
		self
	}

	pub fn with_links(mut self, links: Map<String, Value>) -> Self {
		self.links = Some(links);
		self
	}

	/// Add a single top-level link.
	pub fn with_link(mut self, name: impl Into<String>, href: impl Into<Value>) -> Self {
		self.links
			.get_or_insert_with(Map::new)
			.insert(name.into(), href.into());
		self
	}

	pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.context.insert(key.into(), value.into());
		self
	}

	/// Options for rendering a related record of `type_name`.
	///
	/// Top-level `meta` and `links` belong to the document and are not passed
	/// down; `context` is.
	pub fn for_related(&self, type_name: &str) -> Self {
		Self {
			type_name: Some(type_name.to_string()),
			meta: None,
			links: None,
			context: self.context.clone(),
		}
	}
}

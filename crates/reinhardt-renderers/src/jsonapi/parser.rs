//! JSON:API request body parser
//!
//! The inverse of rendering, one resource object at a time: wire keys are
//! converted to the host's casing and relationship linkage is kept as
//! identifiers. Nothing is resolved or sideloaded.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use reinhardt_render_core::{
	Adapter, KeyFormat, ParsedLinkage, ParsedResource, RenderError, RenderOptions, RenderResult,
	RenderSettings, ResourceId,
};

use super::document::Linkage;

/// Parsed primary data, mirroring the shape of the request body.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedData<T> {
	One(T),
	Many(Vec<T>),
}

impl<T> ParsedData<T> {
	pub fn map<U, F>(self, mut f: F) -> ParsedData<U>
	where
		F: FnMut(T) -> U,
	{
		match self {
			ParsedData::One(item) => ParsedData::One(f(item)),
			ParsedData::Many(items) => ParsedData::Many(items.into_iter().map(f).collect()),
		}
	}

	/// Like [`map`](Self::map), stopping at the first error.
	pub fn try_map<U, E, F>(self, mut f: F) -> Result<ParsedData<U>, E>
	where
		F: FnMut(T) -> Result<U, E>,
	{
		Ok(match self {
			ParsedData::One(item) => ParsedData::One(f(item)?),
			ParsedData::Many(items) => {
				ParsedData::Many(items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?)
			}
		})
	}

	pub fn into_vec(self) -> Vec<T> {
		match self {
			ParsedData::One(item) => vec![item],
			ParsedData::Many(items) => items,
		}
	}
}

#[derive(Deserialize)]
struct InboundDocument {
	#[serde(default)]
	data: Value,
}

#[derive(Deserialize)]
struct InboundResource {
	#[serde(rename = "type")]
	type_name: String,
	#[serde(default)]
	id: Option<ResourceId>,
	#[serde(default)]
	attributes: Map<String, Value>,
	#[serde(default)]
	relationships: IndexMap<String, Map<String, Value>>,
}

/// Parses JSON:API request bodies into [`ParsedResource`]s.
///
/// # Examples
///
/// ```
/// use reinhardt_render_core::ParsedLinkage;
/// use reinhardt_renderers::{JsonApiParser, ParsedData};
///
/// let body = r#"{
///     "data": {
///         "type": "books",
///         "attributes": {"published-at": "1949"},
///         "relationships": {"main-author": {"data": {"type": "users", "id": "2"}}}
///     }
/// }"#;
///
/// let ParsedData::One(book) = JsonApiParser::new().parse_str(body).unwrap() else {
///     panic!("expected a single resource");
/// };
/// assert!(book.id.is_none());
/// assert_eq!(book.attribute("published_at"), Some(&serde_json::json!("1949")));
/// assert!(matches!(book.relationship("main_author"), Some(ParsedLinkage::One(Some(_)))));
/// ```
#[derive(Debug, Clone)]
pub struct JsonApiParser {
	key_format: KeyFormat,
}

impl Default for JsonApiParser {
	fn default() -> Self {
		Self {
			key_format: KeyFormat::SnakeCase,
		}
	}
}

impl JsonApiParser {
	/// Parser converting wire keys to snake_case.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parser using `settings.parse_key_format`.
	pub fn from_settings(settings: &RenderSettings) -> Self {
		Self {
			key_format: settings.parse_key_format.clone(),
		}
	}

	pub fn key_format(mut self, format: KeyFormat) -> Self {
		self.key_format = format;
		self
	}

	pub fn parse_str(&self, body: &str) -> RenderResult<ParsedData<ParsedResource>> {
		let body: Value = serde_json::from_str(body)
			.map_err(|e| RenderError::InvalidDocument(format!("Invalid JSON: {}", e)))?;
		self.parse(&body)
	}

	/// Parse a request body whose `data` is a resource object or an array of
	/// resource objects.
	pub fn parse(&self, body: &Value) -> RenderResult<ParsedData<ParsedResource>> {
		let document = InboundDocument::deserialize(body)
			.map_err(|e| RenderError::InvalidDocument(e.to_string()))?;

		let parsed = match document.data {
			Value::Object(_) => ParsedData::One(self.parse_resource(document.data)?),
			Value::Array(resources) => ParsedData::Many(
				resources
					.into_iter()
					.map(|resource| self.parse_resource(resource))
					.collect::<RenderResult<Vec<_>>>()?,
			),
			Value::Null => {
				return Err(RenderError::InvalidDocument(
					"Missing primary data".to_string(),
				));
			}
			other => {
				return Err(RenderError::InvalidDocument(format!(
					"Primary data must be a resource object or an array, got {}",
					other
				)));
			}
		};
		debug!(
			resources = parsed_len(&parsed),
			"Parsed request document"
		);
		Ok(parsed)
	}

	/// Parse `body` and instantiate native records through `adapter`.
	pub fn parse_into<A: Adapter>(
		&self,
		adapter: &A,
		body: &Value,
		options: &RenderOptions,
	) -> RenderResult<ParsedData<A::Record>> {
		self.parse(body)?
			.try_map(|resource| adapter.record_from_resource(&resource, options))
	}

	fn parse_resource(&self, resource: Value) -> RenderResult<ParsedResource> {
		let resource: InboundResource = serde_json::from_value(resource)
			.map_err(|e| RenderError::InvalidDocument(format!("Invalid resource object: {}", e)))?;

		let mut parsed = ParsedResource::new(resource.type_name);
		parsed.id = resource.id;
		parsed.attributes = resource
			.attributes
			.into_iter()
			.map(|(key, value)| (self.key_format.apply(&key), value))
			.collect();

		for (key, mut relationship) in resource.relationships {
			// Relationships carrying only links or meta leave the linkage untouched
			let Some(data) = relationship.remove("data") else {
				continue;
			};
			let linkage = match data {
				Value::Null => ParsedLinkage::One(None),
				data => match serde_json::from_value::<Linkage>(data).map_err(|e| {
					RenderError::InvalidDocument(format!("Invalid linkage for '{}': {}", key, e))
				})? {
					Linkage::One(identifier) => ParsedLinkage::One(Some(identifier)),
					Linkage::Many(identifiers) => ParsedLinkage::Many(identifiers),
				},
			};
			parsed
				.relationships
				.insert(self.key_format.apply(&key), linkage);
		}

		Ok(parsed)
	}
}

fn parsed_len<T>(parsed: &ParsedData<T>) -> usize {
	match parsed {
		ParsedData::One(_) => 1,
		ParsedData::Many(items) => items.len(),
	}
}

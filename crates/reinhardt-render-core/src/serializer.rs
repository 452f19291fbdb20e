//! Per-type serializers
//!
//! A [`Serializer`] decides what of a record is exposed: a whitelist of
//! attributes and a map of configured relationships. It is also the single
//! place where what the adapter reports is checked against the configured
//! relationship strategies, so renderers can trust the relationships they
//! receive.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{trace, warn};

use crate::adapter::Adapter;
use crate::error::{RenderError, RenderResult};
use crate::identifier::ResourceId;
use crate::key_format::KeyFormat;
use crate::links::LinkTemplate;
use crate::options::RenderOptions;
use crate::relationship::{
	RelationshipConfig, RelationshipData, RelationshipDescriptor, SerializedRelationship, Strategy,
};

/// Transform applied to every serialized attribute value.
///
/// Receives the output key, the raw value and the record.
pub type ValueTransform<R> = Arc<dyn Fn(&str, Value, &R) -> Value + Send + Sync>;

/// Produces resource-level meta for a record.
pub type MetaHook<R> = Arc<dyn Fn(&R) -> Option<Value> + Send + Sync>;

/// Declarative part of a serializer, loadable from configuration files.
///
/// # Examples
///
/// ```
/// use reinhardt_render_core::{Serializer, SerializerConfig, Strategy};
///
/// let config: SerializerConfig = serde_json::from_str(r#"{
///     "attributes": ["title"],
///     "relationships": {"author": {"strategy": "record", "type": "users"}},
///     "keyFormat": "dasherize"
/// }"#).unwrap();
///
/// let serializer: Serializer = Serializer::from_config(config);
/// assert_eq!(serializer.attribute_names(), ["title"]);
/// assert_eq!(
///     serializer.relationship_config("author").map(|c| c.strategy),
///     Some(Strategy::Record)
/// );
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SerializerConfig {
	pub attributes: Vec<String>,
	pub relationships: IndexMap<String, RelationshipConfig>,
	pub key_format: KeyFormat,
	pub self_link: Option<LinkTemplate>,
}

/// Attribute whitelist and relationship configuration for one record type.
///
/// Serializers are built once at startup and shared read-only between
/// renders.
///
/// # Examples
///
/// ```
/// use reinhardt_render_core::{RawAdapter, RelationshipConfig, RenderOptions, Serializer};
/// use serde_json::json;
///
/// let serializer = Serializer::new()
///     .attributes(["title"])
///     .relationship("author", RelationshipConfig::id("users"));
///
/// let book = json!({"id": 1, "title": "Human Action", "secret": true, "author_id": 2});
/// let adapter = RawAdapter::new();
/// let options = RenderOptions::new();
///
/// let attributes = serializer.serialize_attributes(&adapter, &book, &options).unwrap();
/// assert_eq!(serde_json::Value::Object(attributes), json!({"title": "Human Action"}));
///
/// let relationships = serializer.serialize_relationships(&adapter, &book, &options).unwrap();
/// assert_eq!(relationships["author"].type_name, "users");
/// ```
pub struct Serializer<R = Value> {
	attributes: Vec<String>,
	relationships: IndexMap<String, RelationshipConfig>,
	key_format: KeyFormat,
	value_transform: Option<ValueTransform<R>>,
	self_link: Option<LinkTemplate>,
	meta: Option<MetaHook<R>>,
}

impl<R> Default for Serializer<R> {
	fn default() -> Self {
		Self {
			attributes: Vec::new(),
			relationships: IndexMap::new(),
			key_format: KeyFormat::default(),
			value_transform: None,
			self_link: None,
			meta: None,
		}
	}
}

impl<R> Clone for Serializer<R> {
	fn clone(&self) -> Self {
		Self {
			attributes: self.attributes.clone(),
			relationships: self.relationships.clone(),
			key_format: self.key_format.clone(),
			value_transform: self.value_transform.clone(),
			self_link: self.self_link.clone(),
			meta: self.meta.clone(),
		}
	}
}

impl<R> fmt::Debug for Serializer<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Serializer")
			.field("attributes", &self.attributes)
			.field("relationships", &self.relationships)
			.field("key_format", &self.key_format)
			.field("value_transform", &self.value_transform.is_some())
			.field("self_link", &self.self_link)
			.field("meta", &self.meta.is_some())
			.finish()
	}
}

impl<R> Serializer<R> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a serializer from its declarative configuration.
	pub fn from_config(config: SerializerConfig) -> Self {
		Self {
			attributes: config.attributes,
			relationships: config.relationships,
			key_format: config.key_format,
			self_link: config.self_link,
			..Self::default()
		}
	}

	/// Set the attribute whitelist. Output order follows this list.
	pub fn attributes<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.attributes = names.into_iter().map(Into::into).collect();
		self
	}

	/// Configure a relationship. Unconfigured relationships are never
	/// serialized.
	pub fn relationship(mut self, name: impl Into<String>, config: RelationshipConfig) -> Self {
		self.relationships.insert(name.into(), config);
		self
	}

	/// Set how attribute and relationship names become output keys.
	pub fn key_format(mut self, format: KeyFormat) -> Self {
		self.key_format = format;
		self
	}

	/// Transform every attribute value before it is written.
	pub fn value_transform<F>(mut self, transform: F) -> Self
	where
		F: Fn(&str, Value, &R) -> Value + Send + Sync + 'static,
	{
		self.value_transform = Some(Arc::new(transform));
		self
	}

	/// URI template for the resource's `links.self`, expanded with `type`
	/// and `id`.
	pub fn self_link(mut self, template: impl Into<LinkTemplate>) -> Self {
		self.self_link = Some(template.into());
		self
	}

	/// Hook producing resource-level meta.
	pub fn meta<F>(mut self, hook: F) -> Self
	where
		F: Fn(&R) -> Option<Value> + Send + Sync + 'static,
	{
		self.meta = Some(Arc::new(hook));
		self
	}

	pub fn attribute_names(&self) -> &[String] {
		&self.attributes
	}

	pub fn relationship_configs(&self) -> &IndexMap<String, RelationshipConfig> {
		&self.relationships
	}

	pub fn relationship_config(&self, name: &str) -> Option<&RelationshipConfig> {
		self.relationships.get(name)
	}

	/// Output key for an attribute or relationship name.
	pub fn key_for(&self, name: &str) -> String {
		self.key_format.apply(name)
	}

	/// Serialize the whitelisted attributes of `record`.
	///
	/// Attributes the adapter reports as absent are omitted; present nulls
	/// are kept.
	pub fn serialize_attributes<A>(
		&self,
		adapter: &A,
		record: &R,
		options: &RenderOptions,
	) -> RenderResult<Map<String, Value>>
	where
		A: Adapter<Record = R> + ?Sized,
	{
		let mut attributes = Map::new();
		for name in &self.attributes {
			let Some(raw) = adapter.attribute_from_record(record, name, options)? else {
				trace!(attribute = %name, "Attribute absent, omitted");
				continue;
			};
			let key = self.key_for(name);
			let value = match &self.value_transform {
				Some(transform) => transform(&key, raw, record),
				None => raw,
			};
			trace!(attribute = %name, key = %key, "Serialized attribute");
			attributes.insert(key, value);
		}
		Ok(attributes)
	}

	/// Serialize the configured relationships of `record`, keyed by output
	/// key.
	///
	/// # Errors
	///
	/// - [`RenderError::ConfigMismatch`] when a strategy does not fit the
	///   kind the adapter reports.
	/// - [`RenderError::MissingRelationshipData`] when the adapter did not
	///   supply the data the strategy needs.
	pub fn serialize_relationships<'r, A>(
		&self,
		adapter: &A,
		record: &'r R,
		options: &RenderOptions,
	) -> RenderResult<IndexMap<String, SerializedRelationship<'r, R>>>
	where
		A: Adapter<Record = R> + ?Sized,
		R: Clone,
	{
		let mut relationships = IndexMap::with_capacity(self.relationships.len());
		for (name, config) in &self.relationships {
			let descriptor = adapter.relationship_from_record(record, name, config, options)?;
			let relationship = self.normalize_relationship(name, config, descriptor)?;
			relationships.insert(relationship.key.clone(), relationship);
		}
		Ok(relationships)
	}

	/// Validate a descriptor against its configuration and keep only the
	/// strategy-selected data.
	pub fn normalize_relationship<'r>(
		&self,
		name: &str,
		config: &RelationshipConfig,
		descriptor: RelationshipDescriptor<'r, R>,
	) -> RenderResult<SerializedRelationship<'r, R>>
	where
		R: Clone,
	{
		let strategy = config.strategy;
		if !strategy.accepts(descriptor.kind) {
			warn!(
				relationship = %name,
				strategy = %strategy,
				kind = %descriptor.kind,
				"Relationship strategy does not fit the reported kind"
			);
			return Err(RenderError::ConfigMismatch {
				relationship: name.to_string(),
				strategy,
				kind: descriptor.kind,
			});
		}

		let RelationshipDescriptor {
			kind,
			type_name,
			id,
			ids,
			record,
			records,
			meta,
		} = descriptor;

		let data = match strategy {
			Strategy::Id => id.map(RelationshipData::Id),
			Strategy::Ids => ids.map(RelationshipData::Ids),
			Strategy::Record => record.map(RelationshipData::Record),
			Strategy::Records => records.map(RelationshipData::Records),
		};
		let Some(data) = data else {
			warn!(
				relationship = %name,
				strategy = %strategy,
				"Adapter supplied no data for relationship"
			);
			return Err(RenderError::MissingRelationshipData {
				relationship: name.to_string(),
				strategy,
			});
		};

		let type_name = if type_name.is_empty() {
			config.type_name.clone()
		} else {
			type_name
		};
		trace!(relationship = %name, strategy = %strategy, "Serialized relationship");

		Ok(SerializedRelationship {
			name: name.to_string(),
			key: self.key_for(name),
			type_name,
			kind,
			strategy,
			data,
			relationship_link: config.relationship_link.clone(),
			related_link: config.related_link.clone(),
			meta,
		})
	}

	/// Expand the `self` link of a record.
	pub fn links_for_record(&self, type_name: &str, id: &ResourceId) -> Option<String> {
		let id = id.to_string();
		self.self_link
			.as_ref()
			.map(|template| template.expand(&[("type", type_name), ("id", &id)]))
	}

	/// Expand the `self` and `related` links of a relationship of the record
	/// identified by `type_name` and `id`.
	pub fn relationship_links(
		&self,
		relationship: &SerializedRelationship<'_, R>,
		type_name: &str,
		id: &ResourceId,
	) -> Option<Map<String, Value>>
	where
		R: Clone,
	{
		let id = id.to_string();
		let vars = [
			("type", type_name),
			("id", id.as_str()),
			("relationship", relationship.key.as_str()),
		];
		let mut links = Map::new();
		if let Some(template) = &relationship.relationship_link {
			links.insert("self".to_string(), Value::from(template.expand(&vars)));
		}
		if let Some(template) = &relationship.related_link {
			links.insert("related".to_string(), Value::from(template.expand(&vars)));
		}
		(!links.is_empty()).then_some(links)
	}

	/// Resource-level meta for `record`, if a meta hook is configured.
	pub fn meta_for_record(&self, record: &R) -> Option<Value> {
		self.meta.as_ref().and_then(|hook| hook(record))
	}
}

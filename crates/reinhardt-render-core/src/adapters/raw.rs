//! Adapter for plain JSON objects
//!
//! Used when records are not backed by an ORM. Related ids are read by
//! naming convention:
//!
//! | strategy  | key read                                        |
//! |-----------|-------------------------------------------------|
//! | `id`      | `<name>_id`                                     |
//! | `ids`     | `<name>_ids`, then `<singular name>_ids`        |
//! | `record`  | `<name>`                                        |
//! | `records` | `<name>`                                        |
//!
//! The relationship kind is taken from the shape of the value found (an
//! array is `hasMany`, anything else `hasOne`), so a strategy that does not
//! fit the data is reported as a configuration mismatch by the serializer.

use serde_json::{Map, Value};

use crate::adapter::Adapter;
use crate::error::{RenderError, RenderResult};
use crate::identifier::ResourceId;
use crate::options::RenderOptions;
use crate::parsed::{ParsedLinkage, ParsedResource};
use crate::relationship::{RelationshipConfig, RelationshipDescriptor, Strategy};

/// Adapter over `serde_json::Value` records.
///
/// # Examples
///
/// ```
/// use reinhardt_render_core::{Adapter, RawAdapter, RenderOptions, ResourceId};
/// use serde_json::json;
///
/// let adapter = RawAdapter::new();
/// let book = json!({"id": 1, "title": "Human Action"});
/// let options = RenderOptions::new().with_type("books");
///
/// assert_eq!(adapter.type_for_record(&book, &options).unwrap(), "books");
/// assert_eq!(adapter.id_for_record(&book, &options).unwrap(), ResourceId::Int(1));
/// ```
#[derive(Debug, Clone)]
pub struct RawAdapter {
	id_attribute: String,
	type_field: Option<String>,
}

impl Default for RawAdapter {
	fn default() -> Self {
		Self {
			id_attribute: "id".to_string(),
			type_field: None,
		}
	}
}

impl RawAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Read ids from `attribute` instead of `id`.
	pub fn with_id_attribute(mut self, attribute: impl Into<String>) -> Self {
		self.id_attribute = attribute.into();
		self
	}

	/// Read the record type from `field` when the render options carry no
	/// type hint.
	pub fn with_type_field(mut self, field: impl Into<String>) -> Self {
		self.type_field = Some(field.into());
		self
	}

	fn object<'r>(&self, record: &'r Value) -> RenderResult<&'r Map<String, Value>> {
		record.as_object().ok_or_else(|| {
			RenderError::invalid_record(format!("expected a JSON object, got {}", record))
		})
	}

	fn ids_value<'r>(object: &'r Map<String, Value>, name: &str) -> Option<&'r Value> {
		present(object.get(&format!("{}_ids", name))).or_else(|| {
			name.strip_suffix('s')
				.and_then(|stem| present(object.get(&format!("{}_ids", stem))))
		})
	}

	fn ids_descriptor<'r>(
		value: Option<&Value>,
		strategy: Strategy,
		type_name: &str,
	) -> RenderResult<RelationshipDescriptor<'r, Value>> {
		match value {
			Some(Value::Array(items)) => {
				let ids = items
					.iter()
					.map(ResourceId::try_from)
					.collect::<RenderResult<Vec<_>>>()?;
				Ok(RelationshipDescriptor::has_many(type_name).with_ids(ids))
			}
			Some(value) => {
				Ok(RelationshipDescriptor::has_one(type_name).with_id(ResourceId::try_from(value)?))
			}
			None => Ok(RelationshipDescriptor::new(
				strategy.expected_kind(),
				type_name,
			)),
		}
	}
}

fn present(value: Option<&Value>) -> Option<&Value> {
	value.filter(|value| !value.is_null())
}

impl Adapter for RawAdapter {
	type Record = Value;

	fn type_for_record(&self, record: &Value, options: &RenderOptions) -> RenderResult<String> {
		if let Some(type_name) = &options.type_name {
			return Ok(type_name.clone());
		}
		self.type_field
			.as_ref()
			.and_then(|field| record.get(field))
			.and_then(Value::as_str)
			.map(str::to_string)
			.ok_or(RenderError::MissingType)
	}

	fn id_for_record(&self, record: &Value, _options: &RenderOptions) -> RenderResult<ResourceId> {
		let value = self.object(record)?.get(&self.id_attribute).ok_or_else(|| {
			RenderError::invalid_record(format!("record has no '{}' attribute", self.id_attribute))
		})?;
		ResourceId::try_from(value)
	}

	fn attribute_from_record(
		&self,
		record: &Value,
		name: &str,
		_options: &RenderOptions,
	) -> RenderResult<Option<Value>> {
		Ok(self.object(record)?.get(name).cloned())
	}

	fn relationship_from_record<'r>(
		&self,
		record: &'r Value,
		name: &str,
		config: &RelationshipConfig,
		_options: &RenderOptions,
	) -> RenderResult<RelationshipDescriptor<'r, Value>> {
		let object = self.object(record)?;
		let type_name = config.type_name.as_str();

		match config.strategy {
			Strategy::Id => {
				let value = present(object.get(&format!("{}_id", name)));
				Self::ids_descriptor(value, Strategy::Id, type_name)
			}
			Strategy::Ids => {
				Self::ids_descriptor(Self::ids_value(object, name), Strategy::Ids, type_name)
			}
			strategy @ (Strategy::Record | Strategy::Records) => {
				match present(object.get(name)) {
					Some(Value::Array(items)) => {
						Ok(RelationshipDescriptor::has_many(type_name).with_records(items.iter()))
					}
					Some(related) => Ok(RelationshipDescriptor::has_one(type_name).with_record(related)),
					None => Ok(RelationshipDescriptor::new(
						strategy.expected_kind(),
						type_name,
					)),
				}
			}
		}
	}

	fn record_from_resource(
		&self,
		resource: &ParsedResource,
		_options: &RenderOptions,
	) -> RenderResult<Value> {
		let mut object = Map::new();
		if let Some(id) = &resource.id {
			object.insert(self.id_attribute.clone(), id.to_value());
		}
		if let Some(field) = &self.type_field {
			object.insert(field.clone(), Value::from(resource.type_name.as_str()));
		}
		for (key, value) in &resource.attributes {
			object.insert(key.clone(), value.clone());
		}
		for (name, linkage) in &resource.relationships {
			match linkage {
				ParsedLinkage::One(identifier) => {
					let id = identifier
						.as_ref()
						.map(|identifier| identifier.id.to_value())
						.unwrap_or(Value::Null);
					object.insert(format!("{}_id", name), id);
				}
				ParsedLinkage::Many(identifiers) => {
					let ids = identifiers
						.iter()
						.map(|identifier| identifier.id.to_value())
						.collect();
					object.insert(format!("{}_ids", name), Value::Array(ids));
				}
			}
		}
		Ok(Value::Object(object))
	}
}

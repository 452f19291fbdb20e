//! Flat renderer
//!
//! Renders a record as a single object: `{id, ...attributes,
//! ...relationships}`. Each relationship is collapsed to its bare value: an
//! id, an array of ids, a nested object or an array of nested objects.

use serde_json::{Map, Value, json};
use tracing::{debug, trace};

use reinhardt_render_core::{
	Adapter, ApiError, Payload, RelationshipData, RenderOptions, RenderResult, ResourceIdentifier,
};

use crate::renderer::{RenderContext, Renderer};

/// Renders records as flat JSON objects.
///
/// A record that is already being rendered further up the nesting path is
/// written as its bare id, so cyclic record graphs terminate.
///
/// # Examples
///
/// ```
/// use reinhardt_render_core::{Payload, RawAdapter, RenderOptions, Serializer, SerializerRegistry};
/// use reinhardt_renderers::{FlatRenderer, RenderContext, Renderer};
/// use serde_json::json;
///
/// let renderer = FlatRenderer::new(RenderContext::new(
///     RawAdapter::new(),
///     SerializerRegistry::new().register("books", Serializer::new().attributes(["title"])),
/// ));
///
/// let book = json!({"id": 1, "title": "Human Action", "secret": true});
/// let output = renderer
///     .render(Payload::Record(&book), &RenderOptions::new().with_type("books"))
///     .unwrap();
/// assert_eq!(output, json!({"id": 1, "title": "Human Action"}));
/// ```
#[derive(Debug, Clone)]
pub struct FlatRenderer<A: Adapter> {
	context: RenderContext<A>,
}

impl<A: Adapter> FlatRenderer<A> {
	pub fn new(context: RenderContext<A>) -> Self {
		Self { context }
	}

	pub fn context(&self) -> &RenderContext<A> {
		&self.context
	}

	/// Render one record.
	pub fn render_record(&self, record: &A::Record, options: &RenderOptions) -> RenderResult<Value> {
		let mut path = Vec::new();
		self.render_nested(record, options, &mut path)
	}

	/// Render records element-wise.
	pub fn render_records(
		&self,
		records: &[A::Record],
		options: &RenderOptions,
	) -> RenderResult<Value> {
		records
			.iter()
			.map(|record| self.render_record(record, options))
			.collect::<RenderResult<Vec<_>>>()
			.map(Value::Array)
	}

	/// Render an error as `{status, code, message}`.
	pub fn render_error(&self, error: &ApiError) -> Value {
		let code = error
			.code
			.as_deref()
			.unwrap_or(self.context.settings().default_error_code.as_str());
		json!({
			"status": error.status,
			"code": code,
			"message": error.message,
		})
	}

	fn render_nested(
		&self,
		record: &A::Record,
		options: &RenderOptions,
		path: &mut Vec<ResourceIdentifier>,
	) -> RenderResult<Value> {
		let adapter = self.context.adapter();
		let (type_name, serializer) = self.context.serializer_for(record, options)?;
		let id = adapter.id_for_record(record, options)?;

		let identifier = ResourceIdentifier::new(type_name, id.clone());
		if path.contains(&identifier) {
			trace!(resource = %identifier, "Record already on the nesting path, writing its id");
			return Ok(id.to_value());
		}
		path.push(identifier);

		let mut object = Map::new();
		object.insert("id".to_string(), id.to_value());
		object.extend(serializer.serialize_attributes(adapter, record, options)?);

		for (key, relationship) in serializer.serialize_relationships(adapter, record, options)? {
			let value = match relationship.data {
				RelationshipData::Id(id) => id.to_value(),
				RelationshipData::Ids(ids) => {
					Value::Array(ids.iter().map(|id| id.to_value()).collect())
				}
				RelationshipData::Record(related) => {
					let related_options = options.for_related(&relationship.type_name);
					self.render_nested(&related, &related_options, path)?
				}
				RelationshipData::Records(related) => {
					let related_options = options.for_related(&relationship.type_name);
					let mut rendered = Vec::with_capacity(related.len());
					for record in &related {
						rendered.push(self.render_nested(record, &related_options, path)?);
					}
					Value::Array(rendered)
				}
			};
			object.insert(key, value);
		}

		path.pop();
		Ok(Value::Object(object))
	}
}

impl<A: Adapter> Renderer for FlatRenderer<A> {
	type Record = A::Record;
	type Output = Value;

	fn render(&self, payload: Payload<'_, A::Record>, options: &RenderOptions) -> RenderResult<Value> {
		debug!(payload = payload.shape(), renderer = "flat", "Rendering payload");
		match payload {
			Payload::Record(record) => self.render_record(record, options),
			Payload::Records(records) => self.render_records(records, options),
			Payload::Error(error) => Ok(self.render_error(error)),
			Payload::Errors(errors) => Ok(Value::Array(
				errors.iter().map(|error| self.render_error(error)).collect(),
			)),
		}
	}
}

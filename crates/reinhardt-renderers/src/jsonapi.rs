//! JSON:API renderer
//!
//! Renders records as [JSON:API](https://jsonapi.org/format/) documents.
//! Relationships using the `record` or `records` strategy are sideloaded
//! into the top-level `included` member, each distinct resource once,
//! however many paths lead to it and whether or not the record graph has
//! cycles.

pub mod document;
pub(crate) mod included;
pub mod parser;

use indexmap::IndexMap;
use serde_json::{Map, Value, json};
use tracing::{debug, trace};
use uuid::Uuid;

use reinhardt_render_core::{
	Adapter, ApiError, Payload, RelationshipData, RenderOptions, RenderResult, ResourceIdentifier,
};

use crate::renderer::{RenderContext, Renderer};

pub use document::{
	Document, ErrorLinks, ErrorObject, ErrorSource, JsonApiObject, Linkage, PrimaryData,
	RelationshipObject, ResourceObject,
};
pub use parser::{JsonApiParser, ParsedData};

use included::{Claim, IncludedTracker};

/// Renders payloads as JSON:API documents.
///
/// # Examples
///
/// ```
/// use reinhardt_render_core::{
///     Payload, RawAdapter, RelationshipConfig, RenderOptions, Serializer, SerializerRegistry,
/// };
/// use reinhardt_renderers::{JsonApiRenderer, RenderContext};
/// use serde_json::json;
///
/// let registry = SerializerRegistry::new()
///     .register(
///         "books",
///         Serializer::new()
///             .attributes(["title"])
///             .relationship("author", RelationshipConfig::record("users")),
///     )
///     .register("users", Serializer::new().attributes(["name"]));
/// let renderer = JsonApiRenderer::new(RenderContext::new(RawAdapter::new(), registry));
///
/// let book = json!({
///     "id": 1,
///     "title": "Human Action",
///     "author": {"id": 2, "name": "Ludwig"}
/// });
/// let document = renderer
///     .render_document(Payload::Record(&book), &RenderOptions::new().with_type("books"))
///     .unwrap();
///
/// assert_eq!(document.included.len(), 1);
/// assert_eq!(
///     document.to_value().unwrap()["data"]["relationships"]["author"]["data"],
///     json!({"type": "users", "id": 2})
/// );
/// ```
#[derive(Debug, Clone)]
pub struct JsonApiRenderer<A: Adapter> {
	context: RenderContext<A>,
}

impl<A: Adapter> JsonApiRenderer<A> {
	pub fn new(context: RenderContext<A>) -> Self {
		Self { context }
	}

	pub fn context(&self) -> &RenderContext<A> {
		&self.context
	}

	/// Render `payload` into a document.
	pub fn render_document(
		&self,
		payload: Payload<'_, A::Record>,
		options: &RenderOptions,
	) -> RenderResult<Document> {
		self.assemble(payload, options, None)
	}

	/// Render `payload` and additionally sideload `included`, rendered with
	/// `included_options`.
	///
	/// Extra resources that are already part of the document are not
	/// repeated. Their own `record`/`records` relationships are sideloaded
	/// as well. Ignored for error payloads.
	pub fn render_with_included(
		&self,
		payload: Payload<'_, A::Record>,
		options: &RenderOptions,
		included: &[A::Record],
		included_options: &RenderOptions,
	) -> RenderResult<Document> {
		self.assemble(payload, options, Some((included, included_options)))
	}

	/// Render one error object.
	pub fn render_error(&self, error: &ApiError) -> ErrorObject {
		let settings = self.context.settings();
		let id = error.id.clone().or_else(|| {
			settings
				.generate_error_ids
				.then(|| Uuid::new_v4().to_string())
		});
		let meta = match (&error.debug, settings.debug) {
			(Some(debug), true) => Some(json!({ "debug": debug })),
			_ => None,
		};

		ErrorObject {
			id,
			status: error.status,
			code: error
				.code
				.clone()
				.unwrap_or_else(|| settings.default_error_code.clone()),
			title: error.title.clone(),
			detail: error.message.clone(),
			source: error.field.as_deref().map(ErrorSource::attribute),
			meta,
			links: error.about.clone().map(|about| ErrorLinks { about }),
		}
	}

	fn assemble(
		&self,
		payload: Payload<'_, A::Record>,
		options: &RenderOptions,
		extra: Option<(&[A::Record], &RenderOptions)>,
	) -> RenderResult<Document> {
		debug!(
			payload = payload.shape(),
			type_name = options.type_name.as_deref().unwrap_or("-"),
			renderer = "jsonapi",
			"Rendering payload"
		);
		let mut document = Document::new(self.context.settings().jsonapi_version.clone());
		let mut tracker = IncludedTracker::new(self.context.settings().max_include_depth);

		match payload {
			Payload::Error(error) => {
				document.errors = Some(vec![self.render_error(error)]);
			}
			Payload::Errors(errors) => {
				document.errors = Some(errors.iter().map(|e| self.render_error(e)).collect());
			}
			Payload::Record(record) => {
				tracker.mark_primary(self.identify(record, options)?);
				let resource = self.render_resource(record, options, 0, &mut tracker)?;
				document.data = Some(PrimaryData::One(Box::new(resource)));
			}
			Payload::Records(records) => {
				for record in records {
					tracker.mark_primary(self.identify(record, options)?);
				}
				let resources = records
					.iter()
					.map(|record| self.render_resource(record, options, 0, &mut tracker))
					.collect::<RenderResult<Vec<_>>>()?;
				document.data = Some(PrimaryData::Many(resources));
			}
		}

		if let (false, Some((records, extra_options))) = (payload.is_error(), extra) {
			for record in records {
				let identifier = self.identify(record, extra_options)?;
				let slot = match tracker.claim(&identifier, 1) {
					Claim::New(slot) | Claim::Shallower(slot) => slot,
					Claim::Seen => {
						debug!(resource = %identifier, "Requested resource already in document");
						continue;
					}
				};
				let resource = self.render_resource(record, extra_options, 1, &mut tracker)?;
				tracker.fill(slot, resource);
			}
		}

		document.included = tracker.into_included();
		document.meta = options.meta.clone();
		document.links = options.links.clone();
		Ok(document)
	}

	fn identify(&self, record: &A::Record, options: &RenderOptions) -> RenderResult<ResourceIdentifier> {
		let adapter = self.context.adapter();
		Ok(ResourceIdentifier::new(
			adapter.type_for_record(record, options)?,
			adapter.id_for_record(record, options)?,
		))
	}

	/// Render a record as a resource object, sideloading its embedded
	/// relationships. `depth` is 0 for primary data.
	fn render_resource(
		&self,
		record: &A::Record,
		options: &RenderOptions,
		depth: usize,
		tracker: &mut IncludedTracker,
	) -> RenderResult<ResourceObject> {
		let adapter = self.context.adapter();
		let (type_name, serializer) = self.context.serializer_for(record, options)?;
		let id = adapter.id_for_record(record, options)?;

		let attributes = serializer.serialize_attributes(adapter, record, options)?;

		let mut relationships = IndexMap::new();
		for (key, relationship) in serializer.serialize_relationships(adapter, record, options)? {
			let links = serializer.relationship_links(&relationship, &type_name, &id);
			let related_options = options.for_related(&relationship.type_name);
			let data = match &relationship.data {
				RelationshipData::Id(related_id) => Linkage::One(ResourceIdentifier::new(
					relationship.type_name.clone(),
					related_id.clone(),
				)),
				RelationshipData::Ids(related_ids) => Linkage::Many(
					related_ids
						.iter()
						.map(|related_id| {
							ResourceIdentifier::new(relationship.type_name.clone(), related_id.clone())
						})
						.collect(),
				),
				RelationshipData::Record(related) => {
					Linkage::One(self.sideload(related, &related_options, depth + 1, tracker)?)
				}
				RelationshipData::Records(related) => {
					let mut identifiers = Vec::with_capacity(related.len());
					for record in related {
						identifiers.push(self.sideload(record, &related_options, depth + 1, tracker)?);
					}
					Linkage::Many(identifiers)
				}
			};
			relationships.insert(
				key,
				RelationshipObject {
					data,
					links,
					meta: relationship.meta.clone(),
				},
			);
		}

		let links = serializer.links_for_record(&type_name, &id).map(|href| {
			let mut links = Map::new();
			links.insert("self".to_string(), Value::from(href));
			links
		});
		let meta = serializer.meta_for_record(record);

		Ok(ResourceObject {
			type_name,
			id,
			attributes: (!attributes.is_empty()).then_some(attributes),
			relationships: (!relationships.is_empty()).then_some(relationships),
			links,
			meta,
		})
	}

	/// Add a related record to `included` unless the document already has
	/// it, and return its identifier for the linkage.
	fn sideload(
		&self,
		record: &A::Record,
		options: &RenderOptions,
		depth: usize,
		tracker: &mut IncludedTracker,
	) -> RenderResult<ResourceIdentifier> {
		let identifier = self.identify(record, options)?;

		if let Some(max_depth) = self.context.settings().max_include_depth {
			if depth > max_depth {
				trace!(resource = %identifier, depth, "Include depth exceeded, linkage only");
				return Ok(identifier);
			}
		}

		let slot = match tracker.claim(&identifier, depth) {
			Claim::New(slot) => {
				debug!(resource = %identifier, depth, "Sideloading resource");
				slot
			}
			Claim::Shallower(slot) => {
				debug!(
					resource = %identifier,
					depth,
					"Resource reached by a shorter path, walking it again"
				);
				slot
			}
			Claim::Seen => {
				debug!(resource = %identifier, "Resource already in document");
				return Ok(identifier);
			}
		};
		let resource = self.render_resource(record, options, depth, tracker)?;
		tracker.fill(slot, resource);
		Ok(identifier)
	}
}

impl<A: Adapter> Renderer for JsonApiRenderer<A> {
	type Record = A::Record;
	type Output = Document;

	fn render(
		&self,
		payload: Payload<'_, A::Record>,
		options: &RenderOptions,
	) -> RenderResult<Document> {
		self.render_document(payload, options)
	}
}

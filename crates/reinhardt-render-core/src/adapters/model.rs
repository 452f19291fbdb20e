//! Adapter for ORM-style models
//!
//! Models expose their fields through the object-safe [`Model`] trait.
//! Relations may be unloaded (only foreign keys are known) or loaded
//! (related models were fetched alongside the parent), mirroring how an ORM
//! hands back lazy and eagerly loaded associations.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::adapter::Adapter;
use crate::error::{RenderError, RenderResult};
use crate::identifier::ResourceId;
use crate::options::RenderOptions;
use crate::parsed::ParsedResource;
use crate::relationship::{RelationshipConfig, RelationshipDescriptor};

/// A model instance that can be rendered.
pub trait Model: Send + Sync {
	/// Resource type of the model, e.g. `"books"`.
	fn resource_type(&self) -> &str;

	fn resource_id(&self) -> ResourceId;

	/// Value of attribute `name`, `None` when the model has no such attribute.
	fn attribute(&self, name: &str) -> Option<Value>;

	/// Relation `name`, `None` when the model has no such relation.
	fn relation(&self, _name: &str) -> Option<Relation> {
		None
	}
}

/// Shared handle to a model instance.
pub type ModelRecord = Arc<dyn Model>;

/// Foreign keys of an unloaded relation.
#[derive(Debug, Clone, PartialEq)]
pub enum RelatedIds {
	One(Option<ResourceId>),
	Many(Vec<ResourceId>),
}

/// Related models of a loaded relation.
#[derive(Clone)]
pub enum RelatedModels {
	One(Option<ModelRecord>),
	Many(Vec<ModelRecord>),
}

impl fmt::Debug for RelatedModels {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RelatedModels::One(model) => f
				.debug_tuple("One")
				.field(&model.as_ref().map(|model| model.resource_id()))
				.finish(),
			RelatedModels::Many(models) => f
				.debug_tuple("Many")
				.field(&models.iter().map(|model| model.resource_id()).collect::<Vec<_>>())
				.finish(),
		}
	}
}

/// State of one relation of a model.
#[derive(Debug, Clone)]
pub enum Relation {
	Unloaded(RelatedIds),
	Loaded(RelatedModels),
}

/// Builds a model from an inbound resource object.
pub type ModelFactory = Arc<dyn Fn(&ParsedResource) -> RenderResult<ModelRecord> + Send + Sync>;

/// Adapter over [`ModelRecord`]s.
///
/// A loaded relation yields both ids and records, so it satisfies every
/// strategy; an unloaded relation only satisfies the id strategies.
#[derive(Clone, Default)]
pub struct ModelAdapter {
	factory: Option<ModelFactory>,
}

impl fmt::Debug for ModelAdapter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModelAdapter")
			.field("factory", &self.factory.is_some())
			.finish()
	}
}

impl ModelAdapter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Use `factory` to build models from parsed resources.
	pub fn with_factory<F>(mut self, factory: F) -> Self
	where
		F: Fn(&ParsedResource) -> RenderResult<ModelRecord> + Send + Sync + 'static,
	{
		self.factory = Some(Arc::new(factory));
		self
	}
}

impl Adapter for ModelAdapter {
	type Record = ModelRecord;

	fn type_for_record(&self, record: &ModelRecord, _options: &RenderOptions) -> RenderResult<String> {
		Ok(record.resource_type().to_string())
	}

	fn id_for_record(&self, record: &ModelRecord, _options: &RenderOptions) -> RenderResult<ResourceId> {
		Ok(record.resource_id())
	}

	fn attribute_from_record(
		&self,
		record: &ModelRecord,
		name: &str,
		_options: &RenderOptions,
	) -> RenderResult<Option<Value>> {
		Ok(record.attribute(name))
	}

	fn relationship_from_record<'r>(
		&self,
		record: &'r ModelRecord,
		name: &str,
		config: &RelationshipConfig,
		_options: &RenderOptions,
	) -> RenderResult<RelationshipDescriptor<'r, ModelRecord>> {
		let type_name = config.type_name.as_str();
		let descriptor = match record.relation(name) {
			None => RelationshipDescriptor::new(config.strategy.expected_kind(), type_name),
			Some(Relation::Unloaded(RelatedIds::One(id))) => {
				let descriptor = RelationshipDescriptor::has_one(type_name);
				match id {
					Some(id) => descriptor.with_id(id),
					None => descriptor,
				}
			}
			Some(Relation::Unloaded(RelatedIds::Many(ids))) => {
				RelationshipDescriptor::has_many(type_name).with_ids(ids)
			}
			Some(Relation::Loaded(RelatedModels::One(model))) => {
				let descriptor = RelationshipDescriptor::has_one(type_name);
				match model {
					Some(model) => descriptor
						.with_id(model.resource_id())
						.with_owned_record(model),
					None => descriptor,
				}
			}
			Some(Relation::Loaded(RelatedModels::Many(models))) => {
				RelationshipDescriptor::has_many(type_name)
					.with_ids(models.iter().map(|model| model.resource_id()).collect::<Vec<_>>())
					.with_owned_records(models)
			}
		};
		Ok(descriptor)
	}

	fn record_from_resource(
		&self,
		resource: &ParsedResource,
		_options: &RenderOptions,
	) -> RenderResult<ModelRecord> {
		match &self.factory {
			Some(factory) => factory(resource),
			None => Err(RenderError::not_implemented("record_from_resource")),
		}
	}
}

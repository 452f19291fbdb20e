//! Relationship configuration and descriptors
//!
//! A serializer declares *how* a relationship should appear in output through
//! a [`RelationshipConfig`]. An adapter answers *what* the relationship holds
//! for a given record through a [`RelationshipDescriptor`]. The serializer
//! checks the two against each other and keeps only the data the strategy
//! asks for, producing a [`SerializedRelationship`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

use crate::identifier::ResourceId;
use crate::links::LinkTemplate;

/// Cardinality of a relationship as reported by an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
	/// To-one relationship
	#[serde(rename = "hasOne")]
	HasOne,
	/// To-many relationship
	#[serde(rename = "hasMany")]
	HasMany,
}

impl fmt::Display for RelationshipKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RelationshipKind::HasOne => f.write_str("hasOne"),
			RelationshipKind::HasMany => f.write_str("hasMany"),
		}
	}
}

/// How a relationship is represented in the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
	/// Only the related record's id (to-one)
	Id,
	/// Only the related records' ids (to-many)
	Ids,
	/// The related record itself (to-one)
	Record,
	/// The related records themselves (to-many)
	Records,
}

impl Strategy {
	/// `id` and `record` describe a single related resource.
	pub fn is_singular(self) -> bool {
		matches!(self, Strategy::Id | Strategy::Record)
	}

	/// `record` and `records` embed (or sideload) the related records.
	pub fn embeds_records(self) -> bool {
		matches!(self, Strategy::Record | Strategy::Records)
	}

	/// The relationship kind this strategy is valid for.
	pub fn expected_kind(self) -> RelationshipKind {
		if self.is_singular() {
			RelationshipKind::HasOne
		} else {
			RelationshipKind::HasMany
		}
	}

	/// Check whether this strategy can be applied to a relationship of `kind`.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_render_core::{RelationshipKind, Strategy};
	///
	/// assert!(Strategy::Id.accepts(RelationshipKind::HasOne));
	/// assert!(!Strategy::Id.accepts(RelationshipKind::HasMany));
	/// assert!(Strategy::Records.accepts(RelationshipKind::HasMany));
	/// ```
	pub fn accepts(self, kind: RelationshipKind) -> bool {
		self.expected_kind() == kind
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Strategy::Id => "id",
			Strategy::Ids => "ids",
			Strategy::Record => "record",
			Strategy::Records => "records",
		};
		f.write_str(name)
	}
}

/// Per-relationship serializer configuration.
///
/// # Examples
///
/// ```
/// use reinhardt_render_core::{RelationshipConfig, Strategy};
///
/// let config = RelationshipConfig::record("users")
///     .related_link("/books/{id}/author")
///     .relationship_link("/books/{id}/relationships/author");
/// assert_eq!(config.strategy, Strategy::Record);
/// assert_eq!(config.type_name, "users");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipConfig {
	/// Representation of the relationship
	pub strategy: Strategy,
	/// Type of the related records
	#[serde(rename = "type")]
	pub type_name: String,
	/// URI template for the relationship itself (`links.self`)
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub relationship_link: Option<LinkTemplate>,
	/// URI template for the related resources (`links.related`)
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub related_link: Option<LinkTemplate>,
}

impl RelationshipConfig {
	/// Create a config with the given strategy and related type.
	pub fn new(strategy: Strategy, type_name: impl Into<String>) -> Self {
		Self {
			strategy,
			type_name: type_name.into(),
			relationship_link: None,
			related_link: None,
		}
	}

	/// Shorthand for an `id` relationship.
	pub fn id(type_name: impl Into<String>) -> Self {
		Self::new(Strategy::Id, type_name)
	}

	/// Shorthand for an `ids` relationship.
	pub fn ids(type_name: impl Into<String>) -> Self {
		Self::new(Strategy::Ids, type_name)
	}

	/// Shorthand for a `record` relationship.
	pub fn record(type_name: impl Into<String>) -> Self {
		Self::new(Strategy::Record, type_name)
	}

	/// Shorthand for a `records` relationship.
	pub fn records(type_name: impl Into<String>) -> Self {
		Self::new(Strategy::Records, type_name)
	}

	/// Set the relationship link template.
	pub fn relationship_link(mut self, template: impl Into<LinkTemplate>) -> Self {
		self.relationship_link = Some(template.into());
		self
	}

	/// Set the related link template.
	pub fn related_link(mut self, template: impl Into<LinkTemplate>) -> Self {
		self.related_link = Some(template.into());
		self
	}
}

/// What an adapter knows about one relationship of one record.
///
/// Related records are held as [`Cow`] so an adapter can lend records that
/// live inside the parent instead of cloning them.
#[derive(Debug, Clone)]
pub struct RelationshipDescriptor<'r, R: Clone> {
	/// Cardinality of the relationship
	pub kind: RelationshipKind,
	/// Type of the related records
	pub type_name: String,
	/// Related id (to-one)
	pub id: Option<ResourceId>,
	/// Related ids (to-many)
	pub ids: Option<Vec<ResourceId>>,
	/// Related record (to-one)
	pub record: Option<Cow<'r, R>>,
	/// Related records (to-many)
	pub records: Option<Vec<Cow<'r, R>>>,
	/// Relationship-level meta
	pub meta: Option<Value>,
}

impl<'r, R: Clone> RelationshipDescriptor<'r, R> {
	/// Create an empty descriptor of the given kind.
	pub fn new(kind: RelationshipKind, type_name: impl Into<String>) -> Self {
		Self {
			kind,
			type_name: type_name.into(),
			id: None,
			ids: None,
			record: None,
			records: None,
			meta: None,
		}
	}

	/// Create an empty to-one descriptor.
	pub fn has_one(type_name: impl Into<String>) -> Self {
		Self::new(RelationshipKind::HasOne, type_name)
	}

	/// Create an empty to-many descriptor.
	pub fn has_many(type_name: impl Into<String>) -> Self {
		Self::new(RelationshipKind::HasMany, type_name)
	}

	pub fn with_id(mut self, id: impl Into<ResourceId>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn with_ids<I>(mut self, ids: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<ResourceId>,
	{
		self.ids = Some(ids.into_iter().map(Into::into).collect());
		self
	}

	/// Lend a related record owned by the caller.
	pub fn with_record(mut self, record: &'r R) -> Self {
		self.record = Some(Cow::Borrowed(record));
		self
	}

	/// Hand over an owned related record.
	pub fn with_owned_record(mut self, record: R) -> Self {
		self.record = Some(Cow::Owned(record));
		self
	}

	/// Lend related records owned by the caller.
	pub fn with_records<I>(mut self, records: I) -> Self
	where
		I: IntoIterator<Item = &'r R>,
		R: 'r,
	{
		self.records = Some(records.into_iter().map(Cow::Borrowed).collect());
		self
	}

	/// Hand over owned related records.
	pub fn with_owned_records(mut self, records: Vec<R>) -> Self {
		self.records = Some(records.into_iter().map(Cow::Owned).collect());
		self
	}

	pub fn with_meta(mut self, meta: Value) -> Self {
		self.meta = Some(meta);
		self
	}
}

/// The strategy-selected data of a validated relationship.
#[derive(Debug, Clone)]
pub enum RelationshipData<'r, R: Clone> {
	Id(ResourceId),
	Ids(Vec<ResourceId>),
	Record(Cow<'r, R>),
	Records(Vec<Cow<'r, R>>),
}

impl<'r, R: Clone> RelationshipData<'r, R> {
	/// The strategy this data was selected for.
	pub fn strategy(&self) -> Strategy {
		match self {
			RelationshipData::Id(_) => Strategy::Id,
			RelationshipData::Ids(_) => Strategy::Ids,
			RelationshipData::Record(_) => Strategy::Record,
			RelationshipData::Records(_) => Strategy::Records,
		}
	}
}

/// A relationship after validation and normalization by a serializer.
///
/// Renderers can rely on `data` matching `strategy` and `kind`.
#[derive(Debug, Clone)]
pub struct SerializedRelationship<'r, R: Clone> {
	/// Relationship name as configured
	pub name: String,
	/// Output key after key formatting
	pub key: String,
	/// Type of the related records
	pub type_name: String,
	pub kind: RelationshipKind,
	pub strategy: Strategy,
	pub data: RelationshipData<'r, R>,
	pub relationship_link: Option<LinkTemplate>,
	pub related_link: Option<LinkTemplate>,
	pub meta: Option<Value>,
}

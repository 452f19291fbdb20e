//! Resource objects parsed from inbound documents

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::identifier::{ResourceId, ResourceIdentifier};

/// Linkage of one relationship in an inbound resource object.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLinkage {
	/// To-one linkage; `None` clears the relationship
	One(Option<ResourceIdentifier>),
	/// To-many linkage
	Many(Vec<ResourceIdentifier>),
}

impl ParsedLinkage {
	/// Ids of the linked resources, in order.
	pub fn ids(&self) -> Vec<&ResourceId> {
		match self {
			ParsedLinkage::One(Some(identifier)) => vec![&identifier.id],
			ParsedLinkage::One(None) => Vec::new(),
			ParsedLinkage::Many(identifiers) => identifiers.iter().map(|i| &i.id).collect(),
		}
	}
}

/// A resource object with keys already converted to the host's casing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResource {
	pub type_name: String,
	/// Absent for resources created by the client without an id
	pub id: Option<ResourceId>,
	pub attributes: Map<String, Value>,
	pub relationships: IndexMap<String, ParsedLinkage>,
}

impl ParsedResource {
	pub fn new(type_name: impl Into<String>) -> Self {
		Self {
			type_name: type_name.into(),
			id: None,
			attributes: Map::new(),
			relationships: IndexMap::new(),
		}
	}

	pub fn attribute(&self, name: &str) -> Option<&Value> {
		self.attributes.get(name)
	}

	pub fn relationship(&self, name: &str) -> Option<&ParsedLinkage> {
		self.relationships.get(name)
	}
}

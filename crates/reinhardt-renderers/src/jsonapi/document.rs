//! JSON:API document types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use reinhardt_render_core::{RenderResult, ResourceId, ResourceIdentifier};

/// A top-level JSON:API document.
///
/// `data` and `errors` are never both set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<PrimaryData>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub included: Vec<ResourceObject>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub errors: Option<Vec<ErrorObject>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<Map<String, Value>>,
	pub jsonapi: JsonApiObject,
}

impl Document {
	/// An empty document stamped with `version`.
	pub fn new(version: impl Into<String>) -> Self {
		Self {
			data: None,
			included: Vec::new(),
			errors: None,
			meta: None,
			links: None,
			jsonapi: JsonApiObject {
				version: version.into(),
			},
		}
	}

	pub fn is_error(&self) -> bool {
		self.errors.is_some()
	}

	/// Look up a sideloaded resource by identifier.
	pub fn find_included(&self, type_name: &str, id: &ResourceId) -> Option<&ResourceObject> {
		self.included
			.iter()
			.find(|resource| resource.type_name == type_name && &resource.id == id)
	}

	pub fn to_value(&self) -> RenderResult<Value> {
		Ok(serde_json::to_value(self)?)
	}

	pub fn to_json_string(&self) -> RenderResult<String> {
		Ok(serde_json::to_string(self)?)
	}
}

/// The `jsonapi` member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonApiObject {
	pub version: String,
}

/// Primary data: one resource or a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
	Many(Vec<ResourceObject>),
	One(Box<ResourceObject>),
}

impl PrimaryData {
	/// Primary resources in document order.
	pub fn resources(&self) -> Vec<&ResourceObject> {
		match self {
			PrimaryData::One(resource) => vec![resource.as_ref()],
			PrimaryData::Many(resources) => resources.iter().collect(),
		}
	}
}

/// A rendered record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
	#[serde(rename = "type")]
	pub type_name: String,
	pub id: ResourceId,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub attributes: Option<Map<String, Value>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub relationships: Option<IndexMap<String, RelationshipObject>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<Map<String, Value>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta: Option<Value>,
}

impl ResourceObject {
	pub fn identifier(&self) -> ResourceIdentifier {
		ResourceIdentifier::new(self.type_name.clone(), self.id.clone())
	}
}

/// A relationship of a rendered record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipObject {
	pub data: Linkage,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<Map<String, Value>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta: Option<Value>,
}

/// Resource linkage of a relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
	One(ResourceIdentifier),
	Many(Vec<ResourceIdentifier>),
}

impl Linkage {
	pub fn identifiers(&self) -> Vec<&ResourceIdentifier> {
		match self {
			Linkage::One(identifier) => vec![identifier],
			Linkage::Many(identifiers) => identifiers.iter().collect(),
		}
	}
}

/// A rendered error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	pub status: u16,
	pub code: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	pub detail: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub source: Option<ErrorSource>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub meta: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<ErrorLinks>,
}

/// Where in the request document an error originated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSource {
	/// JSON pointer, e.g. `/data/attributes/title`
	pub pointer: String,
}

impl ErrorSource {
	/// Pointer to attribute `field` of the primary data.
	pub fn attribute(field: &str) -> Self {
		Self {
			pointer: format!("/data/attributes/{}", field),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorLinks {
	pub about: String,
}

//! Resource ids and resource identifiers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{RenderError, RenderResult};

/// A record id as it appears on the wire.
///
/// Numeric ids stay numeric and string ids stay strings, so `1` and `"1"` are
/// different ids.
///
/// # Examples
///
/// ```
/// use reinhardt_render_core::ResourceId;
///
/// let id = ResourceId::from(1);
/// assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!(1));
/// assert_eq!(ResourceId::from("abc").to_string(), "abc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
	/// Integer primary key
	Int(i64),
	/// String primary key (UUIDs, slugs, ...)
	Str(String),
}

impl ResourceId {
	/// Convert to a JSON value.
	pub fn to_value(&self) -> Value {
		match self {
			ResourceId::Int(id) => Value::from(*id),
			ResourceId::Str(id) => Value::from(id.as_str()),
		}
	}
}

impl fmt::Display for ResourceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ResourceId::Int(id) => write!(f, "{}", id),
			ResourceId::Str(id) => f.write_str(id),
		}
	}
}

impl From<i64> for ResourceId {
	fn from(id: i64) -> Self {
		ResourceId::Int(id)
	}
}

impl From<i32> for ResourceId {
	fn from(id: i32) -> Self {
		ResourceId::Int(i64::from(id))
	}
}

impl From<&str> for ResourceId {
	fn from(id: &str) -> Self {
		ResourceId::Str(id.to_string())
	}
}

impl From<String> for ResourceId {
	fn from(id: String) -> Self {
		ResourceId::Str(id)
	}
}

impl TryFrom<&Value> for ResourceId {
	type Error = RenderError;

	fn try_from(value: &Value) -> RenderResult<Self> {
		match value {
			Value::String(id) => Ok(ResourceId::Str(id.clone())),
			Value::Number(n) => match n.as_i64() {
				Some(id) => Ok(ResourceId::Int(id)),
				None if n.is_u64() => Err(RenderError::invalid_record(format!(
					"id {} is out of range for an integer id",
					n
				))),
				None => Err(RenderError::invalid_record(format!("id {} is not an integer", n))),
			},
			other => Err(RenderError::invalid_record(format!(
				"id must be a string or an integer, got {}",
				other
			))),
		}
	}
}

/// The `(type, id)` pair identifying a resource.
///
/// Two identifiers are equal iff both fields match; this is the dedup key for
/// sideloaded resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
	/// Resource type, e.g. `"books"`
	#[serde(rename = "type")]
	pub type_name: String,
	/// Resource id
	pub id: ResourceId,
}

impl ResourceIdentifier {
	/// Create a new identifier.
	pub fn new(type_name: impl Into<String>, id: impl Into<ResourceId>) -> Self {
		Self {
			type_name: type_name.into(),
			id: id.into(),
		}
	}
}

impl fmt::Display for ResourceIdentifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.type_name, self.id)
	}
}

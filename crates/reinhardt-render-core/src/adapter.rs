//! The adapter capability set
//!
//! Adapters let the renderers read records regardless of where the records
//! come from. They are a thin translation layer between a data-access layer
//! and the serializers: the core never looks at a record directly.
//!
//! Every method has a default body that fails with
//! [`RenderError::NotImplemented`], so an adapter only overrides what its
//! data layer can answer.

use serde_json::Value;

use crate::error::{RenderError, RenderResult};
use crate::identifier::ResourceId;
use crate::options::RenderOptions;
use crate::parsed::ParsedResource;
use crate::relationship::{RelationshipConfig, RelationshipDescriptor};

/// Reads type, id, attributes and relationships off records.
///
/// Adapters are shared read-only across concurrent renders and must not hold
/// per-render state.
///
/// # Examples
///
/// ```
/// use reinhardt_render_core::{
///     Adapter, RelationshipConfig, RenderOptions, RenderResult, ResourceId,
/// };
/// use serde_json::Value;
///
/// #[derive(Clone)]
/// struct Book {
///     id: i64,
///     title: String,
/// }
///
/// struct BookAdapter;
///
/// impl Adapter for BookAdapter {
///     type Record = Book;
///
///     fn type_for_record(&self, _: &Book, _: &RenderOptions) -> RenderResult<String> {
///         Ok("books".to_string())
///     }
///
///     fn id_for_record(&self, book: &Book, _: &RenderOptions) -> RenderResult<ResourceId> {
///         Ok(ResourceId::Int(book.id))
///     }
///
///     fn attribute_from_record(
///         &self,
///         book: &Book,
///         name: &str,
///         _: &RenderOptions,
///     ) -> RenderResult<Option<Value>> {
///         Ok(match name {
///             "title" => Some(Value::from(book.title.as_str())),
///             _ => None,
///         })
///     }
/// }
///
/// let book = Book { id: 1, title: "Human Action".to_string() };
/// let options = RenderOptions::new();
/// assert_eq!(BookAdapter.type_for_record(&book, &options).unwrap(), "books");
/// // Relationships were not overridden
/// let config = RelationshipConfig::id("users");
/// assert!(BookAdapter
///     .relationship_from_record(&book, "author", &config, &options)
///     .is_err());
/// ```
pub trait Adapter: Send + Sync {
	/// The record type this adapter reads.
	type Record: Clone;

	/// Return the type of `record`.
	fn type_for_record(
		&self,
		_record: &Self::Record,
		_options: &RenderOptions,
	) -> RenderResult<String> {
		Err(RenderError::not_implemented("type_for_record"))
	}

	/// Return the id of `record`.
	fn id_for_record(
		&self,
		_record: &Self::Record,
		_options: &RenderOptions,
	) -> RenderResult<ResourceId> {
		Err(RenderError::not_implemented("id_for_record"))
	}

	/// Return the value of attribute `name`, or `None` when the record has no
	/// such attribute. `Some(Value::Null)` is a present, null value.
	fn attribute_from_record(
		&self,
		_record: &Self::Record,
		_name: &str,
		_options: &RenderOptions,
	) -> RenderResult<Option<Value>> {
		Err(RenderError::not_implemented("attribute_from_record"))
	}

	/// Describe relationship `name` of `record`.
	///
	/// The descriptor's `kind` must reflect the data, not the configured
	/// strategy, so the serializer can catch configuration mismatches.
	fn relationship_from_record<'r>(
		&self,
		_record: &'r Self::Record,
		_name: &str,
		_config: &RelationshipConfig,
		_options: &RenderOptions,
	) -> RenderResult<RelationshipDescriptor<'r, Self::Record>> {
		Err(RenderError::not_implemented("relationship_from_record"))
	}

	/// Instantiate a native record from a parsed resource object.
	fn record_from_resource(
		&self,
		_resource: &ParsedResource,
		_options: &RenderOptions,
	) -> RenderResult<Self::Record> {
		Err(RenderError::not_implemented("record_from_resource"))
	}
}

//! Type to serializer lookup

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::adapter::Adapter;
use crate::error::{RenderError, RenderResult};
use crate::options::RenderOptions;
use crate::serializer::Serializer;

/// Serializers keyed by record type, with an optional application-wide
/// fallback.
///
/// Built once at startup and then shared, usually behind an `Arc`.
///
/// # Examples
///
/// ```
/// use reinhardt_render_core::{RawAdapter, RenderOptions, Serializer, SerializerRegistry};
/// use serde_json::json;
///
/// let registry = SerializerRegistry::new()
///     .register("books", Serializer::new().attributes(["title"]))
///     .application(Serializer::new());
///
/// let options = RenderOptions::new().with_type("books");
/// let (type_name, serializer) = registry
///     .serializer_for(&RawAdapter::new(), &json!({"id": 1}), &options)
///     .unwrap();
/// assert_eq!(type_name, "books");
/// assert_eq!(serializer.attribute_names(), ["title"]);
/// ```
pub struct SerializerRegistry<R = serde_json::Value> {
	serializers: HashMap<String, Serializer<R>>,
	application: Option<Serializer<R>>,
}

impl<R> Clone for SerializerRegistry<R> {
	fn clone(&self) -> Self {
		Self {
			serializers: self.serializers.clone(),
			application: self.application.clone(),
		}
	}
}

impl<R> fmt::Debug for SerializerRegistry<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SerializerRegistry")
			.field("serializers", &self.serializers)
			.field("application", &self.application)
			.finish()
	}
}

impl<R> Default for SerializerRegistry<R> {
	fn default() -> Self {
		Self {
			serializers: HashMap::new(),
			application: None,
		}
	}
}

impl<R> SerializerRegistry<R> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register the serializer for `type_name`, replacing any previous one.
	pub fn register(mut self, type_name: impl Into<String>, serializer: Serializer<R>) -> Self {
		self.serializers.insert(type_name.into(), serializer);
		self
	}

	/// Set the serializer used for types without a registered serializer.
	pub fn application(mut self, serializer: Serializer<R>) -> Self {
		self.application = Some(serializer);
		self
	}

	/// Serializer registered for exactly `type_name`.
	pub fn get(&self, type_name: &str) -> Option<&Serializer<R>> {
		self.serializers.get(type_name)
	}

	/// Serializer for `type_name`, falling back to the application
	/// serializer.
	pub fn lookup(&self, type_name: &str) -> RenderResult<&Serializer<R>> {
		if let Some(serializer) = self.serializers.get(type_name) {
			return Ok(serializer);
		}
		match &self.application {
			Some(serializer) => {
				debug!(type_name = %type_name, "Using application serializer");
				Ok(serializer)
			}
			None => Err(RenderError::MissingSerializer {
				type_name: type_name.to_string(),
			}),
		}
	}

	/// Resolve the type of `record` through the adapter and return it with
	/// the serializer to use.
	///
	/// # Errors
	///
	/// Returns [`RenderError::MissingSerializer`] when the type has no
	/// serializer and no application serializer is configured.
	pub fn serializer_for<A>(
		&self,
		adapter: &A,
		record: &R,
		options: &RenderOptions,
	) -> RenderResult<(String, &Serializer<R>)>
	where
		A: Adapter<Record = R> + ?Sized,
	{
		let type_name = adapter.type_for_record(record, options)?;
		let serializer = self.lookup(&type_name)?;
		Ok((type_name, serializer))
	}

	pub fn len(&self) -> usize {
		self.serializers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.serializers.is_empty()
	}
}

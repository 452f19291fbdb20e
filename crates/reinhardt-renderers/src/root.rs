//! Root renderer
//!
//! Wraps the flat rendering under a key named after the primary type:
//! `{"books": {...}}` or `{"books": [...]}`.

use serde_json::{Map, Value};
use tracing::debug;

use reinhardt_render_core::{Adapter, Payload, RenderError, RenderOptions, RenderResult};

use crate::flat::FlatRenderer;
use crate::renderer::{RenderContext, Renderer};

/// Renders records flat, namespaced under their type.
///
/// For an empty collection there is no record to take the type from, so the
/// `type_name` hint of the render options is used. Errors are rendered as
/// the flat renderer does, without a wrapping key.
#[derive(Debug, Clone)]
pub struct RootRenderer<A: Adapter> {
	flat: FlatRenderer<A>,
}

impl<A: Adapter> RootRenderer<A> {
	pub fn new(context: RenderContext<A>) -> Self {
		Self {
			flat: FlatRenderer::new(context),
		}
	}

	pub fn context(&self) -> &RenderContext<A> {
		self.flat.context()
	}

	fn wrap(type_name: String, value: Value) -> Value {
		let mut root = Map::new();
		root.insert(type_name, value);
		Value::Object(root)
	}
}

impl<A: Adapter> Renderer for RootRenderer<A> {
	type Record = A::Record;
	type Output = Value;

	fn render(&self, payload: Payload<'_, A::Record>, options: &RenderOptions) -> RenderResult<Value> {
		debug!(payload = payload.shape(), renderer = "root", "Rendering payload");
		let adapter = self.context().adapter();
		match payload {
			Payload::Record(record) => {
				let type_name = adapter.type_for_record(record, options)?;
				Ok(Self::wrap(type_name, self.flat.render_record(record, options)?))
			}
			Payload::Records(records) => {
				let type_name = match records.first() {
					Some(first) => adapter.type_for_record(first, options)?,
					None => options.type_name.clone().ok_or(RenderError::MissingType)?,
				};
				Ok(Self::wrap(type_name, self.flat.render_records(records, options)?))
			}
			Payload::Error(_) | Payload::Errors(_) => self.flat.render(payload, options),
		}
	}
}

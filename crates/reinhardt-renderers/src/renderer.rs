//! Renderer trait and shared render context

use std::fmt;
use std::sync::Arc;

use reinhardt_render_core::{
	Adapter, Payload, RenderOptions, RenderResult, RenderSettings, Serializer, SerializerRegistry,
};

/// Turns a payload into a document.
///
/// Renderers are stateless between calls and can be shared across threads.
pub trait Renderer: Send + Sync {
	/// Record type of the payloads this renderer accepts
	type Record;
	/// Document type produced
	type Output;

	fn render(
		&self,
		payload: Payload<'_, Self::Record>,
		options: &RenderOptions,
	) -> RenderResult<Self::Output>;
}

/// What every renderer needs: an adapter, the serializers and settings.
///
/// All parts are behind `Arc`, so cloning a context is cheap and clones
/// share configuration.
pub struct RenderContext<A: Adapter> {
	adapter: Arc<A>,
	serializers: Arc<SerializerRegistry<A::Record>>,
	settings: Arc<RenderSettings>,
}

impl<A: Adapter> Clone for RenderContext<A> {
	fn clone(&self) -> Self {
		Self {
			adapter: Arc::clone(&self.adapter),
			serializers: Arc::clone(&self.serializers),
			settings: Arc::clone(&self.settings),
		}
	}
}

impl<A: Adapter> fmt::Debug for RenderContext<A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RenderContext")
			.field("serializers", &self.serializers)
			.field("settings", &self.settings)
			.finish_non_exhaustive()
	}
}

impl<A: Adapter> RenderContext<A> {
	/// Create a context with default settings.
	pub fn new(adapter: A, serializers: SerializerRegistry<A::Record>) -> Self {
		Self::from_shared(
			Arc::new(adapter),
			Arc::new(serializers),
			Arc::new(RenderSettings::default()),
		)
	}

	/// Create a context from already shared parts.
	pub fn from_shared(
		adapter: Arc<A>,
		serializers: Arc<SerializerRegistry<A::Record>>,
		settings: Arc<RenderSettings>,
	) -> Self {
		Self {
			adapter,
			serializers,
			settings,
		}
	}

	pub fn with_settings(mut self, settings: RenderSettings) -> Self {
		self.settings = Arc::new(settings);
		self
	}

	pub fn adapter(&self) -> &A {
		&self.adapter
	}

	pub fn serializers(&self) -> &SerializerRegistry<A::Record> {
		&self.serializers
	}

	pub fn settings(&self) -> &RenderSettings {
		&self.settings
	}

	/// Resolve the type of `record` and the serializer to render it with.
	pub fn serializer_for(
		&self,
		record: &A::Record,
		options: &RenderOptions,
	) -> RenderResult<(String, &Serializer<A::Record>)> {
		self.serializers
			.serializer_for(self.adapter.as_ref(), record, options)
	}
}

//! # Reinhardt Render
//!
//! Renders application records into response documents, and parses request
//! documents back.
//!
//! ## Pipeline
//!
//! - an [`Adapter`](core::Adapter) reads type, id, attributes and
//!   relationships off a record, whatever its storage;
//! - a [`Serializer`](core::Serializer), looked up per type in a
//!   [`SerializerRegistry`](core::SerializerRegistry), whitelists attributes
//!   and picks a strategy (`id`, `ids`, `record`, `records`) per
//!   relationship;
//! - a renderer shapes the document: [`FlatRenderer`](renderers::FlatRenderer),
//!   [`RootRenderer`](renderers::RootRenderer) or
//!   [`JsonApiRenderer`](renderers::JsonApiRenderer).
//!
//! Two adapters ship with the crate: [`RawAdapter`](core::RawAdapter) for
//! `serde_json::Value` records and [`ModelAdapter`](core::ModelAdapter) for
//! ORM-style models behind `Arc<dyn Model>`.
//!
//! ## Quick Start
//!
//! ```
//! use reinhardt_render::prelude::*;
//! use serde_json::json;
//!
//! let registry = SerializerRegistry::new()
//!     .register(
//!         "books",
//!         Serializer::new()
//!             .attributes(["title"])
//!             .relationship("author", RelationshipConfig::record("users")),
//!     )
//!     .register("users", Serializer::new().attributes(["name"]));
//! let renderer = JsonApiRenderer::new(RenderContext::new(RawAdapter::new(), registry));
//!
//! let book = json!({"id": 1, "title": "Human Action", "author": {"id": 2, "name": "Ludwig"}});
//! let document = renderer
//!     .render(Payload::Record(&book), &RenderOptions::new().with_type("books"))
//!     .unwrap();
//!
//! assert_eq!(document.included[0].identifier(), ResourceIdentifier::new("users", 2));
//! ```
//!
//! ## Configuration
//!
//! [`RenderSettings`](core::RenderSettings) hold the process-wide knobs (debug
//! output in errors, the advertised JSON:API version, the default error
//! code, error ids, include depth, inbound key casing). They load from TOML
//! or from `REINHARDT_RENDER_*` environment variables.

/// Adapters, serializers, settings and errors.
pub use reinhardt_render_core as core;

/// Flat, root and JSON:API renderers and the JSON:API parser.
pub use reinhardt_renderers as renderers;

pub use reinhardt_render_core::{
	Adapter, ApiError, ModelAdapter, Payload, RawAdapter, RenderError, RenderOptions,
	RenderResult, RenderSettings, Serializer, SerializerRegistry,
};
pub use reinhardt_renderers::{
	Document, FlatRenderer, JsonApiParser, JsonApiRenderer, RenderContext, Renderer, RootRenderer,
};

pub mod prelude {
	// Reading records
	pub use reinhardt_render_core::{
		Adapter, Model, ModelAdapter, ModelRecord, RawAdapter, RelatedIds, RelatedModels,
		Relation, RelationshipDescriptor, RelationshipKind,
	};

	// Serializing
	pub use reinhardt_render_core::{
		KeyFormat, LinkTemplate, RelationshipConfig, Serializer, SerializerConfig,
		SerializerRegistry, Strategy,
	};

	// Rendering
	pub use reinhardt_render_core::{
		ApiError, ParsedLinkage, ParsedResource, Payload, RenderError, RenderOptions,
		RenderResult, RenderSettings, ResourceId, ResourceIdentifier,
	};
	pub use reinhardt_renderers::{
		Document, FlatRenderer, JsonApiParser, JsonApiRenderer, ParsedData, RenderContext,
		Renderer, RootRenderer,
	};
}

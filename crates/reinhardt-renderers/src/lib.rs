//! # Reinhardt Renderers
//!
//! Document renderers built on `reinhardt-render-core`.
//!
//! ## Renderers
//!
//! - [`FlatRenderer`]: a record as one JSON object, relationships collapsed
//!   to ids or nested objects
//! - [`RootRenderer`]: the flat rendering wrapped under the record type
//! - [`JsonApiRenderer`]: a JSON:API document with related records sideloaded
//!   into `included`
//!
//! [`JsonApiParser`] goes the other way, turning request bodies into
//! [`ParsedResource`](reinhardt_render_core::ParsedResource)s.
//!
//! All renderers read records through the [`Adapter`](reinhardt_render_core::Adapter)
//! and serializers held by a [`RenderContext`]. A context is cheap to clone
//! and can be shared across threads; each render call keeps its own state.
//!
//! ## Example
//!
//! ```
//! use reinhardt_render_core::{Payload, RawAdapter, RenderOptions, Serializer, SerializerRegistry};
//! use reinhardt_renderers::{RenderContext, Renderer, RootRenderer};
//! use serde_json::json;
//!
//! let context = RenderContext::new(
//!     RawAdapter::new(),
//!     SerializerRegistry::new().register("books", Serializer::new().attributes(["title"])),
//! );
//! let renderer = RootRenderer::new(context);
//!
//! let books = vec![json!({"id": 1, "title": "Human Action"})];
//! let output = renderer
//!     .render(Payload::Records(&books), &RenderOptions::new().with_type("books"))
//!     .unwrap();
//! assert_eq!(output, json!({"books": [{"id": 1, "title": "Human Action"}]}));
//! ```

pub mod flat;
pub mod jsonapi;
pub mod renderer;
pub mod root;

pub use flat::FlatRenderer;
pub use jsonapi::{
	Document, ErrorLinks, ErrorObject, ErrorSource, JsonApiObject, JsonApiParser, JsonApiRenderer,
	Linkage, ParsedData, PrimaryData, RelationshipObject, ResourceObject,
};
pub use renderer::{RenderContext, Renderer};
pub use root::RootRenderer;

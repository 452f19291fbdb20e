//! # Reinhardt Render Core
//!
//! Record reading and serialization for the Reinhardt document renderers.
//!
//! ## Overview
//!
//! Rendering a record into a response document is split into three parts:
//!
//! - an [`Adapter`] knows how to read a record: its type, its id, an
//!   attribute, or a relationship;
//! - a [`Serializer`] knows what to expose for one record type: an attribute
//!   whitelist and the relationship strategies (`id`, `ids`, `record`,
//!   `records`);
//! - a renderer (see `reinhardt-renderers`) shapes the output document.
//!
//! Serializers are looked up per record type through a
//! [`SerializerRegistry`], with an optional application-wide fallback.
//!
//! ## Example
//!
//! ```
//! use reinhardt_render_core::{
//!     RawAdapter, RelationshipConfig, RenderOptions, Serializer, SerializerRegistry,
//! };
//! use serde_json::json;
//!
//! let registry = SerializerRegistry::new().register(
//!     "books",
//!     Serializer::new()
//!         .attributes(["title"])
//!         .relationship("author", RelationshipConfig::id("users")),
//! );
//!
//! let adapter = RawAdapter::new();
//! let book = json!({"id": 1, "title": "Human Action", "author_id": 2});
//! let options = RenderOptions::new().with_type("books");
//!
//! let (_, serializer) = registry.serializer_for(&adapter, &book, &options).unwrap();
//! let relationships = serializer
//!     .serialize_relationships(&adapter, &book, &options)
//!     .unwrap();
//! assert!(relationships.contains_key("author"));
//! ```

pub mod adapter;
pub mod adapters;
pub mod error;
pub mod identifier;
pub mod key_format;
pub mod links;
pub mod options;
pub mod parsed;
pub mod payload;
pub mod registry;
pub mod relationship;
pub mod serializer;
pub mod settings;

pub use adapter::Adapter;
pub use adapters::{
	Model, ModelAdapter, ModelFactory, ModelRecord, RawAdapter, RelatedIds, RelatedModels, Relation,
};
pub use error::{RenderError, RenderResult, SettingsError};
pub use identifier::{ResourceId, ResourceIdentifier};
pub use key_format::{KeyFn, KeyFormat};
pub use links::LinkTemplate;
pub use options::RenderOptions;
pub use parsed::{ParsedLinkage, ParsedResource};
pub use payload::{ApiError, DEFAULT_ERROR_CODE, DEFAULT_ERROR_STATUS, Payload};
pub use registry::SerializerRegistry;
pub use relationship::{
	RelationshipConfig, RelationshipData, RelationshipDescriptor, RelationshipKind,
	SerializedRelationship, Strategy,
};
pub use serializer::{MetaHook, Serializer, SerializerConfig, ValueTransform};
pub use settings::RenderSettings;

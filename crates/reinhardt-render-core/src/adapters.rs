//! Built-in adapters
//!
//! - [`RawAdapter`] reads plain `serde_json::Value` objects.
//! - [`ModelAdapter`] reads model types that expose their fields and
//!   populated/unpopulated relations through the [`Model`] trait.

pub mod model;
pub mod raw;

pub use model::{
	Model, ModelAdapter, ModelFactory, ModelRecord, RelatedIds, RelatedModels, Relation,
};
pub use raw::RawAdapter;

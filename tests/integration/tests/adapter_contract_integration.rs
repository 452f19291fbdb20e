//! Rendering through user-defined adapters

use std::borrow::Cow;

use assert_json_diff::assert_json_eq;
use reinhardt_render::prelude::*;
use rstest::rstest;
use serde_json::{Value, json};

/// Records of a small catalog backed by plain Rust types.
#[derive(Debug, Clone)]
enum Entry {
	Book {
		id: i64,
		title: String,
		author: Box<Entry>,
		tags: Vec<&'static str>,
	},
	Author {
		id: i64,
		name: String,
	},
}

struct CatalogAdapter;

impl Adapter for CatalogAdapter {
	type Record = Entry;

	fn type_for_record(&self, record: &Entry, _options: &RenderOptions) -> RenderResult<String> {
		Ok(match record {
			Entry::Book { .. } => "books",
			Entry::Author { .. } => "authors",
		}
		.to_string())
	}

	fn id_for_record(&self, record: &Entry, _options: &RenderOptions) -> RenderResult<ResourceId> {
		Ok(match record {
			Entry::Book { id, .. } | Entry::Author { id, .. } => ResourceId::Int(*id),
		})
	}

	fn attribute_from_record(
		&self,
		record: &Entry,
		name: &str,
		_options: &RenderOptions,
	) -> RenderResult<Option<Value>> {
		Ok(match (record, name) {
			(Entry::Book { title, .. }, "title") => Some(json!(title)),
			(Entry::Author { name: author, .. }, "name") => Some(json!(author)),
			_ => None,
		})
	}

	fn relationship_from_record<'r>(
		&self,
		record: &'r Entry,
		name: &str,
		config: &RelationshipConfig,
		_options: &RenderOptions,
	) -> RenderResult<RelationshipDescriptor<'r, Entry>> {
		let type_name = config.type_name.as_str();
		match (record, name) {
			(Entry::Book { author, .. }, "author") => {
				Ok(RelationshipDescriptor::has_one(type_name).with_record(author.as_ref()))
			}
			(Entry::Book { tags, .. }, "tags") => Ok(RelationshipDescriptor::has_many(type_name)
				.with_ids(tags.iter().map(|tag| ResourceId::from(*tag)).collect::<Vec<_>>())
				.with_meta(json!({"count": tags.len()}))),
			_ => Err(RenderError::invalid_record(format!("no relationship '{}'", name))),
		}
	}
}

fn registry() -> SerializerRegistry<Entry> {
	SerializerRegistry::new()
		.register(
			"books",
			Serializer::new()
				.attributes(["title", "isbn"])
				.relationship("author", RelationshipConfig::record("authors"))
				.relationship("tags", RelationshipConfig::ids("tags")),
		)
		.register("authors", Serializer::new().attributes(["name"]))
}

fn book() -> Entry {
	Entry::Book {
		id: 1,
		title: "Human Action".to_string(),
		author: Box::new(Entry::Author {
			id: 2,
			name: "Ludwig".to_string(),
		}),
		tags: vec!["economics", "praxeology"],
	}
}

#[rstest]
fn test_jsonapi_through_custom_adapter() {
	// Arrange
	let renderer = JsonApiRenderer::new(RenderContext::new(CatalogAdapter, registry()));

	// Act
	let document = renderer
		.render(Payload::Record(&book()), &RenderOptions::new())
		.unwrap();

	// Assert
	assert_json_eq!(
		document.to_value().unwrap(),
		json!({
			"jsonapi": {"version": "1.0"},
			"data": {
				"type": "books",
				"id": 1,
				"attributes": {"title": "Human Action"},
				"relationships": {
					"author": {"data": {"type": "authors", "id": 2}},
					"tags": {
						"data": [{"type": "tags", "id": "economics"}, {"type": "tags", "id": "praxeology"}],
						"meta": {"count": 2}
					}
				}
			},
			"included": [{"type": "authors", "id": 2, "attributes": {"name": "Ludwig"}}]
		})
	);
}

#[rstest]
fn test_flat_through_custom_adapter() {
	// Arrange
	let renderer = FlatRenderer::new(RenderContext::new(CatalogAdapter, registry()));

	// Act
	let output = renderer
		.render(Payload::Record(&book()), &RenderOptions::new())
		.unwrap();

	// Assert
	assert_eq!(
		output,
		json!({
			"id": 1,
			"title": "Human Action",
			"author": {"id": 2, "name": "Ludwig"},
			"tags": ["economics", "praxeology"]
		})
	);
}

#[rstest]
fn test_adapter_errors_abort_rendering() {
	// Arrange
	let registry = SerializerRegistry::new().register(
		"books",
		Serializer::new().relationship("publisher", RelationshipConfig::id("publishers")),
	);
	let renderer = JsonApiRenderer::new(RenderContext::new(CatalogAdapter, registry));

	// Act
	let result = renderer.render(Payload::Record(&book()), &RenderOptions::new());

	// Assert
	assert!(matches!(result, Err(RenderError::InvalidRecord { .. })));
}

/// Adapter overriding nothing but the record type.
struct TypeOnlyAdapter;

impl Adapter for TypeOnlyAdapter {
	type Record = Value;

	fn type_for_record(&self, _record: &Value, _options: &RenderOptions) -> RenderResult<String> {
		Ok("books".to_string())
	}
}

#[rstest]
fn test_missing_capability_is_reported_by_name() {
	// Arrange
	let renderer = JsonApiRenderer::new(RenderContext::new(
		TypeOnlyAdapter,
		SerializerRegistry::new().register("books", Serializer::new().attributes(["title"])),
	));
	let record = json!({"id": 1, "title": "x"});

	// Act
	let result = renderer.render(Payload::Record(&record), &RenderOptions::new());

	// Assert
	match result {
		Err(error @ RenderError::NotImplemented { .. }) => {
			assert!(error.is_configuration_error());
			assert_eq!(error.to_string(), "Capability not implemented: id_for_record");
		}
		other => panic!("expected NotImplemented, got {:?}", other),
	}
}

#[rstest]
fn test_descriptor_can_carry_owned_records() {
	// Arrange
	let author = Entry::Author {
		id: 9,
		name: "Henry".to_string(),
	};
	let descriptor: RelationshipDescriptor<'_, Entry> =
		RelationshipDescriptor::has_one("authors").with_owned_record(author);

	// Assert
	assert!(matches!(descriptor.record, Some(Cow::Owned(Entry::Author { id: 9, .. }))));
}

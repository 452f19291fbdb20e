//! JSON:API rendering integration tests

use std::sync::Arc;
use std::thread;

use assert_json_diff::assert_json_eq;
use reinhardt_render::prelude::*;
use reinhardt_render_integration_tests::{bookstore_context, bookstore_registry, capture_logs};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use serial_test::serial;

#[fixture]
fn human_action() -> Value {
	json!({"id": 1, "title": "Human Action"})
}

#[fixture]
fn books() -> RenderOptions {
	RenderOptions::new().with_type("books")
}

fn renderer_for(registry: SerializerRegistry) -> JsonApiRenderer<RawAdapter> {
	JsonApiRenderer::new(RenderContext::new(RawAdapter::new(), registry))
}

fn render(renderer: &JsonApiRenderer<RawAdapter>, record: &Value, options: &RenderOptions) -> Value {
	renderer
		.render(Payload::Record(record), options)
		.unwrap()
		.to_value()
		.unwrap()
}

#[rstest]
fn test_single_record_without_relationships(human_action: Value, books: RenderOptions) {
	// Arrange
	let renderer = renderer_for(
		SerializerRegistry::new().register("books", Serializer::new().attributes(["title"])),
	);

	// Act
	let document = render(&renderer, &human_action, &books);

	// Assert
	assert_json_eq!(
		document,
		json!({
			"jsonapi": {"version": "1.0"},
			"data": {"type": "books", "id": 1, "attributes": {"title": "Human Action"}}
		})
	);
}

#[rstest]
fn test_embedded_relationship_is_sideloaded(books: RenderOptions) {
	// Arrange
	let renderer = renderer_for(
		SerializerRegistry::new()
			.register(
				"books",
				Serializer::new()
					.attributes(["title"])
					.relationship("author", RelationshipConfig::record("users")),
			)
			.register("users", Serializer::new().attributes(["name"])),
	);
	let book = json!({
		"id": 1,
		"title": "Human Action",
		"author_id": 2,
		"author": {"id": 2, "name": "Ludwig"}
	});

	// Act
	let document = render(&renderer, &book, &books);

	// Assert
	assert_json_eq!(
		document["data"]["relationships"]["author"]["data"],
		json!({"type": "users", "id": 2})
	);
	assert_json_eq!(
		document["included"],
		json!([{"type": "users", "id": 2, "attributes": {"name": "Ludwig"}}])
	);
}

#[rstest]
fn test_id_relationship_adds_nothing_to_included(books: RenderOptions) {
	// Arrange
	let renderer = renderer_for(SerializerRegistry::new().register(
		"books",
		Serializer::new()
			.attributes(["title"])
			.relationship("category", RelationshipConfig::id("categories")),
	));
	let book = json!({"id": 1, "title": "Human Action", "category_id": 2});

	// Act
	let document = render(&renderer, &book, &books);

	// Assert
	assert_json_eq!(
		document["data"]["relationships"]["category"]["data"],
		json!({"type": "categories", "id": 2})
	);
	assert!(document.get("included").is_none());
}

#[rstest]
fn test_error_payload_uses_generic_code() {
	// Arrange
	let renderer = renderer_for(SerializerRegistry::new());
	let error = ApiError::new("Not found").with_status(404);

	// Act
	let document = renderer
		.render(Payload::Error(&error), &RenderOptions::new())
		.unwrap();

	// Assert
	assert!(document.is_error());
	assert!(document.data.is_none());
	assert_json_eq!(
		document.to_value().unwrap(),
		json!({
			"jsonapi": {"version": "1.0"},
			"errors": [{"status": 404, "code": "InternalServerError", "detail": "Not found"}]
		})
	);
}

#[rstest]
fn test_error_from_result_payload() {
	// Arrange
	let renderer = renderer_for(SerializerRegistry::new());
	let result: Result<Value, ApiError> = Err(ApiError::not_found("No such book"));

	// Act
	let document = renderer
		.render(Payload::from(&result), &RenderOptions::new())
		.unwrap();

	// Assert
	let errors = document.errors.unwrap();
	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0].code, "NotFound");
}

#[rstest]
#[case(json!({"id": 1, "title": "a", "category_id": 1, "review_ids": [], "author": {"id": 5, "name": "x", "friends": []}}))]
#[case(json!({"id": "isbn-0865976317", "title": "b", "category_id": 2, "review_ids": [3], "author": {"id": 6, "name": "y", "friends": []}}))]
fn test_primary_type_and_id_come_from_adapter(#[case] book: Value, books: RenderOptions) {
	// Arrange
	let context = bookstore_context();
	let renderer = JsonApiRenderer::new(context.clone());

	// Act
	let document = renderer.render(Payload::Record(&book), &books).unwrap();

	// Assert
	let primary = document.data.as_ref().unwrap().resources()[0].clone();
	let adapter = context.adapter();
	assert_eq!(primary.type_name, adapter.type_for_record(&book, &books).unwrap());
	assert_eq!(primary.id, adapter.id_for_record(&book, &books).unwrap());
}

#[rstest]
fn test_attributes_stay_within_whitelist(books: RenderOptions) {
	// Arrange
	let renderer = JsonApiRenderer::new(bookstore_context());
	let book = json!({
		"id": 1,
		"title": "Human Action",
		"published_at": "1949",
		"isbn": "0865976317",
		"price": 10,
		"category_id": 1,
		"review_ids": [],
		"author": {"id": 2, "name": "Ludwig", "email": "ludwig@example.com", "friends": []}
	});

	// Act
	let document = renderer.render(Payload::Record(&book), &books).unwrap();

	// Assert
	let primary = document.data.as_ref().unwrap().resources()[0].clone();
	let keys: Vec<&String> = primary.attributes.as_ref().unwrap().keys().collect();
	assert_eq!(keys, vec!["title", "published_at"]);
	let author = document.find_included("users", &ResourceId::Int(2)).unwrap();
	assert!(!author.attributes.as_ref().unwrap().contains_key("email"));
}

#[rstest]
fn test_resource_reached_through_two_relationships_is_included_once(books: RenderOptions) {
	// Arrange
	let renderer = renderer_for(
		SerializerRegistry::new()
			.register(
				"books",
				Serializer::new()
					.attributes(["title"])
					.relationship("author", RelationshipConfig::record("users"))
					.relationship("editor", RelationshipConfig::record("users")),
			)
			.register("users", Serializer::new().attributes(["name"])),
	);
	let book = json!({
		"id": 1,
		"title": "Human Action",
		"author": {"id": 2, "name": "Ludwig"},
		"editor": {"id": 2, "name": "Ludwig"}
	});

	// Act
	let document = renderer.render(Payload::Record(&book), &books).unwrap();

	// Assert
	let matching = document
		.included
		.iter()
		.filter(|resource| resource.identifier() == ResourceIdentifier::new("users", 2))
		.count();
	assert_eq!(matching, 1);
	assert_eq!(document.included.len(), 1);
}

#[rstest]
fn test_primary_resource_is_not_repeated_in_included() {
	// Arrange
	let renderer = JsonApiRenderer::new(bookstore_context());
	let users = vec![
		json!({"id": 1, "name": "a", "friends": [{"id": 2, "name": "b", "friends": []}]}),
		json!({"id": 2, "name": "b", "friends": [{"id": 1, "name": "a", "friends": []}]}),
	];

	// Act
	let document = renderer
		.render(Payload::Records(&users), &RenderOptions::new().with_type("users"))
		.unwrap();

	// Assert
	assert_eq!(document.data.as_ref().unwrap().resources().len(), 2);
	assert!(document.included.is_empty());
}

#[rstest]
fn test_mutual_references_terminate() {
	// Arrange
	let renderer = JsonApiRenderer::new(bookstore_context());
	let user = json!({
		"id": 1,
		"name": "a",
		"friends": [{
			"id": 2,
			"name": "b",
			"friends": [{
				"id": 1,
				"name": "a",
				"friends": [{"id": 2, "name": "b", "friends": []}]
			}]
		}]
	});

	// Act
	let document = renderer
		.render(Payload::Record(&user), &RenderOptions::new().with_type("users"))
		.unwrap();

	// Assert
	assert_eq!(document.included.len(), 1);
	let value = document.to_value().unwrap();
	assert_json_eq!(
		value["included"][0]["relationships"]["friends"]["data"],
		json!([{"type": "users", "id": 1}])
	);
}

#[rstest]
#[case(json!({"id": 1, "title": "a", "reviews_id": [1, 2]}))]
#[case(json!({"id": 2, "title": "b", "reviews_id": []}))]
#[case(json!({"id": "c", "title": "c", "reviews_id": ["x"]}))]
fn test_id_strategy_on_has_many_is_a_config_mismatch(#[case] book: Value, books: RenderOptions) {
	// Arrange
	let renderer = renderer_for(SerializerRegistry::new().register(
		"books",
		Serializer::new()
			.attributes(["title"])
			.relationship("reviews", RelationshipConfig::id("reviews")),
	));

	// Act
	let result = renderer.render(Payload::Record(&book), &books);

	// Assert
	match result {
		Err(RenderError::ConfigMismatch {
			relationship,
			strategy,
			kind,
		}) => {
			assert_eq!(relationship, "reviews");
			assert_eq!(strategy, Strategy::Id);
			assert_eq!(kind, RelationshipKind::HasMany);
		}
		other => panic!("expected ConfigMismatch, got {:?}", other),
	}
}

#[rstest]
#[serial(log_capture)]
fn test_config_mismatch_is_logged(books: RenderOptions) {
	// Arrange
	let (logs, _guard) = capture_logs();
	let renderer = JsonApiRenderer::new(bookstore_context());
	let book = json!({
		"id": 1,
		"title": "a",
		"category_id": [1, 2],
		"review_ids": [],
		"author": {"id": 2, "name": "b", "friends": []}
	});

	// Act
	let result = renderer.render(Payload::Record(&book), &books);

	// Assert
	assert!(matches!(result, Err(RenderError::ConfigMismatch { .. })));
	let captured = logs.lock().unwrap();
	assert!(
		captured
			.iter()
			.any(|log| log.contains("WARN") && log.contains("does not fit")),
		"Expected a warning for the mismatch, got: {:?}",
		*captured
	);
}

#[rstest]
#[serial(log_capture)]
fn test_skipped_resource_is_logged_at_debug(books: RenderOptions) {
	// Arrange
	let (logs, _guard) = capture_logs();
	let renderer = JsonApiRenderer::new(bookstore_context());
	// users:2 is a friend of its own friend, so it is reached a second time
	let book = json!({
		"id": 1,
		"title": "a",
		"category_id": 1,
		"review_ids": [],
		"author": {
			"id": 2,
			"name": "b",
			"friends": [{"id": 3, "name": "c", "friends": [{"id": 2, "name": "b", "friends": []}]}]
		}
	});

	// Act
	let result = renderer.render(Payload::Record(&book), &books);

	// Assert
	assert!(result.is_ok());
	let captured = logs.lock().unwrap();
	assert!(
		captured
			.iter()
			.any(|log| log.starts_with("[DEBUG]") && log.contains("Resource already in document")),
		"Expected a debug event for the skipped resource, got: {:?}",
		*captured
	);
}

#[rstest]
fn test_missing_relationship_data_aborts_the_whole_render(books: RenderOptions) {
	// Arrange
	let renderer = JsonApiRenderer::new(bookstore_context());
	let records = vec![
		json!({"id": 1, "title": "a", "category_id": 1, "review_ids": [], "author": {"id": 2, "name": "b", "friends": []}}),
		json!({"id": 2, "title": "b", "category_id": 1, "review_ids": []}),
	];

	// Act
	let result = renderer.render(Payload::Records(&records), &books);

	// Assert
	match result {
		Err(RenderError::MissingRelationshipData {
			relationship,
			strategy,
		}) => {
			assert_eq!(relationship, "author");
			assert_eq!(strategy, Strategy::Record);
		}
		other => panic!("expected MissingRelationshipData, got {:?}", other),
	}
}

#[rstest]
fn test_application_serializer_fallback(books: RenderOptions) {
	// Arrange
	let renderer = renderer_for(
		SerializerRegistry::new()
			.register(
				"books",
				Serializer::new().relationship("author", RelationshipConfig::record("users")),
			)
			.application(Serializer::new().attributes(["name"])),
	);
	let book = json!({"id": 1, "author": {"id": 2, "name": "Ludwig"}});

	// Act
	let document = render(&renderer, &book, &books);

	// Assert
	assert_json_eq!(
		document["included"],
		json!([{"type": "users", "id": 2, "attributes": {"name": "Ludwig"}}])
	);
}

#[rstest]
fn test_rendering_twice_gives_identical_documents(books: RenderOptions) {
	// Arrange
	let renderer = JsonApiRenderer::new(bookstore_context());
	let book = json!({
		"id": 1,
		"title": "Human Action",
		"category_id": 1,
		"review_ids": [4, 5],
		"author": {"id": 2, "name": "Ludwig", "friends": [{"id": 3, "name": "Friedrich", "friends": []}]}
	});

	// Act
	let first = renderer.render(Payload::Record(&book), &books).unwrap();
	let second = renderer.render(Payload::Record(&book), &books).unwrap();

	// Assert
	assert_eq!(first, second);
	assert_eq!(
		first.to_json_string().unwrap(),
		second.to_json_string().unwrap()
	);
}

#[rstest]
fn test_concurrent_renders_share_configuration() {
	// Arrange
	let renderer = Arc::new(JsonApiRenderer::new(RenderContext::new(
		RawAdapter::new(),
		bookstore_registry(),
	)));

	// Act
	let handles: Vec<_> = (0..8)
		.map(|n| {
			let renderer = Arc::clone(&renderer);
			thread::spawn(move || {
				let book = json!({
					"id": n,
					"title": format!("volume {}", n),
					"category_id": 1,
					"review_ids": [],
					"author": {"id": 100 + n, "name": "Ludwig", "friends": []}
				});
				renderer
					.render(Payload::Record(&book), &RenderOptions::new().with_type("books"))
					.map(|document| (n, document))
			})
		})
		.collect();

	// Assert
	for handle in handles {
		let (n, document) = handle.join().unwrap().unwrap();
		let primary = document.data.as_ref().unwrap().resources()[0].clone();
		assert_eq!(primary.id, ResourceId::Int(n));
		assert_eq!(document.included.len(), 1);
		assert_eq!(document.included[0].id, ResourceId::Int(100 + n));
	}
}

#[rstest]
fn test_dasherized_keys_and_links(books: RenderOptions) {
	// Arrange
	let renderer = renderer_for(SerializerRegistry::new().register(
		"books",
		Serializer::new()
			.attributes(["title", "published_at"])
			.key_format(KeyFormat::Dasherize)
			.self_link("/{type}/{id}")
			.relationship(
				"main_category",
				RelationshipConfig::id("categories")
					.relationship_link("/books/{id}/relationships/{relationship}")
					.related_link("/books/{id}/{relationship}"),
			),
	));
	let book = json!({"id": 1, "title": "x", "published_at": "1949", "main_category_id": 3});
	let options = books.with_link("self", "/books/1").with_meta(json!({"copyright": "none"}));

	// Act
	let document = render(&renderer, &book, &options);

	// Assert
	assert_json_eq!(
		document,
		json!({
			"jsonapi": {"version": "1.0"},
			"data": {
				"type": "books",
				"id": 1,
				"attributes": {"title": "x", "published-at": "1949"},
				"relationships": {
					"main-category": {
						"data": {"type": "categories", "id": 3},
						"links": {
							"self": "/books/1/relationships/main-category",
							"related": "/books/1/main-category"
						}
					}
				},
				"links": {"self": "/books/1"}
			},
			"links": {"self": "/books/1"},
			"meta": {"copyright": "none"}
		})
	);
}

#[rstest]
fn test_custom_jsonapi_version(human_action: Value, books: RenderOptions) {
	// Arrange
	let renderer = JsonApiRenderer::new(
		RenderContext::new(
			RawAdapter::new(),
			SerializerRegistry::new().register("books", Serializer::new().attributes(["title"])),
		)
		.with_settings(RenderSettings::new().with_jsonapi_version("1.1")),
	);

	// Act
	let document = renderer.render(Payload::Record(&human_action), &books).unwrap();

	// Assert
	assert_eq!(document.jsonapi.version, "1.1");
}

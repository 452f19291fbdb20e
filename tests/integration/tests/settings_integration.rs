//! Settings loading and their effect on rendering

use reinhardt_render::core::SettingsError;
use reinhardt_render::prelude::*;
use reinhardt_render_integration_tests::bookstore_registry;
use rstest::rstest;
use serde_json::json;

fn renderer_with(settings: RenderSettings) -> JsonApiRenderer<RawAdapter> {
	JsonApiRenderer::new(
		RenderContext::new(RawAdapter::new(), bookstore_registry()).with_settings(settings),
	)
}

#[rstest]
fn test_toml_settings_drive_error_rendering() {
	// Arrange
	let settings = RenderSettings::from_toml_str(
		r#"
		debug = true
		default_error_code = "ServerError"
		generate_error_ids = true
		"#,
	)
	.unwrap();
	let renderer = renderer_with(settings);
	let error = ApiError::new("Database unavailable").with_debug(json!({"backend": "postgres"}));

	// Act
	let document = renderer
		.render(Payload::Error(&error), &RenderOptions::new())
		.unwrap();

	// Assert
	let errors = document.errors.unwrap();
	assert_eq!(errors[0].code, "ServerError");
	assert_eq!(errors[0].meta, Some(json!({"debug": {"backend": "postgres"}})));
	assert!(errors[0].id.is_some());
}

#[rstest]
fn test_debug_information_hidden_by_default() {
	// Arrange
	let renderer = renderer_with(RenderSettings::default());
	let error = ApiError::new("Database unavailable").with_debug(json!({"backend": "postgres"}));

	// Act
	let document = renderer
		.render(Payload::Error(&error), &RenderOptions::new())
		.unwrap();

	// Assert
	let value = document.to_value().unwrap();
	assert!(value["errors"][0].get("meta").is_none());
	assert!(value["errors"][0].get("id").is_none());
}

#[rstest]
fn test_environment_settings_limit_include_depth() {
	// Arrange
	let settings = RenderSettings::from_vars([
		("REINHARDT_RENDER_MAX_INCLUDE_DEPTH", "1"),
		("REINHARDT_RENDER_JSONAPI_VERSION", "1.1"),
		("PATH", "/usr/bin"),
	])
	.unwrap();
	let renderer = renderer_with(settings);
	let user = json!({
		"id": 1,
		"name": "a",
		"friends": [{"id": 2, "name": "b", "friends": [{"id": 3, "name": "c", "friends": []}]}]
	});

	// Act
	let document = renderer
		.render(Payload::Record(&user), &RenderOptions::new().with_type("users"))
		.unwrap();

	// Assert
	assert_eq!(document.jsonapi.version, "1.1");
	let included: Vec<ResourceIdentifier> = document
		.included
		.iter()
		.map(|resource| resource.identifier())
		.collect();
	assert_eq!(included, vec![ResourceIdentifier::new("users", 2)]);
}

#[rstest]
fn test_parse_key_format_from_toml() {
	// Arrange
	let settings = RenderSettings::from_toml_str(r#"parse_key_format = "camelCase""#).unwrap();
	let body = json!({"data": {"type": "books", "attributes": {"published_at": "1949"}}});

	// Act
	let parsed = JsonApiParser::from_settings(&settings)
		.parse(&body)
		.unwrap()
		.into_vec();

	// Assert
	assert!(parsed[0].attribute("publishedAt").is_some());
}

#[rstest]
#[case("max_include_depth = 0")]
#[case(r#"jsonapi_version = """#)]
#[case(r#"default_error_code = " ""#)]
fn test_invalid_toml_settings_are_rejected(#[case] source: &str) {
	assert!(matches!(
		RenderSettings::from_toml_str(source),
		Err(SettingsError::Validation(_))
	));
}

#[rstest]
#[case("REINHARDT_RENDER_DEBUG", "maybe")]
#[case("REINHARDT_RENDER_MAX_INCLUDE_DEPTH", "deep")]
fn test_invalid_environment_values_are_rejected(#[case] key: &str, #[case] value: &str) {
	match RenderSettings::from_vars([(key, value)]) {
		Err(SettingsError::InvalidValue { key: reported, .. }) => assert_eq!(reported, key),
		other => panic!("expected InvalidValue, got {:?}", other),
	}
}

#[rstest]
fn test_malformed_toml() {
	assert!(matches!(
		RenderSettings::from_toml_str("debug = "),
		Err(SettingsError::Toml(_))
	));
}

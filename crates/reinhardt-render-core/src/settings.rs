//! Renderer settings
//!
//! Settings are read once at startup (from TOML or the environment) and then
//! shared read-only by every renderer.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::key_format::KeyFormat;
use crate::payload::DEFAULT_ERROR_CODE;

/// Prefix of the environment variables read by [`RenderSettings::from_env`].
pub const ENV_PREFIX: &str = "REINHARDT_RENDER_";

/// Settings shared by all renderers.
///
/// # Examples
///
/// ```
/// use reinhardt_render_core::RenderSettings;
///
/// let settings = RenderSettings::from_toml_str(r#"
///     debug = true
///     max_include_depth = 3
/// "#).unwrap();
///
/// assert!(settings.debug);
/// assert_eq!(settings.jsonapi_version, "1.0");
/// assert_eq!(settings.max_include_depth, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
	/// Render error debug information into `meta.debug`
	pub debug: bool,
	/// Version stamped into the `jsonapi` member
	pub jsonapi_version: String,
	/// Error code used when an error does not set one
	pub default_error_code: String,
	/// Give error objects without an id a random UUID
	pub generate_error_ids: bool,
	/// Stop sideloading below this depth (primary data is depth 0)
	pub max_include_depth: Option<usize>,
	/// Key casing the parser converts inbound keys to
	pub parse_key_format: KeyFormat,
}

impl Default for RenderSettings {
	fn default() -> Self {
		Self {
			debug: false,
			jsonapi_version: "1.0".to_string(),
			default_error_code: DEFAULT_ERROR_CODE.to_string(),
			generate_error_ids: false,
			max_include_depth: None,
			parse_key_format: KeyFormat::SnakeCase,
		}
	}
}

impl RenderSettings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_debug(mut self, debug: bool) -> Self {
		self.debug = debug;
		self
	}

	pub fn with_jsonapi_version(mut self, version: impl Into<String>) -> Self {
		self.jsonapi_version = version.into();
		self
	}

	pub fn with_default_error_code(mut self, code: impl Into<String>) -> Self {
		self.default_error_code = code.into();
		self
	}

	pub fn with_generate_error_ids(mut self, generate: bool) -> Self {
		self.generate_error_ids = generate;
		self
	}

	pub fn with_max_include_depth(mut self, depth: usize) -> Self {
		self.max_include_depth = Some(depth);
		self
	}

	pub fn with_parse_key_format(mut self, format: KeyFormat) -> Self {
		self.parse_key_format = format;
		self
	}

	/// Parse and validate settings from a TOML document. Missing keys take
	/// their default.
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Read settings from `REINHARDT_RENDER_*` environment variables on top
	/// of the defaults.
	pub fn from_env() -> Result<Self, SettingsError> {
		Self::from_vars(std::env::vars())
	}

	/// Same as [`from_env`](Self::from_env) but over an explicit set of
	/// variables. Variables without the prefix are ignored.
	pub fn from_vars<I, K, V>(vars: I) -> Result<Self, SettingsError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut settings = Self::default();
		for (key, value) in vars {
			let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
				continue;
			};
			let value = value.as_ref().trim();
			match name {
				"DEBUG" => settings.debug = parse_bool(key.as_ref(), value)?,
				"JSONAPI_VERSION" => settings.jsonapi_version = value.to_string(),
				"DEFAULT_ERROR_CODE" => settings.default_error_code = value.to_string(),
				"GENERATE_ERROR_IDS" => {
					settings.generate_error_ids = parse_bool(key.as_ref(), value)?
				}
				"MAX_INCLUDE_DEPTH" => {
					let depth = value.parse::<usize>().map_err(|e| SettingsError::InvalidValue {
						key: key.as_ref().to_string(),
						message: e.to_string(),
					})?;
					settings.max_include_depth = Some(depth);
				}
				_ => {}
			}
		}
		settings.validate()?;
		Ok(settings)
	}

	/// Check the settings are usable.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.jsonapi_version.trim().is_empty() {
			return Err(SettingsError::Validation(
				"jsonapi_version must not be empty".to_string(),
			));
		}
		if self.default_error_code.trim().is_empty() {
			return Err(SettingsError::Validation(
				"default_error_code must not be empty".to_string(),
			));
		}
		if self.max_include_depth == Some(0) {
			return Err(SettingsError::Validation(
				"max_include_depth must be greater than 0".to_string(),
			));
		}
		Ok(())
	}
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SettingsError> {
	match value.to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err(SettingsError::InvalidValue {
			key: key.to_string(),
			message: format!("expected a boolean, got '{}'", value),
		}),
	}
}

//! Error types for the rendering pipeline.
//!
//! Every variant here aborts the render call that raised it. An error that is
//! meant to be shown to the client is not a [`RenderError`]: it is an
//! [`ApiError`](crate::ApiError) passed as the payload itself.

use thiserror::Error;

use crate::relationship::{RelationshipKind, Strategy};

/// Errors raised while rendering or parsing a document.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RenderError {
	/// An adapter capability was invoked without being overridden.
	#[error("Capability not implemented: {capability}")]
	NotImplemented {
		/// Name of the capability, e.g. `type_for_record`.
		capability: &'static str,
	},

	/// A relationship strategy does not fit the kind reported by the adapter.
	#[error(
		"Relationship '{relationship}' is configured with the '{strategy}' strategy, but the adapter reported a {kind} relationship"
	)]
	ConfigMismatch {
		/// Relationship name as configured on the serializer.
		relationship: String,
		/// Configured strategy.
		strategy: Strategy,
		/// Kind reported by the adapter.
		kind: RelationshipKind,
	},

	/// The adapter did not supply the data required by the configured strategy.
	#[error(
		"Relationship '{relationship}' uses the '{strategy}' strategy, but the adapter did not supply any {strategy} data"
	)]
	MissingRelationshipData {
		/// Relationship name as configured on the serializer.
		relationship: String,
		/// Configured strategy.
		strategy: Strategy,
	},

	/// No serializer is registered for a type and there is no application fallback.
	#[error("No serializer registered for '{type_name}' records and no application serializer configured")]
	MissingSerializer {
		/// The type reported by the adapter.
		type_name: String,
	},

	/// The adapter could not determine a record's type.
	#[error("Unable to determine the type of the record")]
	MissingType,

	/// The record does not have the shape the adapter expects.
	#[error("Invalid record: {reason}")]
	InvalidRecord {
		/// What was wrong with the record.
		reason: String,
	},

	/// An inbound document could not be parsed.
	#[error("Invalid document: {0}")]
	InvalidDocument(String),

	/// JSON encoding or decoding failed.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl RenderError {
	/// Create a [`RenderError::NotImplemented`] for the named capability.
	pub fn not_implemented(capability: &'static str) -> Self {
		Self::NotImplemented { capability }
	}

	/// Create a [`RenderError::InvalidRecord`].
	pub fn invalid_record(reason: impl Into<String>) -> Self {
		Self::InvalidRecord {
			reason: reason.into(),
		}
	}

	/// Check if this error points at a serializer or adapter setup problem
	/// rather than at the data being rendered.
	pub fn is_configuration_error(&self) -> bool {
		matches!(
			self,
			RenderError::NotImplemented { .. }
				| RenderError::ConfigMismatch { .. }
				| RenderError::MissingSerializer { .. }
		)
	}
}

/// Result type alias for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while loading [`RenderSettings`](crate::RenderSettings).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SettingsError {
	/// The TOML source could not be parsed.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// An environment variable held a value of the wrong shape.
	#[error("Invalid value for {key}: {message}")]
	InvalidValue {
		/// The offending key.
		key: String,
		/// Why it was rejected.
		message: String,
	},

	/// The settings parsed but are not usable.
	#[error("Validation error: {0}")]
	Validation(String),
}

//! Render payloads and client-facing errors

use serde_json::Value;
use std::fmt;

/// Default HTTP status of an [`ApiError`].
pub const DEFAULT_ERROR_STATUS: u16 = 500;

/// Default error code used when an [`ApiError`] does not set one.
pub const DEFAULT_ERROR_CODE: &str = "InternalServerError";

/// An error meant to be rendered into a response document.
///
/// Passing an `ApiError` as the payload is not a render failure: renderers
/// turn it into error objects and the render call succeeds.
///
/// # Examples
///
/// ```
/// use reinhardt_render_core::ApiError;
///
/// let error = ApiError::new("Not found").with_status(404);
/// assert_eq!(error.status, 404);
/// assert!(error.code.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
	/// Unique identifier of this occurrence
	pub id: Option<String>,
	/// HTTP status code
	pub status: u16,
	/// Application-specific error code
	pub code: Option<String>,
	/// Short summary of the problem type
	pub title: Option<String>,
	/// Human readable explanation, rendered as `detail`
	pub message: String,
	/// Attribute that caused the error
	pub field: Option<String>,
	/// Debug information, only rendered in debug mode
	pub debug: Option<Value>,
	/// Link to further details about this occurrence
	pub about: Option<String>,
}

impl ApiError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			id: None,
			status: DEFAULT_ERROR_STATUS,
			code: None,
			title: None,
			message: message.into(),
			field: None,
			debug: None,
			about: None,
		}
	}

	/// Build an error from any `std::error::Error`, keeping its source chain
	/// as debug information.
	pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
		let mut causes = Vec::new();
		let mut source = error.source();
		while let Some(cause) = source {
			causes.push(Value::from(cause.to_string()));
			source = cause.source();
		}
		let api_error = Self::new(error.to_string());
		if causes.is_empty() {
			api_error
		} else {
			api_error.with_debug(Value::Array(causes))
		}
	}

	/// Shorthand for a 404 error.
	pub fn not_found(message: impl Into<String>) -> Self {
		Self::new(message).with_status(404).with_code("NotFound")
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn with_status(mut self, status: u16) -> Self {
		self.status = status;
		self
	}

	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.code = Some(code.into());
		self
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn with_field(mut self, field: impl Into<String>) -> Self {
		self.field = Some(field.into());
		self
	}

	pub fn with_debug(mut self, debug: Value) -> Self {
		self.debug = Some(debug);
		self
	}

	pub fn with_about(mut self, url: impl Into<String>) -> Self {
		self.about = Some(url.into());
		self
	}
}

impl fmt::Display for ApiError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({})", self.message, self.status)
	}
}

impl std::error::Error for ApiError {}

/// What a renderer is asked to render.
#[derive(Debug)]
pub enum Payload<'a, R> {
	/// A single record
	Record(&'a R),
	/// A collection of records
	Records(&'a [R]),
	/// A single error
	Error(&'a ApiError),
	/// Several errors
	Errors(&'a [ApiError]),
}

impl<R> Clone for Payload<'_, R> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<R> Copy for Payload<'_, R> {}

impl<'a, R> Payload<'a, R> {
	/// Check if this payload goes down the error rendering path.
	pub fn is_error(&self) -> bool {
		matches!(self, Payload::Error(_) | Payload::Errors(_))
	}

	/// Short name of the payload shape, used in log events.
	pub fn shape(&self) -> &'static str {
		match self {
			Payload::Record(_) => "record",
			Payload::Records(_) => "records",
			Payload::Error(_) => "error",
			Payload::Errors(_) => "errors",
		}
	}
}

impl<'a, R> From<&'a Result<R, ApiError>> for Payload<'a, R> {
	fn from(result: &'a Result<R, ApiError>) -> Self {
		match result {
			Ok(record) => Payload::Record(record),
			Err(error) => Payload::Error(error),
		}
	}
}

//! Text-to-view parsing and the owned documents it produces.

// std
use std::ops::Deref;
// crates.io
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	json::{EMPTY_ARRAY, EMPTY_OBJECT, JsonArrayView, JsonObjectView},
};

/// Raised when text cannot be mapped onto the expected JSON shape.
#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct JsonMappingError {
	message: String,
	#[source]
	source: Option<serde_json::Error>,
}
impl JsonMappingError {
	fn syntax(source: serde_json::Error) -> Self {
		Self { message: "Text is not valid JSON.".into(), source: Some(source) }
	}

	fn shape(expected: &'static str, found: &Value) -> Self {
		let found = match found {
			Value::Null => "null",
			Value::Bool(_) => "a boolean",
			Value::Number(_) => "a number",
			Value::String(_) => "a string",
			Value::Array(_) => "an array",
			Value::Object(_) => "an object",
		};

		Self { message: format!("Expected {expected}, but found {found}."), source: None }
	}
}

/// Entry point that turns raw text into JSON views.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonMapper;
impl JsonMapper {
	/// Parses `text`, requiring the top-level value to be an object.
	pub fn parse_object(text: &str) -> Result<JsonObjectDocument, JsonMappingError> {
		match serde_json::from_str::<Value>(text).map_err(JsonMappingError::syntax)? {
			Value::Object(entries) => Ok(JsonObjectDocument(Some(entries))),
			other => Err(JsonMappingError::shape("a JSON object", &other)),
		}
	}

	/// Parses `text`, requiring the top-level value to be an array.
	pub fn parse_array(text: &str) -> Result<JsonArrayDocument, JsonMappingError> {
		match serde_json::from_str::<Value>(text).map_err(JsonMappingError::syntax)? {
			Value::Array(items) => Ok(JsonArrayDocument(Some(items))),
			other => Err(JsonMappingError::shape("a JSON array", &other)),
		}
	}
}

/// Owned JSON object that dereferences to a [`JsonObjectView`].
///
/// An empty document points at the shared [`EMPTY_OBJECT`].
#[derive(Clone, Default)]
pub struct JsonObjectDocument(Option<Map<String, Value>>);
impl JsonObjectDocument {
	/// Returns a document backed by [`EMPTY_OBJECT`].
	pub fn empty() -> Self {
		Self(None)
	}
}
impl Deref for JsonObjectDocument {
	type Target = dyn JsonObjectView;

	fn deref(&self) -> &Self::Target {
		match &self.0 {
			Some(entries) => entries,
			None => &EMPTY_OBJECT,
		}
	}
}
impl Debug for JsonObjectDocument {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "JsonObjectDocument({})", self.to_json())
	}
}

/// Owned JSON array that dereferences to a [`JsonArrayView`].
///
/// An empty document points at the shared [`EMPTY_ARRAY`].
#[derive(Clone, Default)]
pub struct JsonArrayDocument(Option<Vec<Value>>);
impl JsonArrayDocument {
	/// Returns a document backed by [`EMPTY_ARRAY`].
	pub fn empty() -> Self {
		Self(None)
	}
}
impl Deref for JsonArrayDocument {
	type Target = dyn JsonArrayView;

	fn deref(&self) -> &Self::Target {
		match &self.0 {
			Some(items) => items,
			None => &EMPTY_ARRAY,
		}
	}
}
impl Debug for JsonArrayDocument {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "JsonArrayDocument({})", self.to_json())
	}
}

//! Shared empty views used when a response body is blank.

// self
use crate::json::{JsonArrayView, JsonObjectView, JsonValue};

/// Canonical empty object; blank bodies read as this instead of failing.
pub static EMPTY_OBJECT: EmptyObjectView = EmptyObjectView;
/// Canonical empty array; blank bodies read as this instead of failing.
pub static EMPTY_ARRAY: EmptyArrayView = EmptyArrayView;

/// A JSON object with no entries.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyObjectView;
impl JsonObjectView for EmptyObjectView {
	fn to_json(&self) -> String {
		"{}".into()
	}

	fn keys(&self) -> Vec<&str> {
		Vec::new()
	}

	fn get(&self, _key: &str) -> Option<JsonValue<'_>> {
		None
	}
}

/// A JSON array with no elements.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyArrayView;
impl JsonArrayView for EmptyArrayView {
	fn to_json(&self) -> String {
		"[]".into()
	}

	fn len(&self) -> usize {
		0
	}

	fn get(&self, _index: usize) -> Option<JsonValue<'_>> {
		None
	}
}

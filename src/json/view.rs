//! `serde_json` backend for the JSON view traits.

// crates.io
use serde_json::{Map, Value};
// self
use crate::json::{JsonArrayView, JsonObjectView, JsonValue};

impl JsonObjectView for Map<String, Value> {
	fn to_json(&self) -> String {
		serde_json::to_string(self).unwrap_or_default()
	}

	fn keys(&self) -> Vec<&str> {
		Map::keys(self).map(String::as_str).collect()
	}

	fn get(&self, key: &str) -> Option<JsonValue<'_>> {
		Map::get(self, key).and_then(view_of)
	}

	fn is_empty(&self) -> bool {
		Map::is_empty(self)
	}
}

impl JsonArrayView for Vec<Value> {
	fn to_json(&self) -> String {
		serde_json::to_string(self).unwrap_or_default()
	}

	fn len(&self) -> usize {
		<[Value]>::len(self)
	}

	fn get(&self, index: usize) -> Option<JsonValue<'_>> {
		<[Value]>::get(self, index).and_then(view_of)
	}
}

fn view_of(value: &Value) -> Option<JsonValue<'_>> {
	match value {
		Value::Null => None,
		Value::Bool(flag) => Some(JsonValue::Boolean(*flag)),
		Value::Number(number) => number.as_f64().map(JsonValue::Number),
		Value::String(text) => Some(JsonValue::String(text)),
		Value::Array(items) => Some(JsonValue::Array(items)),
		Value::Object(entries) => Some(JsonValue::Object(entries)),
	}
}

//! Read-only, type-coercing views over parsed JSON documents.
//!
//! The exchange steps only ever see [`JsonObjectView`] and [`JsonArrayView`], so the JSON
//! backend (`serde_json`) stays an implementation detail of [`JsonMapper`]. Accessors never
//! panic: a missing value, an explicit `null`, and a value of the wrong shape all read as
//! `None`.

mod empty;
mod mapper;
mod view;

pub use empty::*;
pub use mapper::*;

// self
use crate::_prelude::*;

/// A single value read out of a JSON view.
///
/// Primitives are returned as-is; objects and arrays are returned as nested views.
#[derive(Clone, Copy)]
pub enum JsonValue<'a> {
	/// JSON string.
	String(&'a str),
	/// JSON number, widened to `f64`.
	Number(f64),
	/// JSON boolean.
	Boolean(bool),
	/// Nested JSON object.
	Object(&'a dyn JsonObjectView),
	/// Nested JSON array.
	Array(&'a dyn JsonArrayView),
}
impl<'a> JsonValue<'a> {
	/// Returns the string, if this value is one.
	pub fn as_str(self) -> Option<&'a str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Returns the number, also accepting strings that parse as a finite number.
	pub fn as_number(self) -> Option<f64> {
		match self {
			Self::Number(value) => Some(value),
			Self::String(text) => text.trim().parse::<f64>().ok().filter(|value| value.is_finite()),
			_ => None,
		}
	}

	/// Returns the value as an exact integer, accepting integral numbers and integer strings.
	pub fn as_integer(self) -> Option<i64> {
		if let Self::String(text) = self {
			return text.trim().parse::<i64>().ok().or_else(|| exact_integer(self.as_number()?));
		}

		exact_integer(self.as_number()?)
	}

	/// Returns the boolean, if this value is one.
	pub fn as_boolean(self) -> Option<bool> {
		match self {
			Self::Boolean(value) => Some(value),
			_ => None,
		}
	}

	/// Returns the nested object view, if this value is one.
	pub fn as_object(self) -> Option<&'a dyn JsonObjectView> {
		match self {
			Self::Object(view) => Some(view),
			_ => None,
		}
	}

	/// Returns the nested array view, if this value is one.
	pub fn as_array(self) -> Option<&'a dyn JsonArrayView> {
		match self {
			Self::Array(view) => Some(view),
			_ => None,
		}
	}
}
impl Debug for JsonValue<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::String(value) => f.debug_tuple("String").field(value).finish(),
			Self::Number(value) => f.debug_tuple("Number").field(value).finish(),
			Self::Boolean(value) => f.debug_tuple("Boolean").field(value).finish(),
			Self::Object(view) => write!(f, "Object({})", view.to_json()),
			Self::Array(view) => write!(f, "Array({})", view.to_json()),
		}
	}
}

/// An unmodifiable view of a JSON object.
pub trait JsonObjectView
where
	Self: Send + Sync,
{
	/// Renders the object back to compact JSON text.
	fn to_json(&self) -> String;

	/// Every key that [`get`](JsonObjectView::get) can resolve.
	fn keys(&self) -> Vec<&str>;

	/// Retrieves the value associated with `key`.
	///
	/// Returns `None` when the key is absent or explicitly `null`.
	fn get(&self, key: &str) -> Option<JsonValue<'_>>;

	/// Returns `true` when the object has no entries.
	fn is_empty(&self) -> bool {
		self.keys().is_empty()
	}

	/// Shorthand for `get(key)` narrowed to an object.
	fn get_object(&self, key: &str) -> Option<&dyn JsonObjectView> {
		self.get(key)?.as_object()
	}

	/// Shorthand for `get(key)` narrowed to an array.
	fn get_array(&self, key: &str) -> Option<&dyn JsonArrayView> {
		self.get(key)?.as_array()
	}

	/// Shorthand for `get(key)` narrowed to a number; numeric strings are parsed.
	fn get_number(&self, key: &str) -> Option<f64> {
		self.get(key)?.as_number()
	}

	/// Shorthand for `get(key)` narrowed to an exact integer; integer strings are parsed.
	fn get_integer(&self, key: &str) -> Option<i64> {
		self.get(key)?.as_integer()
	}

	/// Shorthand for `get(key)` narrowed to a string.
	fn get_string(&self, key: &str) -> Option<&str> {
		self.get(key)?.as_str()
	}

	/// Shorthand for `get(key)` narrowed to a boolean.
	fn get_boolean(&self, key: &str) -> Option<bool> {
		self.get(key)?.as_boolean()
	}
}

/// An unmodifiable view of a JSON array.
pub trait JsonArrayView
where
	Self: Send + Sync,
{
	/// Renders the array back to compact JSON text.
	fn to_json(&self) -> String;

	/// Number of elements in the array.
	fn len(&self) -> usize;

	/// Retrieves the element at `index`.
	///
	/// Returns `None` when the index is out of bounds or the element is explicitly `null`.
	fn get(&self, index: usize) -> Option<JsonValue<'_>>;

	/// Returns `true` when the array has no elements.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Iterates over every element in order, yielding `None` for `null` elements.
	fn iter(&self) -> Box<dyn Iterator<Item = Option<JsonValue<'_>>> + '_> {
		Box::new((0..self.len()).map(move |index| self.get(index)))
	}

	/// Shorthand for `get(index)` narrowed to an object.
	fn get_object(&self, index: usize) -> Option<&dyn JsonObjectView> {
		self.get(index)?.as_object()
	}

	/// Shorthand for `get(index)` narrowed to an array.
	fn get_array(&self, index: usize) -> Option<&dyn JsonArrayView> {
		self.get(index)?.as_array()
	}

	/// Shorthand for `get(index)` narrowed to a number; numeric strings are parsed.
	fn get_number(&self, index: usize) -> Option<f64> {
		self.get(index)?.as_number()
	}

	/// Shorthand for `get(index)` narrowed to a string.
	fn get_string(&self, index: usize) -> Option<&str> {
		self.get(index)?.as_str()
	}

	/// Shorthand for `get(index)` narrowed to a boolean.
	fn get_boolean(&self, index: usize) -> Option<bool> {
		self.get(index)?.as_boolean()
	}
}

fn exact_integer(value: f64) -> Option<i64> {
	// `i64::MAX as f64` rounds up to 2^63, hence the strict upper bound.
	if value.fract() != 0.0 || value < i64::MIN as f64 || value >= i64::MAX as f64 {
		return None;
	}

	Some(value as i64)
}

use std::collections::BTreeMap;
use std::fmt;

use crate::cast::{FieldPath, PathStep, coerce};

/// Keyed map used as the intermediate form between records and generic data.
pub type Map = BTreeMap<String, Value>;

/// Shape classification of a runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// Signed integer of any width.
	Int,
	/// Unsigned integer of any width.
	Uint,
	/// 32- or 64-bit float.
	Float,
	/// Boolean.
	Bool,
	/// Text.
	Text,
	/// Sequence or byte string.
	Sequence,
	/// Keyed map.
	Map,
	/// Structured record.
	Record,
	/// Optional reference to a record.
	Optional,
	/// Dynamic or polymorphic reference.
	Polymorphic,
	/// Absent value.
	Null,
	/// Shape outside the recognized set.
	Unrecognized,
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Int => "signed integer",
			Self::Uint => "unsigned integer",
			Self::Float => "float",
			Self::Bool => "bool",
			Self::Text => "text",
			Self::Sequence => "sequence",
			Self::Map => "map",
			Self::Record => "record",
			Self::Optional => "optional record",
			Self::Polymorphic => "polymorphic value",
			Self::Null => "null",
			Self::Unrecognized => "unrecognized value",
		})
	}
}

/// Runtime value of unknown type.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
	/// Absent value.
	#[default]
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	I64(i64),
	/// Unsigned integer scalar.
	U64(u64),
	/// 32-bit float scalar.
	F32(f32),
	/// 64-bit float scalar.
	F64(f64),
	/// Raw byte string.
	Bytes(Vec<u8>),
	/// Text scalar.
	String(String),
	/// Ordered sequence of values.
	Array(Vec<Value>),
	/// Keyed map of values.
	Map(Map),
	/// Dynamic wrapper; coercions go through its formatted text.
	Any(Box<Value>),
	/// One layer of reflected-handle indirection.
	Handle(Box<Value>),
}

impl Value {
	/// Shape of this value without unwrapping handles.
	pub fn kind(&self) -> Kind {
		match self {
			Self::Null => Kind::Null,
			Self::Bool(_) => Kind::Bool,
			Self::I64(_) => Kind::Int,
			Self::U64(_) => Kind::Uint,
			Self::F32(_) | Self::F64(_) => Kind::Float,
			Self::String(_) => Kind::Text,
			Self::Bytes(_) | Self::Array(_) => Kind::Sequence,
			Self::Map(_) => Kind::Map,
			Self::Any(_) => Kind::Polymorphic,
			Self::Handle(_) => Kind::Unrecognized,
		}
	}

	/// Wrap a value in the dynamic wrapper.
	pub fn any(inner: impl Into<Value>) -> Self {
		Self::Any(Box::new(inner.into()))
	}

	/// Wrap a value in one handle layer.
	pub fn handle(inner: impl Into<Value>) -> Self {
		Self::Handle(Box::new(inner.into()))
	}

	/// Strip every handle and dynamic wrapper layer.
	pub fn innermost(&self) -> &Value {
		let mut current = self;
		while let Self::Any(inner) | Self::Handle(inner) = current {
			current = inner;
		}
		current
	}

	/// Whether this is [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrow map contents when the value is map-shaped.
	pub fn as_map(&self) -> Option<&Map> {
		match self {
			Self::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Borrow text contents when the value is text.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(text) => Some(text),
			_ => None,
		}
	}

	/// Resolve a field path against nested maps and sequences.
	pub fn get_path(&self, path: &FieldPath) -> Option<&Value> {
		let mut current = self;
		for step in &path.steps {
			current = match (step, current.innermost()) {
				(PathStep::Field(name), Value::Map(map)) => map.get(name)?,
				(PathStep::Index(index), Value::Array(items)) => items.get(*index)?,
				_ => return None,
			};
		}
		Some(current)
	}

	/// Coerce to a signed integer.
	pub fn to_int(&self) -> i64 {
		coerce::to_int(self)
	}

	/// Coerce to a sequence of signed integers.
	pub fn to_ints(&self) -> Vec<i64> {
		coerce::to_ints(self)
	}

	/// Coerce to a map of signed integers.
	pub fn to_int_map(&self) -> Option<BTreeMap<String, i64>> {
		coerce::to_int_map(self)
	}

	/// Coerce to a float.
	pub fn to_float(&self) -> f64 {
		coerce::to_float(self)
	}

	/// Coerce to a sequence of floats.
	pub fn to_floats(&self) -> Vec<f64> {
		coerce::to_floats(self)
	}

	/// Coerce to a map of floats.
	pub fn to_float_map(&self) -> Option<BTreeMap<String, f64>> {
		coerce::to_float_map(self)
	}

	/// Coerce to a boolean.
	pub fn to_bool(&self) -> bool {
		coerce::to_bool(self)
	}

	/// Coerce to a sequence of booleans.
	pub fn to_bools(&self) -> Vec<bool> {
		coerce::to_bools(self)
	}

	/// Coerce to a map of booleans.
	pub fn to_bool_map(&self) -> Option<BTreeMap<String, bool>> {
		coerce::to_bool_map(self)
	}

	/// Coerce to text.
	pub fn to_text(&self) -> String {
		coerce::to_text(self)
	}

	/// Coerce to a sequence of texts.
	pub fn to_texts(&self) -> Vec<String> {
		coerce::to_texts(self)
	}

	/// Coerce to a map of texts.
	pub fn to_text_map(&self) -> Option<BTreeMap<String, String>> {
		coerce::to_text_map(self)
	}

	/// Coerce to a sequence of raw values.
	pub fn to_array(&self) -> Vec<Value> {
		coerce::to_array(self)
	}

	/// Coerce to a map of raw values.
	pub fn to_map(&self) -> Option<Map> {
		coerce::to_map(self)
	}

	/// Multi-line debug rendering.
	pub fn dump(&self) -> String {
		format!("{self:#?}")
	}
}

/// Formatted representation used when coercing the dynamic wrapper.
impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("null"),
			Self::Bool(value) => write!(f, "{value}"),
			Self::I64(value) => write!(f, "{value}"),
			Self::U64(value) => write!(f, "{value}"),
			Self::F32(value) => f.write_str(&coerce::float_text(*value)),
			Self::F64(value) => f.write_str(&coerce::float_text(*value)),
			Self::String(text) => f.write_str(text),
			Self::Bytes(bytes) => write_list(f, bytes.iter()),
			Self::Array(items) => write_list(f, items.iter()),
			Self::Map(map) => {
				f.write_str("{")?;
				for (pos, (key, value)) in map.iter().enumerate() {
					if pos > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{key}: {value}")?;
				}
				f.write_str("}")
			}
			Self::Any(inner) | Self::Handle(inner) => fmt::Display::fmt(inner, f),
		}
	}
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = T>) -> fmt::Result {
	f.write_str("[")?;
	for (pos, item) in items.enumerate() {
		if pos > 0 {
			f.write_str(", ")?;
		}
		write!(f, "{item}")?;
	}
	f.write_str("]")
}

macro_rules! from_scalar {
	($variant:ident as $target:ty: $($source:ty),+) => {
		$(
			impl From<$source> for Value {
				fn from(value: $source) -> Self {
					Self::$variant(value as $target)
				}
			}
		)+
	};
}

from_scalar!(I64 as i64: i8, i16, i32, i64, isize);
from_scalar!(U64 as u64: u8, u16, u32, u64, usize);

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Self::F32(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::F64(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<Map> for Value {
	fn from(value: Map) -> Self {
		Self::Map(value)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(value: Vec<T>) -> Self {
		Self::Array(value.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self::Map(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}

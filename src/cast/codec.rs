//! JSON and MessagePack adapters for [`Value`].
//!
//! Decoding keeps integers signed whenever they fit in `i64`, and coerces
//! non-text map keys to text with a later key winning over an earlier one.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::cast::{Map, Value, coerce};


impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(value) => serializer.serialize_bool(*value),
			Self::I64(value) => serializer.serialize_i64(*value),
			Self::U64(value) => serializer.serialize_u64(*value),
			Self::F32(value) => serializer.serialize_f32(*value),
			Self::F64(value) => serializer.serialize_f64(*value),
			Self::Bytes(bytes) => serializer.serialize_bytes(bytes),
			Self::String(text) => serializer.serialize_str(text),
			Self::Array(items) => serializer.collect_seq(items),
			Self::Map(map) => serializer.collect_map(map),
			Self::Any(inner) | Self::Handle(inner) => inner.serialize(serializer),
		}
	}
}

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		deserializer.deserialize_any(ValueVisitor)
	}
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
	type Value = Value;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("any self-describing value")
	}

	fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<Value, E> {
		Ok(Value::Bool(value))
	}

	fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Value, E> {
		Ok(Value::I64(value))
	}

	fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Value, E> {
		Ok(i64::try_from(value).map_or(Value::U64(value), Value::I64))
	}

	fn visit_f32<E: de::Error>(self, value: f32) -> std::result::Result<Value, E> {
		Ok(Value::F32(value))
	}

	fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Value, E> {
		Ok(Value::F64(value))
	}

	fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Value, E> {
		Ok(Value::String(value.to_owned()))
	}

	fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<Value, E> {
		Ok(Value::String(value))
	}

	fn visit_bytes<E: de::Error>(self, value: &[u8]) -> std::result::Result<Value, E> {
		Ok(Value::Bytes(value.to_vec()))
	}

	fn visit_byte_buf<E: de::Error>(self, value: Vec<u8>) -> std::result::Result<Value, E> {
		Ok(Value::Bytes(value))
	}

	fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
		Ok(Value::Null)
	}

	fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Value, D::Error> {
		Value::deserialize(deserializer)
	}

	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
		let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
		while let Some(item) = seq.next_element()? {
			items.push(item);
		}
		Ok(Value::Array(items))
	}

	fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Value, A::Error> {
		let mut map = Map::new();
		while let Some((key, value)) = access.next_entry::<Value, Value>()? {
			map.insert(coerce::to_text(&key), value);
		}
		Ok(Value::Map(map))
	}
}

/// Decode JSON text.
pub fn from_json(input: &str) -> crate::cast::Result<Value> {
	Ok(serde_json::from_str(input)?)
}

/// Encode as compact JSON text.
pub fn to_json(value: &Value) -> crate::cast::Result<String> {
	Ok(serde_json::to_string(value)?)
}

/// Encode as indented JSON text.
pub fn to_json_pretty(value: &Value) -> crate::cast::Result<String> {
	Ok(serde_json::to_string_pretty(value)?)
}

/// Decode MessagePack bytes.
pub fn from_msgpack(bytes: &[u8]) -> crate::cast::Result<Value> {
	Ok(rmp_serde::from_slice(bytes)?)
}

/// Encode as MessagePack bytes.
pub fn to_msgpack(value: &Value) -> crate::cast::Result<Vec<u8>> {
	Ok(rmp_serde::to_vec(value)?)
}

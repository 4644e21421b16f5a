//! Total conversions from [`Value`] into canonical scalars and collections.
//!
//! Every function here returns a result for every input. Shapes that carry no
//! usable data fall back to the zero value of the target type.

use std::collections::BTreeMap;
use std::fmt;

use crate::cast::{Kind, Map, Value};


/// Peel exactly one handle layer.
fn unwrap_handle(value: &Value) -> &Value {
	match value {
		Value::Handle(inner) => inner,
		other => other,
	}
}

/// Shape of a value after peeling one handle layer.
///
/// A handle wrapped directly in another handle stays unrecognized.
pub fn kind_of(value: &Value) -> Kind {
	unwrap_handle(value).kind()
}

/// Whether the value is a signed or unsigned integer.
pub fn is_int(value: &Value) -> bool {
	matches!(kind_of(value), Kind::Int | Kind::Uint)
}

/// Whether the value is a 32- or 64-bit float.
pub fn is_float(value: &Value) -> bool {
	kind_of(value) == Kind::Float
}

/// Parse a boolean literal: `true`/`false` in any case, or `1`/`0`.
pub fn parse_bool(text: &str) -> Option<bool> {
	if text == "1" || text.eq_ignore_ascii_case("true") {
		Some(true)
	} else if text == "0" || text.eq_ignore_ascii_case("false") {
		Some(false)
	} else {
		None
	}
}

fn parse_int(text: &str) -> i64 {
	if let Ok(value) = text.parse::<i64>() {
		return value;
	}
	if let Ok(value) = text.parse::<f64>() {
		return value as i64;
	}
	parse_bool(text).map_or(0, i64::from)
}

fn parse_float(text: &str) -> f64 {
	text.parse::<f64>()
		.unwrap_or_else(|_| if parse_bool(text) == Some(true) { 1.0 } else { 0.0 })
}

fn parse_truth(text: &str) -> bool {
	parse_bool(text).unwrap_or_else(|| parse_float(text) > 0.0)
}

/// Coerce to a signed integer.
///
/// Floats truncate toward zero (NaN becomes 0), unsigned values above
/// `i64::MAX` wrap to negative, and text is tried as integer, then float, then boolean.
pub fn to_int(value: &Value) -> i64 {
	match unwrap_handle(value) {
		Value::I64(value) => *value,
		Value::U64(value) => *value as i64,
		Value::F32(value) => *value as i64,
		Value::F64(value) => *value as i64,
		Value::Bool(value) => i64::from(*value),
		Value::String(text) => parse_int(text),
		Value::Any(inner) => parse_int(&inner.to_string()),
		_ => 0,
	}
}

/// Coerce to a 64-bit float.
pub fn to_float(value: &Value) -> f64 {
	match unwrap_handle(value) {
		Value::F32(value) => f64::from(*value),
		Value::F64(value) => *value,
		Value::String(text) => parse_float(text),
		Value::Any(inner) => parse_float(&inner.to_string()),
		_ => to_int(value) as f64,
	}
}

/// Coerce to a boolean; anything that is not a boolean literal is true when positive.
pub fn to_bool(value: &Value) -> bool {
	match unwrap_handle(value) {
		Value::Bool(value) => *value,
		Value::String(text) => parse_truth(text),
		Value::Any(inner) => parse_truth(&inner.to_string()),
		_ => to_float(value) > 0.0,
	}
}

/// Coerce to text.
///
/// Floats use the shortest representation that round-trips at their own
/// width. Sequences, maps, and absent values become empty text.
pub fn to_text(value: &Value) -> String {
	match unwrap_handle(value) {
		Value::String(text) => text.clone(),
		Value::Any(inner) => inner.to_string(),
		Value::Bool(value) => value.to_string(),
		Value::I64(value) => value.to_string(),
		Value::U64(value) => value.to_string(),
		Value::F32(value) => float_text(*value),
		Value::F64(value) => float_text(*value),
		_ => String::new(),
	}
}

/// Shortest round-tripping text for a float at its own width.
///
/// Decimal exponents below -4 or from 21 upward switch to exponent form with
/// a signed, at least two-digit exponent (`1e+21`, `1e-07`).
pub(crate) fn float_text<F: fmt::Display + fmt::LowerExp>(value: F) -> String {
	let scientific = format!("{value:e}");
	let Some((mantissa, exponent)) = scientific.split_once('e') else {
		return value.to_string();
	};
	match exponent.parse::<i32>() {
		Ok(exponent) if !(-4..21).contains(&exponent) => {
			let sign = if exponent < 0 { '-' } else { '+' };
			format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
		}
		_ => value.to_string(),
	}
}

/// Coerce to a sequence of raw values.
///
/// Absent and unrecognized values give an empty sequence, byte strings give
/// one unsigned integer per byte, and any other scalar or map is wrapped as
/// a single element.
pub fn to_array(value: &Value) -> Vec<Value> {
	match unwrap_handle(value) {
		Value::Null | Value::Handle(_) => Vec::new(),
		Value::Array(items) => items.clone(),
		Value::Bytes(bytes) => bytes.iter().map(|byte| Value::U64(u64::from(*byte))).collect(),
		other => vec![other.clone()],
	}
}

/// Coerce to a sequence of signed integers.
pub fn to_ints(value: &Value) -> Vec<i64> {
	to_array(value).iter().map(to_int).collect()
}

/// Coerce to a sequence of floats.
pub fn to_floats(value: &Value) -> Vec<f64> {
	to_array(value).iter().map(to_float).collect()
}

/// Coerce to a sequence of booleans.
pub fn to_bools(value: &Value) -> Vec<bool> {
	to_array(value).iter().map(to_bool).collect()
}

/// Coerce to a sequence of texts.
pub fn to_texts(value: &Value) -> Vec<String> {
	to_array(value).iter().map(to_text).collect()
}

fn map_with<T>(value: &Value, convert: impl Fn(&Value) -> T) -> Option<BTreeMap<String, T>> {
	match unwrap_handle(value) {
		Value::Null => None,
		Value::Map(map) => Some(map.iter().map(|(key, value)| (key.clone(), convert(value))).collect()),
		_ => Some(BTreeMap::new()),
	}
}

/// Coerce to a map of raw values.
///
/// `None` means the input was absent; a present value that is not a map gives
/// an empty map.
pub fn to_map(value: &Value) -> Option<Map> {
	map_with(value, Value::clone)
}

/// Coerce to a map of signed integers.
pub fn to_int_map(value: &Value) -> Option<BTreeMap<String, i64>> {
	map_with(value, to_int)
}

/// Coerce to a map of floats.
pub fn to_float_map(value: &Value) -> Option<BTreeMap<String, f64>> {
	map_with(value, to_float)
}

/// Coerce to a map of booleans.
pub fn to_bool_map(value: &Value) -> Option<BTreeMap<String, bool>> {
	map_with(value, to_bool)
}

/// Coerce to a map of texts.
pub fn to_text_map(value: &Value) -> Option<BTreeMap<String, String>> {
	map_with(value, to_text)
}

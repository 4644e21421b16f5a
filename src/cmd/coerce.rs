use std::collections::BTreeMap;

use clap::ValueEnum;
use shapecast::cast::{Result, Value, coerce};

use crate::cmd::util::{parse_document, print_json};

/// Kernel conversion selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
	Int,
	Float,
	Bool,
	Text,
	Array,
	Ints,
	Floats,
	Bools,
	Texts,
	Map,
	IntMap,
	FloatMap,
	BoolMap,
	TextMap,
}

/// Coerce one JSON document and print the result.
pub fn run(input: &str, target: Target) -> Result<()> {
	let value = parse_document(input)?;
	print_json(&convert(&value, target))
}

/// Apply `target` and wrap the result back into a [`Value`].
pub(crate) fn convert(value: &Value, target: Target) -> Value {
	match target {
		Target::Int => Value::I64(coerce::to_int(value)),
		Target::Float => Value::F64(coerce::to_float(value)),
		Target::Bool => Value::Bool(coerce::to_bool(value)),
		Target::Text => Value::String(coerce::to_text(value)),
		Target::Array => Value::Array(coerce::to_array(value)),
		Target::Ints => Value::from(coerce::to_ints(value)),
		Target::Floats => Value::from(coerce::to_floats(value)),
		Target::Bools => Value::from(coerce::to_bools(value)),
		Target::Texts => Value::from(coerce::to_texts(value)),
		Target::Map => Value::from(coerce::to_map(value)),
		Target::IntMap => map_value(coerce::to_int_map(value)),
		Target::FloatMap => map_value(coerce::to_float_map(value)),
		Target::BoolMap => map_value(coerce::to_bool_map(value)),
		Target::TextMap => map_value(coerce::to_text_map(value)),
	}
}

fn map_value<T: Into<Value>>(map: Option<BTreeMap<String, T>>) -> Value {
	map.map_or(Value::Null, |map| map.into_iter().collect())
}

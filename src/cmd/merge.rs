use shapecast::cast::{Result, Value, merge_maps};

use crate::cmd::util::{parse_document, print_json};

/// Merge JSON objects left to right and print the result.
pub fn run(inputs: &[String]) -> Result<()> {
	let documents = inputs.iter().map(|input| parse_document(input)).collect::<Result<Vec<_>>>()?;
	let merged = merge_maps(&documents)?;
	print_json(&Value::Map(merged))
}

use std::io::Read;

use serde::Serialize;
use shapecast::cast::{Result, Value, from_json};

/// Resolve a document argument, reading stdin for `-`.
pub(crate) fn read_input(input: &str) -> Result<String> {
	if input != "-" {
		return Ok(input.to_owned());
	}
	let mut text = String::new();
	std::io::stdin().read_to_string(&mut text)?;
	Ok(text)
}

/// Parse a JSON document argument.
pub(crate) fn parse_document(input: &str) -> Result<Value> {
	from_json(&read_input(input)?)
}

/// Print one compact JSON line to stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string(value)?);
	Ok(())
}

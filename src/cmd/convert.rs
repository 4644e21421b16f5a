use clap::ValueEnum;
use shapecast::cast::{Result, Value, from_json, from_msgpack, to_json, to_msgpack};

use crate::cmd::util::read_input;

/// Document encoding on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
	/// JSON text.
	Json,
	/// MessagePack bytes as hex text.
	Msgpack,
}

/// Re-encode a document from one format to another and print it.
pub fn run(input: &str, from: Format, to: Format) -> Result<()> {
	let text = read_input(input)?;
	let value = decode(text.trim(), from)?;
	println!("{}", encode(&value, to)?);
	Ok(())
}

fn decode(text: &str, format: Format) -> Result<Value> {
	match format {
		Format::Json => from_json(text),
		Format::Msgpack => from_msgpack(&hex::decode(text)?),
	}
}

fn encode(value: &Value, format: Format) -> Result<String> {
	match format {
		Format::Json => to_json(value),
		Format::Msgpack => Ok(hex::encode(to_msgpack(value)?)),
	}
}

use serde::Serialize;
use shapecast::cast::{FieldPath, Result, Value, coerce};

use crate::cmd::coerce::{Target, convert};
use crate::cmd::util::{parse_document, print_json};

/// JSON report for one path lookup.
#[derive(Serialize)]
struct Lookup {
	path: String,
	found: bool,
	kind: String,
	value: Value,
}

/// Resolve `path` inside a JSON document and print what was found.
pub fn run(input: &str, path: &str, target: Option<Target>) -> Result<()> {
	let document = parse_document(input)?;
	let parsed = FieldPath::parse(path)?;
	let found = document.get_path(&parsed);

	let raw = found.cloned().unwrap_or_default();
	let value = match target {
		Some(target) => convert(&raw, target),
		None => raw,
	};

	print_json(&Lookup {
		path: parsed.to_string(),
		found: found.is_some(),
		kind: coerce::kind_of(&value).to_string(),
		value,
	})
}

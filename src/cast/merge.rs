use crate::cast::{CastError, Map, Result, Value};

/// Merge map values left to right; later keys overwrite earlier ones.
///
/// Handle and dynamic wrappers are looked through. Any input that is not a
/// map fails with its position.
pub fn merge_maps<'a>(values: impl IntoIterator<Item = &'a Value>) -> Result<Map> {
	let mut merged = Map::new();
	for (index, value) in values.into_iter().enumerate() {
		match value.innermost() {
			Value::Map(map) => merged.extend(map.iter().map(|(key, value)| (key.clone(), value.clone()))),
			other => return Err(CastError::NotAMap { index, got: other.kind() }),
		}
	}
	Ok(merged)
}
